//! RegistryInterface 1.0: the `VOResources` search response container

use crate::any::AnyResource;
use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Result, ValidationError};
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, RI, TR, VG, VR, VS, XSI};
use crate::voresource::IdentifierUri;
use serde::Serialize;

/// Namespaces declared on a `VOResources` document
pub const NSMAP: &[Namespace] = &[RI, VR, VS, TR, VG, XSI];

/// A page of registry search results
///
/// Holds either full resource records or bare identifiers, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoResources {
    /// Full resource records
    pub resource: Vec<AnyResource>,
    /// Identifiers of matching resources
    pub identifier: Vec<IdentifierUri>,
    /// Position of the first returned record in the full result set, from 1
    pub from: u32,
    /// Number of records in this response
    pub number_returned: u32,
    /// Whether further records are available
    pub more: bool,
}

impl VoResources {
    /// A page of resource records
    pub fn records(resource: Vec<AnyResource>, from: u32, more: bool) -> Self {
        let number_returned = u32::try_from(resource.len()).unwrap_or(u32::MAX);
        Self {
            resource,
            identifier: Vec::new(),
            from,
            number_returned,
            more,
        }
    }

    /// A page of identifiers
    pub fn identifiers(identifier: Vec<IdentifierUri>, from: u32, more: bool) -> Self {
        let number_returned = u32::try_from(identifier.len()).unwrap_or(u32::MAX);
        Self {
            resource: Vec::new(),
            identifier,
            from,
            number_returned,
            more,
        }
    }

    /// Check the container constraints
    pub fn validate(&self) -> Result<()> {
        if !self.resource.is_empty() && !self.identifier.is_empty() {
            return Err(ValidationError::new(
                "either Resource or identifier elements may be given, not both",
            )
            .with_path("VOResources")
            .into());
        }
        if self.from == 0 {
            return Err(ValidationError::new("must be greater than 0")
                .with_path("VOResources/@from")
                .with_value("0")
                .into());
        }
        if self.number_returned == 0 {
            return Err(ValidationError::new("must be greater than 0")
                .with_path("VOResources/@numberReturned")
                .with_value("0")
                .into());
        }
        Ok(())
    }
}

impl XmlElement for VoResources {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let resources = Self {
            resource: node.child_models("Resource".into())?,
            identifier: node.child_values("identifier".into())?,
            from: node.required_attr("from".into())?,
            number_returned: node.required_attr("numberReturned".into())?,
            more: node.required_attr("more".into())?,
        };
        resources.validate()?;
        Ok(resources)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_value_attr("from".into(), &self.from);
        element.set_value_attr("numberReturned".into(), &self.number_returned);
        element.set_value_attr("more".into(), &self.more);
        element.push_models(RI.name("Resource"), &self.resource, options);
        element.push_values("identifier".into(), &self.identifier);
    }
}

impl XmlModel for VoResources {
    const TAG: XmlName = RI.name("VOResources");
    const NSMAP: &'static [Namespace] = NSMAP;
}
