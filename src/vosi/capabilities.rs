//! The VOSI capabilities document

use crate::any::AnyCapability;
use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, TR, VG, VOSI_CAPABILITIES, VR, VS, XSI};
use serde::Serialize;

/// The capabilities of a service, as returned by its VOSI endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VosiCapabilities {
    /// Capability elements, dispatched on `xsi:type`
    pub capability: Vec<AnyCapability>,
}

impl VosiCapabilities {
    /// A document listing the given capabilities
    pub fn new(capability: Vec<AnyCapability>) -> Self {
        Self { capability }
    }

    /// First capability implementing a standard
    ///
    /// `standard_id` is compared with the parsed URL, so
    /// `ivo://ivoa.net/std/TAP` matches however it was written.
    pub fn find(&self, standard_id: &str) -> Option<&AnyCapability> {
        let wanted = url::Url::parse(standard_id).ok()?;
        self.capability.iter().find(|c| *c.standard_id() == wanted)
    }
}

impl XmlElement for VosiCapabilities {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            capability: node.child_models("capability".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_models("capability".into(), &self.capability, options);
    }
}

impl XmlModel for VosiCapabilities {
    const TAG: XmlName = VOSI_CAPABILITIES.name("capabilities");
    const NSMAP: &'static [Namespace] = &[VOSI_CAPABILITIES, VR, VS, TR, VG, XSI];
}
