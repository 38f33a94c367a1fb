//! Registry, authority, harvesting and search models

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Result, ValidationError};
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, RI, VG};
use crate::vodataservice::TableSet;
use crate::voresource::{
    read_base_capability, read_base_interface, read_base_resource, AuthorityId, Capability,
    Interface, Resource, ResourceName, Service, WebService,
};
use serde::Serialize;
use url::Url;

use super::types::{ExtensionSearchSupport, OptionalProtocol};
use super::NSMAP;

/// Standard identifier of registry harvesting and search capabilities
pub const REGISTRY_STANDARD_ID: &str = "ivo://ivoa.net/std/Registry";

fn registry_standard_id() -> Result<Url> {
    Ok(Url::parse(REGISTRY_STANDARD_ID)?)
}

fn check_max_records(max_records: i32, path: &str) -> Result<()> {
    if max_records < 0 {
        return Err(ValidationError::new("maxRecords must not be negative")
            .with_path(path)
            .with_value(max_records.to_string())
            .into());
    }
    Ok(())
}

/// The standard OAI-PMH interface over HTTP GET or POST
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OaiHttp {
    /// Common interface fields
    #[serde(flatten)]
    pub interface: Interface,
}

impl XmlElement for OaiHttp {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            interface: read_base_interface(node)?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.interface.write(element, options);
        element.set_xsi_type(VG, "OAIHTTP");
    }
}

impl XmlModel for OaiHttp {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The standard OAI-PMH interface over SOAP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OaiSoap {
    /// Web service fields
    #[serde(flatten)]
    pub web_service: WebService,
}

impl XmlElement for OaiSoap {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            web_service: WebService::read(node)?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.web_service.write(element, options);
        element.set_xsi_type(VG, "OAISOAP");
    }
}

impl XmlModel for OaiSoap {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A service providing access to resource descriptions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registry {
    /// Common service fields
    #[serde(flatten)]
    pub service: Service,
    /// Whether the registry holds every record of its managed authorities
    pub full: bool,
    /// Authorities whose records originate here
    pub managed_authority: Vec<AuthorityId>,
    /// Tables exposed by the registry's relational interface
    pub tableset: Option<TableSet>,
}

impl Registry {
    /// A registry without managed authorities
    pub fn new(service: Service, full: bool) -> Self {
        Self {
            service,
            full,
            managed_authority: Vec::new(),
            tableset: None,
        }
    }

    /// Whether the registry manages the given authority ID
    pub fn manages(&self, authority: &str) -> bool {
        self.managed_authority.iter().any(|a| a.as_str() == authority)
    }
}

impl XmlElement for Registry {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            service: Service::read(node)?,
            full: node.required_child_value("full".into())?,
            managed_authority: node.child_values("managedAuthority".into())?,
            tableset: node.child_model("tableset".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.service.write(element, options);
        element.set_xsi_type(VG, "Registry");
        element.push_value("full".into(), &self.full);
        element.push_values("managedAuthority".into(), &self.managed_authority);
        element.push_opt_model("tableset".into(), self.tableset.as_ref(), options);
    }
}

impl XmlModel for Registry {
    const TAG: XmlName = RI.name("Resource");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A harvesting capability, usually offered through OAI-PMH
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Harvest {
    /// Common capability fields
    #[serde(flatten)]
    pub capability: Capability,
    /// Largest number of records returned per response
    pub max_records: i32,
}

impl Harvest {
    /// A harvesting capability with the registry standard identifier
    pub fn new(max_records: i32) -> Result<Self> {
        Ok(Self {
            capability: Capability::new(registry_standard_id()?),
            max_records,
        })
    }
}

impl XmlElement for Harvest {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let max_records = node.required_child_value("maxRecords".into())?;
        check_max_records(max_records, "capability/maxRecords")?;
        Ok(Self {
            capability: read_base_capability(node, Some(&registry_standard_id()?))?,
            max_records,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.capability.write(element, options);
        element.set_xsi_type(VG, "Harvest");
        element.push_value("maxRecords".into(), &self.max_records);
    }
}

impl XmlModel for Harvest {
    const TAG: XmlName = XmlName::local("capability");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A searchable registry capability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Search {
    /// Common capability fields
    #[serde(flatten)]
    pub capability: Capability,
    /// Largest number of records returned per response
    pub max_records: i32,
    /// How much extension metadata can be searched
    pub extension_search_support: Option<ExtensionSearchSupport>,
    /// Supported search protocol extensions
    pub optional_protocol: Vec<OptionalProtocol>,
}

impl Search {
    /// A search capability with the registry standard identifier
    pub fn new(max_records: i32) -> Result<Self> {
        Ok(Self {
            capability: Capability::new(registry_standard_id()?),
            max_records,
            extension_search_support: None,
            optional_protocol: Vec::new(),
        })
    }
}

impl XmlElement for Search {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let max_records = node.required_child_value("maxRecords".into())?;
        check_max_records(max_records, "capability/maxRecords")?;
        Ok(Self {
            capability: read_base_capability(node, Some(&registry_standard_id()?))?,
            max_records,
            extension_search_support: node.child_value("extensionSearchSupport".into())?,
            optional_protocol: node.child_values("optionalProtocol".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.capability.write(element, options);
        element.set_xsi_type(VG, "Search");
        element.push_value("maxRecords".into(), &self.max_records);
        element.push_opt_value(
            "extensionSearchSupport".into(),
            self.extension_search_support.as_ref(),
        );
        element.push_values("optionalProtocol".into(), &self.optional_protocol);
    }
}

impl XmlModel for Search {
    const TAG: XmlName = XmlName::local("capability");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A naming authority that assigns identifiers under an authority ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authority {
    /// Common resource fields
    #[serde(flatten)]
    pub resource: Resource,
    /// Organisation responsible for the authority
    pub managing_org: ResourceName,
}

impl Authority {
    /// An authority managed by the given organisation
    pub fn new(resource: Resource, managing_org: ResourceName) -> Self {
        Self {
            resource,
            managing_org,
        }
    }
}

impl XmlElement for Authority {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            resource: read_base_resource(node)?,
            managing_org: node.required_child_model("managingOrg".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.resource.write(element, options);
        element.set_xsi_type(VG, "Authority");
        element.push_model("managingOrg".into(), &self.managing_org, options);
    }
}

impl XmlModel for Authority {
    const TAG: XmlName = RI.name("Resource");
    const NSMAP: &'static [Namespace] = NSMAP;
}
