//! Data resources, data services and the ParamHTTP interface

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Result, ValidationError};
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, VS};
use crate::voresource::{
    read_base_interface, read_base_resource, AccessUrl, Interface, Resource, ResourceName, Rights,
    Service,
};
use serde::Serialize;

use super::models::{Coverage, Format, InputParam};
use super::tables::TableSet;
use super::types::HttpQueryType;
use super::NSMAP;

const MAX_QUERY_TYPES: usize = 2;

/// A service invoked through HTTP GET or POST with keyword arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamHttp {
    /// Common interface fields
    #[serde(flatten)]
    pub interface: Interface,
    /// Supported request methods (at most two)
    pub query_type: Vec<HttpQueryType>,
    /// MIME type of the response
    pub result_type: Option<String>,
    /// Input parameters
    pub param: Vec<InputParam>,
    /// Arguments that produce a legal, non-null response
    pub test_query: Option<String>,
}

impl ParamHttp {
    /// A ParamHTTP interface with the given base interface
    pub fn new(interface: Interface) -> Self {
        Self {
            interface,
            ..Self::default()
        }
    }

    /// Find an input parameter by name
    pub fn find_param(&self, name: &str) -> Option<&InputParam> {
        self.param
            .iter()
            .find(|p| p.param.name.as_deref() == Some(name))
    }
}

impl XmlElement for ParamHttp {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let query_type: Vec<HttpQueryType> = node.child_values("queryType".into())?;
        if query_type.len() > MAX_QUERY_TYPES {
            return Err(ValidationError::new(format!(
                "at most {} queryType elements are allowed",
                MAX_QUERY_TYPES
            ))
            .with_path("interface/queryType")
            .with_value(query_type.len().to_string())
            .into());
        }
        Ok(Self {
            interface: read_base_interface(node)?,
            query_type,
            result_type: node.child_value("resultType".into())?,
            param: node.child_models("param".into())?,
            test_query: node.child_value("testQuery".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.interface.write(element, options);
        element.set_xsi_type(VS, "ParamHTTP");
        element.push_values("queryType".into(), &self.query_type);
        element.push_opt_value("resultType".into(), self.result_type.as_ref());
        element.push_models("param".into(), &self.param, options);
        element.push_opt_value("testQuery".into(), self.test_query.as_ref());
    }
}

impl XmlModel for ParamHttp {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A service publishing astronomical data without a common tabular schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataResource {
    /// Common service fields
    #[serde(flatten)]
    pub service: Service,
    /// Facilities used to collect the data
    pub facility: Vec<ResourceName>,
    /// Instruments used to collect the data
    pub instrument: Vec<ResourceName>,
    /// Extent of the data over space, time and frequency
    pub coverage: Option<Coverage>,
}

impl DataResource {
    /// A data resource with no facility, instrument or coverage
    pub fn new(service: Service) -> Self {
        Self {
            service,
            facility: Vec::new(),
            instrument: Vec::new(),
            coverage: None,
        }
    }

    fn read_fields(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            service: Service::read(node)?,
            facility: node.child_models("facility".into())?,
            instrument: node.child_models("instrument".into())?,
            coverage: node.child_model("coverage".into())?,
        })
    }

    fn write_fields(&self, element: &mut Element, options: &WriteOptions, xsi_type: &str) {
        self.service.write(element, options);
        element.set_xsi_type(VS, xsi_type);
        element.push_models("facility".into(), &self.facility, options);
        element.push_models("instrument".into(), &self.instrument, options);
        element.push_opt_model("coverage".into(), self.coverage.as_ref(), options);
    }
}

impl XmlElement for DataResource {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Self::read_fields(node)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.write_fields(element, options, "DataResource");
    }
}

impl XmlModel for DataResource {
    const TAG: XmlName = XmlName::local("DataResource");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A service for accessing astronomical data without a common tabular schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataService {
    /// Service, facility, instrument and coverage fields
    #[serde(flatten)]
    pub data_resource: DataResource,
}

impl XmlElement for DataService {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            data_resource: DataResource::read_fields(node)?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.data_resource.write_fields(element, options, "DataService");
    }
}

impl XmlModel for DataService {
    const TAG: XmlName = XmlName::local("DataService");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A resource giving astronomical data in tabular form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogResource {
    /// Service, facility, instrument and coverage fields
    #[serde(flatten)]
    pub data_resource: DataResource,
    /// Tables accessible through the resource
    pub tableset: Option<TableSet>,
}

impl XmlElement for CatalogResource {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            data_resource: DataResource::read_fields(node)?,
            tableset: node.child_model("tableset".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.data_resource
            .write_fields(element, options, "CatalogResource");
        element.push_opt_model("tableset".into(), self.tableset.as_ref(), options);
    }
}

impl XmlModel for CatalogResource {
    const TAG: XmlName = XmlName::local("CatalogResource");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A service interacting with astronomical data through specified tables
///
/// The usual record type for TAP, SSAP, SIAP and cone search services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogService {
    /// Service, facility, instrument and coverage fields
    #[serde(flatten)]
    pub data_resource: DataResource,
    /// Tables accessible through the service
    pub tableset: Option<TableSet>,
}

impl CatalogService {
    /// A catalog service with no tables
    pub fn new(service: Service) -> Self {
        Self {
            data_resource: DataResource::new(service),
            tableset: None,
        }
    }
}

impl XmlElement for CatalogService {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            data_resource: DataResource::read_fields(node)?,
            tableset: node.child_model("tableset".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.data_resource
            .write_fields(element, options, "CatalogService");
        element.push_opt_model("tableset".into(), self.tableset.as_ref(), options);
    }
}

impl XmlModel for CatalogService {
    const TAG: XmlName = XmlName::local("CatalogService");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A logical grouping of datasets (deprecated in favour of CatalogResource)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataCollection {
    /// Common resource fields
    #[serde(flatten)]
    pub resource: Resource,
    /// Facilities used to collect the data
    pub facility: Vec<ResourceName>,
    /// Instruments used to collect the data
    pub instrument: Vec<ResourceName>,
    /// Usage restrictions
    pub rights: Vec<Rights>,
    /// Formats the data is available in
    pub format: Vec<Format>,
    /// Extent of the data over space, time and frequency
    pub coverage: Option<Coverage>,
    /// Tables in the collection
    pub tableset: Option<TableSet>,
    /// Download location
    pub access_url: Option<AccessUrl>,
}

impl XmlElement for DataCollection {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            resource: read_base_resource(node)?,
            facility: node.child_models("facility".into())?,
            instrument: node.child_models("instrument".into())?,
            rights: node.child_models("rights".into())?,
            format: node.child_models("format".into())?,
            coverage: node.child_model("coverage".into())?,
            tableset: node.child_model("tableset".into())?,
            access_url: node.child_model("accessURL".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.resource.write(element, options);
        element.set_xsi_type(VS, "DataCollection");
        element.push_models("facility".into(), &self.facility, options);
        element.push_models("instrument".into(), &self.instrument, options);
        element.push_models("rights".into(), &self.rights, options);
        element.push_models("format".into(), &self.format, options);
        element.push_opt_model("coverage".into(), self.coverage.as_ref(), options);
        element.push_opt_model("tableset".into(), self.tableset.as_ref(), options);
        element.push_opt_model("accessURL".into(), self.access_url.as_ref(), options);
    }
}

impl XmlModel for DataCollection {
    const TAG: XmlName = XmlName::local("DataCollection");
    const NSMAP: &'static [Namespace] = NSMAP;
}
