//! Polymorphic interfaces, capabilities and resources
//!
//! Registry documents mix base types and extension types under the same
//! element name and tell them apart with `xsi:type`. The enums here read
//! the attribute and dispatch to the matching model; types this crate does
//! not model fall back to the generic base type, which keeps the original
//! `xsi:type` so it is written back unchanged.

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, RI, TR, VG, VM, VR, VS, XSD, XSI};
use crate::tapregext::TableAccess;
use crate::vodataservice::{
    CatalogResource, CatalogService, DataCollection, DataResource, DataService, ParamHttp,
};
use crate::voregistry::{Authority, Harvest, OaiHttp, OaiSoap, Registry, Search};
use crate::voresource::{
    Capability, Interface, Organisation, Resource, Service, WebBrowser, WebService,
};
use serde::Serialize;
use tracing::trace;
use url::Url;

/// Namespaces declared on a standalone polymorphic element
const NSMAP: &[Namespace] = &[VR, VS, TR, VG, XSD, VM, XSI];

macro_rules! impl_from_variants {
    ($enum:ident { $($variant:ident($ty:ty)),+ $(,)? }) => {
        $(
            impl From<$ty> for $enum {
                fn from(value: $ty) -> Self {
                    $enum::$variant(value.into())
                }
            }
        )+
    };
}

/// Any interface element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum AnyInterface {
    /// An interface without a modelled extension type
    Interface(Interface),
    /// `vr:WebBrowser`
    WebBrowser(WebBrowser),
    /// `vr:WebService`
    WebService(WebService),
    /// `vs:ParamHTTP`
    ParamHttp(ParamHttp),
    /// `vg:OAIHTTP`
    OaiHttp(OaiHttp),
    /// `vg:OAISOAP`
    OaiSoap(OaiSoap),
}

impl AnyInterface {
    /// The common interface fields
    pub fn interface(&self) -> &Interface {
        match self {
            AnyInterface::Interface(i) => i,
            AnyInterface::WebBrowser(i) => &i.interface,
            AnyInterface::WebService(i) => &i.interface,
            AnyInterface::ParamHttp(i) => &i.interface,
            AnyInterface::OaiHttp(i) => &i.interface,
            AnyInterface::OaiSoap(i) => &i.web_service.interface,
        }
    }

    /// The first access URL
    pub fn access_url(&self) -> Option<&Url> {
        self.interface().access_url.first().map(|a| &a.value)
    }
}

impl_from_variants!(AnyInterface {
    Interface(Interface),
    WebBrowser(WebBrowser),
    WebService(WebService),
    ParamHttp(ParamHttp),
    OaiHttp(OaiHttp),
    OaiSoap(OaiSoap),
});

impl XmlElement for AnyInterface {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let xsi_type = node.xsi_type_key();
        trace!(?xsi_type, "dispatching interface");
        Ok(match xsi_type {
            Some(("vr", "WebBrowser")) => WebBrowser::read(node)?.into(),
            Some(("vr", "WebService")) => WebService::read(node)?.into(),
            Some(("vs", "ParamHTTP")) => ParamHttp::read(node)?.into(),
            Some(("vg", "OAIHTTP")) => OaiHttp::read(node)?.into(),
            Some(("vg", "OAISOAP")) => OaiSoap::read(node)?.into(),
            _ => Interface::read(node)?.into(),
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        match self {
            AnyInterface::Interface(i) => i.write(element, options),
            AnyInterface::WebBrowser(i) => i.write(element, options),
            AnyInterface::WebService(i) => i.write(element, options),
            AnyInterface::ParamHttp(i) => i.write(element, options),
            AnyInterface::OaiHttp(i) => i.write(element, options),
            AnyInterface::OaiSoap(i) => i.write(element, options),
        }
    }
}

impl XmlModel for AnyInterface {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Any capability element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AnyCapability {
    /// A capability without a modelled extension type
    Capability(Capability),
    /// `tr:TableAccess`
    TableAccess(Box<TableAccess>),
    /// `vg:Harvest`
    Harvest(Harvest),
    /// `vg:Search`
    Search(Search),
}

impl AnyCapability {
    /// The common capability fields
    pub fn capability(&self) -> &Capability {
        match self {
            AnyCapability::Capability(c) => c,
            AnyCapability::TableAccess(c) => &c.restriction.capability,
            AnyCapability::Harvest(c) => &c.capability,
            AnyCapability::Search(c) => &c.capability,
        }
    }

    /// Identifier of the implemented standard
    pub fn standard_id(&self) -> &Url {
        &self.capability().standard_id
    }
}

impl_from_variants!(AnyCapability {
    Capability(Capability),
    TableAccess(TableAccess),
    Harvest(Harvest),
    Search(Search),
});

impl XmlElement for AnyCapability {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let xsi_type = node.xsi_type_key();
        trace!(?xsi_type, "dispatching capability");
        Ok(match xsi_type {
            Some(("tr", "TableAccess")) => TableAccess::read(node)?.into(),
            Some(("vg", "Harvest")) => Harvest::read(node)?.into(),
            Some(("vg", "Search")) => Search::read(node)?.into(),
            _ => Capability::read(node)?.into(),
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        match self {
            AnyCapability::Capability(c) => c.write(element, options),
            AnyCapability::TableAccess(c) => c.write(element, options),
            AnyCapability::Harvest(c) => c.write(element, options),
            AnyCapability::Search(c) => c.write(element, options),
        }
    }
}

impl XmlModel for AnyCapability {
    const TAG: XmlName = XmlName::local("capability");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Any resource record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AnyResource {
    /// A resource without a modelled extension type
    Resource(Resource),
    /// `vr:Organisation`
    Organisation(Organisation),
    /// `vr:Service`
    Service(Service),
    /// `vs:DataResource`
    DataResource(DataResource),
    /// `vs:DataService`
    DataService(DataService),
    /// `vs:CatalogResource`
    CatalogResource(CatalogResource),
    /// `vs:CatalogService`
    CatalogService(CatalogService),
    /// `vs:DataCollection`
    DataCollection(DataCollection),
    /// `vg:Registry`
    Registry(Registry),
    /// `vg:Authority`
    Authority(Authority),
}

impl AnyResource {
    /// The common resource fields
    pub fn resource(&self) -> &Resource {
        match self {
            AnyResource::Resource(r) => r,
            AnyResource::Organisation(r) => &r.resource,
            AnyResource::Service(r) => &r.resource,
            AnyResource::DataResource(r) => &r.service.resource,
            AnyResource::DataService(r) => &r.data_resource.service.resource,
            AnyResource::CatalogResource(r) => &r.data_resource.service.resource,
            AnyResource::CatalogService(r) => &r.data_resource.service.resource,
            AnyResource::DataCollection(r) => &r.resource,
            AnyResource::Registry(r) => &r.service.resource,
            AnyResource::Authority(r) => &r.resource,
        }
    }

    /// The service part of service-like resources
    pub fn service(&self) -> Option<&Service> {
        match self {
            AnyResource::Service(s) => Some(s),
            AnyResource::DataResource(r) => Some(&r.service),
            AnyResource::DataService(r) => Some(&r.data_resource.service),
            AnyResource::CatalogResource(r) => Some(&r.data_resource.service),
            AnyResource::CatalogService(r) => Some(&r.data_resource.service),
            AnyResource::Registry(r) => Some(&r.service),
            _ => None,
        }
    }

    /// Name of the concrete resource type
    pub fn type_name(&self) -> &'static str {
        match self {
            AnyResource::Resource(_) => "Resource",
            AnyResource::Organisation(_) => "Organisation",
            AnyResource::Service(_) => "Service",
            AnyResource::DataResource(_) => "DataResource",
            AnyResource::DataService(_) => "DataService",
            AnyResource::CatalogResource(_) => "CatalogResource",
            AnyResource::CatalogService(_) => "CatalogService",
            AnyResource::DataCollection(_) => "DataCollection",
            AnyResource::Registry(_) => "Registry",
            AnyResource::Authority(_) => "Authority",
        }
    }

    /// The resource identifier
    pub fn identifier(&self) -> &Url {
        &self.resource().identifier
    }

    /// Capabilities of service-like resources, empty otherwise
    pub fn capabilities(&self) -> &[AnyCapability] {
        self.service().map(|s| s.capability.as_slice()).unwrap_or(&[])
    }
}

impl_from_variants!(AnyResource {
    Resource(Resource),
    Organisation(Organisation),
    Service(Service),
    DataResource(DataResource),
    DataService(DataService),
    CatalogResource(CatalogResource),
    CatalogService(CatalogService),
    DataCollection(DataCollection),
    Registry(Registry),
    Authority(Authority),
});

impl XmlElement for AnyResource {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let xsi_type = node.xsi_type_key();
        trace!(?xsi_type, "dispatching resource");
        Ok(match xsi_type {
            Some(("vr", "Organisation")) => Organisation::read(node)?.into(),
            Some(("vr", "Service")) => Service::read(node)?.into(),
            Some(("vs", "DataResource")) => DataResource::read(node)?.into(),
            Some(("vs", "DataService")) => DataService::read(node)?.into(),
            Some(("vs", "CatalogResource")) => CatalogResource::read(node)?.into(),
            Some(("vs", "CatalogService")) => CatalogService::read(node)?.into(),
            Some(("vs", "DataCollection")) => DataCollection::read(node)?.into(),
            Some(("vg", "Registry")) => Registry::read(node)?.into(),
            Some(("vg", "Authority")) => Authority::read(node)?.into(),
            _ => Resource::read(node)?.into(),
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        match self {
            AnyResource::Resource(r) => r.write(element, options),
            AnyResource::Organisation(r) => r.write(element, options),
            AnyResource::Service(r) => r.write(element, options),
            AnyResource::DataResource(r) => r.write(element, options),
            AnyResource::DataService(r) => r.write(element, options),
            AnyResource::CatalogResource(r) => r.write(element, options),
            AnyResource::CatalogService(r) => r.write(element, options),
            AnyResource::DataCollection(r) => r.write(element, options),
            AnyResource::Registry(r) => r.write(element, options),
            AnyResource::Authority(r) => r.write(element, options),
        }
    }
}

impl XmlModel for AnyResource {
    const TAG: XmlName = RI.name("Resource");
    const NSMAP: &'static [Namespace] = &[RI, VR, VS, TR, VG, XSD, VM, XSI];
}
