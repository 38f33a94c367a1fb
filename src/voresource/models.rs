//! VOResource record models
//!
//! Elements are unqualified; subtypes announce themselves through
//! `xsi:type` with the `vr` prefix.

use crate::any::{AnyCapability, AnyInterface};
use crate::datetime::UtcTimestamp;
use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Error, Result, ValidationError};
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, VR};
use serde::Serialize;
use url::Url;

use super::types::{AccessUse, IdentifierUri, ResourceStatus, ValidationLevel};
use super::NSMAP;

const SHORT_NAME_MAX: usize = 16;

/// A validation stamp: a level and the ID of the validator that assigned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// The validation level
    pub value: ValidationLevel,
    /// IVOA ID of the registry or organisation that assigned the level
    pub validated_by: Url,
}

impl Validation {
    /// Create a validation stamp
    pub fn new(value: ValidationLevel, validated_by: Url) -> Self {
        Self {
            value,
            validated_by,
        }
    }
}

impl XmlElement for Validation {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.value()?,
            validated_by: node.required_attr("validatedBy".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("validatedBy".into(), &self.validated_by);
        element.set_value(&self.value);
    }
}

impl XmlModel for Validation {
    const TAG: XmlName = XmlName::local("Validation");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The name of a potentially registered resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceName {
    /// The name
    pub value: String,
    /// IVOA identifier of the resource, when registered
    pub ivo_id: Option<IdentifierUri>,
}

impl ResourceName {
    /// A name without an identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ivo_id: None,
        }
    }

    /// Attach the IVOA identifier
    pub fn with_ivo_id(mut self, ivo_id: IdentifierUri) -> Self {
        self.ivo_id = Some(ivo_id);
        self
    }
}

impl XmlElement for ResourceName {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            ivo_id: node.attr_value("ivo-id".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("ivo-id".into(), self.ivo_id.as_ref());
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for ResourceName {
    const TAG: XmlName = XmlName::local("ResourceName");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A date associated with an event in the life cycle of the resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Date {
    /// The instant
    pub value: UtcTimestamp,
    /// The event the date refers to (`created`, `update`, ...)
    pub role: String,
}

impl Date {
    /// Role written when none is given
    pub const DEFAULT_ROLE: &'static str = "representative";

    /// A date with the given role
    pub fn new(value: UtcTimestamp, role: impl Into<String>) -> Self {
        Self {
            value,
            role: role.into(),
        }
    }
}

impl XmlElement for Date {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.value()?,
            role: node
                .attr_value("role".into())?
                .unwrap_or_else(|| Self::DEFAULT_ROLE.to_string()),
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_attr("role".into(), self.role.as_str());
        element.set_value(&self.value);
    }
}

impl XmlModel for Date {
    const TAG: XmlName = XmlName::local("Date");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A bibliographic reference from which the resource is derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// The reference (a bibcode, URL or free text)
    pub value: String,
    /// The reference format, e.g. `bibcode`
    pub format: Option<String>,
}

impl Source {
    /// A source reference without a declared format
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            format: None,
        }
    }

    /// Declare the reference format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

impl XmlElement for Source {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            format: node.attr_value("format".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("format".into(), self.format.as_ref());
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for Source {
    const TAG: XmlName = XmlName::local("Source");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A statement of usage conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rights {
    /// The statement
    pub value: String,
    /// A URI identifying the license
    pub rights_uri: Option<Url>,
}

impl Rights {
    /// A rights statement without a license URI
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            rights_uri: None,
        }
    }

    /// Attach a license URI
    pub fn with_rights_uri(mut self, rights_uri: Url) -> Self {
        self.rights_uri = Some(rights_uri);
        self
    }
}

impl XmlElement for Rights {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            rights_uri: node.attr_value("rightsURI".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("rightsURI".into(), self.rights_uri.as_ref());
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for Rights {
    const TAG: XmlName = XmlName::local("Rights");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The URL (or base URL) that a client uses to access a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessUrl {
    /// The URL
    pub value: Url,
    /// How the URL is to be used
    pub access_use: AccessUse,
}

impl AccessUrl {
    /// Create an access URL
    pub fn new(value: Url, access_use: AccessUse) -> Self {
        Self { value, access_use }
    }
}

impl XmlElement for AccessUrl {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.value()?,
            access_use: node.required_attr("use".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("use".into(), &self.access_use);
        element.set_value(&self.value);
    }
}

impl XmlModel for AccessUrl {
    const TAG: XmlName = XmlName::local("AccessURL");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A mirror of an access URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorUrl {
    /// The URL
    pub value: Url,
    /// A terse label for the mirror
    pub title: Option<String>,
}

impl XmlElement for MirrorUrl {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.value()?,
            title: node.attr_value("title".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("title".into(), self.title.as_ref());
        element.set_value(&self.value);
    }
}

impl XmlModel for MirrorUrl {
    const TAG: XmlName = XmlName::local("MirrorURL");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Information for contacting a person or group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// IVOA identifier of the contact (typically an organisation)
    pub ivo_id: Option<IdentifierUri>,
    /// Name of the person or group
    pub name: ResourceName,
    /// Mailing address in one string
    pub address: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Telephone number with international dialing code
    pub telephone: Option<String>,
    /// References in non-IVOA identifier schemes, e.g. ORCID
    pub alt_identifier: Vec<Url>,
}

impl Contact {
    /// A contact with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(ResourceName::new(name))
    }

    /// A contact with only a name
    pub fn new(name: ResourceName) -> Self {
        Self {
            ivo_id: None,
            name,
            address: None,
            email: None,
            telephone: None,
            alt_identifier: Vec::new(),
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl XmlElement for Contact {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            ivo_id: node.attr_value("ivo-id".into())?,
            name: node.required_child_model("name".into())?,
            address: node.child_value("address".into())?,
            email: node.child_value("email".into())?,
            telephone: node.child_value("telephone".into())?,
            alt_identifier: node.child_values("altIdentifier".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("ivo-id".into(), self.ivo_id.as_ref());
        element.push_model("name".into(), &self.name, options);
        element.push_opt_value("address".into(), self.address.as_ref());
        element.push_opt_value("email".into(), self.email.as_ref());
        element.push_opt_value("telephone".into(), self.telephone.as_ref());
        element.push_values("altIdentifier".into(), &self.alt_identifier);
    }
}

impl XmlModel for Contact {
    const TAG: XmlName = XmlName::local("Contact");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The entity primarily responsible for creating the content of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creator {
    /// IVOA identifier of the creator
    pub ivo_id: Option<IdentifierUri>,
    /// Name of the creator, "Last, First I." for people
    pub name: ResourceName,
    /// URL of a logo image
    pub logo: Option<Url>,
    /// References in non-IVOA identifier schemes
    pub alt_identifier: Vec<Url>,
}

impl Creator {
    /// A creator with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(ResourceName::new(name))
    }

    /// A creator with only a name
    pub fn new(name: ResourceName) -> Self {
        Self {
            ivo_id: None,
            name,
            logo: None,
            alt_identifier: Vec::new(),
        }
    }
}

impl XmlElement for Creator {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            ivo_id: node.attr_value("ivo-id".into())?,
            name: node.required_child_model("name".into())?,
            logo: node.child_value("logo".into())?,
            alt_identifier: node.child_values("altIdentifier".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("ivo-id".into(), self.ivo_id.as_ref());
        element.push_model("name".into(), &self.name, options);
        element.push_opt_value("logo".into(), self.logo.as_ref());
        element.push_values("altIdentifier".into(), &self.alt_identifier);
    }
}

impl XmlModel for Creator {
    const TAG: XmlName = XmlName::local("Creator");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A relationship between this resource and other resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// The named type of relationship, e.g. `isPartOf`
    pub relationship_type: String,
    /// The related resources
    pub related_resource: Vec<ResourceName>,
}

impl XmlElement for Relationship {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            relationship_type: node.required_child_value("relationshipType".into())?,
            related_resource: node.required_child_models("relatedResource".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_value("relationshipType".into(), &self.relationship_type);
        element.push_models("relatedResource".into(), &self.related_resource, options);
    }
}

impl XmlModel for Relationship {
    const TAG: XmlName = XmlName::local("Relationship");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A mechanism the client must employ to access the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecurityMethod {
    /// The standard the security method follows
    pub standard_id: Option<Url>,
}

impl XmlElement for SecurityMethod {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            standard_id: node.attr_value("standardID".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("standardID".into(), self.standard_id.as_ref());
    }
}

impl XmlModel for SecurityMethod {
    const TAG: XmlName = XmlName::local("SecurityMethod");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Who is responsible for the resource and how to reach them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Curation {
    /// The entity making the resource available
    pub publisher: ResourceName,
    /// Entities responsible for creating the content
    pub creator: Vec<Creator>,
    /// Entities that contributed to the content
    pub contributor: Vec<ResourceName>,
    /// Dates of life cycle events
    pub date: Vec<Date>,
    /// Version label of the resource
    pub version: Option<String>,
    /// Contacts for the resource (at least one)
    pub contact: Vec<Contact>,
}

impl Curation {
    /// Curation with a publisher and contacts
    pub fn new(publisher: ResourceName, contact: Vec<Contact>) -> Self {
        Self {
            publisher,
            creator: Vec::new(),
            contributor: Vec::new(),
            date: Vec::new(),
            version: None,
            contact,
        }
    }
}

impl XmlElement for Curation {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            publisher: node.required_child_model("publisher".into())?,
            creator: node.child_models("creator".into())?,
            contributor: node.child_models("contributor".into())?,
            date: node.child_models("date".into())?,
            version: node.child_value("version".into())?,
            contact: node.required_child_models("contact".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_model("publisher".into(), &self.publisher, options);
        element.push_models("creator".into(), &self.creator, options);
        element.push_models("contributor".into(), &self.contributor, options);
        element.push_models("date".into(), &self.date, options);
        element.push_opt_value("version".into(), self.version.as_ref());
        element.push_models("contact".into(), &self.contact, options);
    }
}

impl XmlModel for Curation {
    const TAG: XmlName = XmlName::local("Curation");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// What the resource is about and what kind of resource it is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Topics covered (at least one)
    pub subject: Vec<String>,
    /// An account of the nature of the resource
    pub description: String,
    /// A bibliographic reference the resource is derived from
    pub source: Option<Source>,
    /// URL to more information about the resource
    pub reference_url: Url,
    /// Nature or genre of the content
    pub content_type: Vec<String>,
    /// Intended audience
    pub content_level: Vec<String>,
    /// Relationships to other resources
    pub relationship: Vec<Relationship>,
}

impl Content {
    /// Content with the required fields
    pub fn new(subject: Vec<String>, description: impl Into<String>, reference_url: Url) -> Self {
        Self {
            subject,
            description: description.into(),
            source: None,
            reference_url,
            content_type: Vec::new(),
            content_level: Vec::new(),
            relationship: Vec::new(),
        }
    }
}

impl XmlElement for Content {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            subject: node.required_child_values("subject".into())?,
            description: node.required_child_value("description".into())?,
            source: node.child_model("source".into())?,
            reference_url: node.required_child_value("referenceURL".into())?,
            content_type: node.child_values("type".into())?,
            content_level: node.child_values("contentLevel".into())?,
            relationship: node.child_models("relationship".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_values("subject".into(), &self.subject);
        element.push_value("description".into(), &self.description);
        element.push_opt_model("source".into(), self.source.as_ref(), options);
        element.push_value("referenceURL".into(), &self.reference_url);
        element.push_values("type".into(), &self.content_type);
        element.push_values("contentLevel".into(), &self.content_level);
        element.push_models("relationship".into(), &self.relationship, options);
    }
}

impl XmlModel for Content {
    const TAG: XmlName = XmlName::local("Content");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A service interface
///
/// Concrete interfaces (`vr:WebBrowser`, `vs:ParamHTTP`, ...) extend this
/// type. A plain `Interface` keeps whatever `xsi:type` it was read with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Version of the standard the interface complies with
    pub version: Option<String>,
    /// Role of the interface, e.g. `std`
    pub role: Option<String>,
    /// `xsi:type` of an interface not modelled by a subtype
    pub xsi_type: Option<String>,
    /// URLs to access the interface (at least one)
    pub access_url: Vec<AccessUrl>,
    /// Mirrors of the access URLs
    pub mirror_url: Vec<MirrorUrl>,
    /// Security mechanisms the client must use
    pub security_method: Vec<SecurityMethod>,
    /// A query string that returns a valid response
    pub test_query_string: Option<String>,
}

impl Interface {
    /// An interface with a single access URL
    pub fn new(access_url: AccessUrl) -> Self {
        Self {
            access_url: vec![access_url],
            ..Self::default()
        }
    }

    /// Set the role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl XmlElement for Interface {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            version: node.attr_value("version".into())?,
            role: node.attr_value("role".into())?,
            xsi_type: node.xsi_type_name(),
            access_url: node.required_child_models("accessURL".into())?,
            mirror_url: node.child_models("mirrorURL".into())?,
            security_method: node.child_models("securityMethod".into())?,
            test_query_string: node.child_value("testQueryString".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("version".into(), self.version.as_ref());
        element.set_opt_attr("role".into(), self.role.as_ref());
        if let Some(xsi_type) = &self.xsi_type {
            element.set_xsi_type_name(xsi_type);
        }
        element.push_models("accessURL".into(), &self.access_url, options);
        element.push_models("mirrorURL".into(), &self.mirror_url, options);
        element.push_models("securityMethod".into(), &self.security_method, options);
        element.push_opt_value("testQueryString".into(), self.test_query_string.as_ref());
    }
}

impl XmlModel for Interface {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Read the base part of an interface subtype
pub(crate) fn read_base_interface(node: XmlNode<'_, '_>) -> Result<Interface> {
    let mut interface = Interface::read(node)?;
    interface.xsi_type = None;
    Ok(interface)
}

/// An interface a human uses through a web browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebBrowser {
    /// Common interface fields
    #[serde(flatten)]
    pub interface: Interface,
}

impl XmlElement for WebBrowser {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            interface: read_base_interface(node)?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.interface.write(element, options);
        element.set_xsi_type(VR, "WebBrowser");
    }
}

impl XmlModel for WebBrowser {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A web service described by a WSDL document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebService {
    /// Common interface fields
    #[serde(flatten)]
    pub interface: Interface,
    /// Locations of the WSDL document
    pub wsdl_url: Vec<Url>,
}

impl XmlElement for WebService {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            interface: read_base_interface(node)?,
            wsdl_url: node.child_values("wsdlURL".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.interface.write(element, options);
        element.set_xsi_type(VR, "WebService");
        element.push_values("wsdlURL".into(), &self.wsdl_url);
    }
}

impl XmlModel for WebService {
    const TAG: XmlName = XmlName::local("interface");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Any entity or component of a VO application that is describable and
/// identifiable by an IVOA identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// When the record was created
    pub created: UtcTimestamp,
    /// When the record was last updated
    pub updated: UtcTimestamp,
    /// Status of the record
    pub status: ResourceStatus,
    /// VOResource version the record complies with
    pub version: Option<String>,
    /// `xsi:type` of a resource not modelled by a subtype
    pub xsi_type: Option<String>,
    /// Validation stamps
    pub validation_level: Vec<Validation>,
    /// Full name of the resource
    pub title: String,
    /// Short name (at most 16 characters)
    pub short_name: Option<String>,
    /// Unambiguous reference to the resource
    pub identifier: Url,
    /// References in non-IVOA identifier schemes
    pub alt_identifier: Vec<Url>,
    /// Curation metadata
    pub curation: Curation,
    /// Content metadata
    pub content: Content,
}

impl Resource {
    /// A new active resource created and updated now
    pub fn new(title: impl Into<String>, identifier: Url, curation: Curation, content: Content) -> Self {
        let now = UtcTimestamp::now();
        Self {
            created: now,
            updated: now,
            status: ResourceStatus::Active,
            version: None,
            xsi_type: None,
            validation_level: Vec::new(),
            title: title.into(),
            short_name: None,
            identifier,
            alt_identifier: Vec::new(),
            curation,
            content,
        }
    }

    /// Check field constraints
    ///
    /// The short name holds at most 16 characters and neither timestamp
    /// lies in the future.
    pub fn validate(&self) -> Result<()> {
        if let Some(short_name) = &self.short_name {
            if short_name.chars().count() > SHORT_NAME_MAX {
                return Err(ValidationError::new(format!(
                    "short name must be no more than {} characters",
                    SHORT_NAME_MAX
                ))
                .with_path("shortName")
                .with_value(short_name.as_str())
                .into());
            }
        }

        let now = UtcTimestamp::now();
        for (path, value) in [("@created", self.created), ("@updated", self.updated)] {
            if value > now {
                return Err(ValidationError::new("timestamp must not be in the future")
                    .with_path(path)
                    .with_value(value.to_string())
                    .into());
            }
        }
        Ok(())
    }
}

impl XmlElement for Resource {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let resource = Self {
            created: node.required_attr("created".into())?,
            updated: node.required_attr("updated".into())?,
            status: node.required_attr("status".into())?,
            version: node.attr_value("version".into())?,
            xsi_type: node.xsi_type_name(),
            validation_level: node.child_models("validationLevel".into())?,
            title: node.required_child_value("title".into())?,
            short_name: node.child_value("shortName".into())?,
            identifier: node.required_child_value("identifier".into())?,
            alt_identifier: node.child_values("altIdentifier".into())?,
            curation: node.required_child_model("curation".into())?,
            content: node.required_child_model("content".into())?,
        };
        resource.validate()?;
        Ok(resource)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_value_attr("created".into(), &self.created);
        element.set_value_attr("updated".into(), &self.updated);
        element.set_value_attr("status".into(), &self.status);
        element.set_opt_attr("version".into(), self.version.as_ref());
        if let Some(xsi_type) = &self.xsi_type {
            element.set_xsi_type_name(xsi_type);
        }
        element.push_models("validationLevel".into(), &self.validation_level, options);
        element.push_value("title".into(), &self.title);
        element.push_opt_value("shortName".into(), self.short_name.as_ref());
        element.push_value("identifier".into(), &self.identifier);
        element.push_values("altIdentifier".into(), &self.alt_identifier);
        element.push_model("curation".into(), &self.curation, options);
        element.push_model("content".into(), &self.content, options);
    }
}

impl XmlModel for Resource {
    const TAG: XmlName = XmlName::local("Resource");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Read the base part of a resource subtype
pub(crate) fn read_base_resource(node: XmlNode<'_, '_>) -> Result<Resource> {
    let mut resource = Resource::read(node)?;
    resource.xsi_type = None;
    Ok(resource)
}

/// A named group of people and facilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organisation {
    /// Common resource fields
    #[serde(flatten)]
    pub resource: Resource,
    /// Observatories or facilities operated by the organisation
    pub facility: Vec<ResourceName>,
    /// Instruments associated with the organisation
    pub instrument: Vec<ResourceName>,
}

impl Organisation {
    /// An organisation without facilities or instruments
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            facility: Vec::new(),
            instrument: Vec::new(),
        }
    }
}

impl XmlElement for Organisation {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            resource: read_base_resource(node)?,
            facility: node.child_models("facility".into())?,
            instrument: node.child_models("instrument".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.resource.write(element, options);
        element.set_xsi_type(VR, "Organisation");
        element.push_models("facility".into(), &self.facility, options);
        element.push_models("instrument".into(), &self.instrument, options);
    }
}

impl XmlModel for Organisation {
    const TAG: XmlName = XmlName::local("Organisation");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A description of a behaviour of a service, usually a standard protocol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capability {
    /// Identifier of the standard the capability implements
    pub standard_id: Url,
    /// `xsi:type` of a capability not modelled by a subtype
    pub xsi_type: Option<String>,
    /// Validation stamps
    pub validation_level: Vec<Validation>,
    /// Human-readable description
    pub description: Option<String>,
    /// Interfaces providing the capability
    pub interface: Vec<AnyInterface>,
}

impl Capability {
    /// A capability implementing the given standard
    pub fn new(standard_id: Url) -> Self {
        Self {
            standard_id,
            xsi_type: None,
            validation_level: Vec::new(),
            description: None,
            interface: Vec::new(),
        }
    }

    /// Add an interface
    pub fn with_interface(mut self, interface: impl Into<AnyInterface>) -> Self {
        self.interface.push(interface.into());
        self
    }
}

impl XmlElement for Capability {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let mut capability = read_base_capability(node, None)?;
        capability.xsi_type = node.xsi_type_name();
        Ok(capability)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_value_attr("standardID".into(), &self.standard_id);
        if let Some(xsi_type) = &self.xsi_type {
            element.set_xsi_type_name(xsi_type);
        }
        element.push_models("validationLevel".into(), &self.validation_level, options);
        element.push_opt_value("description".into(), self.description.as_ref());
        element.push_models("interface".into(), &self.interface, options);
    }
}

impl XmlModel for Capability {
    const TAG: XmlName = XmlName::local("capability");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Read the base part of a capability subtype
///
/// `default_standard_id` is used when the element has no `standardID`.
pub(crate) fn read_base_capability(
    node: XmlNode<'_, '_>,
    default_standard_id: Option<&Url>,
) -> Result<Capability> {
    let standard_id = match (node.attr_value("standardID".into())?, default_standard_id) {
        (Some(id), _) => id,
        (None, Some(default)) => default.clone(),
        (None, None) => return Err(Error::missing_attribute("standardID", node.local_name())),
    };
    Ok(Capability {
        standard_id,
        xsi_type: None,
        validation_level: node.child_models("validationLevel".into())?,
        description: node.child_value("description".into())?,
        interface: node.child_models("interface".into())?,
    })
}

/// A resource that can be invoked by a client to perform some action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// Common resource fields
    #[serde(flatten)]
    pub resource: Resource,
    /// Usage restrictions
    pub rights: Vec<Rights>,
    /// Capabilities of the service
    pub capability: Vec<AnyCapability>,
}

impl Service {
    /// A service without rights statements or capabilities
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            rights: Vec::new(),
            capability: Vec::new(),
        }
    }

    /// Add a capability
    pub fn with_capability(mut self, capability: impl Into<AnyCapability>) -> Self {
        self.capability.push(capability.into());
        self
    }
}

impl XmlElement for Service {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            resource: read_base_resource(node)?,
            rights: node.child_models("rights".into())?,
            capability: node.child_models("capability".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.resource.write(element, options);
        element.set_xsi_type(VR, "Service");
        element.push_models("rights".into(), &self.rights, options);
        element.push_models("capability".into(), &self.capability, options);
    }
}

impl XmlModel for Service {
    const TAG: XmlName = XmlName::local("Service");
    const NSMAP: &'static [Namespace] = NSMAP;
}
