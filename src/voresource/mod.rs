//! VOResource 1.1 resource metadata models
//!
//! The core vocabulary shared by all registry records: curation, content,
//! interfaces, capabilities and the base resource types.

mod models;
mod types;

pub use models::{
    AccessUrl, Capability, Contact, Content, Creator, Curation, Date, Interface, MirrorUrl,
    Organisation, Relationship, Resource, ResourceName, Rights, SecurityMethod, Service, Source,
    Validation, WebBrowser, WebService,
};
pub(crate) use models::{read_base_capability, read_base_interface, read_base_resource};
pub use types::{AccessUse, AuthorityId, IdentifierUri, ResourceStatus, ValidationLevel};

use crate::namespaces::{Namespace, VM, VR, XSD, XSI};

/// Namespaces declared on every VOResource document
pub const NSMAP: &[Namespace] = &[VR, XSD, VM, XSI];
