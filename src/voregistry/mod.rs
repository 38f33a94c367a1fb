//! VORegistry 1.1: registries, authorities and harvesting
//!
//! Registry and authority records are published as `ri:Resource` roots;
//! their capabilities and interfaces are written as `xsi:type="vg:..."`.

mod models;
mod types;

pub use models::{Authority, Harvest, OaiHttp, OaiSoap, Registry, Search, REGISTRY_STANDARD_ID};
pub use types::{ExtensionSearchSupport, OptionalProtocol};

use crate::namespaces::{Namespace, RI, VG, VR, VS, XSI};

/// Namespaces declared on every VORegistry document
pub const NSMAP: &[Namespace] = &[RI, VR, VG, VS, XSI];
