//! TAPRegExt 1.0: registry description of TAP services
//!
//! A TAP service declares a `tr:TableAccess` capability listing its query
//! languages, output formats, upload methods and resource limits.

mod models;

pub use models::{
    DataLimit, DataLimitUnit, DataLimits, DataModelType, Language, LanguageFeature,
    LanguageFeatureList, OutputFormat, TableAccess, TapCapRestriction, TimeLimits, UploadMethod,
    Version, TAP_STANDARD_ID,
};

use crate::namespaces::{Namespace, TR, VM, VR, XSD, XSI};

/// Namespaces declared on every TAPRegExt document
pub const NSMAP: &[Namespace] = &[VR, TR, XSD, VM, XSI];
