//! Universal Worker Service (UWS) 1.0/1.1 job models
//!
//! All elements live in the `uws` namespace; job and result references
//! carry `xlink` attributes.

mod models;
mod parameters;
mod types;

pub use models::{ErrorSummary, Job, JobSummary, Jobs, ResultReference, Results, ShortJobDescription};
pub use parameters::{JobParameters, Parameter, ParameterMap, ParameterValue};
pub use types::{ErrorType, ExecutionPhase, UwsVersion};

use crate::namespaces::{Namespace, UWS, XLINK, XSD, XSI};

/// Namespaces declared on every UWS document
pub const NSMAP: &[Namespace] = &[UWS, XLINK, XSD, XSI];
