//! # vo-models
//!
//! Typed models for the XML documents exchanged by Virtual Observatory
//! services: UWS job descriptions, VOSI endpoints, and the VOResource
//! family of registry records (VODataService, TAPRegExt, VORegistry and
//! RegistryInterface).
//!
//! Every model reads from and writes to XML with the exact element and
//! attribute names of the IVOA schemas, and serializes to JSON through
//! serde.
//!
//! ## Example
//!
//! ```rust
//! use vo_models::model::XmlModel;
//! use vo_models::uws::{ErrorSummary, ErrorType};
//!
//! let summary = ErrorSummary::new(ErrorType::Transient, "Invalid query.").with_detail(true);
//! let xml = summary.to_xml().unwrap();
//! assert!(xml.contains(r#"hasDetail="true""#));
//! assert_eq!(ErrorSummary::from_xml(&xml).unwrap(), summary);
//! ```
//!
//! ## Features
//!
//! - `cli`: the `vo-models` command-line tool (`clap`, `tracing-subscriber`)

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod namespaces;

// Binding layer
pub mod documents;
pub mod model;

// Shared value types
pub mod datetime;
pub mod nillable;
pub mod xlink;

// Standards
pub mod uws;
pub mod voresource;
pub mod vodataservice;
pub mod tapregext;
pub mod vosi;
pub mod voregistry;
pub mod registry_interfaces;

// Polymorphic dispatch
pub mod any;
pub mod kind;

// Testing support
pub mod comparison;

// Re-exports for convenience
pub use any::{AnyCapability, AnyInterface, AnyResource};
pub use datetime::UtcTimestamp;
pub use documents::{ReadOptions, WriteOptions};
pub use error::{Error, Result};
pub use kind::DocumentKind;
pub use limits::Limits;
pub use model::{XmlElement, XmlModel, XmlValue};
pub use nillable::NillableElement;

/// Version of the vo-models library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
