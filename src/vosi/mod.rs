//! VOSI 1.1: availability, capabilities and tables endpoints
//!
//! Each endpoint returns a small root document wrapping models from the
//! registry standards: capabilities wrap polymorphic capability elements,
//! tables reuse the VODataService table metadata.

mod availability;
mod capabilities;
mod tables;

pub use availability::Availability;
pub use capabilities::VosiCapabilities;
pub use tables::{VosiTable, VosiTableSet};
