//! XML Linking Language (XLink) simple types
//!
//! Only the `xlink:type` values are modelled; UWS uses them on job and
//! result references.

use crate::model::xml_enum;

xml_enum! {
    /// Values of the `xlink:type` attribute
    pub enum XlinkType {
        /// A simple link
        Simple => "simple",
        /// An extended link
        Extended => "extended",
        /// A locator
        Locator => "locator",
        /// An arc
        Arc => "arc",
        /// A local resource
        Resource => "resource",
        /// A title
        Title => "title",
    }
}

impl Default for XlinkType {
    fn default() -> Self {
        XlinkType::Simple
    }
}
