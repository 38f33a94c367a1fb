//! Enumerated values of VORegistry

use crate::model::xml_enum;

xml_enum! {
    /// Which VOResource extensions a search interface can query
    pub enum ExtensionSearchSupport {
        /// Only core VOResource metadata is searchable
        Core => "core",
        /// Some extension metadata is searchable
        Partial => "partial",
        /// All extension metadata held by the registry is searchable
        Full => "full",
    }
}

xml_enum! {
    /// Search protocol extensions of a registry
    pub enum OptionalProtocol {
        /// XQuery searches as defined by Registry Interfaces
        XQuery => "XQuery",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!("partial".parse::<ExtensionSearchSupport>().unwrap(), ExtensionSearchSupport::Partial);
        assert!("Partial".parse::<ExtensionSearchSupport>().is_err());
        assert_eq!(OptionalProtocol::XQuery.to_string(), "XQuery");
        assert!("xquery".parse::<OptionalProtocol>().is_err());
    }
}
