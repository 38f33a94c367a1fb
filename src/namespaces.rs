//! XML namespace handling
//!
//! Well-known IVOA namespaces and the qualified names used when binding
//! model fields to elements and attributes.

use std::fmt;

/// A namespace with the prefix it is written under
///
/// An empty prefix declares the default namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// Prefix used in output documents
    pub prefix: &'static str,
    /// Namespace URI
    pub uri: &'static str,
}

impl Namespace {
    /// Create a namespace binding
    pub const fn new(prefix: &'static str, uri: &'static str) -> Self {
        Self { prefix, uri }
    }

    /// A name qualified by this namespace
    pub const fn name(self, local: &'static str) -> XmlName {
        XmlName {
            namespace: Some(self),
            local,
        }
    }

    /// The `xmlns` attribute name declaring this namespace
    pub fn declaration(&self) -> String {
        if self.prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", self.prefix)
        }
    }

    /// Prefix a type name for use in an `xsi:type` value
    pub fn type_name(&self, local: &str) -> String {
        if self.prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}:{}", self.prefix, local)
        }
    }
}

/// XML Schema instance namespace (`xsi:nil`, `xsi:type`)
pub const XSI: Namespace = Namespace::new("xsi", "http://www.w3.org/2001/XMLSchema-instance");
/// XML Schema namespace
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema");
/// XLink namespace
pub const XLINK: Namespace = Namespace::new("xlink", "http://www.w3.org/1999/xlink");
/// Universal Worker Service 1.0/1.1
pub const UWS: Namespace = Namespace::new("uws", "http://www.ivoa.net/xml/UWS/v1.0");
/// VOResource 1.0/1.1
pub const VR: Namespace = Namespace::new("vr", "http://www.ivoa.net/xml/VOResource/v1.0");
/// VOMetadata annotations used by VOResource schemas
pub const VM: Namespace = Namespace::new("vm", "http://www.ivoa.net/xml/VOMetadata/v0.1");
/// VODataService 1.1/1.2
pub const VS: Namespace = Namespace::new("vs", "http://www.ivoa.net/xml/VODataService/v1.1");
/// TAPRegExt 1.0
pub const TR: Namespace = Namespace::new("tr", "http://www.ivoa.net/xml/TAPRegExt/v1.0");
/// VORegistry 1.0/1.1
pub const VG: Namespace = Namespace::new("vg", "http://www.ivoa.net/xml/VORegistry/v1.0");
/// RegistryInterface 1.0
pub const RI: Namespace = Namespace::new("ri", "http://www.ivoa.net/xml/RegistryInterface/v1.0");
/// VOSI Availability, written as the default namespace
pub const VOSI_AVAILABILITY: Namespace =
    Namespace::new("", "http://www.ivoa.net/xml/VOSIAvailability/v1.0");
/// VOSI Capabilities
pub const VOSI_CAPABILITIES: Namespace =
    Namespace::new("vosi", "http://www.ivoa.net/xml/VOSICapabilities/v1.0");
/// VOSI Tables
pub const VOSI_TABLES: Namespace = Namespace::new("vosi", "http://www.ivoa.net/xml/VOSITables/v1.0");

/// Namespaces whose prefixes may appear in `xsi:type` values
pub const TYPE_NAMESPACES: &[Namespace] = &[VR, VS, TR, VG, RI, UWS, VOSI_CAPABILITIES, VOSI_TABLES];

/// Find a type namespace by URI
pub fn namespace_for_uri(uri: &str) -> Option<Namespace> {
    TYPE_NAMESPACES.iter().copied().find(|ns| ns.uri == uri)
}

/// Find a type namespace by its output prefix
pub fn namespace_for_prefix(prefix: &str) -> Option<Namespace> {
    TYPE_NAMESPACES.iter().copied().find(|ns| ns.prefix == prefix)
}

/// Name of an element or attribute
///
/// Unqualified names (no namespace) match any namespace when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlName {
    /// Namespace (None for unqualified)
    pub namespace: Option<Namespace>,
    /// Local name
    pub local: &'static str,
}

impl XmlName {
    /// An unqualified name
    pub const fn local(local: &'static str) -> Self {
        Self {
            namespace: None,
            local,
        }
    }

    /// Prefixed name as written in a document
    pub fn prefixed(&self) -> String {
        match self.namespace {
            Some(ns) if !ns.prefix.is_empty() => format!("{}:{}", ns.prefix, self.local),
            _ => self.local.to_string(),
        }
    }

    /// Whether a parsed node carries this name
    pub fn matches(&self, name: roxmltree::ExpandedName<'_, '_>) -> bool {
        if name.name() != self.local {
            return false;
        }
        match self.namespace {
            Some(ns) => name.namespace() == Some(ns.uri),
            None => true,
        }
    }
}

impl From<&'static str> for XmlName {
    fn from(local: &'static str) -> Self {
        XmlName::local(local)
    }
}

impl fmt::Display for XmlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefixed())
    }
}

/// Split a `prefix:local` type reference into its parts
pub fn split_qname(value: &str) -> (Option<&str>, &str) {
    match value.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_names() {
        assert_eq!(UWS.name("job").prefixed(), "uws:job");
        assert_eq!(XmlName::local("title").prefixed(), "title");
        assert_eq!(VOSI_AVAILABILITY.name("available").prefixed(), "available");
    }

    #[test]
    fn test_declarations() {
        assert_eq!(UWS.declaration(), "xmlns:uws");
        assert_eq!(VOSI_AVAILABILITY.declaration(), "xmlns");
        assert_eq!(TR.type_name("TableAccess"), "tr:TableAccess");
    }

    #[test]
    fn test_matches() {
        let doc = roxmltree::Document::parse(
            r#"<uws:job xmlns:uws="http://www.ivoa.net/xml/UWS/v1.0"/>"#,
        )
        .unwrap();
        let root = doc.root_element();
        assert!(UWS.name("job").matches(root.tag_name()));
        assert!(XmlName::local("job").matches(root.tag_name()));
        assert!(!VR.name("job").matches(root.tag_name()));
        assert!(!UWS.name("jobs").matches(root.tag_name()));
    }

    #[test]
    fn test_type_namespace_lookup() {
        assert_eq!(namespace_for_prefix("vs"), Some(VS));
        assert_eq!(namespace_for_uri("http://www.ivoa.net/xml/TAPRegExt/v1.0"), Some(TR));
        assert_eq!(namespace_for_uri("urn:unknown"), None);
    }

    #[test]
    fn test_split_qname() {
        assert_eq!(split_qname("vs:ParamHTTP"), (Some("vs"), "ParamHTTP"));
        assert_eq!(split_qname("ParamHTTP"), (None, "ParamHTTP"));
    }
}
