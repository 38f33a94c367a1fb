//! Limits applied while reading documents
//!
//! Incoming XML is checked against these bounds before any model binding
//! takes place, so hostile or accidental oversized inputs fail early.

use crate::error::{Error, Result};

/// Bounds checked on every parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_xml_depth: usize,

    /// Maximum XML document size in bytes
    pub max_xml_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of elements in a document
    pub max_elements: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 256,
            max_xml_size: 64 * 1024 * 1024, // 64 MB
            max_attributes: 256,
            max_elements: 1_000_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 32,
            max_xml_size: 1024 * 1024, // 1 MB
            max_attributes: 32,
            max_elements: 10_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 4096,
            max_xml_size: 1024 * 1024 * 1024, // 1 GB
            max_attributes: 4096,
            max_elements: usize::MAX,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_xml_depth = depth;
        self
    }

    /// Set the maximum document size
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_xml_size = size;
        self
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "Attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of elements is within limits
    pub fn check_elements(&self, count: usize) -> Result<()> {
        if count > self.max_elements {
            Err(Error::LimitExceeded(format!(
                "Element count {} exceeds maximum {}",
                count, self.max_elements
            )))
        } else {
            Ok(())
        }
    }

    /// Walk a parsed tree and check depth, attribute and element counts
    pub fn check_document(&self, doc: &roxmltree::Document<'_>) -> Result<()> {
        let mut elements = 0usize;
        let mut stack = vec![(doc.root_element(), 1usize)];
        while let Some((node, depth)) = stack.pop() {
            elements += 1;
            self.check_elements(elements)?;
            self.check_xml_depth(depth)?;
            self.check_attributes(node.attributes().count())?;
            for child in node.children().filter(|n| n.is_element()) {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_xml_depth, 256);
        assert!(limits.check_xml_depth(100).is_ok());
        assert!(limits.check_xml_depth(300).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_xml_depth < Limits::default().max_xml_depth);
        assert!(limits.check_xml_size(2 * 1024 * 1024).is_err());
    }

    #[test]
    fn test_check_document_depth() {
        let xml = "<a><b><c><d/></c></b></a>";
        let doc = roxmltree::Document::parse(xml).unwrap();
        assert!(Limits::default().check_document(&doc).is_ok());
        let err = Limits::default()
            .with_max_depth(3)
            .check_document(&doc)
            .unwrap_err();
        assert!(matches!(err, Error::LimitExceeded(_)));
    }

    #[test]
    fn test_check_document_attributes() {
        let xml = r#"<a x="1" y="2" z="3"/>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        let limits = Limits {
            max_attributes: 2,
            ..Limits::default()
        };
        assert!(limits.check_document(&doc).is_err());
    }
}
