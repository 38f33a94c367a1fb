//! VOResource simple types

use crate::error::{Error, Result};
use crate::model::{restricted_string, xml_enum};
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ivo://[\w\-_.!~*'()+=]{3,}(/[\w\-_.!~*'()+=]+)*/?(\?[^#\s]*)?(#\S*)?$").unwrap()
});

static AUTHORITY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w\d][\w\d\-_.!~*'()+=]{2,}$").unwrap());

xml_enum! {
    /// Quality of a resource description as assessed by a validator
    pub enum ValidationLevel {
        /// The description is stored but not compliant
        Level0 => "0",
        /// Meets the minimum requirements of the schema
        Level1 => "1",
        /// Meets the recommended requirements
        Level2 => "2",
        /// Inspected by a human and judged to be complete
        Level3 => "3",
        /// Inspected by a human and judged to be of high quality
        Level4 => "4",
    }
}

impl ValidationLevel {
    /// Numeric level
    pub fn level(&self) -> u8 {
        match self {
            ValidationLevel::Level0 => 0,
            ValidationLevel::Level1 => 1,
            ValidationLevel::Level2 => 2,
            ValidationLevel::Level3 => 3,
            ValidationLevel::Level4 => 4,
        }
    }
}

impl TryFrom<u8> for ValidationLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        ValidationLevel::ALL
            .get(usize::from(level))
            .copied()
            .ok_or_else(|| Error::Value(format!("invalid ValidationLevel value {}", level)))
    }
}

xml_enum! {
    /// Lifecycle status of a resource record
    pub enum ResourceStatus {
        /// The resource is in use
        Active => "active",
        /// The resource is temporarily unavailable
        Inactive => "inactive",
        /// The resource has been withdrawn
        Deleted => "deleted",
    }
}

impl Default for ResourceStatus {
    fn default() -> Self {
        ResourceStatus::Active
    }
}

xml_enum! {
    /// How an access URL is to be used
    pub enum AccessUse {
        /// The URL can be used as is
        Full => "full",
        /// The URL is a base to which parameters are appended
        Base => "base",
        /// The URL points to a directory
        Dir => "dir",
    }
}

restricted_string!(
    /// An IVOA identifier in URI form (`ivo://authority/path`)
    IdentifierUri,
    IDENTIFIER_URI
);

restricted_string!(
    /// The authority part of an IVOA identifier
    AuthorityId,
    AUTHORITY_ID
);

impl IdentifierUri {
    /// The authority part of the identifier
    pub fn authority(&self) -> &str {
        let rest = &self.0["ivo://".len()..];
        rest.split(|c| c == '/' || c == '?' || c == '#')
            .next()
            .unwrap_or(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_uri() {
        let id = IdentifierUri::new("ivo://example.edu/resource").unwrap();
        assert_eq!(id.authority(), "example.edu");
        assert!(IdentifierUri::new("ivo://ivoa.net/std/TAP#1.1").is_ok());
        assert!(IdentifierUri::new("ivo://a").is_err());
        assert!(IdentifierUri::new("https://example.edu/").is_err());
    }

    #[test]
    fn test_authority_id() {
        assert!(AuthorityId::new("example.edu").is_ok());
        assert!(AuthorityId::new("-bad").is_err());
        assert!(AuthorityId::new("ab").is_err());
    }

    #[test]
    fn test_validation_level() {
        assert_eq!("2".parse::<ValidationLevel>().unwrap(), ValidationLevel::Level2);
        assert_eq!(ValidationLevel::try_from(4).unwrap().level(), 4);
        assert!(ValidationLevel::try_from(5).is_err());
        assert!("5".parse::<ValidationLevel>().is_err());
    }

    #[test]
    fn test_status_and_use_tokens() {
        assert_eq!(ResourceStatus::default().as_str(), "active");
        assert_eq!("dir".parse::<AccessUse>().unwrap(), AccessUse::Dir);
    }
}
