//! Error types for vo-models
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! never recovered from internally; they surface to the caller as soon as
//! a document or a field value is rejected.

use std::fmt;
use thiserror::Error;

/// Result type alias using the vo-models [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vo-models operations
#[derive(Error, Debug)]
pub enum Error {
    /// A field value violates a model constraint
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The document could not be parsed or does not match the expected model
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Value error (text that does not match the lexical form of a type)
    #[error("value error: {0}")]
    Value(String),

    /// A required attribute or element is missing
    #[error("missing {kind} '{name}' in <{parent}>")]
    Missing {
        /// Either "attribute" or "element"
        kind: &'static str,
        /// Name of the missing item
        name: String,
        /// Name of the element that should have carried it
        parent: String,
    },

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON export error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Missing required attribute on `parent`
    pub fn missing_attribute(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Error::Missing {
            kind: "attribute",
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Missing required child element of `parent`
    pub fn missing_element(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Error::Missing {
            kind: "element",
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Shortcut for a validation error with a bare message
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::new(message))
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Parse(ParseError::new(err.to_string()))
    }
}

/// Model validation error with context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Path to the field or element that failed validation
    pub path: Option<String>,
    /// Offending value
    pub value: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            value: None,
        }
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the offending value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }

        if let Some(ref value) = self.value {
            write!(f, ": {:?}", value)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Document parsing error
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Element where the error was detected
    pub location: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " (in <{}>)", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}
