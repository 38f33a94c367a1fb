//! VODataService simple types

use crate::error::{Error, Result};
use crate::model::{restricted_string, xml_enum, XmlValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static ARRAY_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+x)*[0-9]*[0-9*]$").unwrap());

static FLOAT_INTERVAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?\s+[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$",
    )
    .unwrap()
});

xml_enum! {
    /// HTTP request method accepted by a ParamHTTP interface
    pub enum HttpQueryType {
        /// HTTP GET
        Get => "GET",
        /// HTTP POST
        Post => "POST",
    }
}

xml_enum! {
    /// Whether a service parameter is required, optional or ignored
    pub enum ParamUse {
        /// Required for the service to work properly
        Required => "required",
        /// Optional but supported
        Optional => "optional",
        /// Not supported and ignored
        Ignored => "ignored",
    }
}

xml_enum! {
    /// Names allowed for a simple (input parameter) data type
    pub enum SimpleTypeName {
        /// Integer
        Integer => "integer",
        /// Floating point
        Real => "real",
        /// Complex number
        Complex => "complex",
        /// Boolean
        Boolean => "boolean",
        /// Single character
        Char => "char",
        /// Character string
        String => "string",
    }
}

xml_enum! {
    /// Data types supported explicitly by VOTable
    pub enum VoTableTypeName {
        /// Boolean
        Boolean => "boolean",
        /// Bit
        Bit => "bit",
        /// Unsigned byte
        UnsignedByte => "unsignedByte",
        /// 16-bit integer
        Short => "short",
        /// 32-bit integer
        Int => "int",
        /// 64-bit integer
        Long => "long",
        /// ASCII character
        Char => "char",
        /// Unicode character
        UnicodeChar => "unicodeChar",
        /// Single precision float
        Float => "float",
        /// Double precision float
        Double => "double",
        /// Single precision complex
        FloatComplex => "floatComplex",
        /// Double precision complex
        DoubleComplex => "doubleComplex",
    }
}

xml_enum! {
    /// Data types defined by TAP 1.0
    pub enum TapTypeName {
        /// BOOLEAN
        Boolean => "BOOLEAN",
        /// SMALLINT
        SmallInt => "SMALLINT",
        /// INTEGER
        Integer => "INTEGER",
        /// BIGINT
        BigInt => "BIGINT",
        /// REAL
        Real => "REAL",
        /// DOUBLE
        Double => "DOUBLE",
        /// TIMESTAMP
        Timestamp => "TIMESTAMP",
        /// CHAR
        Char => "CHAR",
        /// VARCHAR
        VarChar => "VARCHAR",
        /// BINARY
        Binary => "BINARY",
        /// VARBINARY
        VarBinary => "VARBINARY",
        /// POINT
        Point => "POINT",
        /// REGION
        Region => "REGION",
        /// CLOB
        Clob => "CLOB",
        /// BLOB
        Blob => "BLOB",
    }
}

restricted_string!(
    /// Shape of a multi-dimensional array, `LxNxM...`; a trailing `*`
    /// marks a variable last axis
    ArrayShape,
    ARRAY_SHAPE
);

impl ArrayShape {
    /// Whether the last axis has variable length
    pub fn is_variable(&self) -> bool {
        self.as_str().ends_with('*')
    }
}

/// A pair of lower and upper floating point limits
///
/// Written the VOTable TABLEDATA way: two numbers separated by whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatInterval {
    /// Lower limit
    pub lower: f64,
    /// Upper limit
    pub upper: f64,
}

impl FloatInterval {
    /// Create an interval
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

impl fmt::Display for FloatInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lower, self.upper)
    }
}

impl XmlValue for FloatInterval {
    fn from_xml_text(text: &str) -> Result<Self> {
        let invalid = || Error::Value(format!("invalid FloatInterval value {:?}", text));
        if !FLOAT_INTERVAL.is_match(text) {
            return Err(invalid());
        }
        let mut parts = text.split_whitespace().map(str::parse::<f64>);
        match (parts.next(), parts.next()) {
            (Some(Ok(lower)), Some(Ok(upper))) => Ok(Self { lower, upper }),
            _ => Err(invalid()),
        }
    }

    fn to_xml_text(&self) -> String {
        self.to_string()
    }
}
