//! Binding traits between XML and typed models
//!
//! [`XmlValue`] covers simple content (text and attribute values),
//! [`XmlElement`] covers the attributes and children of one element, and
//! [`XmlModel`] adds the root tag and namespace map needed to read or
//! write a whole document.

use crate::documents::{parse_document, Element, ReadOptions, WriteOptions, XmlNode};
use crate::error::{Error, ParseError, Result};
use crate::namespaces::{Namespace, XmlName};
use tracing::debug;

/// A type with a textual XML representation
pub trait XmlValue: Sized {
    /// Parse the (already trimmed) text of an element or attribute
    fn from_xml_text(text: &str) -> Result<Self>;

    /// Lexical form written to XML
    fn to_xml_text(&self) -> String;
}

/// A type bound to the content of one XML element
pub trait XmlElement: Sized {
    /// Build the value from an element
    fn read(node: XmlNode<'_, '_>) -> Result<Self>;

    /// Write attributes, text and children into `element`
    fn write(&self, element: &mut Element, options: &WriteOptions);
}

/// A model that can be a document root
pub trait XmlModel: XmlElement {
    /// Root element name
    const TAG: XmlName;

    /// Namespace of the root element, if qualified
    const NAMESPACE: Option<Namespace> = Self::TAG.namespace;

    /// Namespaces always declared on the root element
    const NSMAP: &'static [Namespace] = &[];

    /// Render to an element tree
    fn to_element(&self, options: &WriteOptions) -> Element {
        let mut element = Element::new(Self::TAG);
        for ns in Self::NSMAP {
            element.declare(*ns);
        }
        self.write(&mut element, options);
        element
    }

    /// Parse from an XML string with default options
    fn from_xml(xml: &str) -> Result<Self> {
        Self::from_xml_with(xml, &ReadOptions::default())
    }

    /// Parse from an XML string
    fn from_xml_with(xml: &str, options: &ReadOptions) -> Result<Self> {
        let doc = parse_document(xml, options)?;
        let root = XmlNode::new(doc.root_element());
        if !root.is(Self::TAG) {
            let found = match root.namespace() {
                Some(ns) => format!("{{{}}}{}", ns, root.local_name()),
                None => root.local_name().to_string(),
            };
            return Err(Error::Parse(
                ParseError::new(format!("expected root element <{}>", Self::TAG))
                    .with_location(found),
            ));
        }
        debug!(tag = %Self::TAG, "binding document root");
        Self::read(root)
    }

    /// Render to an XML string with default options
    fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&WriteOptions::default())
    }

    /// Render to an XML string
    fn to_xml_with(&self, options: &WriteOptions) -> Result<String> {
        self.to_element(options).to_xml_string(options)
    }

    /// Render to UTF-8 encoded bytes
    fn to_xml_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        self.to_element(options).to_bytes(options)
    }

    /// Serialize the model as pretty-printed JSON
    fn to_json(&self) -> Result<String>
    where
        Self: serde::Serialize,
    {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl XmlValue for String {
    fn from_xml_text(text: &str) -> Result<Self> {
        Ok(text.to_string())
    }

    fn to_xml_text(&self) -> String {
        self.clone()
    }
}

impl XmlValue for bool {
    fn from_xml_text(text: &str) -> Result<Self> {
        match text {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(Error::Value(format!("invalid boolean: {:?}", other))),
        }
    }

    fn to_xml_text(&self) -> String {
        self.to_string()
    }
}

macro_rules! xml_number {
    ($ty:ident) => {
        impl XmlValue for $ty {
            fn from_xml_text(text: &str) -> Result<Self> {
                text.parse().map_err(|e| {
                    Error::Value(format!(
                        "invalid {} value {:?}: {}",
                        stringify!($ty),
                        text,
                        e
                    ))
                })
            }

            fn to_xml_text(&self) -> String {
                self.to_string()
            }
        }
    };
}

xml_number!(i32);
xml_number!(i64);
xml_number!(u32);
xml_number!(u64);
xml_number!(f64);

impl XmlValue for url::Url {
    fn from_xml_text(text: &str) -> Result<Self> {
        Ok(url::Url::parse(text)?)
    }

    fn to_xml_text(&self) -> String {
        self.as_str().to_string()
    }
}

/// Declare a string enumeration bound to fixed XML tokens
///
/// Generates `as_str`, `Display`, `FromStr`, [`XmlValue`] and a
/// `Serialize` implementation writing the XML token.
macro_rules! xml_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// XML token for this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                match s {
                    $($token => Ok($name::$variant),)+
                    other => Err($crate::error::Error::Value(format!(
                        "invalid {} value {:?}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl $crate::model::XmlValue for $name {
            fn from_xml_text(text: &str) -> $crate::error::Result<Self> {
                text.parse()
            }

            fn to_xml_text(&self) -> String {
                self.as_str().to_string()
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

/// Declare a string newtype restricted by a regular expression
///
/// `$regex` names a `Lazy<Regex>` static in scope at the call site.
macro_rules! restricted_string {
    ($(#[$meta:meta])* $name:ident, $regex:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a value
            pub fn new(value: impl Into<String>) -> $crate::error::Result<Self> {
                let value = value.into();
                if $regex.is_match(&value) {
                    Ok(Self(value))
                } else {
                    Err($crate::error::Error::Value(format!(
                        "invalid {} value {:?}",
                        stringify!($name),
                        value
                    )))
                }
            }

            /// The wrapped value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                Self::new(s)
            }
        }

        impl $crate::model::XmlValue for $name {
            fn from_xml_text(text: &str) -> $crate::error::Result<Self> {
                Self::new(text)
            }

            fn to_xml_text(&self) -> String {
                self.0.clone()
            }
        }
    };
}

pub(crate) use restricted_string;
pub(crate) use xml_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::UWS;

    xml_enum! {
        enum Colour {
            Red => "red",
            Green => "green",
        }
    }

    #[derive(Debug, PartialEq)]
    struct Note {
        id: String,
        body: Option<String>,
    }

    impl XmlElement for Note {
        fn read(node: XmlNode<'_, '_>) -> Result<Self> {
            Ok(Note {
                id: node.required_attr("id".into())?,
                body: node.child_value(UWS.name("body"))?,
            })
        }

        fn write(&self, element: &mut Element, _options: &WriteOptions) {
            element.set_attr("id".into(), self.id.as_str());
            element.push_opt_value(UWS.name("body"), self.body.as_ref());
        }
    }

    impl XmlModel for Note {
        const TAG: XmlName = UWS.name("note");
        const NSMAP: &'static [Namespace] = &[UWS];
    }

    #[test]
    fn test_bool_values() {
        assert!(bool::from_xml_text("1").unwrap());
        assert!(!bool::from_xml_text("false").unwrap());
        assert!(bool::from_xml_text("yes").is_err());
        assert_eq!(true.to_xml_text(), "true");
    }

    #[test]
    fn test_number_values() {
        assert_eq!(i64::from_xml_text("-12").unwrap(), -12);
        assert!(u32::from_xml_text("-1").is_err());
        assert_eq!(f64::from_xml_text("2.5").unwrap(), 2.5);
    }

    #[test]
    fn test_enum_macro() {
        assert_eq!("green".parse::<Colour>().unwrap(), Colour::Green);
        assert!("blue".parse::<Colour>().is_err());
        assert_eq!(Colour::Red.to_string(), "red");
        assert_eq!(Colour::ALL.len(), 2);
        assert_eq!(serde_json::to_string(&Colour::Red).unwrap(), "\"red\"");
    }

    #[test]
    fn test_model_roundtrip() {
        let note = Note {
            id: "n1".to_string(),
            body: Some("hello".to_string()),
        };
        let xml = note.to_xml().unwrap();
        assert_eq!(
            xml,
            r#"<uws:note xmlns:uws="http://www.ivoa.net/xml/UWS/v1.0" id="n1"><uws:body>hello</uws:body></uws:note>"#
        );
        assert_eq!(Note::from_xml(&xml).unwrap(), note);
        assert_eq!(Note::NAMESPACE, Some(UWS));
    }

    #[test]
    fn test_root_tag_mismatch() {
        let xml = r#"<uws:job xmlns:uws="http://www.ivoa.net/xml/UWS/v1.0" id="n1"/>"#;
        let err = Note::from_xml(xml).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let wrong_ns = r#"<note xmlns="urn:other" id="n1"/>"#;
        assert!(Note::from_xml(wrong_ns).is_err());
    }

    #[test]
    fn test_empty_optional_element() {
        let note = Note {
            id: "n1".to_string(),
            body: None,
        };
        let xml = note.to_xml().unwrap();
        assert!(xml.contains("<uws:body/>"));
        let skipped = note
            .to_xml_with(&WriteOptions::new().with_skip_empty(true))
            .unwrap();
        assert!(!skipped.contains("body"));
        assert_eq!(Note::from_xml(&xml).unwrap(), note);
    }
}
