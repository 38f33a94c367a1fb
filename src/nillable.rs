//! Elements that must be present but may be XML-null
//!
//! A nillable element is either `<tag>value</tag>` or
//! `<tag xsi:nil="true"/>`. Marking an element nil while also giving it
//! text is rejected.

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Error, Result, ValidationError};
use crate::model::{XmlElement, XmlValue};
use crate::namespaces::{XmlName, XSI};
use serde::Serialize;

/// A value that is written as `xsi:nil="true"` when absent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NillableElement<T = String> {
    /// The value, `None` for a nil element
    pub value: Option<T>,
}

/// Older name for [`NillableElement`]
pub type NillElement<T = String> = NillableElement<T>;

impl<T> NillableElement<T> {
    /// An element carrying a value
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    /// A nil element
    pub fn nil() -> Self {
        Self { value: None }
    }

    /// Whether the element is nil
    pub fn is_nil(&self) -> bool {
        self.value.is_none()
    }
}

impl<T> Default for NillableElement<T> {
    fn default() -> Self {
        Self::nil()
    }
}

impl<T> From<Option<T>> for NillableElement<T> {
    fn from(value: Option<T>) -> Self {
        Self { value }
    }
}

impl<T: XmlValue> NillableElement<T> {
    /// Read a nillable value from an element
    pub fn read_value(node: XmlNode<'_, '_>) -> Result<Option<T>> {
        if node.is_nil() {
            let text = node.text();
            if !text.is_empty() {
                return Err(Error::Validation(
                    ValidationError::new("element is marked xsi:nil but has content")
                        .with_path(node.local_name())
                        .with_value(text),
                ));
            }
            return Ok(None);
        }
        node.opt_value()
    }

    /// Write a nillable value into an element
    pub fn write_value(element: &mut Element, value: Option<&T>) {
        match value {
            Some(value) => element.set_value(value),
            None => element.set_attr(XSI.name("nil"), "true"),
        }
    }
}

impl<T: XmlValue> XmlElement for NillableElement<T> {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: Self::read_value(node)?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        Self::write_value(element, self.value.as_ref());
    }
}

/// Root tag used when a nillable element is rendered on its own
pub const NILLABLE_TAG: XmlName = XmlName::local("nillable");

impl<T: XmlValue> crate::model::XmlModel for NillableElement<T> {
    const TAG: XmlName = NILLABLE_TAG;
}
