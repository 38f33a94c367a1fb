//! The VOSI availability document

use crate::datetime::UtcTimestamp;
use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, VOSI_AVAILABILITY, XSD, XSI};
use serde::Serialize;

/// Whether a service is up, and since or until when
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// Whether the service is currently accepting requests
    pub available: bool,
    /// When the service last became available
    pub up_since: Option<UtcTimestamp>,
    /// When the service is next scheduled to go down
    pub down_at: Option<UtcTimestamp>,
    /// When the service is expected back after an outage
    pub back_at: Option<UtcTimestamp>,
    /// Free-text notes
    pub note: Vec<String>,
}

impl Availability {
    /// An availability report with no timestamps or notes
    pub fn new(available: bool) -> Self {
        Self {
            available,
            up_since: None,
            down_at: None,
            back_at: None,
            note: Vec::new(),
        }
    }

    /// A service that is up, optionally since a given instant
    pub fn up(since: Option<UtcTimestamp>) -> Self {
        Self {
            up_since: since,
            ..Self::new(true)
        }
    }

    /// A service that is down, optionally returning at a given instant
    pub fn down(back_at: Option<UtcTimestamp>) -> Self {
        Self {
            back_at,
            ..Self::new(false)
        }
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note.push(note.into());
        self
    }
}

impl XmlElement for Availability {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            available: node.required_child_value("available".into())?,
            up_since: node.child_value("upSince".into())?,
            down_at: node.child_value("downAt".into())?,
            back_at: node.child_value("backAt".into())?,
            note: node.child_values("note".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.push_value("available".into(), &self.available);
        element.push_opt_value("upSince".into(), self.up_since.as_ref());
        element.push_opt_value("downAt".into(), self.down_at.as_ref());
        element.push_opt_value("backAt".into(), self.back_at.as_ref());
        element.push_values("note".into(), &self.note);
    }
}

impl XmlModel for Availability {
    const TAG: XmlName = VOSI_AVAILABILITY.name("availability");
    const NSMAP: &'static [Namespace] = &[VOSI_AVAILABILITY, XSD, XSI];
}
