//! The VOSI tables documents

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, VOSI_TABLES, VR, VS, XSI};
use crate::vodataservice::{Table, TableSet};
use serde::Serialize;
use std::ops::{Deref, DerefMut};

const NSMAP: &[Namespace] = &[VOSI_TABLES, VR, VS, XSI];

/// A single table description, as returned by `/tables/{name}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VosiTable(pub Table);

impl Deref for VosiTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.0
    }
}

impl DerefMut for VosiTable {
    fn deref_mut(&mut self) -> &mut Table {
        &mut self.0
    }
}

impl From<Table> for VosiTable {
    fn from(table: Table) -> Self {
        Self(table)
    }
}

impl XmlElement for VosiTable {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Table::read(node).map(Self)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.0.write(element, options);
    }
}

impl XmlModel for VosiTable {
    const TAG: XmlName = VOSI_TABLES.name("table");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// All schemas and tables of a service, as returned by `/tables`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VosiTableSet(pub TableSet);

impl Deref for VosiTableSet {
    type Target = TableSet;

    fn deref(&self) -> &TableSet {
        &self.0
    }
}

impl DerefMut for VosiTableSet {
    fn deref_mut(&mut self) -> &mut TableSet {
        &mut self.0
    }
}

impl From<TableSet> for VosiTableSet {
    fn from(tableset: TableSet) -> Self {
        Self(tableset)
    }
}

impl XmlElement for VosiTableSet {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        TableSet::read(node).map(Self)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.0.write(element, options);
    }
}

impl XmlModel for VosiTableSet {
    const TAG: XmlName = VOSI_TABLES.name("tableset");
    const NSMAP: &'static [Namespace] = NSMAP;
}
