//! Table metadata: tables, schemas and table sets

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName};
use serde::Serialize;

use super::models::TableParam;
use super::NSMAP;

/// A pair of columns used to join two tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FkColumn {
    /// Unqualified column name in the current table
    pub from_column: String,
    /// Unqualified column name in the target table
    pub target_column: String,
}

impl FkColumn {
    /// Create a column pair
    pub fn new(from_column: impl Into<String>, target_column: impl Into<String>) -> Self {
        Self {
            from_column: from_column.into(),
            target_column: target_column.into(),
        }
    }
}

impl XmlElement for FkColumn {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            from_column: node.required_child_value("fromColumn".into())?,
            target_column: node.required_child_value("targetColumn".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.push_value("fromColumn".into(), &self.from_column);
        element.push_value("targetColumn".into(), &self.target_column);
    }
}

impl XmlModel for FkColumn {
    const TAG: XmlName = XmlName::local("fkColumn");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Columns of one table that reference columns of another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Fully qualified name of the target table
    pub target_table: String,
    /// Column pairs (at least one)
    pub fk_column: Vec<FkColumn>,
    /// What the key points to
    pub description: Option<String>,
    /// Data model concept the association represents
    pub utype: Option<String>,
}

impl XmlElement for ForeignKey {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            target_table: node.required_child_value("targetTable".into())?,
            fk_column: node.required_child_models("fkColumn".into())?,
            description: node.child_value("description".into())?,
            utype: node.child_value("utype".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_value("targetTable".into(), &self.target_table);
        element.push_models("fkColumn".into(), &self.fk_column, options);
        element.push_opt_value("description".into(), self.description.as_ref());
        element.push_opt_value("utype".into(), self.utype.as_ref());
    }
}

impl XmlModel for ForeignKey {
    const TAG: XmlName = XmlName::local("foreignKey");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A table and its columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Role of the table, e.g. `output`, `base_table`, `view`
    pub table_type: Option<String>,
    /// Fully qualified table name
    pub name: String,
    /// Display name
    pub title: Option<String>,
    /// Description of the contents
    pub description: Option<String>,
    /// Data model concept the table represents
    pub utype: Option<String>,
    /// Approximate number of rows
    pub nrows: Option<u64>,
    /// Columns
    pub column: Vec<TableParam>,
    /// Foreign keys
    pub foreign_key: Vec<ForeignKey>,
}

impl Table {
    /// A table with a name and nothing else
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&TableParam> {
        self.column
            .iter()
            .find(|c| c.param.name.as_deref() == Some(name))
    }
}

impl XmlElement for Table {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            table_type: node.attr_value("type".into())?,
            name: node.required_child_value("name".into())?,
            title: node.child_value("title".into())?,
            description: node.child_value("description".into())?,
            utype: node.child_value("utype".into())?,
            nrows: node.child_value("nrows".into())?,
            column: node.child_models("column".into())?,
            foreign_key: node.child_models("foreignKey".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("type".into(), self.table_type.as_ref());
        element.push_value("name".into(), &self.name);
        element.push_opt_value("title".into(), self.title.as_ref());
        element.push_opt_value("description".into(), self.description.as_ref());
        element.push_opt_value("utype".into(), self.utype.as_ref());
        element.push_opt_value("nrows".into(), self.nrows.as_ref());
        element.push_models("column".into(), &self.column, options);
        element.push_models("foreignKey".into(), &self.foreign_key, options);
    }
}

impl XmlModel for Table {
    const TAG: XmlName = XmlName::local("table");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A logically related group of tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    /// Name of the group, `default` when there is no natural name
    pub name: String,
    /// Display name
    pub title: Option<String>,
    /// How the tables in the group are related
    pub description: Option<String>,
    /// Data model concept the schema represents
    pub utype: Option<String>,
    /// Tables in the schema
    pub table: Vec<Table>,
}

impl TableSchema {
    /// Name used when a schema has no natural name
    pub const DEFAULT_NAME: &'static str = "default";

    /// An empty schema with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            utype: None,
            table: Vec::new(),
        }
    }

    /// Find a table by name
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.table.iter().find(|t| t.name == name)
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::named(Self::DEFAULT_NAME)
    }
}

impl XmlElement for TableSchema {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            name: node
                .child_value("name".into())?
                .unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            title: node.child_value("title".into())?,
            description: node.child_value("description".into())?,
            utype: node.child_value("utype".into())?,
            table: node.child_models("table".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_value("name".into(), &self.name);
        element.push_opt_value("title".into(), self.title.as_ref());
        element.push_opt_value("description".into(), self.description.as_ref());
        element.push_opt_value("utype".into(), self.utype.as_ref());
        element.push_models("table".into(), &self.table, options);
    }
}

impl XmlModel for TableSchema {
    const TAG: XmlName = XmlName::local("schema");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The set of tables hosted by a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSet {
    /// Schemas, with unique names
    pub schema: Vec<TableSchema>,
}

impl TableSet {
    /// Find a table by name in any schema
    pub fn find_table(&self, name: &str) -> Option<&Table> {
        self.schema.iter().find_map(|s| s.find_table(name))
    }

    /// Total number of tables
    pub fn table_count(&self) -> usize {
        self.schema.iter().map(|s| s.table.len()).sum()
    }
}

impl XmlElement for TableSet {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            schema: node.child_models("schema".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_models("schema".into(), &self.schema, options);
    }
}

impl XmlModel for TableSet {
    const TAG: XmlName = XmlName::local("tableset");
    const NSMAP: &'static [Namespace] = NSMAP;
}
