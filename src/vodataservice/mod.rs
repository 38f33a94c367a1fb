//! VODataService 1.1/1.2 models
//!
//! Data collections and services, their coverage, table metadata and the
//! ParamHTTP interface type. Elements are unqualified; resource and
//! interface subtypes are written as `xsi:type="vs:..."`.

mod models;
mod resources;
mod tables;
mod types;

pub use models::{
    BaseParam, Coverage, DataType, Format, InputParam, ServiceReference, SimpleDataType,
    SpatialCoverage, TableDataType, TableParam, TapType, VoTableType,
};
pub use resources::{
    CatalogResource, CatalogService, DataCollection, DataResource, DataService, ParamHttp,
};
pub use tables::{FkColumn, ForeignKey, Table, TableSchema, TableSet};
pub use types::{
    ArrayShape, FloatInterval, HttpQueryType, ParamUse, SimpleTypeName, TapTypeName,
    VoTableTypeName,
};

use crate::namespaces::{Namespace, VM, VR, VS, XSD, XSI};

/// Namespaces declared on every VODataService document
pub const NSMAP: &[Namespace] = &[VR, VS, XSD, VM, XSI];
