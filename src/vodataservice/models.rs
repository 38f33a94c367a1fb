//! VODataService coverage, data type and parameter models

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Result, ValidationError};
use crate::model::{XmlElement, XmlModel, XmlValue};
use crate::namespaces::{Namespace, XmlName, VS};
use crate::voresource::IdentifierUri;
use serde::Serialize;

use super::types::{ArrayShape, FloatInterval, ParamUse, SimpleTypeName, TapTypeName, VoTableTypeName};
use super::NSMAP;

/// A coverage on a sphere, as an ASCII-serialized MOC
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpatialCoverage {
    /// The MOC
    pub value: String,
    /// Non-celestial frame the MOC is written in
    pub frame: Option<String>,
}

impl XmlElement for SpatialCoverage {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            frame: node.attr_value("frame".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("frame".into(), self.frame.as_ref());
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for SpatialCoverage {
    const TAG: XmlName = XmlName::local("spatial");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The service URL for a potentially registered service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceReference {
    /// URL of the service
    pub value: String,
    /// IVOA identifier of the service record
    pub ivo_id: Option<IdentifierUri>,
}

impl XmlElement for ServiceReference {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            ivo_id: node.attr_value("ivo-id".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("ivo-id".into(), self.ivo_id.as_ref());
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for ServiceReference {
    const TAG: XmlName = XmlName::local("footprint");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Physical or digital manifestation of the information in a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Format {
    /// The format, preferably a MIME type
    pub value: String,
    /// Whether the value is a MIME type
    pub is_mime_type: bool,
}

impl Format {
    /// A MIME type format
    pub fn mime_type(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_mime_type: true,
        }
    }
}

impl XmlElement for Format {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            is_mime_type: node.attr_value("isMIMEType".into())?.unwrap_or(false),
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("isMIMEType".into(), &self.is_mime_type);
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for Format {
    const TAG: XmlName = XmlName::local("format");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A named data type with array shape and extension attributes
///
/// `V` is the type of the name: free text for generic data types, or one of
/// the closed vocabularies for the restricted subtypes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataType<V = String> {
    /// Name of the type
    pub value: V,
    /// Shape of the array that constitutes the value
    pub arraysize: Option<ArrayShape>,
    /// Delimiter of array elements in input parameters
    pub delim: Option<String>,
    /// Custom type the value can be interpreted as
    pub extended_type: Option<String>,
    /// Schema the extended type is drawn from
    pub extended_schema: Option<String>,
}

impl<V> DataType<V> {
    /// A scalar type
    pub fn new(value: V) -> Self {
        Self {
            value,
            arraysize: None,
            delim: None,
            extended_type: None,
            extended_schema: None,
        }
    }

    /// Set the array shape
    pub fn with_arraysize(mut self, arraysize: ArrayShape) -> Self {
        self.arraysize = Some(arraysize);
        self
    }
}

impl<V: XmlValue> XmlElement for DataType<V> {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.value()?,
            arraysize: node.attr_value("arraysize".into())?,
            delim: node.attr_value("delim".into())?,
            extended_type: node.attr_value("extendedType".into())?,
            extended_schema: node.attr_value("extendedSchema".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("arraysize".into(), self.arraysize.as_ref());
        element.set_opt_attr("delim".into(), self.delim.as_ref());
        element.set_opt_attr("extendedType".into(), self.extended_type.as_ref());
        element.set_opt_attr("extendedSchema".into(), self.extended_schema.as_ref());
        element.set_value(&self.value);
    }
}

impl<V: XmlValue> XmlModel for DataType<V> {
    const TAG: XmlName = XmlName::local("dataType");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Data type of an input parameter, restricted to a few simple names
pub type SimpleDataType = DataType<SimpleTypeName>;

/// A column data type from the VOTable vocabulary (`vs:VOTableType`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoTableType {
    /// Name and attributes
    #[serde(flatten)]
    pub data_type: DataType<VoTableTypeName>,
}

impl VoTableType {
    /// A VOTable type with the given name
    pub fn new(value: VoTableTypeName) -> Self {
        Self {
            data_type: DataType::new(value),
        }
    }

    /// Set the array shape
    pub fn with_arraysize(mut self, arraysize: ArrayShape) -> Self {
        self.data_type.arraysize = Some(arraysize);
        self
    }
}

impl XmlElement for VoTableType {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            data_type: DataType::read(node)?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.data_type.write(element, options);
        element.set_xsi_type(VS, "VOTableType");
    }
}

impl XmlModel for VoTableType {
    const TAG: XmlName = XmlName::local("dataType");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A column data type from the TAP 1.0 vocabulary (`vs:TAPType`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TapType {
    /// Name and attributes
    #[serde(flatten)]
    pub data_type: DataType<TapTypeName>,
    /// Length of a fixed-length value
    pub size: Option<u32>,
}

impl XmlElement for TapType {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        let size: Option<u32> = node.attr_value("size".into())?;
        if size == Some(0) {
            return Err(ValidationError::new("size must be positive")
                .with_path("dataType/@size")
                .with_value("0")
                .into());
        }
        Ok(Self {
            data_type: DataType::read(node)?,
            size,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.data_type.write(element, options);
        element.set_xsi_type(VS, "TAPType");
        element.set_opt_attr("size".into(), self.size.as_ref());
    }
}

impl XmlModel for TapType {
    const TAG: XmlName = XmlName::local("dataType");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Data type of a table column, resolved through `xsi:type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableDataType {
    /// `vs:VOTableType`
    VoTable(VoTableType),
    /// `vs:TAPType`
    Tap(TapType),
    /// Any other column type, kept with its `xsi:type`
    Other {
        /// The `xsi:type` value, if any
        xsi_type: Option<String>,
        /// Name and attributes
        data_type: DataType,
    },
}

impl From<VoTableType> for TableDataType {
    fn from(value: VoTableType) -> Self {
        TableDataType::VoTable(value)
    }
}

impl From<TapType> for TableDataType {
    fn from(value: TapType) -> Self {
        TableDataType::Tap(value)
    }
}

impl XmlElement for TableDataType {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(match node.xsi_type_key() {
            Some(("vs", "VOTableType")) => TableDataType::VoTable(VoTableType::read(node)?),
            Some(("vs", "TAPType")) => TableDataType::Tap(TapType::read(node)?),
            _ => TableDataType::Other {
                xsi_type: node.xsi_type_name(),
                data_type: DataType::read(node)?,
            },
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        match self {
            TableDataType::VoTable(value) => value.write(element, options),
            TableDataType::Tap(value) => value.write(element, options),
            TableDataType::Other {
                xsi_type,
                data_type,
            } => {
                data_type.write(element, options);
                if let Some(xsi_type) = xsi_type {
                    element.set_xsi_type_name(xsi_type);
                }
            }
        }
    }
}

impl XmlModel for TableDataType {
    const TAG: XmlName = XmlName::local("dataType");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// How a resource's contents map to the sky, to time and to frequency
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coverage {
    /// Spatial coverage as a MOC
    pub spatial: Option<SpatialCoverage>,
    /// Time intervals (MJD) for which data is offered
    pub temporal: Vec<FloatInterval>,
    /// Spectral intervals (energy in Joules) for which data is offered
    pub spectral: Vec<FloatInterval>,
    /// Service providing precise coverage footprints
    pub footprint: Option<ServiceReference>,
    /// Messengers the resource is relevant for
    pub waveband: Vec<String>,
    /// Positional blur in decimal degrees
    pub region_of_regard: Option<f64>,
}

impl XmlElement for Coverage {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            spatial: node.child_model("spatial".into())?,
            temporal: node.child_values("temporal".into())?,
            spectral: node.child_values("spectral".into())?,
            footprint: node.child_model("footprint".into())?,
            waveband: node.child_values("waveband".into())?,
            region_of_regard: node.child_value("regionOfRegard".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_opt_model("spatial".into(), self.spatial.as_ref(), options);
        element.push_values("temporal".into(), &self.temporal);
        element.push_values("spectral".into(), &self.spectral);
        element.push_opt_model("footprint".into(), self.footprint.as_ref(), options);
        element.push_values("waveband".into(), &self.waveband);
        element.push_opt_value("regionOfRegard".into(), self.region_of_regard.as_ref());
    }
}

impl XmlModel for Coverage {
    const TAG: XmlName = XmlName::local("coverage");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Description of a parameter or column without data type restrictions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BaseParam {
    /// Name of the parameter or column
    pub name: Option<String>,
    /// Free-text description of the contents
    pub description: Option<String>,
    /// Unit of the values
    pub unit: Option<String>,
    /// Unified content descriptor
    pub ucd: Option<String>,
    /// Data model concept the values represent
    pub utype: Option<String>,
}

impl BaseParam {
    /// A parameter with a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl XmlElement for BaseParam {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            name: node.child_value("name".into())?,
            description: node.child_value("description".into())?,
            unit: node.child_value("unit".into())?,
            ucd: node.child_value("ucd".into())?,
            utype: node.child_value("utype".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.push_opt_value("name".into(), self.name.as_ref());
        element.push_opt_value("description".into(), self.description.as_ref());
        element.push_opt_value("unit".into(), self.unit.as_ref());
        element.push_opt_value("ucd".into(), self.ucd.as_ref());
        element.push_opt_value("utype".into(), self.utype.as_ref());
    }
}

impl XmlModel for BaseParam {
    const TAG: XmlName = XmlName::local("param");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A table column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableParam {
    /// Name, description and annotations
    #[serde(flatten)]
    pub param: BaseParam,
    /// Whether the column is defined by a standard
    pub std: Option<bool>,
    /// Type of the column values
    pub data_type: Option<TableDataType>,
    /// Traits of the column such as `indexed`, `primary`, `nullable`
    pub flag: Vec<String>,
}

impl XmlElement for TableParam {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            param: BaseParam::read(node)?,
            std: node.attr_value("std".into())?,
            data_type: node.child_model("dataType".into())?,
            flag: node.child_values("flag".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("std".into(), self.std.as_ref());
        self.param.write(element, options);
        element.push_opt_model("dataType".into(), self.data_type.as_ref(), options);
        element.push_values("flag".into(), &self.flag);
    }
}

impl XmlModel for TableParam {
    const TAG: XmlName = XmlName::local("column");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A service input parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputParam {
    /// Name, description and annotations
    #[serde(flatten)]
    pub param: BaseParam,
    /// Whether the parameter is defined by a standard interface
    pub std: Option<bool>,
    /// Whether the parameter is required
    pub param_use: Option<ParamUse>,
    /// Type of the parameter value
    pub data_type: Option<SimpleDataType>,
}

impl XmlElement for InputParam {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            param: BaseParam::read(node)?,
            std: node.attr_value("std".into())?,
            param_use: node.attr_value("use".into())?,
            data_type: node.child_model("dataType".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_opt_attr("std".into(), self.std.as_ref());
        element.set_opt_attr("use".into(), self.param_use.as_ref());
        self.param.write(element, options);
        element.push_opt_model("dataType".into(), self.data_type.as_ref(), options);
    }
}

impl XmlModel for InputParam {
    const TAG: XmlName = XmlName::local("param");
    const NSMAP: &'static [Namespace] = NSMAP;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::xml_equal;

    #[test]
    fn test_votable_data_type() {
        let xml = r#"<dataType xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1"
            xsi:type="vs:VOTableType" arraysize="*">char</dataType>"#;
        let data_type = TableDataType::from_xml(xml).unwrap();
        let expected = VoTableType::new(VoTableTypeName::Char)
            .with_arraysize(ArrayShape::new("*").unwrap());
        assert_eq!(data_type, TableDataType::VoTable(expected));
        assert!(xml_equal(&data_type.to_xml().unwrap(), xml).unwrap());
    }

    #[test]
    fn test_unknown_column_type_kept() {
        let xml = r#"<dataType xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xsi:type="custom:Type">geometry</dataType>"#;
        match TableDataType::from_xml(xml).unwrap() {
            TableDataType::Other { xsi_type, data_type } => {
                assert_eq!(xsi_type.as_deref(), Some("Type"));
                assert_eq!(data_type.value, "geometry");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_tap_type_size_positive() {
        let xml = r#"<dataType xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1"
            xsi:type="vs:TAPType" size="0">VARCHAR</dataType>"#;
        assert!(TableDataType::from_xml(xml).is_err());
    }

    #[test]
    fn test_input_param() {
        let xml = r#"<param use="required" std="true"><name>MAXREC</name>
            <dataType>integer</dataType></param>"#;
        let param = InputParam::from_xml(xml).unwrap();
        assert_eq!(param.param_use, Some(ParamUse::Required));
        assert_eq!(param.param.name.as_deref(), Some("MAXREC"));
        assert_eq!(param.data_type.unwrap().value, SimpleTypeName::Integer);
        assert!(InputParam::from_xml("<param><dataType>float</dataType></param>").is_err());
    }

    #[test]
    fn test_coverage() {
        let xml = r#"<coverage><spatial>0/0-11</spatial>
            <temporal>47847.2 51370.2</temporal><waveband>Optical</waveband>
            <regionOfRegard>0.5</regionOfRegard></coverage>"#;
        let coverage = Coverage::from_xml(xml).unwrap();
        assert_eq!(coverage.temporal, vec![FloatInterval::new(47847.2, 51370.2)]);
        assert_eq!(coverage.region_of_regard, Some(0.5));
        let written = coverage
            .to_xml_with(&WriteOptions::new().with_skip_empty(true))
            .unwrap();
        assert!(xml_equal(&written, xml).unwrap());
    }
}
