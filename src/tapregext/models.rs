//! TAPRegExt capability models

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::Result;
use crate::model::{xml_enum, XmlElement, XmlModel};
use crate::namespaces::{Namespace, XmlName, TR};
use crate::voresource::{read_base_capability, Capability, IdentifierUri};
use serde::Serialize;
use url::Url;

use super::NSMAP;

/// Standard identifier of TAP capabilities
pub const TAP_STANDARD_ID: &str = "ivo://ivoa.net/std/TAP";

fn tap_standard_id() -> Result<Url> {
    Ok(Url::parse(TAP_STANDARD_ID)?)
}

/// A capability restricted to the TAP standard identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TapCapRestriction {
    /// Common capability fields
    #[serde(flatten)]
    pub capability: Capability,
}

impl TapCapRestriction {
    /// A capability with the TAP standard identifier
    pub fn new() -> Result<Self> {
        Ok(Self {
            capability: Capability::new(tap_standard_id()?),
        })
    }
}

impl XmlElement for TapCapRestriction {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            capability: read_base_capability(node, Some(&tap_standard_id()?))?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.capability.write(element, options);
    }
}

impl XmlModel for TapCapRestriction {
    const TAG: XmlName = XmlName::local("capability");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// An IVOA-defined data model supported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataModelType {
    /// Human-readable name of the data model
    pub value: String,
    /// IVOA identifier of the data model
    pub ivo_id: IdentifierUri,
}

impl XmlElement for DataModelType {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.text(),
            ivo_id: node.required_attr("ivo-id".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("ivo-id".into(), &self.ivo_id);
        element.set_text(self.value.as_str());
    }
}

impl XmlModel for DataModelType {
    const TAG: XmlName = XmlName::local("dataModel");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A version of a query language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    /// The version label
    pub value: String,
    /// IVOA identifier of the language version
    pub ivo_id: Option<IdentifierUri>,
}

impl Version {
    /// A version without an identifier
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ivo_id: None,
        }
    }
}

impl XmlElement for Version {
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

impl XmlModel for Version {
    const TAG: XmlName = XmlName::local("version");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// An optional language feature, such as a user-defined function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageFeature {
    /// Formal notation of the feature
    pub form: String,
    /// Human-readable documentation
    pub description: Option<String>,
}

impl XmlElement for LanguageFeature {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            form: node.required_child_value("form".into())?,
            description: node.child_value("description".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.push_value("form".into(), &self.form);
        element.push_opt_value("description".into(), self.description.as_ref());
    }
}

impl XmlModel for LanguageFeature {
    const TAG: XmlName = XmlName::local("feature");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// An output format the service can produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFormat {
    /// IVOA identifier of the format
    pub ivo_id: Option<IdentifierUri>,
    /// MIME type of the format
    pub mime: String,
    /// Other FORMAT values that select this MIME type
    pub alias: Vec<String>,
}

impl OutputFormat {
    /// A format with a MIME type and no aliases
    pub fn new(mime: impl Into<String>) -> Self {
        Self {
            ivo_id: None,
            mime: mime.into(),
            alias: Vec::new(),
        }
    }
}

impl XmlElement for OutputFormat {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            ivo_id: node.attr_value("ivo-id".into())?,
            mime: node.required_child_value("mime".into())?,
            alias: node.child_values("alias".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_opt_attr("ivo-id".into(), self.ivo_id.as_ref());
        element.push_value("mime".into(), &self.mime);
        element.push_values("alias".into(), &self.alias);
    }
}

impl XmlModel for OutputFormat {
    const TAG: XmlName = XmlName::local("outputFormat");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// An upload method supported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadMethod {
    /// IVOA identifier of the upload method
    pub ivo_id: IdentifierUri,
}

impl XmlElement for UploadMethod {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            ivo_id: node.required_attr("ivo-id".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("ivo-id".into(), &self.ivo_id);
    }
}

impl XmlModel for UploadMethod {
    const TAG: XmlName = XmlName::local("uploadMethod");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Time limits in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeLimits {
    /// Limit for newly created jobs
    pub default: Option<u64>,
    /// Value the limit cannot be raised above
    pub hard: Option<u64>,
}

impl XmlElement for TimeLimits {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            default: node.child_value("default".into())?,
            hard: node.child_value("hard".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.push_opt_value("default".into(), self.default.as_ref());
        element.push_opt_value("hard".into(), self.hard.as_ref());
    }
}

impl XmlModel for TimeLimits {
    const TAG: XmlName = XmlName::local("timeLimits");
    const NSMAP: &'static [Namespace] = NSMAP;
}

xml_enum! {
    /// Unit of a data limit
    pub enum DataLimitUnit {
        /// Bytes
        Byte => "byte",
        /// Table rows
        Row => "row",
    }
}

/// A limit on the size of data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataLimit {
    /// The limit
    pub value: u64,
    /// Unit of the limit
    pub unit: DataLimitUnit,
}

impl DataLimit {
    /// A limit in rows
    pub fn rows(value: u64) -> Self {
        Self {
            value,
            unit: DataLimitUnit::Row,
        }
    }

    /// A limit in bytes
    pub fn bytes(value: u64) -> Self {
        Self {
            value,
            unit: DataLimitUnit::Byte,
        }
    }
}

impl XmlElement for DataLimit {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            value: node.value()?,
            unit: node.required_attr("unit".into())?,
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("unit".into(), &self.unit);
        element.set_value(&self.value);
    }
}

impl XmlModel for DataLimit {
    const TAG: XmlName = XmlName::local("dataLimit");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Default and hard limits on the size of data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataLimits {
    /// Limit for newly created jobs
    pub default: Option<DataLimit>,
    /// Value the limit cannot be raised above
    pub hard: Option<DataLimit>,
}

impl XmlElement for DataLimits {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            default: node.child_model("default".into())?,
            hard: node.child_model("hard".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_opt_model("default".into(), self.default.as_ref(), options);
        element.push_opt_model("hard".into(), self.hard.as_ref(), options);
    }
}

impl XmlModel for DataLimits {
    const TAG: XmlName = XmlName::local("dataLimits");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// Language features of one type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageFeatureList {
    /// Feature type, usually an IVOA identifier
    pub feature_type: String,
    /// The features
    pub feature: Vec<LanguageFeature>,
}

impl XmlElement for LanguageFeatureList {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            feature_type: node.required_attr("type".into())?,
            feature: node.child_models("feature".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.set_attr("type".into(), self.feature_type.as_str());
        element.push_models("feature".into(), &self.feature, options);
    }
}

impl XmlModel for LanguageFeatureList {
    const TAG: XmlName = XmlName::local("languageFeatures");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// A query language supported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Name without a version suffix, e.g. `ADQL`
    pub name: String,
    /// Supported versions (at least one)
    pub version: Vec<Version>,
    /// Short description
    pub description: Option<String>,
    /// Optional features grouped by type
    pub language_features: Vec<LanguageFeatureList>,
}

impl Language {
    /// A language with a single version
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version: vec![version],
            description: None,
            language_features: Vec::new(),
        }
    }

    /// Features of the given type
    pub fn features<'a>(
        &'a self,
        feature_type: &'a str,
    ) -> impl Iterator<Item = &'a LanguageFeature> + 'a {
        self.language_features
            .iter()
            .filter(move |l| l.feature_type == feature_type)
            .flat_map(|l| l.feature.iter())
    }
}

impl XmlElement for Language {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            name: node.required_child_value("name".into())?,
            version: node.required_child_models("version".into())?,
            description: node.child_value("description".into())?,
            language_features: node.child_models("languageFeatures".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        element.push_value("name".into(), &self.name);
        element.push_models("version".into(), &self.version, options);
        element.push_opt_value("description".into(), self.description.as_ref());
        element.push_models("languageFeatures".into(), &self.language_features, options);
    }
}

impl XmlModel for Language {
    const TAG: XmlName = XmlName::local("language");
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// The capability of a TAP service (`tr:TableAccess`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableAccess {
    /// Capability fields with the TAP standard identifier
    #[serde(flatten)]
    pub restriction: TapCapRestriction,
    /// Supported data models
    pub data_model: Vec<DataModelType>,
    /// Supported query languages (at least one)
    pub language: Vec<Language>,
    /// Supported output formats (at least one)
    pub output_format: Vec<OutputFormat>,
    /// Supported upload methods
    pub upload_method: Vec<UploadMethod>,
    /// Limits on the time between job creation and destruction
    pub retention_period: Option<TimeLimits>,
    /// Limits on the execution duration
    pub execution_duration: Option<TimeLimits>,
    /// Limits on the size of returned data
    pub output_limit: Option<DataLimits>,
    /// Limits on the size of uploaded data
    pub upload_limit: Option<DataLimits>,
}

impl TableAccess {
    /// A TAP capability with one language and one output format
    pub fn new(language: Language, output_format: OutputFormat) -> Result<Self> {
        Ok(Self {
            restriction: TapCapRestriction::new()?,
            data_model: Vec::new(),
            language: vec![language],
            output_format: vec![output_format],
            upload_method: Vec::new(),
            retention_period: None,
            execution_duration: None,
            output_limit: None,
            upload_limit: None,
        })
    }

    /// Find a supported language by name
    pub fn find_language(&self, name: &str) -> Option<&Language> {
        self.language.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }
}

impl XmlElement for TableAccess {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            restriction: TapCapRestriction::read(node)?,
            data_model: node.child_models("dataModel".into())?,
            language: node.required_child_models("language".into())?,
            output_format: node.required_child_models("outputFormat".into())?,
            upload_method: node.child_models("uploadMethod".into())?,
            retention_period: node.child_model("retentionPeriod".into())?,
            execution_duration: node.child_model("executionDuration".into())?,
            output_limit: node.child_model("outputLimit".into())?,
            upload_limit: node.child_model("uploadLimit".into())?,
        })
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.restriction.write(element, options);
        element.set_xsi_type(TR, "TableAccess");
        element.push_models("dataModel".into(), &self.data_model, options);
        element.push_models("language".into(), &self.language, options);
        element.push_models("outputFormat".into(), &self.output_format, options);
        element.push_models("uploadMethod".into(), &self.upload_method, options);
        element.push_opt_model("retentionPeriod".into(), self.retention_period.as_ref(), options);
        element.push_opt_model(
            "executionDuration".into(),
            self.execution_duration.as_ref(),
            options,
        );
        element.push_opt_model("outputLimit".into(), self.output_limit.as_ref(), options);
        element.push_opt_model("uploadLimit".into(), self.upload_limit.as_ref(), options);
    }
}

impl XmlModel for TableAccess {
    const TAG: XmlName = XmlName::local("capability");
    const NSMAP: &'static [Namespace] = NSMAP;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_id_defaults_to_tap() {
        let restriction = TapCapRestriction::from_xml("<capability/>").unwrap();
        assert_eq!(restriction.capability.standard_id.as_str(), TAP_STANDARD_ID);
    }

    #[test]
    fn test_data_limit_unit() {
        let limit = DataLimit::from_xml(r#"<dataLimit unit="byte">10</dataLimit>"#).unwrap();
        assert_eq!(limit, DataLimit::bytes(10));
        assert!(DataLimit::from_xml(r#"<dataLimit unit="kb">10</dataLimit>"#).is_err());
        assert!(DataLimit::from_xml("<dataLimit>10</dataLimit>").is_err());
    }

    #[test]
    fn test_language_features_by_type() {
        let xml = r#"<language><name>ADQL</name><version>2.0</version>
            <languageFeatures type="ivo://ivoa.net/std/TAPRegExt#features-udf">
              <feature><form>ivo_nocasematch(value VARCHAR(*), pattern VARCHAR(*)) -> INTEGER</form></feature>
            </languageFeatures></language>"#;
        let language = Language::from_xml(xml).unwrap();
        assert_eq!(
            language
                .features("ivo://ivoa.net/std/TAPRegExt#features-udf")
                .count(),
            1
        );
        assert_eq!(language.features("other").count(), 0);
    }

    #[test]
    fn test_language_requires_version() {
        assert!(Language::from_xml("<language><name>ADQL</name></language>").is_err());
    }

    #[test]
    fn test_table_access_type() {
        let access = TableAccess::new(
            Language::new("ADQL", Version::new("2.0")),
            OutputFormat::new("application/x-votable+xml"),
        )
        .unwrap();
        let xml = access.to_xml().unwrap();
        assert!(xml.contains(r#"xsi:type="tr:TableAccess""#));
        assert!(xml.contains(r#"standardID="ivo://ivoa.net/std/TAP""#));
        let parsed = TableAccess::from_xml(&xml).unwrap();
        assert_eq!(parsed, access);
        assert!(parsed.find_language("adql").is_some());
    }
}
