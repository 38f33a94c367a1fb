//! TAPRegExt capability tests

use pretty_assertions::assert_eq;
use vo_models::comparison::canonicalize;
use vo_models::model::XmlModel;
use vo_models::tapregext::{
    DataLimit, DataLimitUnit, DataLimits, DataModelType, Language, LanguageFeature,
    LanguageFeatureList, OutputFormat, TableAccess, TimeLimits, UploadMethod, Version,
    TAP_STANDARD_ID,
};
use vo_models::voresource::IdentifierUri;
use vo_models::{AnyCapability, WriteOptions};

fn ivo(value: &str) -> IdentifierUri {
    IdentifierUri::new(value).unwrap()
}

fn assert_same_xml(expected: &str, actual: &str) {
    assert_eq!(canonicalize(expected).unwrap(), canonicalize(actual).unwrap());
}

const TABLE_ACCESS: &str = r#"<capability xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:tr="http://www.ivoa.net/xml/TAPRegExt/v1.0"
    standardID="ivo://ivoa.net/std/TAP" xsi:type="tr:TableAccess">
    <dataModel ivo-id="ivo://ivoa.net/std/ObsCore#core-1.1">ObsCore-1.1</dataModel>
    <language>
      <name>ADQL</name>
      <version ivo-id="ivo://ivoa.net/std/ADQL#v2.0">2.0</version>
      <description>Astronomical Data Query Language</description>
      <languageFeatures type="ivo://ivoa.net/std/TAPRegExt#features-adqlgeo">
        <feature><form>POINT</form></feature>
        <feature><form>CIRCLE</form><description>A circle on the sky</description></feature>
      </languageFeatures>
    </language>
    <outputFormat ivo-id="ivo://ivoa.net/std/TAPRegExt#output-votable-binary">
      <mime>application/x-votable+xml</mime>
      <alias>votable</alias>
    </outputFormat>
    <uploadMethod ivo-id="ivo://ivoa.net/std/TAPRegExt#upload-inline"/>
    <retentionPeriod><default>172800</default><hard>604800</hard></retentionPeriod>
    <executionDuration><hard>3600</hard></executionDuration>
    <outputLimit>
      <default unit="row">10000</default>
      <hard unit="row">1000000</hard>
    </outputLimit>
    <uploadLimit><hard unit="byte">100000000</hard></uploadLimit>
    </capability>"#;

fn expected_table_access() -> TableAccess {
    let mut language = Language::new(
        "ADQL",
        Version {
            value: "2.0".to_string(),
            ivo_id: Some(ivo("ivo://ivoa.net/std/ADQL#v2.0")),
        },
    );
    language.description = Some("Astronomical Data Query Language".to_string());
    language.language_features.push(LanguageFeatureList {
        feature_type: "ivo://ivoa.net/std/TAPRegExt#features-adqlgeo".to_string(),
        feature: vec![
            LanguageFeature {
                form: "POINT".to_string(),
                description: None,
            },
            LanguageFeature {
                form: "CIRCLE".to_string(),
                description: Some("A circle on the sky".to_string()),
            },
        ],
    });

    let mut output_format = OutputFormat::new("application/x-votable+xml");
    output_format.ivo_id = Some(ivo("ivo://ivoa.net/std/TAPRegExt#output-votable-binary"));
    output_format.alias.push("votable".to_string());

    let mut access = TableAccess::new(language, output_format).unwrap();
    access.data_model.push(DataModelType {
        value: "ObsCore-1.1".to_string(),
        ivo_id: ivo("ivo://ivoa.net/std/ObsCore#core-1.1"),
    });
    access.upload_method.push(UploadMethod {
        ivo_id: ivo("ivo://ivoa.net/std/TAPRegExt#upload-inline"),
    });
    access.retention_period = Some(TimeLimits {
        default: Some(172800),
        hard: Some(604800),
    });
    access.execution_duration = Some(TimeLimits {
        default: None,
        hard: Some(3600),
    });
    access.output_limit = Some(DataLimits {
        default: Some(DataLimit::rows(10000)),
        hard: Some(DataLimit::rows(1000000)),
    });
    access.upload_limit = Some(DataLimits {
        default: None,
        hard: Some(DataLimit::bytes(100000000)),
    });
    access
}

#[test]
fn test_read_table_access() {
    let access = TableAccess::from_xml(TABLE_ACCESS).unwrap();
    assert_eq!(access.restriction.capability.standard_id.as_str(), TAP_STANDARD_ID);
    assert_eq!(access.data_model[0].value, "ObsCore-1.1");

    let adql = access.find_language("ADQL").unwrap();
    assert_eq!(adql.version[0].value, "2.0");
    let geometry: Vec<&str> = adql
        .features("ivo://ivoa.net/std/TAPRegExt#features-adqlgeo")
        .map(|f| f.form.as_str())
        .collect();
    assert_eq!(geometry, vec!["POINT", "CIRCLE"]);

    assert_eq!(access.output_format[0].alias, vec!["votable".to_string()]);
    assert_eq!(access.execution_duration.unwrap().default, None);
    assert_eq!(access.output_limit.unwrap().hard.unwrap().unit, DataLimitUnit::Row);
    assert_eq!(access, expected_table_access());
}

#[test]
fn test_write_table_access() {
    let written = expected_table_access()
        .to_xml_with(&WriteOptions::new().with_skip_empty(true))
        .unwrap();
    assert_same_xml(TABLE_ACCESS, &written);
}

#[test]
fn test_table_access_dispatch() {
    let capability = AnyCapability::from_xml(TABLE_ACCESS).unwrap();
    match &capability {
        AnyCapability::TableAccess(access) => assert_eq!(access.language.len(), 1),
        other => panic!("expected a TAP capability, got {:?}", other),
    }
    assert_eq!(capability.standard_id().as_str(), TAP_STANDARD_ID);
}

#[test]
fn test_table_access_requires_language_and_format() {
    let no_language = r#"<capability standardID="ivo://ivoa.net/std/TAP">
        <outputFormat><mime>text/csv</mime></outputFormat></capability>"#;
    assert!(TableAccess::from_xml(no_language).is_err());

    let no_format = r#"<capability standardID="ivo://ivoa.net/std/TAP">
        <language><name>ADQL</name><version>2.0</version></language></capability>"#;
    assert!(TableAccess::from_xml(no_format).is_err());
}

#[test]
fn test_upload_method_requires_id() {
    assert!(UploadMethod::from_xml("<uploadMethod/>").is_err());
}

#[test]
fn test_table_access_json() {
    let json: serde_json::Value =
        serde_json::from_str(&expected_table_access().to_json().unwrap()).unwrap();
    assert_eq!(json["standard_id"], TAP_STANDARD_ID);
    assert_eq!(json["language"][0]["name"], "ADQL");
    assert_eq!(json["output_limit"]["hard"]["unit"], "row");
}
