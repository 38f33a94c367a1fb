//! VOSI availability, capabilities and tables tests

use pretty_assertions::assert_eq;
use url::Url;
use vo_models::comparison::canonicalize;
use vo_models::model::XmlModel;
use vo_models::tapregext::{
    DataLimit, DataLimits, Language, LanguageFeature, LanguageFeatureList, OutputFormat,
    TableAccess, Version,
};
use vo_models::vodataservice::{ParamHttp, TableSchema, TableSet};
use vo_models::voresource::{AccessUrl, AccessUse, Capability, IdentifierUri, Interface, WebBrowser};
use vo_models::vosi::{Availability, VosiCapabilities, VosiTable, VosiTableSet};
use vo_models::{AnyCapability, AnyInterface, UtcTimestamp, WriteOptions};

fn url(value: &str) -> Url {
    Url::parse(value).unwrap()
}

fn assert_same_xml(expected: &str, actual: &str) {
    assert_eq!(canonicalize(expected).unwrap(), canonicalize(actual).unwrap());
}

fn skip_empty() -> WriteOptions {
    WriteOptions::new().with_skip_empty(true)
}

const AVAILABILITY: &str = r#"<availability xmlns="http://www.ivoa.net/xml/VOSIAvailability/v1.0">
    <available>true</available>
    <upSince>2023-05-01T08:00:00.000Z</upSince>
    <downAt>2023-06-01T08:00:00.000Z</downAt>
    <note>Scheduled maintenance in June</note>
    <note>Contact the helpdesk for details</note>
    </availability>"#;

#[test]
fn test_read_availability() {
    let availability = Availability::from_xml(AVAILABILITY).unwrap();
    assert!(availability.available);
    assert_eq!(
        availability.up_since.map(|t| t.to_vo_string()).as_deref(),
        Some("2023-05-01T08:00:00.000Z")
    );
    assert_eq!(availability.back_at, None);
    assert_eq!(availability.note.len(), 2);
}

#[test]
fn test_write_availability() {
    let mut availability = Availability::up(UtcTimestamp::from_ymd_hms(2023, 5, 1, 8, 0, 0))
        .with_note("Scheduled maintenance in June")
        .with_note("Contact the helpdesk for details");
    availability.down_at = UtcTimestamp::from_ymd_hms(2023, 6, 1, 8, 0, 0);

    assert_same_xml(AVAILABILITY, &availability.to_xml_with(&skip_empty()).unwrap());
    assert_eq!(Availability::from_xml(AVAILABILITY).unwrap(), availability);
}

#[test]
fn test_availability_offset_timestamp_rejected() {
    let xml = r#"<availability xmlns="http://www.ivoa.net/xml/VOSIAvailability/v1.0">
        <available>false</available><backAt>2023-06-01T08:00:00+02:00</backAt></availability>"#;
    assert!(Availability::from_xml(xml).is_err());
}

const CAPABILITIES: &str = r#"<vosi:capabilities xmlns:vosi="http://www.ivoa.net/xml/VOSICapabilities/v1.0"
    xmlns:vr="http://www.ivoa.net/xml/VOResource/v1.0"
    xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1"
    xmlns:tr="http://www.ivoa.net/xml/TAPRegExt/v1.0"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <capability standardID="ivo://ivoa.net/std/TAP" xsi:type="tr:TableAccess">
        <interface role="std" xsi:type="vs:ParamHTTP" version="1.1">
            <accessURL use="full">https://someservice.edu/tap</accessURL>
        </interface>
        <language>
            <name>ADQL</name>
            <version ivo-id="ivo://ivoa.net/std/ADQL#v2.0">2.0</version>
            <description>ADQL-2.0 with geometry support</description>
            <languageFeatures type="ivo://ivoa.net/std/TAPRegExt#features-adql-geo">
                <feature><form>POINT</form></feature>
                <feature><form>CIRCLE</form></feature>
            </languageFeatures>
        </language>
        <outputFormat ivo-id="ivo://ivoa.net/std/TAPRegExt#output-votable-td">
            <mime>application/x-votable+xml</mime>
            <alias>votable</alias>
        </outputFormat>
        <outputFormat>
            <mime>text/csv;header=present</mime>
            <alias>csv</alias>
        </outputFormat>
        <outputLimit>
            <default unit="row">100000</default>
            <hard unit="row">100000</hard>
        </outputLimit>
    </capability>
    <capability standardID="ivo://ivoa.net/std/VOSI#capabilities">
        <interface xsi:type="vs:ParamHTTP" role="std">
            <accessURL use="full">https://someservice.edu/tap/capabilities</accessURL>
        </interface>
    </capability>
    <capability standardID="ivo://ivoa.net/std/VOSI#availability">
        <interface xsi:type="vs:ParamHTTP" role="std">
            <accessURL use="full">https://someservice.edu/tap/availability</accessURL>
        </interface>
    </capability>
    <capability standardID="ivo://ivoa.net/std/VOSI#tables">
        <interface xsi:type="vs:ParamHTTP" role="std" version="1.1">
            <accessURL use="full">https://someservice.edu/tap/tables</accessURL>
        </interface>
    </capability>
    <capability standardID="ivo://ivoa.net/std/DALI#examples">
        <interface xsi:type="vr:WebBrowser">
            <accessURL use="full">https://someservice.edu/tap/examples</accessURL>
        </interface>
    </capability>
    </vosi:capabilities>"#;

fn param_http(access_url: &str, version: Option<&str>) -> ParamHttp {
    let mut interface = Interface::new(AccessUrl::new(url(access_url), AccessUse::Full)).with_role("std");
    interface.version = version.map(str::to_string);
    ParamHttp::new(interface)
}

fn tap_capability() -> TableAccess {
    let mut language = Language::new(
        "ADQL",
        Version {
            value: "2.0".to_string(),
            ivo_id: Some(IdentifierUri::new("ivo://ivoa.net/std/ADQL#v2.0").unwrap()),
        },
    );
    language.description = Some("ADQL-2.0 with geometry support".to_string());
    language.language_features.push(LanguageFeatureList {
        feature_type: "ivo://ivoa.net/std/TAPRegExt#features-adql-geo".to_string(),
        feature: ["POINT", "CIRCLE"]
            .iter()
            .map(|form| LanguageFeature {
                form: form.to_string(),
                description: None,
            })
            .collect(),
    });

    let mut votable = OutputFormat::new("application/x-votable+xml");
    votable.ivo_id = Some(IdentifierUri::new("ivo://ivoa.net/std/TAPRegExt#output-votable-td").unwrap());
    votable.alias.push("votable".to_string());
    let mut csv = OutputFormat::new("text/csv;header=present");
    csv.alias.push("csv".to_string());

    let mut access = TableAccess::new(language, votable).unwrap();
    access.output_format.push(csv);
    access
        .restriction
        .capability
        .interface
        .push(param_http("https://someservice.edu/tap", Some("1.1")).into());
    access.output_limit = Some(DataLimits {
        default: Some(DataLimit::rows(100000)),
        hard: Some(DataLimit::rows(100000)),
    });
    access
}

fn expected_capabilities() -> VosiCapabilities {
    let examples = WebBrowser {
        interface: Interface::new(AccessUrl::new(
            url("https://someservice.edu/tap/examples"),
            AccessUse::Full,
        )),
    };
    VosiCapabilities::new(vec![
        tap_capability().into(),
        Capability::new(url("ivo://ivoa.net/std/VOSI#capabilities"))
            .with_interface(param_http("https://someservice.edu/tap/capabilities", None))
            .into(),
        Capability::new(url("ivo://ivoa.net/std/VOSI#availability"))
            .with_interface(param_http("https://someservice.edu/tap/availability", None))
            .into(),
        Capability::new(url("ivo://ivoa.net/std/VOSI#tables"))
            .with_interface(param_http("https://someservice.edu/tap/tables", Some("1.1")))
            .into(),
        Capability::new(url("ivo://ivoa.net/std/DALI#examples"))
            .with_interface(examples)
            .into(),
    ])
}

#[test]
fn test_read_capabilities() {
    let capabilities = VosiCapabilities::from_xml(CAPABILITIES).unwrap();
    assert_eq!(capabilities.capability.len(), 5);

    let tap = match capabilities.find("ivo://ivoa.net/std/TAP").unwrap() {
        AnyCapability::TableAccess(access) => access,
        other => panic!("expected a TAP capability, got {:?}", other),
    };
    assert_eq!(tap.output_format.len(), 2);
    assert_eq!(tap.output_format[1].alias, vec!["csv".to_string()]);
    assert_eq!(tap.language[0].features("ivo://ivoa.net/std/TAPRegExt#features-adql-geo").count(), 2);

    let tables = capabilities.find("ivo://ivoa.net/std/VOSI#tables").unwrap();
    let interface = &tables.capability().interface[0];
    assert!(matches!(interface, AnyInterface::ParamHttp(_)));
    assert_eq!(interface.interface().version.as_deref(), Some("1.1"));
    assert_eq!(
        interface.access_url().map(Url::as_str),
        Some("https://someservice.edu/tap/tables")
    );

    let examples = capabilities.find("ivo://ivoa.net/std/DALI#examples").unwrap();
    assert!(matches!(
        examples.capability().interface[0],
        AnyInterface::WebBrowser(_)
    ));

    assert_eq!(capabilities, expected_capabilities());
}

#[test]
fn test_write_capabilities() {
    let written = expected_capabilities().to_xml_with(&skip_empty()).unwrap();
    assert!(written.starts_with("<vosi:capabilities"));
    assert_same_xml(CAPABILITIES, &written);
}

const TABLESET: &str = r#"<vosi:tableset xmlns:vosi="http://www.ivoa.net/xml/VOSITables/v1.0"
    xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <schema>
        <name>tap_schema</name>
        <description>schema information for TAP services</description>
        <table type="output">
            <name>tap_schema.schemas</name>
            <description>description of schemas in this tableset</description>
            <column std="true">
                <name>schema_name</name>
                <description>schema name for reference to tap_schema.schemas</description>
                <dataType xsi:type="vs:VOTableType" arraysize="*">char</dataType>
            </column>
        </table>
        <table type="output">
            <name>tap_schema.keys</name>
            <foreignKey>
                <targetTable>tap_schema.tables</targetTable>
                <fkColumn><fromColumn>from_table</fromColumn><targetColumn>table_name</targetColumn></fkColumn>
            </foreignKey>
        </table>
    </schema>
    </vosi:tableset>"#;

#[test]
fn test_read_tableset() {
    let tableset = VosiTableSet::from_xml(TABLESET).unwrap();
    assert_eq!(tableset.schema.len(), 1);
    assert_eq!(tableset.table_count(), 2);

    let keys = tableset.find_table("tap_schema.keys").unwrap();
    assert_eq!(keys.foreign_key[0].target_table, "tap_schema.tables");
    assert_eq!(keys.foreign_key[0].fk_column[0].from_column, "from_table");
    assert_eq!(keys.foreign_key[0].fk_column[0].target_column, "table_name");
}

#[test]
fn test_rewrite_tableset() {
    let tableset = VosiTableSet::from_xml(TABLESET).unwrap();
    assert_same_xml(TABLESET, &tableset.to_xml_with(&skip_empty()).unwrap());
}

#[test]
fn test_single_table_from_tableset() {
    let tableset = VosiTableSet::from_xml(TABLESET).unwrap();
    let table = VosiTable::from(tableset.find_table("tap_schema.schemas").unwrap().clone());
    let written = table.to_xml_with(&skip_empty()).unwrap();
    assert!(written.starts_with("<vosi:table"));
    assert_eq!(VosiTable::from_xml(&written).unwrap(), table);
}

#[test]
fn test_empty_tableset_built_in_code() {
    let tableset = VosiTableSet::from(TableSet {
        schema: vec![TableSchema::default()],
    });
    let expected = r#"<vosi:tableset xmlns:vosi="http://www.ivoa.net/xml/VOSITables/v1.0">
        <schema><name>default</name></schema></vosi:tableset>"#;
    assert_same_xml(expected, &tableset.to_xml_with(&skip_empty()).unwrap());
}
