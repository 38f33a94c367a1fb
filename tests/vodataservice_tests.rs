//! VODataService resource and table tests

use pretty_assertions::assert_eq;
use vo_models::comparison::canonicalize;
use vo_models::model::XmlModel;
use vo_models::vodataservice::{
    ArrayShape, CatalogService, Coverage, DataCollection, FloatInterval, HttpQueryType, ParamHttp,
    ParamUse, SimpleTypeName, Table, TableDataType, TableParam, TapTypeName, VoTableTypeName,
};
use vo_models::voresource::AccessUse;
use vo_models::{AnyInterface, AnyResource, WriteOptions};

fn assert_same_xml(expected: &str, actual: &str) {
    assert_eq!(canonicalize(expected).unwrap(), canonicalize(actual).unwrap());
}

fn skip_empty() -> WriteOptions {
    WriteOptions::new().with_skip_empty(true)
}

const CURATION_AND_CONTENT: &str = r#"<curation>
    <publisher>Example Observatory</publisher>
    <contact><name>Jane Doe</name><email>jane@example.edu</email></contact>
    </curation>
    <content>
    <subject>stars</subject>
    <description>Positions and magnitudes of stars</description>
    <referenceURL>https://example.edu/catalog</referenceURL>
    <type>Catalog</type>
    </content>"#;

fn catalog_service_xml() -> String {
    format!(
        r#"<CatalogService xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:vr="http://www.ivoa.net/xml/VOResource/v1.0"
        xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1"
        xsi:type="vs:CatalogService" created="2020-06-01T12:00:00.000Z"
        updated="2021-02-03T04:05:06.000Z" status="active">
        <title>Example Star Catalog</title>
        <shortName>stars</shortName>
        <identifier>ivo://example.edu/stars</identifier>
        {}
        <capability standardID="ivo://ivoa.net/std/ConeSearch">
          <interface xsi:type="vs:ParamHTTP" role="std">
            <accessURL use="base">https://example.edu/stars/scs</accessURL>
            <queryType>GET</queryType>
            <resultType>application/x-votable+xml</resultType>
            <param std="true" use="required">
              <name>RA</name><description>Right ascension</description><unit>deg</unit>
              <ucd>pos.eq.ra</ucd><dataType>real</dataType>
            </param>
            <param use="optional"><name>VERB</name><dataType>integer</dataType></param>
            <testQuery>RA=10&amp;DEC=10&amp;SR=0.1</testQuery>
          </interface>
        </capability>
        <facility>Example Telescope</facility>
        <coverage>
          <spatial>0/0-11</spatial>
          <temporal>51544 59580</temporal>
          <waveband>Optical</waveband>
        </coverage>
        <tableset>
          <schema>
            <name>stars</name>
            <description>Star tables</description>
            <table type="output">
              <name>stars.main</name>
              <nrows>120000</nrows>
              <column std="true">
                <name>ra</name><unit>deg</unit>
                <dataType xsi:type="vs:VOTableType">double</dataType>
                <flag>indexed</flag><flag>primary</flag>
              </column>
              <column>
                <name>name</name>
                <dataType xsi:type="vs:TAPType" size="32">VARCHAR</dataType>
                <flag>nullable</flag>
              </column>
              <column>
                <name>flux</name>
                <dataType xsi:type="vs:VOTableType" arraysize="3">float</dataType>
              </column>
            </table>
          </schema>
        </tableset>
        </CatalogService>"#,
        CURATION_AND_CONTENT
    )
}

#[test]
fn test_read_catalog_service() {
    let xml = catalog_service_xml();
    let catalog = CatalogService::from_xml(&xml).unwrap();
    let service = &catalog.data_resource.service;
    assert_eq!(service.resource.title, "Example Star Catalog");
    assert_eq!(service.resource.short_name.as_deref(), Some("stars"));
    assert_eq!(service.resource.identifier.as_str(), "ivo://example.edu/stars");
    assert_eq!(catalog.data_resource.facility[0].value, "Example Telescope");

    let capability = service.capability[0].capability();
    assert_eq!(capability.standard_id.as_str(), "ivo://ivoa.net/std/ConeSearch");
    let param_http = match &capability.interface[0] {
        AnyInterface::ParamHttp(param_http) => param_http,
        other => panic!("expected a ParamHTTP interface, got {:?}", other),
    };
    assert_eq!(param_http.interface.role.as_deref(), Some("std"));
    assert_eq!(param_http.interface.access_url[0].access_use, AccessUse::Base);
    assert_eq!(param_http.query_type, vec![HttpQueryType::Get]);
    assert_eq!(param_http.test_query.as_deref(), Some("RA=10&DEC=10&SR=0.1"));

    let ra = param_http.find_param("RA").unwrap();
    assert_eq!(ra.param_use, Some(ParamUse::Required));
    assert_eq!(ra.std, Some(true));
    assert_eq!(ra.param.ucd.as_deref(), Some("pos.eq.ra"));
    assert_eq!(ra.data_type.as_ref().unwrap().value, SimpleTypeName::Real);
    assert!(param_http.find_param("DEC").is_none());

    let coverage = catalog.data_resource.coverage.as_ref().unwrap();
    assert_eq!(coverage.spatial.as_ref().unwrap().value, "0/0-11");
    assert_eq!(coverage.temporal, vec![FloatInterval::new(51544.0, 59580.0)]);
    assert_eq!(coverage.waveband, vec!["Optical".to_string()]);

    let tableset = catalog.tableset.as_ref().unwrap();
    assert_eq!(tableset.table_count(), 1);
    let table = tableset.find_table("stars.main").unwrap();
    assert_eq!(table.table_type.as_deref(), Some("output"));
    assert_eq!(table.nrows, Some(120000));
}

#[test]
fn test_column_data_types() {
    let catalog = CatalogService::from_xml(&catalog_service_xml()).unwrap();
    let table = catalog.tableset.as_ref().unwrap().find_table("stars.main").unwrap();

    let ra = table.find_column("ra").unwrap();
    assert_eq!(ra.flag, vec!["indexed".to_string(), "primary".to_string()]);
    match ra.data_type.as_ref().unwrap() {
        TableDataType::VoTable(data_type) => {
            assert_eq!(data_type.data_type.value, VoTableTypeName::Double)
        }
        other => panic!("expected a VOTable type, got {:?}", other),
    }

    match table.find_column("name").unwrap().data_type.as_ref().unwrap() {
        TableDataType::Tap(data_type) => {
            assert_eq!(data_type.data_type.value, TapTypeName::VarChar);
            assert_eq!(data_type.size, Some(32));
        }
        other => panic!("expected a TAP type, got {:?}", other),
    }

    match table.find_column("flux").unwrap().data_type.as_ref().unwrap() {
        TableDataType::VoTable(data_type) => assert_eq!(
            data_type.data_type.arraysize,
            Some(ArrayShape::new("3").unwrap())
        ),
        other => panic!("expected a VOTable type, got {:?}", other),
    }
}

#[test]
fn test_catalog_service_rewrite() {
    let xml = catalog_service_xml();
    let catalog = CatalogService::from_xml(&xml).unwrap();
    let written = catalog.to_xml_with(&skip_empty()).unwrap();
    assert_same_xml(&xml, &written);
    assert_eq!(CatalogService::from_xml(&written).unwrap(), catalog);
}

#[test]
fn test_param_http_built_in_code() {
    let xml = r#"<interface xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1" xsi:type="vs:ParamHTTP">
        <accessURL use="base">https://example.edu/sync</accessURL>
        <queryType>GET</queryType>
        <queryType>POST</queryType>
        <resultType>text/csv</resultType>
        </interface>"#;

    let base = vo_models::voresource::Interface::new(vo_models::voresource::AccessUrl::new(
        url::Url::parse("https://example.edu/sync").unwrap(),
        AccessUse::Base,
    ));
    let mut interface = ParamHttp::new(base);
    interface.query_type = vec![HttpQueryType::Get, HttpQueryType::Post];
    interface.result_type = Some("text/csv".to_string());

    assert_same_xml(xml, &interface.to_xml_with(&skip_empty()).unwrap());
    assert_eq!(ParamHttp::from_xml(xml).unwrap(), interface);
}

#[test]
fn test_data_collection_dispatch() {
    let xml = format!(
        r#"<ri:Resource xmlns:ri="http://www.ivoa.net/xml/RegistryInterface/v1.0"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:vs="http://www.ivoa.net/xml/VODataService/v1.1" xsi:type="vs:DataCollection"
        created="2020-06-01T12:00:00.000Z" updated="2020-06-01T12:00:00.000Z" status="active">
        <title>Example Plates</title>
        <identifier>ivo://example.edu/plates</identifier>
        {}
        <instrument>Plate camera</instrument>
        <rights>public</rights>
        <format isMIMEType="true">image/fits</format>
        <coverage><waveband>Optical</waveband><regionOfRegard>0.01</regionOfRegard></coverage>
        <accessURL use="dir">https://example.edu/plates/</accessURL>
        </ri:Resource>"#,
        CURATION_AND_CONTENT
    );

    let resource = AnyResource::from_xml(&xml).unwrap();
    assert_eq!(resource.type_name(), "DataCollection");
    assert!(resource.service().is_none());
    let collection: &DataCollection = match &resource {
        AnyResource::DataCollection(collection) => collection,
        other => panic!("expected a data collection, got {:?}", other),
    };
    assert_eq!(collection.resource.xsi_type, None);
    assert_eq!(collection.instrument[0].value, "Plate camera");
    assert!(collection.format[0].is_mime_type);
    assert_eq!(collection.access_url.as_ref().unwrap().access_use, AccessUse::Dir);
    assert_eq!(
        collection.coverage,
        Some(Coverage {
            waveband: vec!["Optical".to_string()],
            region_of_regard: Some(0.01),
            ..Coverage::default()
        })
    );

    assert_same_xml(&xml, &resource.to_xml_with(&skip_empty()).unwrap());
}

#[test]
fn test_table_built_in_code() {
    let mut column = TableParam::default();
    column.param.name = Some("dec".to_string());
    column.param.unit = Some("deg".to_string());
    column.flag.push("indexed".to_string());

    let mut table = Table::named("stars.main");
    table.description = Some("Main table".to_string());
    table.column.push(column);

    let expected = r#"<table><name>stars.main</name><description>Main table</description>
        <column><name>dec</name><unit>deg</unit><flag>indexed</flag></column></table>"#;
    assert_same_xml(expected, &table.to_xml_with(&skip_empty()).unwrap());
    assert_eq!(Table::from_xml(expected).unwrap(), table);
}

#[test]
fn test_table_requires_name() {
    assert!(Table::from_xml("<table><title>No name</title></table>").is_err());
}

#[test]
fn test_catalog_service_json() {
    let catalog = CatalogService::from_xml(&catalog_service_xml()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
    assert_eq!(json["title"], "Example Star Catalog");
    assert_eq!(json["tableset"]["schema"][0]["name"], "stars");
    assert_eq!(json["facility"][0]["value"], "Example Telescope");
}
