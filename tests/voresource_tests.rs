//! VOResource document tests

use pretty_assertions::assert_eq;
use url::Url;
use vo_models::comparison::canonicalize;
use vo_models::error::Error;
use vo_models::model::XmlModel;
use vo_models::voresource::{
    AccessUrl, AccessUse, Capability, Contact, Content, Creator, Curation, Date, IdentifierUri,
    Interface, MirrorUrl, Relationship, Resource, ResourceName, ResourceStatus, Rights,
    SecurityMethod, Service, Source, Validation, ValidationLevel,
};
use vo_models::{AnyCapability, AnyResource, UtcTimestamp, WriteOptions};

fn url(value: &str) -> Url {
    Url::parse(value).unwrap()
}

fn assert_same_xml(expected: &str, actual: &str) {
    assert_eq!(canonicalize(expected).unwrap(), canonicalize(actual).unwrap());
}

fn skip_empty() -> WriteOptions {
    WriteOptions::new().with_skip_empty(true)
}

fn example_curation() -> Curation {
    let mut curation = Curation::new(ResourceName::new("STScI"), vec![Contact::named("John Doe")]);
    curation.creator.push(Creator::named("Doe, J."));
    curation.contributor.push(ResourceName::new("Example Resource"));
    curation.date.push(Date::new(
        UtcTimestamp::parse("2021-01-01T00:00:00Z").unwrap(),
        "update",
    ));
    curation.version = Some("1.0".to_string());
    curation
}

fn example_content() -> Content {
    let mut content = Content::new(
        vec!["Astronomy".to_string()],
        "Example description",
        url("https://example.edu"),
    );
    content.source = Some(Source::new("https://example.edu/").with_format("bibcode"));
    content.content_type.push("Education".to_string());
    content.content_level.push("General".to_string());
    content.relationship.push(Relationship {
        relationship_type: "isPartOf".to_string(),
        related_resource: vec![ResourceName::new("Example Resource")
            .with_ivo_id(IdentifierUri::new("ivo://example.edu/resource").unwrap())],
    });
    content
}

fn example_resource(title: &str) -> Resource {
    let mut resource = Resource::new(title, url("https://example.edu"), example_curation(), example_content());
    resource.created = UtcTimestamp::from_ymd_hms(1996, 3, 11, 19, 0, 0).unwrap();
    resource.updated = resource.created;
    resource
}

const CURATION_AND_CONTENT: &str = r#"<curation>
    <publisher>STScI</publisher>
    <creator><name>Doe, J.</name></creator>
    <contributor>Example Resource</contributor>
    <date role="update">2021-01-01T00:00:00.000Z</date>
    <version>1.0</version>
    <contact><name>John Doe</name></contact>
    </curation>
    <content>
    <subject>Astronomy</subject>
    <description>Example description</description>
    <source format="bibcode">https://example.edu/</source>
    <referenceURL>https://example.edu/</referenceURL>
    <type>Education</type>
    <contentLevel>General</contentLevel>
    <relationship>
    <relationshipType>isPartOf</relationshipType>
    <relatedResource ivo-id="ivo://example.edu/resource">Example Resource</relatedResource>
    </relationship>
    </content>"#;

#[test]
fn test_resource_document() {
    let xml = format!(
        r#"<Resource created="1996-03-11T19:00:00.000Z" updated="1996-03-11T19:00:00.000Z" status="active" version="1.0">
        <validationLevel validatedBy="https://example.edu/">0</validationLevel>
        <title>Example Resource</title>
        <shortName>example</shortName>
        <identifier>https://example.edu/</identifier>
        <altIdentifier>bibcode:2008ivoa.spec.0222P</altIdentifier>
        {}
        </Resource>"#,
        CURATION_AND_CONTENT
    );

    let resource = Resource::from_xml(&xml).unwrap();
    assert_eq!(resource.created.to_vo_string(), "1996-03-11T19:00:00.000Z");
    assert_eq!(resource.status, ResourceStatus::Active);
    assert_eq!(resource.validation_level[0].value, ValidationLevel::Level0);
    assert_eq!(resource.alt_identifier[0].as_str(), "bibcode:2008ivoa.spec.0222P");
    assert_eq!(resource.curation.date[0].role, "update");
    assert_eq!(resource.content.source.as_ref().unwrap().format.as_deref(), Some("bibcode"));
    assert_eq!(
        resource.content.relationship[0].related_resource[0].ivo_id.as_ref().map(|id| id.as_str()),
        Some("ivo://example.edu/resource")
    );

    let mut expected = example_resource("Example Resource");
    expected.version = Some("1.0".to_string());
    expected.validation_level.push(Validation::new(ValidationLevel::Level0, url("https://example.edu")));
    expected.short_name = Some("example".to_string());
    expected.alt_identifier.push(url("bibcode:2008ivoa.spec.0222P"));
    assert_eq!(resource, expected);

    assert_same_xml(&xml, &expected.to_xml_with(&skip_empty()).unwrap());
}

#[test]
fn test_service_document() {
    let xml = format!(
        r#"<Service xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:vr="http://www.ivoa.net/xml/VOResource/v1.0" xsi:type="vr:Service"
        created="1996-03-11T19:00:00.000Z" updated="1996-03-11T19:00:00.000Z" status="active">
        <title>Example Service</title>
        <identifier>https://example.edu/</identifier>
        {}
        <rights rightsURI='https://creativecommons.org/licenses/by/4.0/'>CC BY 4.0</rights>
        <capability standardID='ivo://ivoa.net/std/TAP'/>
        </Service>"#,
        CURATION_AND_CONTENT
    );

    let service = Service::from_xml(&xml).unwrap();
    assert_eq!(service.resource.title, "Example Service");
    assert_eq!(service.resource.xsi_type, None);
    assert_eq!(service.capability.len(), 1);
    assert_eq!(service.capability[0].standard_id().as_str(), "ivo://ivoa.net/std/TAP");
    assert_eq!(
        service.rights[0].rights_uri.as_ref().map(Url::as_str),
        Some("https://creativecommons.org/licenses/by/4.0/")
    );

    let mut expected = Service::new(example_resource("Example Service"))
        .with_capability(Capability::new(url("ivo://ivoa.net/std/TAP")));
    expected
        .rights
        .push(Rights::new("CC BY 4.0").with_rights_uri(url("https://creativecommons.org/licenses/by/4.0/")));
    assert_eq!(service, expected);
    assert_same_xml(&xml, &expected.to_xml_with(&skip_empty()).unwrap());
}

#[test]
fn test_interface_document() {
    let xml = r#"<interface role="std" version="1.0">
        <accessURL use="full">https://example.edu/</accessURL>
        <mirrorURL title="Mirror">https://example.edu/</mirrorURL>
        <securityMethod standardID="ivo://ivoa.net/std/Security#basic"/>
        <testQueryString>test</testQueryString>
        </interface>"#;
    let interface = Interface::from_xml(xml).unwrap();
    assert_eq!(interface.access_url[0].access_use, AccessUse::Full);
    assert_eq!(interface.mirror_url[0].title.as_deref(), Some("Mirror"));
    assert_eq!(interface.test_query_string.as_deref(), Some("test"));

    let mut expected = Interface::new(AccessUrl::new(url("https://example.edu"), AccessUse::Full))
        .with_role("std")
        .with_version("1.0");
    expected.mirror_url.push(MirrorUrl {
        value: url("https://example.edu"),
        title: Some("Mirror".to_string()),
    });
    expected.security_method.push(SecurityMethod {
        standard_id: Some(url("ivo://ivoa.net/std/Security#basic")),
    });
    expected.test_query_string = Some("test".to_string());
    assert_eq!(interface, expected);
    assert_same_xml(xml, &expected.to_xml().unwrap());
}

#[test]
fn test_access_url_use_is_required() {
    let err = AccessUrl::from_xml("<AccessURL>https://example.edu/</AccessURL>").unwrap_err();
    assert!(matches!(err, Error::Missing { .. }));
    assert!(matches!(
        AccessUrl::from_xml(r#"<AccessURL use="partial">https://example.edu/</AccessURL>"#),
        Err(Error::Value(_))
    ));

    let nested = Interface::from_xml("<interface><accessURL>https://example.edu/</accessURL></interface>");
    assert!(matches!(nested, Err(Error::Missing { .. })));
}

#[test]
fn test_unknown_status_rejected() {
    let xml = format!(
        r#"<Resource created="1996-03-11T19:00:00Z" updated="1996-03-11T19:00:00Z" status="retired">
        <title>x</title><identifier>https://example.edu/</identifier>{}</Resource>"#,
        CURATION_AND_CONTENT
    );
    assert!(matches!(Resource::from_xml(&xml), Err(Error::Value(_))));
}

#[test]
fn test_resource_dispatch_by_type() {
    let xml = format!(
        r#"<ri:Resource xmlns:ri="http://www.ivoa.net/xml/RegistryInterface/v1.0"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:vr="http://www.ivoa.net/xml/VOResource/v1.0" xsi:type="vr:Organisation"
        created="1996-03-11T19:00:00.000Z" updated="1996-03-11T19:00:00.000Z" status="active">
        <title>Example Organisation</title><identifier>https://example.edu/</identifier>{}
        <facility>Example Telescope</facility>
        </ri:Resource>"#,
        CURATION_AND_CONTENT
    );
    let resource = AnyResource::from_xml(&xml).unwrap();
    match &resource {
        AnyResource::Organisation(org) => assert_eq!(org.facility[0].value, "Example Telescope"),
        other => panic!("expected an organisation, got {:?}", other),
    }
    assert_eq!(resource.type_name(), "Organisation");
    assert!(resource.capabilities().is_empty());

    let written = resource.to_xml_with(&skip_empty()).unwrap();
    assert!(written.starts_with("<ri:Resource"));
    assert_same_xml(&xml, &written);
}

#[test]
fn test_generic_capability_keeps_type() {
    let xml = r#"<capability xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:cs="http://www.ivoa.net/xml/ConeSearch/v1.0" xsi:type="cs:ConeSearch"
        standardID="ivo://ivoa.net/std/ConeSearch"><description>Cone search</description></capability>"#;
    let capability = AnyCapability::from_xml(xml).unwrap();
    let base = capability.capability();
    assert_eq!(base.xsi_type.as_deref(), Some("ConeSearch"));
    assert_eq!(base.description.as_deref(), Some("Cone search"));

    let written = capability.to_xml().unwrap();
    assert!(written.contains(r#"xsi:type="ConeSearch""#));
}

#[test]
fn test_resource_json_export() {
    let resource = example_resource("Example Resource");
    let json: serde_json::Value = serde_json::from_str(&resource.to_json().unwrap()).unwrap();
    assert_eq!(json["title"], "Example Resource");
    assert_eq!(json["created"], "1996-03-11T19:00:00.000Z");
    assert_eq!(json["status"], "active");
    assert_eq!(json["curation"]["publisher"]["value"], "STScI");
}
