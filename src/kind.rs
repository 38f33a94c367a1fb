//! Document kind detection and kind-driven conversions
//!
//! The command-line tool reads documents without knowing their model up
//! front. [`DocumentKind::detect`] looks at the root element and the
//! conversion functions dispatch to the matching typed model.

use crate::any::{AnyCapability, AnyInterface, AnyResource};
use crate::documents::{parse_document, ReadOptions, WriteOptions};
use crate::error::{Error, ParseError, Result};
use crate::model::{xml_enum, XmlModel};
use crate::namespaces::{RI, UWS, VOSI_AVAILABILITY, VOSI_CAPABILITIES, VOSI_TABLES};
use crate::registry_interfaces::VoResources;
use crate::uws::{Job, Jobs};
use crate::vosi::{Availability, VosiCapabilities, VosiTable, VosiTableSet};
use serde::Serialize;
use std::fmt::Write as _;
use tracing::debug;

xml_enum! {
    /// Root document types understood by the command-line tool
    pub enum DocumentKind {
        /// `uws:job`
        Job => "job",
        /// `uws:jobs`
        Jobs => "jobs",
        /// VOSI availability
        Availability => "availability",
        /// `vosi:capabilities`
        Capabilities => "capabilities",
        /// `vosi:table`
        Table => "table",
        /// `vosi:tableset`
        TableSet => "tableset",
        /// `ri:VOResources`
        Resources => "resources",
        /// A single resource record
        Resource => "resource",
        /// A standalone capability
        Capability => "capability",
        /// A standalone interface
        Interface => "interface",
    }
}

impl DocumentKind {
    /// Detect the kind of a document from its root element
    pub fn detect(xml: &str) -> Result<Self> {
        let doc = parse_document(xml, &ReadOptions::default())?;
        let root = doc.root_element().tag_name();
        let kind = match (root.namespace(), root.name()) {
            (Some(ns), "job") if ns == UWS.uri => DocumentKind::Job,
            (Some(ns), "jobs") if ns == UWS.uri => DocumentKind::Jobs,
            (Some(ns), "availability") if ns == VOSI_AVAILABILITY.uri => {
                DocumentKind::Availability
            }
            (Some(ns), "capabilities") if ns == VOSI_CAPABILITIES.uri => {
                DocumentKind::Capabilities
            }
            (Some(ns), "table") if ns == VOSI_TABLES.uri => DocumentKind::Table,
            (Some(ns), "tableset") if ns == VOSI_TABLES.uri => DocumentKind::TableSet,
            (Some(ns), "VOResources") if ns == RI.uri => DocumentKind::Resources,
            (_, "Resource") => DocumentKind::Resource,
            (_, "capability") => DocumentKind::Capability,
            (_, "interface") => DocumentKind::Interface,
            (ns, name) => {
                let found = match ns {
                    Some(ns) => format!("{{{}}}{}", ns, name),
                    None => name.to_string(),
                };
                return Err(Error::Parse(
                    ParseError::new("unrecognized document root").with_location(found),
                ));
            }
        };
        debug!(%kind, "detected document kind");
        Ok(kind)
    }
}

fn reparse<M: XmlModel>(xml: &str, read: &ReadOptions, write: &WriteOptions) -> Result<String> {
    M::from_xml_with(xml, read)?.to_xml_with(write)
}

fn json<M: XmlModel + Serialize>(xml: &str, read: &ReadOptions, pretty: bool) -> Result<String> {
    let model = M::from_xml_with(xml, read)?;
    if pretty {
        Ok(serde_json::to_string_pretty(&model)?)
    } else {
        Ok(serde_json::to_string(&model)?)
    }
}

/// Parse a document into its typed model and render it again
pub fn roundtrip(
    kind: DocumentKind,
    xml: &str,
    read: &ReadOptions,
    write: &WriteOptions,
) -> Result<String> {
    match kind {
        DocumentKind::Job => reparse::<Job>(xml, read, write),
        DocumentKind::Jobs => reparse::<Jobs>(xml, read, write),
        DocumentKind::Availability => reparse::<Availability>(xml, read, write),
        DocumentKind::Capabilities => reparse::<VosiCapabilities>(xml, read, write),
        DocumentKind::Table => reparse::<VosiTable>(xml, read, write),
        DocumentKind::TableSet => reparse::<VosiTableSet>(xml, read, write),
        DocumentKind::Resources => reparse::<VoResources>(xml, read, write),
        DocumentKind::Resource => reparse::<AnyResource>(xml, read, write),
        DocumentKind::Capability => reparse::<AnyCapability>(xml, read, write),
        DocumentKind::Interface => reparse::<AnyInterface>(xml, read, write),
    }
}

/// Parse a document into its typed model and render it as JSON
pub fn to_json(kind: DocumentKind, xml: &str, read: &ReadOptions, pretty: bool) -> Result<String> {
    match kind {
        DocumentKind::Job => json::<Job>(xml, read, pretty),
        DocumentKind::Jobs => json::<Jobs>(xml, read, pretty),
        DocumentKind::Availability => json::<Availability>(xml, read, pretty),
        DocumentKind::Capabilities => json::<VosiCapabilities>(xml, read, pretty),
        DocumentKind::Table => json::<VosiTable>(xml, read, pretty),
        DocumentKind::TableSet => json::<VosiTableSet>(xml, read, pretty),
        DocumentKind::Resources => json::<VoResources>(xml, read, pretty),
        DocumentKind::Resource => json::<AnyResource>(xml, read, pretty),
        DocumentKind::Capability => json::<AnyCapability>(xml, read, pretty),
        DocumentKind::Interface => json::<AnyInterface>(xml, read, pretty),
    }
}

/// A short human-readable description of a document
pub fn summarize(kind: DocumentKind, xml: &str, read: &ReadOptions) -> Result<String> {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = match kind {
        DocumentKind::Job => {
            let job: Job = Job::from_xml_with(xml, read)?;
            writeln!(out, "UWS job {} ({})", job.job_id, job.phase)
        }
        DocumentKind::Jobs => {
            let jobs = Jobs::from_xml_with(xml, read)?;
            writeln!(out, "UWS job list: {} job(s)", jobs.jobref.len())
        }
        DocumentKind::Availability => {
            let availability = Availability::from_xml_with(xml, read)?;
            writeln!(out, "VOSI availability: available={}", availability.available)
        }
        DocumentKind::Capabilities => {
            let capabilities = VosiCapabilities::from_xml_with(xml, read)?;
            let _ = writeln!(out, "VOSI capabilities: {} capability(ies)", capabilities.capability.len());
            for capability in &capabilities.capability {
                let _ = writeln!(out, "  {}", capability.standard_id());
            }
            Ok(())
        }
        DocumentKind::Table => {
            let table = VosiTable::from_xml_with(xml, read)?;
            writeln!(out, "VOSI table {}: {} column(s)", table.name, table.column.len())
        }
        DocumentKind::TableSet => {
            let tableset = VosiTableSet::from_xml_with(xml, read)?;
            writeln!(
                out,
                "VOSI tableset: {} schema(s), {} table(s)",
                tableset.schema.len(),
                tableset.table_count()
            )
        }
        DocumentKind::Resources => {
            let resources = VoResources::from_xml_with(xml, read)?;
            let _ = writeln!(
                out,
                "VOResources: from={} returned={} more={}",
                resources.from, resources.number_returned, resources.more
            );
            for resource in &resources.resource {
                let _ = writeln!(out, "  {} {}", resource.type_name(), resource.identifier());
            }
            for identifier in &resources.identifier {
                let _ = writeln!(out, "  {}", identifier);
            }
            Ok(())
        }
        DocumentKind::Resource => {
            let resource = AnyResource::from_xml_with(xml, read)?;
            writeln!(
                out,
                "{} {}: {}",
                resource.type_name(),
                resource.identifier(),
                resource.resource().title
            )
        }
        DocumentKind::Capability => {
            let capability = AnyCapability::from_xml_with(xml, read)?;
            writeln!(out, "capability {}", capability.standard_id())
        }
        DocumentKind::Interface => {
            let interface = AnyInterface::from_xml_with(xml, read)?;
            let urls: Vec<&str> = interface
                .interface()
                .access_url
                .iter()
                .map(|a| a.value.as_str())
                .collect();
            writeln!(out, "interface {}", urls.join(" "))
        }
    };
    Ok(out)
}
