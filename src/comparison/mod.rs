//! Comparison testing support for vo-models
//!
//! Documents written by different serializers differ in prefix choice,
//! attribute order, namespace declaration placement and whitespace.
//! [`canonicalize`] reduces a document to a form where only the
//! namespace-resolved names, attribute values and trimmed text remain,
//! one element per line, so two documents can be compared as strings.

use crate::documents::{parse_document, ReadOptions};
use crate::error::Result;
use std::fmt::Write as _;

/// Reduce an XML document to its canonical comparison form
pub fn canonicalize(xml: &str) -> Result<String> {
    let doc = parse_document(xml, &ReadOptions::default())?;
    let mut out = String::new();
    write_node(doc.root_element(), 0, &mut out);
    Ok(out)
}

/// Whether two documents have the same canonical form
pub fn xml_equal(left: &str, right: &str) -> Result<bool> {
    Ok(canonicalize(left)? == canonicalize(right)?)
}

fn expanded(namespace: Option<&str>, local: &str) -> String {
    match namespace {
        Some(ns) => format!("{{{}}}{}", ns, local),
        None => local.to_string(),
    }
}

fn write_node(node: roxmltree::Node<'_, '_>, depth: usize, out: &mut String) {
    let tag = node.tag_name();
    let mut attrs: Vec<(String, &str)> = node
        .attributes()
        .map(|a| (expanded(a.namespace(), a.name()), a.value()))
        .collect();
    attrs.sort();

    let _ = write!(out, "{}{}", "  ".repeat(depth), expanded(tag.namespace(), tag.name()));
    for (name, value) in attrs {
        let _ = write!(out, " {}={:?}", name, value);
    }

    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    if !text.is_empty() {
        let _ = write!(out, " => {:?}", text);
    }
    out.push('\n');

    for child in node.children().filter(|n| n.is_element()) {
        write_node(child, depth + 1, out);
    }
}
