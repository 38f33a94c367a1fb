//! XML document handling
//!
//! Reading goes through `roxmltree`, which gives a namespace-resolved,
//! read-only tree; [`XmlNode`] wraps its nodes with typed lookups.
//! Writing builds an owned [`Element`] tree that is rendered with the
//! `quick-xml` writer.

use crate::error::{Error, ParseError, Result, ValidationError};
use crate::limits::Limits;
use crate::model::{XmlElement, XmlValue};
use crate::namespaces::{
    namespace_for_prefix, namespace_for_uri, split_qname, Namespace, XmlName, XSI,
};
use crate::nillable::NillableElement;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, trace};

/// Options used when rendering a model to XML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Drop elements that carry no attributes, text or children
    pub skip_empty: bool,
    /// Indent nested elements by this many spaces
    pub indent: Option<usize>,
    /// Emit an `<?xml ...?>` declaration
    pub xml_declaration: bool,
}

impl WriteOptions {
    /// Default options: compact output, empty elements kept
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop empty elements from the output
    pub fn with_skip_empty(mut self, skip_empty: bool) -> Self {
        self.skip_empty = skip_empty;
        self
    }

    /// Pretty-print with the given indentation
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Emit an XML declaration
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }
}

/// Options used when reading a model from XML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Size and shape bounds for the input document
    pub limits: Limits,
}

impl ReadOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}

/// Parse a document, enforcing limits
pub fn parse_document<'input>(
    xml: &'input str,
    options: &ReadOptions,
) -> Result<roxmltree::Document<'input>> {
    options.limits.check_xml_size(xml.len())?;
    let parsing = roxmltree::ParsingOptions {
        allow_dtd: false,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(xml, parsing)?;
    options.limits.check_document(&doc)?;
    debug!(
        root = doc.root_element().tag_name().name(),
        bytes = xml.len(),
        "parsed XML document"
    );
    Ok(doc)
}

/// An attribute on an output element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace of the attribute (None for unqualified)
    pub namespace: Option<Namespace>,
    /// Local name
    pub name: String,
    /// Attribute value
    pub value: String,
}

impl Attribute {
    fn prefixed(&self) -> String {
        match self.namespace {
            Some(ns) if !ns.prefix.is_empty() => format!("{}:{}", ns.prefix, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Output element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name
    pub name: XmlName,
    /// Attributes in output order
    pub attributes: Vec<Attribute>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespaces to declare even if no name uses them
    pub namespaces: Vec<Namespace>,
}

impl Element {
    /// Create a new element
    pub fn new(name: XmlName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Declare a namespace on this element
    pub fn declare(&mut self, namespace: Namespace) {
        if !self.namespaces.contains(&namespace) {
            self.namespaces.push(namespace);
        }
    }

    /// Set an attribute, replacing an existing one with the same name
    pub fn set_attr(&mut self, name: XmlName, value: impl Into<String>) {
        self.set_raw_attr(name.namespace, name.local.to_string(), value.into());
    }

    /// Set an attribute whose name is only known at runtime
    pub fn set_raw_attr(&mut self, namespace: Option<Namespace>, name: String, value: String) {
        let existing = self
            .attributes
            .iter_mut()
            .find(|a| a.namespace == namespace && a.name == name);
        match existing {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                namespace,
                name,
                value,
            }),
        }
    }

    /// Set a typed attribute
    pub fn set_value_attr<T: XmlValue>(&mut self, name: XmlName, value: &T) {
        self.set_attr(name, value.to_xml_text());
    }

    /// Set a typed attribute when the value is present
    pub fn set_opt_attr<T: XmlValue>(&mut self, name: XmlName, value: Option<&T>) {
        if let Some(value) = value {
            self.set_value_attr(name, value);
        }
    }

    /// Set `xsi:type` to a type in the given namespace
    pub fn set_xsi_type(&mut self, namespace: Namespace, type_name: &str) {
        self.declare(namespace);
        self.set_attr(XSI.name("type"), namespace.type_name(type_name));
    }

    /// Set `xsi:type` from a `prefix:Type` value
    ///
    /// Known prefixes are declared; an unknown prefix is dropped so the
    /// output never references an undeclared namespace.
    pub fn set_xsi_type_name(&mut self, value: &str) {
        match split_qname(value) {
            (Some(prefix), local) => match namespace_for_prefix(prefix) {
                Some(ns) => self.set_xsi_type(ns, local),
                None => self.set_attr(XSI.name("type"), local),
            },
            (None, local) => self.set_attr(XSI.name("type"), local),
        }
    }

    /// Get an attribute value by name
    pub fn get_attr(&self, name: XmlName) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace == name.namespace && a.name == name.local)
            .map(|a| a.value.as_str())
    }

    /// Set text content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Set typed text content
    pub fn set_value<T: XmlValue>(&mut self, value: &T) {
        self.text = Some(value.to_xml_text());
    }

    /// Append a new child element and return it
    pub fn push(&mut self, name: XmlName) -> &mut Element {
        self.children.push(Element::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a child element carrying a simple value
    pub fn push_value<T: XmlValue>(&mut self, name: XmlName, value: &T) {
        self.push(name).set_value(value);
    }

    /// Append a child element for an optional simple value
    ///
    /// `None` is written as an empty element, which `skip_empty` removes.
    pub fn push_opt_value<T: XmlValue>(&mut self, name: XmlName, value: Option<&T>) {
        let child = self.push(name);
        if let Some(value) = value {
            child.set_value(value);
        }
    }

    /// Append one child element per value
    pub fn push_values<T: XmlValue>(&mut self, name: XmlName, values: &[T]) {
        for value in values {
            self.push_value(name, value);
        }
    }

    /// Append a nillable child element (`xsi:nil="true"` when absent)
    pub fn push_nillable<T: XmlValue>(&mut self, name: XmlName, value: Option<&T>) {
        NillableElement::write_value(self.push(name), value);
    }

    /// Append a child element rendered from a model
    pub fn push_model<M: XmlElement>(&mut self, name: XmlName, model: &M, options: &WriteOptions) {
        model.write(self.push(name), options);
    }

    /// Append a child element rendered from an optional model
    pub fn push_opt_model<M: XmlElement>(
        &mut self,
        name: XmlName,
        model: Option<&M>,
        options: &WriteOptions,
    ) {
        if let Some(model) = model {
            self.push_model(name, model, options);
        }
    }

    /// Append one child element per model
    pub fn push_models<M: XmlElement>(&mut self, name: XmlName, models: &[M], options: &WriteOptions) {
        for model in models {
            self.push_model(name, model, options);
        }
    }

    /// Find the first child with the given name
    pub fn find_child(&self, name: XmlName) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// True if the element has no attributes, text or children
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.children.is_empty()
            && self.text.as_deref().map_or(true, str::is_empty)
    }

    /// Recursively remove empty child elements
    pub fn prune_empty(&mut self) {
        for child in &mut self.children {
            child.prune_empty();
        }
        self.children.retain(|c| !c.is_empty());
    }

    fn collect_namespaces(&self, out: &mut Vec<Namespace>) -> Result<()> {
        fn add(out: &mut Vec<Namespace>, ns: Namespace) -> Result<()> {
            match out.iter().find(|n| n.prefix == ns.prefix) {
                None => out.push(ns),
                Some(existing) if existing.uri != ns.uri => {
                    return Err(Error::Validation(
                        ValidationError::new(format!(
                            "prefix bound to both {} and {}",
                            existing.uri, ns.uri
                        ))
                        .with_path(ns.declaration()),
                    ));
                }
                Some(_) => {}
            }
            Ok(())
        }

        for ns in &self.namespaces {
            add(out, *ns)?;
        }
        if let Some(ns) = self.name.namespace {
            add(out, ns)?;
        }
        for attr in &self.attributes {
            if let Some(ns) = attr.namespace {
                add(out, ns)?;
            }
        }
        for child in &self.children {
            child.collect_namespaces(out)?;
        }
        Ok(())
    }

    /// Render this element as a standalone document
    ///
    /// Every namespace used anywhere in the tree is declared on the root.
    pub fn to_bytes(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let mut root = self.clone();
        if options.skip_empty {
            root.prune_empty();
        }

        let mut declarations = Vec::new();
        root.collect_namespaces(&mut declarations)?;
        trace!(
            root = %root.name,
            namespaces = declarations.len(),
            "rendering element tree"
        );

        let mut writer = match options.indent {
            Some(size) => Writer::new_with_indent(Vec::new(), b' ', size),
            None => Writer::new(Vec::new()),
        };
        if options.xml_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        root.write_to(&mut writer, &declarations)?;
        Ok(writer.into_inner())
    }

    /// Render this element as a standalone document string
    pub fn to_xml_string(&self, options: &WriteOptions) -> Result<String> {
        let bytes = self.to_bytes(options)?;
        String::from_utf8(bytes)
            .map_err(|e| Error::Parse(ParseError::new(format!("rendered XML is not UTF-8: {}", e))))
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>, declarations: &[Namespace]) -> Result<()> {
        let name = self.name.prefixed();
        let mut start = BytesStart::new(name.as_str());
        for ns in declarations {
            start.push_attribute((ns.declaration().as_str(), ns.uri));
        }
        for attr in &self.attributes {
            start.push_attribute((attr.prefixed().as_str(), attr.value.as_str()));
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        if text.is_none() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            child.write_to(writer, &[])?;
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        Ok(())
    }
}

/// A node of a parsed document with typed accessors
#[derive(Debug, Clone, Copy)]
pub struct XmlNode<'a, 'input: 'a> {
    node: roxmltree::Node<'a, 'input>,
}

impl<'a, 'input: 'a> XmlNode<'a, 'input> {
    /// Wrap a roxmltree node
    pub fn new(node: roxmltree::Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// The underlying roxmltree node
    pub fn inner(&self) -> roxmltree::Node<'a, 'input> {
        self.node
    }

    /// Local name of the element
    pub fn local_name(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Namespace URI of the element
    pub fn namespace(&self) -> Option<&'a str> {
        self.node.tag_name().namespace()
    }

    /// Whether this element carries the given name
    pub fn is(&self, name: XmlName) -> bool {
        name.matches(self.node.tag_name())
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: XmlName) -> Option<&'a str> {
        match name.namespace {
            Some(ns) => self.node.attribute((ns.uri, name.local)),
            None => self.node.attribute(name.local),
        }
    }

    /// Parse an optional typed attribute
    pub fn attr_value<T: XmlValue>(&self, name: XmlName) -> Result<Option<T>> {
        self.attr(name).map(|v| T::from_xml_text(v.trim())).transpose()
    }

    /// Parse a required typed attribute
    pub fn required_attr<T: XmlValue>(&self, name: XmlName) -> Result<T> {
        self.attr_value(name)?
            .ok_or_else(|| Error::missing_attribute(name.prefixed(), self.local_name()))
    }

    /// Attributes that are not in `known`, keyed by local name
    ///
    /// Only unqualified attributes are returned.
    pub fn extra_attrs(&self, known: &[&str]) -> Vec<(String, String)> {
        self.node
            .attributes()
            .filter(|a| a.namespace().is_none() && !known.contains(&a.name()))
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect()
    }

    /// Local part of the `xsi:type` attribute
    pub fn xsi_type(&self) -> Option<&'a str> {
        self.attr(XSI.name("type"))
            .map(|t| split_qname(t.trim()).1)
    }

    /// The `xsi:type` value resolved against the document's namespaces
    ///
    /// Returns the crate prefix of the type's namespace and the local
    /// name. The prefix is empty when the namespace is undeclared or not
    /// one of the known type namespaces, so `other:ParamHTTP` never
    /// matches `("vs", "ParamHTTP")`.
    pub fn xsi_type_key(&self) -> Option<(&'static str, &'a str)> {
        let raw = self.attr(XSI.name("type"))?.trim();
        let (prefix, local) = split_qname(raw);
        let prefix = self
            .node
            .lookup_namespace_uri(prefix)
            .and_then(namespace_for_uri)
            .map_or("", |ns| ns.prefix);
        Some((prefix, local))
    }

    /// The `xsi:type` value rewritten to the crate's own prefixes
    ///
    /// The document's prefix is resolved to a namespace URI first, so
    /// `<x xmlns:v="...VODataService/v1.1" xsi:type="v:ParamHTTP">` yields
    /// `vs:ParamHTTP`. Types in unknown namespaces keep only the local part.
    pub fn xsi_type_name(&self) -> Option<String> {
        let raw = self.attr(XSI.name("type"))?.trim();
        let (prefix, local) = split_qname(raw);
        let namespace = self
            .node
            .lookup_namespace_uri(prefix)
            .and_then(namespace_for_uri);
        Some(match namespace {
            Some(ns) => ns.type_name(local),
            None => local.to_string(),
        })
    }

    /// Whether the element is marked `xsi:nil="true"`
    pub fn is_nil(&self) -> bool {
        matches!(self.attr(XSI.name("nil")).map(str::trim), Some("true") | Some("1"))
    }

    /// Concatenated text content exactly as it appears in the document
    pub fn raw_text(&self) -> String {
        self.node
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }

    /// Concatenated, trimmed text content
    pub fn text(&self) -> String {
        self.raw_text().trim().to_string()
    }

    /// Parse the text content
    pub fn value<T: XmlValue>(&self) -> Result<T> {
        T::from_xml_text(&self.text())
    }

    /// Parse the text content, `None` when empty
    pub fn opt_value<T: XmlValue>(&self) -> Result<Option<T>> {
        let text = self.text();
        if text.is_empty() {
            Ok(None)
        } else {
            T::from_xml_text(&text).map(Some)
        }
    }

    /// Child elements with the given name
    pub fn children(&self, name: XmlName) -> impl Iterator<Item = XmlNode<'a, 'input>> + 'a {
        self.node
            .children()
            .filter(move |n| n.is_element() && name.matches(n.tag_name()))
            .map(XmlNode::new)
    }

    /// All child elements
    pub fn elements(&self) -> impl Iterator<Item = XmlNode<'a, 'input>> + 'a {
        self.node.children().filter(|n| n.is_element()).map(XmlNode::new)
    }

    /// First child element with the given name
    pub fn child(&self, name: XmlName) -> Option<XmlNode<'a, 'input>> {
        self.children(name).next()
    }

    /// First child element with the given name, or a missing-element error
    pub fn required_child(&self, name: XmlName) -> Result<XmlNode<'a, 'input>> {
        self.child(name)
            .ok_or_else(|| Error::missing_element(name.prefixed(), self.local_name()))
    }

    /// Value of an optional simple child element
    pub fn child_value<T: XmlValue>(&self, name: XmlName) -> Result<Option<T>> {
        match self.child(name) {
            Some(child) => child.opt_value(),
            None => Ok(None),
        }
    }

    /// Value of a required simple child element
    pub fn required_child_value<T: XmlValue>(&self, name: XmlName) -> Result<T> {
        self.required_child(name)?.value()
    }

    /// Values of a repeated simple child element
    pub fn child_values<T: XmlValue>(&self, name: XmlName) -> Result<Vec<T>> {
        self.children(name).map(|c| c.value()).collect()
    }

    /// Values of a repeated simple child element that must occur at least once
    pub fn required_child_values<T: XmlValue>(&self, name: XmlName) -> Result<Vec<T>> {
        let values = self.child_values(name)?;
        if values.is_empty() {
            return Err(Error::missing_element(name.prefixed(), self.local_name()));
        }
        Ok(values)
    }

    /// Value of a nillable child element
    pub fn nillable_child_value<T: XmlValue>(&self, name: XmlName) -> Result<Option<T>> {
        Ok(self
            .child_model::<NillableElement<T>>(name)?
            .and_then(|n| n.value))
    }

    /// Optional child element bound to a model
    pub fn child_model<M: XmlElement>(&self, name: XmlName) -> Result<Option<M>> {
        self.child(name).map(M::read).transpose()
    }

    /// Required child element bound to a model
    pub fn required_child_model<M: XmlElement>(&self, name: XmlName) -> Result<M> {
        M::read(self.required_child(name)?)
    }

    /// Repeated child element bound to a model
    pub fn child_models<M: XmlElement>(&self, name: XmlName) -> Result<Vec<M>> {
        self.children(name).map(M::read).collect()
    }

    /// Repeated child element bound to a model, at least one required
    pub fn required_child_models<M: XmlElement>(&self, name: XmlName) -> Result<Vec<M>> {
        let models = self.child_models(name)?;
        if models.is_empty() {
            return Err(Error::missing_element(name.prefixed(), self.local_name()));
        }
        Ok(models)
    }
}
