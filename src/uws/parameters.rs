//! UWS job parameters
//!
//! Every parameter of a job is written as the same `<uws:parameter>`
//! element and told apart only by its `id` attribute. Reading therefore
//! collects the flat list first and then regroups it by id in a
//! [`ParameterMap`]; a repeated id turns its entry into a list.
//!
//! Fixed parameter schemas implement [`JobParameters`] and pull their
//! fields out of the map by id, so the order of the input elements never
//! matters.

use crate::documents::{Element, WriteOptions, XmlNode};
use crate::error::{Error, Result, ValidationError};
use crate::model::{XmlElement, XmlModel, XmlValue};
use crate::namespaces::{Namespace, XmlName, UWS};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use super::NSMAP;

const PARAMETER: XmlName = UWS.name("parameter");

/// A single UWS job parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// The identifier of the parameter
    pub id: String,
    /// The value; a URL when `by_reference` is set
    pub value: Option<String>,
    /// If true, `value` is a URL to retrieve the actual value from
    pub by_reference: bool,
    /// Whether the value came from a POST body
    pub is_post: bool,
}

impl Parameter {
    /// A parameter with an inline value
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Some(value.into()),
            by_reference: false,
            is_post: false,
        }
    }

    /// A parameter whose value is fetched from a URL
    pub fn by_reference(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            by_reference: true,
            ..Self::new(id, url)
        }
    }

    /// Mark the parameter as posted
    pub fn with_is_post(mut self, is_post: bool) -> Self {
        self.is_post = is_post;
        self
    }

    /// Parse the trimmed value as a typed value
    pub fn value_as<T: XmlValue>(&self) -> Result<Option<T>> {
        self.value
            .as_deref()
            .map(|v| T::from_xml_text(v.trim()))
            .transpose()
    }
}

impl XmlElement for Parameter {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Ok(Self {
            id: node.required_attr("id".into())?,
            value: Some(node.raw_text()).filter(|v| !v.is_empty()),
            by_reference: node.attr_value("byReference".into())?.unwrap_or(false),
            is_post: node.attr_value("isPost".into())?.unwrap_or(false),
        })
    }

    fn write(&self, element: &mut Element, _options: &WriteOptions) {
        element.set_value_attr("byReference".into(), &self.by_reference);
        element.set_attr("id".into(), self.id.as_str());
        element.set_value_attr("isPost".into(), &self.is_post);
        if let Some(value) = &self.value {
            element.set_text(value.as_str());
        }
    }
}

impl XmlModel for Parameter {
    const TAG: XmlName = PARAMETER;
    const NSMAP: &'static [Namespace] = NSMAP;
}

/// One entry of a [`ParameterMap`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// The id occurred once
    Single(Parameter),
    /// The id occurred more than once
    Multiple(Vec<Parameter>),
}

impl ParameterValue {
    /// All parameters of this entry in input order
    pub fn as_slice(&self) -> &[Parameter] {
        match self {
            ParameterValue::Single(param) => std::slice::from_ref(param),
            ParameterValue::Multiple(params) => params,
        }
    }

    /// Consume the entry as a list
    pub fn into_vec(self) -> Vec<Parameter> {
        match self {
            ParameterValue::Single(param) => vec![param],
            ParameterValue::Multiple(params) => params,
        }
    }

    /// The first parameter of this entry, `None` for an empty list
    pub fn first(&self) -> Option<&Parameter> {
        self.as_slice().first()
    }

    /// Whether the id was repeated
    pub fn is_multiple(&self) -> bool {
        matches!(self, ParameterValue::Multiple(_))
    }
}

/// Job parameters keyed by id
///
/// This is also the open parameter set: any id a fixed schema does not
/// consume stays here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: IndexMap<String, ParameterValue>,
}

impl ParameterMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Regroup a flat parameter list by id
    ///
    /// The first occurrence of an id is stored as a single value; later
    /// occurrences promote the entry to a list.
    pub fn from_parameters<I>(parameters: I) -> Self
    where
        I: IntoIterator<Item = Parameter>,
    {
        let mut map = Self::new();
        for param in parameters {
            map.insert(param);
        }
        trace!(ids = map.len(), "remapped job parameters");
        map
    }

    /// Add a parameter, promoting its entry to a list if the id is known
    pub fn insert(&mut self, param: Parameter) {
        match self.entries.get_mut(&param.id) {
            Some(entry) => {
                let previous = std::mem::replace(entry, ParameterValue::Multiple(Vec::new()));
                let mut params = previous.into_vec();
                params.push(param);
                *entry = ParameterValue::Multiple(params);
            }
            None => {
                self.entries
                    .insert(param.id.clone(), ParameterValue::Single(param));
            }
        }
    }

    /// Entry for an id
    pub fn get(&self, id: &str) -> Option<&ParameterValue> {
        self.entries.get(id)
    }

    /// Whether an id is present
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// The single parameter for an id
    ///
    /// Fails if the id was repeated.
    pub fn single(&self, id: &str) -> Result<Option<&Parameter>> {
        match self.entries.get(id) {
            None => Ok(None),
            Some(ParameterValue::Single(param)) => Ok(Some(param)),
            Some(ParameterValue::Multiple(params)) => Err(repeated(id, params.len())),
        }
    }

    /// All parameters for an id, whether it occurred once or many times
    pub fn multiple(&self, id: &str) -> &[Parameter] {
        self.entries
            .get(id)
            .map(ParameterValue::as_slice)
            .unwrap_or(&[])
    }

    /// Remove and return the single parameter for an id
    pub fn take_single(&mut self, id: &str) -> Result<Option<Parameter>> {
        match self.entries.shift_remove(id) {
            None => Ok(None),
            Some(ParameterValue::Single(param)) => Ok(Some(param)),
            Some(ParameterValue::Multiple(params)) => Err(repeated(id, params.len())),
        }
    }

    /// Remove and return the single parameter for an id, failing when absent
    pub fn take_required(&mut self, id: &str) -> Result<Parameter> {
        self.take_single(id)?
            .ok_or_else(|| Error::missing_element(format!("parameter[@id='{}']", id), "uws:parameters"))
    }

    /// Remove and return all parameters for an id as a list
    ///
    /// A single occurrence is returned as a one-element list.
    pub fn take_multiple(&mut self, id: &str) -> Vec<Parameter> {
        self.entries
            .shift_remove(id)
            .map(ParameterValue::into_vec)
            .unwrap_or_default()
    }

    /// Fail if any parameter has not been consumed
    pub fn deny_unknown(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let ids: Vec<&str> = self.ids().collect();
        Err(Error::Validation(
            ValidationError::new("unexpected job parameters")
                .with_path("uws:parameters")
                .with_value(ids.join(", ")),
        ))
    }

    /// Ids in first-seen order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    /// All parameters, grouped by id in first-seen order
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.values().flat_map(ParameterValue::as_slice)
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Parameter> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self::from_parameters(iter)
    }
}

fn repeated(id: &str, count: usize) -> Error {
    Error::Validation(
        ValidationError::new(format!("parameter occurs {} times but is single-valued", count))
            .with_path("uws:parameters")
            .with_value(id),
    )
}

/// A parameter set that can be bound to `<uws:parameters>`
///
/// Implementors take their fields out of the id-keyed map built from the
/// input; anything left over can be kept as extras or rejected with
/// [`ParameterMap::deny_unknown`].
pub trait JobParameters: Sized {
    /// Build the parameter set from the regrouped parameters
    fn from_parameter_map(map: ParameterMap) -> Result<Self>;

    /// Parameters to write, in output order
    fn to_parameters(&self) -> Vec<Parameter>;

    /// Read a `<uws:parameters>` element
    fn read_parameters(node: XmlNode<'_, '_>) -> Result<Self> {
        let params = node.child_models::<Parameter>(PARAMETER)?;
        Self::from_parameter_map(ParameterMap::from_parameters(params))
    }

    /// Write the parameters into a `<uws:parameters>` element
    fn write_parameters(&self, element: &mut Element, options: &WriteOptions) {
        for param in self.to_parameters() {
            element.push_model(PARAMETER, &param, options);
        }
    }
}

impl JobParameters for ParameterMap {
    fn from_parameter_map(map: ParameterMap) -> Result<Self> {
        Ok(map)
    }

    fn to_parameters(&self) -> Vec<Parameter> {
        self.parameters().cloned().collect()
    }
}

impl XmlElement for ParameterMap {
    fn read(node: XmlNode<'_, '_>) -> Result<Self> {
        Self::read_parameters(node)
    }

    fn write(&self, element: &mut Element, options: &WriteOptions) {
        self.write_parameters(element, options);
    }
}

impl XmlModel for ParameterMap {
    const TAG: XmlName = UWS.name("parameters");
    const NSMAP: &'static [Namespace] = NSMAP;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ids: &[(&str, &str)]) -> Vec<Parameter> {
        ids.iter().map(|(id, v)| Parameter::new(*id, *v)).collect()
    }

    #[test]
    fn test_single_occurrences_stay_scalar() {
        let map = ParameterMap::from_parameters(params(&[("a", "1"), ("b", "2")]));
        assert_eq!(map.len(), 2);
        assert!(!map.get("a").unwrap().is_multiple());
        assert_eq!(map.single("b").unwrap().unwrap().value.as_deref(), Some("2"));
    }

    #[test]
    fn test_repeated_id_is_promoted() {
        let map = ParameterMap::from_parameters(params(&[("band", "1"), ("pos", "x"), ("band", "2"), ("band", "3")]));
        let band = map.get("band").unwrap();
        assert!(band.is_multiple());
        let values: Vec<_> = band.as_slice().iter().map(|p| p.value.as_deref().unwrap()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);
        assert!(map.single("band").is_err());
        assert_eq!(map.ids().collect::<Vec<_>>(), vec!["band", "pos"]);
    }

    #[test]
    fn test_take_multiple_wraps_single() {
        let mut map = ParameterMap::from_parameters(params(&[("maxrec", "10")]));
        let values = map.take_multiple("maxrec");
        assert_eq!(values.len(), 1);
        assert!(map.is_empty());
        assert!(map.take_multiple("maxrec").is_empty());
    }

    #[test]
    fn test_take_required_and_deny_unknown() {
        let mut map = ParameterMap::from_parameters(params(&[("query", "SELECT 1"), ("extra", "x")]));
        assert_eq!(map.take_required("query").unwrap().value.as_deref(), Some("SELECT 1"));
        assert!(matches!(map.take_required("query"), Err(Error::Missing { .. })));
        assert!(map.deny_unknown().is_err());
        map.take_single("extra").unwrap();
        assert!(map.deny_unknown().is_ok());
    }

    #[test]
    fn test_first_of_entry() {
        let map = ParameterMap::from_parameters(params(&[("band", "1"), ("band", "2")]));
        assert_eq!(map.get("band").unwrap().first().unwrap().value.as_deref(), Some("1"));
        assert_eq!(ParameterValue::Multiple(Vec::new()).first(), None);
    }

    #[test]
    fn test_value_keeps_surrounding_whitespace() {
        let param = Parameter::new("QUERY", "  SELECT *\n  FROM t ");
        let xml = param.to_xml().unwrap();
        assert_eq!(Parameter::from_xml(&xml).unwrap(), param);

        let empty = r#"<uws:parameter xmlns:uws="http://www.ivoa.net/xml/UWS/v1.0" id="x"/>"#;
        assert_eq!(Parameter::from_xml(empty).unwrap().value, None);
    }

    #[test]
    fn test_value_as() {
        let param = Parameter::new("maxrec", "100");
        assert_eq!(param.value_as::<i64>().unwrap(), Some(100));
        assert!(Parameter::new("maxrec", "many").value_as::<i64>().is_err());
        assert_eq!(Parameter::new("maxrec", "\n  100 ").value_as::<i64>().unwrap(), Some(100));
    }

    #[test]
    fn test_by_reference_constructor() {
        let param = Parameter::by_reference("upload", "https://example.org/table.xml").with_is_post(true);
        assert!(param.by_reference);
        assert!(param.is_post);
        assert_eq!(param.value.as_deref(), Some("https://example.org/table.xml"));
    }

    #[test]
    fn test_serialize_map_json() {
        let map = ParameterMap::from_parameters(params(&[("a", "1"), ("a", "2")]));
        let json = serde_json::to_value(&map).unwrap();
        assert!(json["a"].is_array());
        assert_eq!(json["a"][1]["value"], "2");
    }
}
