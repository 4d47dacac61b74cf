//! Ordered, multi-valued document metadata

use indexmap::IndexMap;

/// Detected MIME type
pub const CONTENT_TYPE: &str = "Content-Type";
/// Source length in bytes
pub const CONTENT_LENGTH: &str = "Content-Length";
/// Character encoding of text sources
pub const CONTENT_ENCODING: &str = "Content-Encoding";
/// Location of the source object
pub const RESOURCE_NAME: &str = "resourceName";
/// Extractors that handled the source, outermost first
pub const PARSED_BY: &str = "X-Parsed-By";
/// Document title
pub const TITLE: &str = "dc:title";
/// Document author
pub const CREATOR: &str = "dc:creator";
/// Page count
pub const PAGE_COUNT: &str = "xmpTPg:NPages";

/// Separator used when flattening multi-valued entries
pub const VALUE_SEPARATOR: &str = ", ";

/// Attribute bag filled by extractors.
///
/// Names keep their first insertion order; each name may carry several
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: IndexMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `name`
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Replace all values of `name` with a single value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), vec![value.into()]);
    }

    /// First value of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `name`
    pub fn values(&self, name: &str) -> &[String] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Single-valued view with multi-valued entries joined by `", "`
    pub fn flatten(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(name, values)| (name.clone(), values.join(VALUE_SEPARATOR)))
            .collect()
    }
}
