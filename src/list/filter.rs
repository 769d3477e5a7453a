//! List filters
//!
//! A [`ListFilter`] maps filter names to optional scalar values. Only set
//! values are sent.

use std::fmt;

/// A scalar filter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(n) => write!(f, "{n}"),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Ordered filter-name to optional-value mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    entries: Vec<(String, Option<FilterValue>)>,
}

impl ListFilter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a filter slot. `None` keeps the slot unset.
    ///
    /// Setting a name twice replaces the earlier value in place.
    #[must_use]
    pub fn with<V: Into<FilterValue>>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        let name = name.into();
        let value = value.map(Into::into);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Value of a set filter
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Set filters in insertion order
    pub fn set_values(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.as_ref().map(|v| (n.as_str(), v)))
    }

    /// Whether no filter is set
    pub fn is_empty(&self) -> bool {
        self.set_values().next().is_none()
    }
}
