//! A single page of listed records
//!
//! A page is built from one 200 response body. Records sit under a
//! resource-specific envelope key; pagination metadata sits either at the
//! top level or inside a `meta` object.

use crate::error::{ApiError, Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pagination metadata of a page
///
/// Field aliases cover the nested `meta` shape, which uses `*_url` where
/// the top-level shape uses `*_uri`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub num_pages: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, alias = "url")]
    pub uri: Option<String>,
    #[serde(default, alias = "first_page_url")]
    pub first_page_uri: Option<String>,
    #[serde(default, alias = "previous_page_url")]
    pub previous_page_uri: Option<String>,
    #[serde(default, alias = "next_page_url")]
    pub next_page_uri: Option<String>,
    /// Envelope key echoed by the nested shape
    #[serde(default)]
    pub key: Option<String>,
}

impl PageMeta {
    /// Read metadata from a response object, preferring a nested `meta`
    fn from_envelope(mut root: Map<String, Value>) -> Result<Self> {
        let source = match root.remove("meta") {
            Some(meta @ Value::Object(_)) => meta,
            _ => Value::Object(root),
        };
        let mut meta: Self = serde_json::from_value(source).map_err(deserialize_error)?;
        meta.first_page_uri = non_empty(meta.first_page_uri);
        meta.previous_page_uri = non_empty(meta.previous_page_uri);
        meta.next_page_uri = non_empty(meta.next_page_uri);
        Ok(meta)
    }
}

/// One response's worth of records plus the cursor to the next page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    records: Vec<T>,
    meta: PageMeta,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a 200 response body, reading records under `key`
    pub fn deserialize(key: &str, body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(deserialize_error)?;
        let Value::Object(mut root) = value else {
            return Err(deserialize_error("response is not a JSON object"));
        };

        let records = match root.remove(key) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<T>, _>>()
                .map_err(deserialize_error)?,
            Some(_) => return Err(deserialize_error(format!("'{key}' is not an array"))),
            None => return Err(deserialize_error(format!("missing '{key}'"))),
        };

        let meta = PageMeta::from_envelope(root)?;
        Ok(Self { records, meta })
    }
}

impl<T> Page<T> {
    /// Build a page directly
    pub fn new(records: Vec<T>, meta: PageMeta) -> Self {
        Self { records, meta }
    }

    /// Records on this page
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Split into records and metadata
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.records, self.meta)
    }

    /// Pagination metadata
    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Cursor to the next page
    pub fn next_page_uri(&self) -> Option<&str> {
        self.meta.next_page_uri.as_deref()
    }

    /// Whether the server announced a further page
    pub fn has_next_page(&self) -> bool {
        self.meta.next_page_uri.is_some()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn deserialize_error(e: impl std::fmt::Display) -> Error {
    Error::Api(ApiError::new(format!("Unable to deserialize response: {e}")).with_status(200))
}
