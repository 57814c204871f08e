//! Page types

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Key the engine writes the forward token under
pub const NEXT_PAGE_KEY: &str = "next_page";

/// Key the engine writes the backward token under
pub const PREVIOUS_PAGE_KEY: &str = "previous_page";

/// Keys a page serializes itself; extra data may not use them
pub const RESERVED_KEYS: &[&str] = &[
    "items",
    "total",
    "limit",
    "offset",
    "page",
    "size",
    "pages",
    "current_page",
    NEXT_PAGE_KEY,
    PREVIOUS_PAGE_KEY,
];

/// Extra keys merged verbatim into the page metadata
///
/// In cursor mode the engine overwrites [`NEXT_PAGE_KEY`] and
/// [`PREVIOUS_PAGE_KEY`]. Other [`RESERVED_KEYS`] are dropped when the page
/// is built; every remaining key is left as the caller set it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdditionalData(JsonObject);

impl AdditionalData {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a key, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write the navigation tokens; `None` is stored as null
    pub fn set_navigation(&mut self, next: Option<String>, previous: Option<String>) {
        self.0.insert(NEXT_PAGE_KEY.to_string(), next.into());
        self.0.insert(PREVIOUS_PAGE_KEY.to_string(), previous.into());
    }

    /// Remove the navigation tokens
    pub(crate) fn take_navigation(&mut self) -> (Option<String>, Option<String>) {
        let mut take = |key: &str| match self.0.remove(key) {
            Some(JsonValue::String(token)) => Some(token),
            _ => None,
        };
        let next = take(NEXT_PAGE_KEY);
        let previous = take(PREVIOUS_PAGE_KEY);
        (next, previous)
    }

    /// Unwrap the map
    pub fn into_inner(self) -> JsonObject {
        self.0
    }
}

impl From<JsonObject> for AdditionalData {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}

/// Mode-specific page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageInfo {
    /// Offset-based window
    LimitOffset {
        limit: u64,
        offset: u64,
        /// 1-based page the window starts on
        page: u64,
        size: u64,
        /// `ceil(total / limit)`, when the total is known
        pages: Option<u64>,
    },
    /// Keyset window
    Cursor {
        /// Token that produced this page
        current_page: Option<String>,
        next_page: Option<String>,
        previous_page: Option<String>,
    },
}

/// One window of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items in display order
    pub items: Vec<T>,
    /// Total matches of the base query, when requested
    pub total: Option<u64>,
    /// Navigation metadata
    #[serde(flatten)]
    pub info: PageInfo,
    /// Caller-supplied extra keys
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl<T> Page<T> {
    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forward token (cursor pages)
    pub fn next_page(&self) -> Option<&str> {
        match &self.info {
            PageInfo::Cursor { next_page, .. } => next_page.as_deref(),
            PageInfo::LimitOffset { .. } => None,
        }
    }

    /// Backward token (cursor pages)
    pub fn previous_page(&self) -> Option<&str> {
        match &self.info {
            PageInfo::Cursor { previous_page, .. } => previous_page.as_deref(),
            PageInfo::LimitOffset { .. } => None,
        }
    }

    /// Page count (limit-offset pages with a total)
    pub fn pages(&self) -> Option<u64> {
        match &self.info {
            PageInfo::LimitOffset { pages, .. } => *pages,
            PageInfo::Cursor { .. } => None,
        }
    }
}
