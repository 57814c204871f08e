//! Common types used throughout folio
//!
//! Shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Pagination Mode
// ============================================================================

/// The two pagination strategies folio understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationMode {
    /// Skip a numeric offset and cap the count
    LimitOffset,
    /// Navigate by the key of the first/last item seen
    Cursor,
}

impl PaginationMode {
    /// Both modes, limit-offset first
    pub const ALL: &'static [PaginationMode] = &[PaginationMode::LimitOffset, PaginationMode::Cursor];

    /// Mode name as used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LimitOffset => "limit-offset",
            Self::Cursor => "cursor",
        }
    }
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Query Kind
// ============================================================================

/// Shape of a query descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Filter/sort/skip/limit find query
    Find,
    /// Aggregation pipeline
    Pipeline,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Find => f.write_str("find"),
            Self::Pipeline => f.write_str("pipeline"),
        }
    }
}
