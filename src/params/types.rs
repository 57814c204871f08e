//! Parameter types

use crate::types::PaginationMode;
use serde::{Deserialize, Serialize};

/// Raw pagination fields as they arrive from a request's query string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u64>,
    /// Page size (page-number and cursor shapes)
    #[serde(default)]
    pub size: Option<u64>,
    /// Maximum number of items (limit-offset shape)
    #[serde(default)]
    pub limit: Option<u64>,
    /// Number of items to skip (limit-offset shape)
    #[serde(default)]
    pub offset: Option<u64>,
    /// Navigation token (cursor shape)
    #[serde(default)]
    pub cursor: Option<String>,
    /// Whether to compute the total
    #[serde(default)]
    pub include_total: Option<bool>,
}

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the size
    #[must_use]
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the limit
    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the offset
    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the cursor token
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set include-total
    #[must_use]
    pub fn include_total(mut self, include: bool) -> Self {
        self.include_total = Some(include);
        self
    }
}

/// Validated limit-offset parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOffsetParams {
    /// Maximum number of items, greater than 0
    pub limit: u64,
    /// Number of items skipped
    pub offset: u64,
    /// Whether to compute the total
    pub include_total: bool,
}

impl LimitOffsetParams {
    /// Create limit-offset parameters
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            include_total: true,
        }
    }

    /// Convert a 1-based page number and size
    pub fn from_page(page: u64, size: u64) -> Self {
        Self::new(size, page.saturating_sub(1).saturating_mul(size))
    }

    /// Set include-total
    #[must_use]
    pub fn with_total(mut self, include: bool) -> Self {
        self.include_total = include;
        self
    }

    /// 1-based page number this window starts on
    pub fn page(&self) -> u64 {
        self.offset / self.limit.max(1) + 1
    }
}

/// Validated cursor parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorParams {
    /// Token from a previous page, `None` to start at the head
    pub cursor: Option<String>,
    /// Page size, greater than 0
    pub size: u64,
    /// Whether to compute the total
    pub include_total: bool,
}

impl CursorParams {
    /// Create cursor parameters starting at the head
    pub fn new(size: u64) -> Self {
        Self {
            cursor: None,
            size,
            include_total: false,
        }
    }

    /// Continue from a token
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set include-total
    #[must_use]
    pub fn with_total(mut self, include: bool) -> Self {
        self.include_total = include;
        self
    }
}

/// Resolved parameters: exactly one pagination mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PaginationParams {
    /// Offset-based window
    LimitOffset(LimitOffsetParams),
    /// Keyset window
    Cursor(CursorParams),
}

impl PaginationParams {
    /// Active mode
    pub fn mode(&self) -> PaginationMode {
        match self {
            Self::LimitOffset(_) => PaginationMode::LimitOffset,
            Self::Cursor(_) => PaginationMode::Cursor,
        }
    }

    /// Whether a total should be computed
    pub fn include_total(&self) -> bool {
        match self {
            Self::LimitOffset(p) => p.include_total,
            Self::Cursor(p) => p.include_total,
        }
    }
}

impl From<LimitOffsetParams> for PaginationParams {
    fn from(params: LimitOffsetParams) -> Self {
        Self::LimitOffset(params)
    }
}

impl From<CursorParams> for PaginationParams {
    fn from(params: CursorParams) -> Self {
        Self::Cursor(params)
    }
}
