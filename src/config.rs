//! Pagination configuration
//!
//! Defaults applied by the parameter resolver and the engine. Loadable from
//! YAML:
//!
//! ```yaml
//! default_size: 25
//! max_size: 200
//! key_field: _id
//! include_total:
//!   limit_offset: true
//!   cursor: false
//! ```

use crate::error::{Error, Result};
use crate::types::PaginationMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of items per page
pub const DEFAULT_SIZE: u64 = 50;

/// Default upper bound for `size` / `limit`
pub const DEFAULT_MAX_SIZE: u64 = 100;

/// Default primary-key field
pub const DEFAULT_KEY_FIELD: &str = "_id";

// ============================================================================
// Pagination Config
// ============================================================================

/// Settings shared by every pagination call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Size/limit used when the request supplies none
    #[serde(default = "default_size")]
    pub default_size: u64,

    /// Largest size/limit a request may ask for
    #[serde(default = "default_max_size")]
    pub max_size: u64,

    /// Document field holding the primary key
    #[serde(default = "default_key_field")]
    pub key_field: String,

    /// Whether totals are computed when the request does not say
    #[serde(default)]
    pub include_total: IncludeTotalDefaults,
}

fn default_size() -> u64 {
    DEFAULT_SIZE
}

fn default_max_size() -> u64 {
    DEFAULT_MAX_SIZE
}

fn default_key_field() -> String {
    DEFAULT_KEY_FIELD.to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            key_field: DEFAULT_KEY_FIELD.to_string(),
            include_total: IncludeTotalDefaults::default(),
        }
    }
}

impl PaginationConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Set the default size
    #[must_use]
    pub fn with_default_size(mut self, size: u64) -> Self {
        self.default_size = size;
        self
    }

    /// Set the maximum size
    #[must_use]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_size = size;
        self
    }

    /// Set the key field
    #[must_use]
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    /// Set the include-total default for one mode
    #[must_use]
    pub fn with_include_total(mut self, mode: PaginationMode, include: bool) -> Self {
        match mode {
            PaginationMode::LimitOffset => self.include_total.limit_offset = include,
            PaginationMode::Cursor => self.include_total.cursor = include,
        }
        self
    }

    /// Include-total default for a mode
    pub fn include_total_for(&self, mode: PaginationMode) -> bool {
        match mode {
            PaginationMode::LimitOffset => self.include_total.limit_offset,
            PaginationMode::Cursor => self.include_total.cursor,
        }
    }

    /// Check the settings are coherent
    pub fn validate(&self) -> Result<()> {
        if self.default_size == 0 {
            return Err(Error::config("default_size must be greater than 0"));
        }
        if self.max_size < self.default_size {
            return Err(Error::config(format!(
                "max_size ({}) is smaller than default_size ({})",
                self.max_size, self.default_size
            )));
        }
        if self.key_field.is_empty() {
            return Err(Error::config("key_field must not be empty"));
        }
        Ok(())
    }
}

/// Per-mode include-total defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeTotalDefaults {
    /// Limit-offset and page-number requests
    #[serde(default = "default_true")]
    pub limit_offset: bool,

    /// Cursor requests
    #[serde(default)]
    pub cursor: bool,
}

fn default_true() -> bool {
    true
}

impl Default for IncludeTotalDefaults {
    fn default() -> Self {
        Self {
            limit_offset: true,
            cursor: false,
        }
    }
}
