//! Parameter resolution
//!
//! Turns a request's raw fields into exactly one validated pagination mode.

use super::types::{CursorParams, LimitOffsetParams, PaginationParams, QueryParams};
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::types::PaginationMode;

/// Shape detected from the raw fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Cursor,
    LimitOffset,
    PageNumber,
}

impl Shape {
    fn mode(self) -> PaginationMode {
        match self {
            Shape::Cursor => PaginationMode::Cursor,
            Shape::LimitOffset | Shape::PageNumber => PaginationMode::LimitOffset,
        }
    }

    fn fields(self) -> &'static str {
        match self {
            Shape::Cursor => "cursor",
            Shape::LimitOffset => "limit/offset",
            Shape::PageNumber => "page",
        }
    }
}

/// Resolves raw request parameters against the modes a call accepts
#[derive(Debug, Clone)]
pub struct ParamsResolver {
    config: PaginationConfig,
    accepted: Vec<PaginationMode>,
}

impl Default for ParamsResolver {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

impl ParamsResolver {
    /// Create a resolver accepting both modes
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            accepted: PaginationMode::ALL.to_vec(),
        }
    }

    /// Restrict the accepted modes; the first one is used when a request
    /// carries no mode-specific field
    #[must_use]
    pub fn accepting(mut self, modes: &[PaginationMode]) -> Self {
        self.accepted = modes.to_vec();
        self
    }

    /// Config in use
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Accepted modes in preference order
    pub fn accepted(&self) -> &[PaginationMode] {
        &self.accepted
    }

    /// Resolve raw fields into validated parameters
    pub fn resolve(&self, raw: &QueryParams) -> Result<PaginationParams> {
        let cursor = raw.cursor.as_deref().filter(|c| !c.is_empty());

        let mut shapes = Vec::new();
        if cursor.is_some() {
            shapes.push(Shape::Cursor);
        }
        if raw.limit.is_some() || raw.offset.is_some() {
            shapes.push(Shape::LimitOffset);
        }
        if raw.page.is_some() {
            shapes.push(Shape::PageNumber);
        }

        if shapes.len() > 1 {
            let names: Vec<_> = shapes.iter().map(|s| s.fields()).collect();
            return Err(Error::unsupported_params(format!(
                "parameters mix {} fields",
                names.join(" and ")
            )));
        }
        if raw.size.is_some() && raw.limit.is_some() {
            return Err(Error::unsupported_params(
                "parameters mix size and limit fields",
            ));
        }

        let mode = match shapes.first() {
            Some(shape) => shape.mode(),
            None => *self.accepted.first().ok_or_else(|| {
                Error::unsupported_params("no pagination mode is accepted")
            })?,
        };
        self.ensure_accepted(mode)?;

        let include_total = raw
            .include_total
            .unwrap_or_else(|| self.config.include_total_for(mode));

        let params = match (shapes.first(), mode) {
            (Some(Shape::LimitOffset), _) => PaginationParams::LimitOffset(LimitOffsetParams {
                limit: self.bounded("limit", raw.limit)?,
                offset: raw.offset.unwrap_or(0),
                include_total,
            }),
            (_, PaginationMode::LimitOffset) => {
                let page = raw.page.unwrap_or(1);
                if page == 0 {
                    return Err(Error::invalid_param("page", "must be at least 1"));
                }
                let size = self.bounded("size", raw.size)?;
                PaginationParams::LimitOffset(
                    LimitOffsetParams::from_page(page, size).with_total(include_total),
                )
            }
            (_, PaginationMode::Cursor) => PaginationParams::Cursor(CursorParams {
                cursor: cursor.map(str::to_string),
                size: self.bounded("size", raw.size)?,
                include_total,
            }),
        };

        Ok(params)
    }

    /// Validate parameters the caller built directly
    pub fn accept(&self, params: PaginationParams) -> Result<PaginationParams> {
        self.ensure_accepted(params.mode())?;

        match params {
            PaginationParams::LimitOffset(p) => {
                self.bounded("limit", Some(p.limit))?;
                Ok(PaginationParams::LimitOffset(p))
            }
            PaginationParams::Cursor(mut p) => {
                self.bounded("size", Some(p.size))?;
                if p.cursor.as_deref() == Some("") {
                    p.cursor = None;
                }
                Ok(PaginationParams::Cursor(p))
            }
        }
    }

    fn ensure_accepted(&self, mode: PaginationMode) -> Result<()> {
        if self.accepted.contains(&mode) {
            return Ok(());
        }
        let accepted: Vec<_> = self.accepted.iter().map(PaginationMode::as_str).collect();
        Err(Error::unsupported_params(format!(
            "{mode} parameters are not accepted here (accepted: {})",
            accepted.join(", ")
        )))
    }

    fn bounded(&self, field: &str, value: Option<u64>) -> Result<u64> {
        let value = value.unwrap_or(self.config.default_size);
        if value == 0 {
            return Err(Error::invalid_param(field, "must be greater than 0"));
        }
        if value > self.config.max_size {
            return Err(Error::invalid_param(
                field,
                format!("must not exceed {}", self.config.max_size),
            ));
        }
        Ok(value)
    }
}
