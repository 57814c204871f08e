//! Pagination parameters
//!
//! Supports: limit-offset, page number (resolved to limit-offset), cursor
//!
//! # Overview
//!
//! Requests arrive as a loose bag of query-string fields ([`QueryParams`]).
//! [`ParamsResolver`] decides once which shape they form, checks it against
//! the modes the call accepts, applies config defaults and bounds, and hands
//! back a [`PaginationParams`] that the rest of the engine matches on.

mod resolver;
mod types;

pub use resolver::ParamsResolver;
pub use types::{CursorParams, LimitOffsetParams, PaginationParams, QueryParams};
