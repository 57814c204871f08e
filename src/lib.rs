//! # Folio
//!
//! Pagination for document-database queries.
//!
//! ## Features
//!
//! - **Limit-Offset Pagination**: skip/limit windows with optional totals
//! - **Cursor Pagination**: keyset windows on the primary key, walkable in both
//!   directions with opaque `prev_`-prefixed tokens
//! - **Find Queries and Pipelines**: both query shapes rewritten through one
//!   trait; pipelines fetch data and total in a single round trip
//! - **Transformers**: async post-processing of each page's items
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio::{FindQuery, MemoryStore, Paginator, ParamsResolver, QueryParams};
//!
//! let store = MemoryStore::with_documents(documents);
//! let params = ParamsResolver::default().resolve(&QueryParams::new().cursor("prev_11").size(10))?;
//!
//! let page: folio::Page<bson::Document> = Paginator::<i64>::new(&store)
//!     .paginate(&FindQuery::new(), &params)
//!     .await?;
//!
//! println!("{:?} {:?}", page.next_page(), page.previous_page());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Paginator::paginate_with                    │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴──────┬───────────┬────────────┐
//! │  Params  │  Cursor   │   Rewrite    │  Assemble │    Page    │
//! ├──────────┼───────────┼──────────────┼───────────┼────────────┤
//! │ Resolve  │ Decode    │ $gt / $lt    │ Lookahead │ Items      │
//! │ Validate │ Encode    │ Sort by key  │ Reverse   │ Total      │
//! │ Defaults │ prev_     │ Skip / Limit │ Tokens    │ Metadata   │
//! └──────────┴───────────┴──────────────┴───────────┴────────────┘
//!                                │
//!                  QueryDescriptor::fetch → DocumentSource
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document public struct fields before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Pagination configuration
pub mod config;

/// Cursor tokens
pub mod cursor;

/// Request parameters
pub mod params;

/// Query descriptors
pub mod query;

/// Document sources
pub mod source;

/// Pagination engine
pub mod pagination;

/// Page output
pub mod page;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{BoxError, Error, Result, ResultExt};
pub use types::*;

// Re-export commonly used types
pub use config::PaginationConfig;
pub use cursor::{Cursor, CursorKey, Direction};
pub use page::{AdditionalData, Page, PageInfo};
pub use pagination::Paginator;
pub use params::{CursorParams, LimitOffsetParams, PaginationParams, ParamsResolver, QueryParams};
pub use query::{FindQuery, Pipeline, QueryDescriptor, SortKey, SortOrder};
pub use source::{DocumentSource, MemoryStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
