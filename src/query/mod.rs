//! Query descriptors
//!
//! Two shapes of query can be paginated:
//! - [`FindQuery`] - filter, sort, skip, limit, projection
//! - [`Pipeline`] - an ordered list of aggregation stages
//!
//! Both implement [`QueryDescriptor`], so the rewriter in
//! [`pagination`](crate::pagination) is written once against the trait. Every
//! primitive consumes `self` and returns the modified descriptor; the engine
//! always works on a clone and never touches the caller's query.

mod find;
mod pipeline;
mod sort;

pub use find::FindQuery;
pub use pipeline::{Pipeline, COUNT_FIELD, DATA_BRANCH, METADATA_BRANCH};
pub use sort::{sort_document, SortKey, SortOrder};

use crate::error::Result;
use crate::source::DocumentSource;
use crate::types::QueryKind;
use async_trait::async_trait;
use bson::{Bson, Document};

/// Documents returned for a window, plus the total when it was requested
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fetched {
    /// Documents in fetch order
    pub documents: Vec<Document>,
    /// Total number of matches of the base query
    pub total: Option<u64>,
}

/// A paginatable query
#[async_trait]
pub trait QueryDescriptor: Clone + Send + Sync + std::fmt::Debug {
    /// Query shape (for logging)
    fn kind(&self) -> QueryKind;

    /// Whether the query already carries an explicit ordering
    fn has_sort(&self) -> bool;

    /// Narrow the results with an extra filter document
    #[must_use]
    fn append_filter(self, filter: Document) -> Self;

    /// Order the results
    #[must_use]
    fn set_sort(self, sort: Vec<SortKey>) -> Self;

    /// Skip `skip` results and return at most `limit`
    #[must_use]
    fn set_window(self, skip: u64, limit: u64) -> Self;

    /// Execute `window` (derived from `self` with the primitives above).
    ///
    /// With `with_total`, also count the matches of `self`. How that count is
    /// obtained is up to the shape: a second round trip, or a branch of the same
    /// execution.
    async fn fetch(
        &self,
        window: Self,
        source: &dyn DocumentSource,
        with_total: bool,
    ) -> Result<Fetched>;
}

/// Integer BSON value for counts and limits
pub(crate) fn bson_count(n: u64) -> Bson {
    Bson::Int64(i64::try_from(n).unwrap_or(i64::MAX))
}
