//! Document sources
//!
//! The query execution surface the engine talks to. A source runs find
//! queries, counts, and aggregation pipelines against one collection; how it
//! reaches the database is its own business. Failures are wrapped with
//! [`Error::upstream`](crate::Error::upstream) and passed through untouched.
//!
//! [`MemoryStore`] is an in-process implementation that evaluates queries over
//! a `Vec<Document>` and records every round trip.

mod filter;
mod memory;
mod stages;

pub use memory::{MemoryStore, RoundTrip, StoreError};

pub(crate) use filter::get_path;

use crate::error::Result;
use crate::query::FindQuery;
use async_trait::async_trait;
use bson::Document;

/// Async query execution surface
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Run a find query
    async fn find(&self, query: &FindQuery) -> Result<Vec<Document>>;

    /// Count the documents matching `filter`
    async fn count(&self, filter: &Document) -> Result<u64>;

    /// Run an aggregation pipeline
    async fn aggregate(&self, pipeline: &[Document]) -> Result<Vec<Document>>;
}
