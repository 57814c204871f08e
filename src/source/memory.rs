//! In-memory document source

use super::filter::{matches, project, sort_documents};
use super::stages::run_pipeline;
use super::DocumentSource;
use crate::error::{Error, Result};
use crate::query::FindQuery;
use async_trait::async_trait;
use bson::Document;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// Errors raised while evaluating a query in memory
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Unsupported pipeline stage: {0}")]
    UnsupportedStage(String),

    #[error("Malformed {context}: {message}")]
    Malformed {
        context: &'static str,
        message: String,
    },

    #[error("Invalid regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    Injected(String),
}

impl StoreError {
    pub(crate) fn malformed(context: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            context,
            message: message.into(),
        }
    }
}

/// One call made against the store
#[derive(Debug, Clone, PartialEq)]
pub enum RoundTrip {
    Find(FindQuery),
    Count(Document),
    Aggregate(Vec<Document>),
}

/// A collection held in memory
///
/// Documents keep insertion order, which is the natural order of queries
/// without a sort. Every call is recorded, including calls that fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
    round_trips: Mutex<Vec<RoundTrip>>,
    failure: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `documents`
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
            ..Self::default()
        }
    }

    /// Add a document
    pub async fn insert(&self, document: Document) {
        self.documents.write().await.push(document);
    }

    /// Add several documents
    pub async fn insert_many(&self, documents: impl IntoIterator<Item = Document>) {
        self.documents.write().await.extend(documents);
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Calls made so far, oldest first
    pub async fn round_trips(&self) -> Vec<RoundTrip> {
        self.round_trips.lock().await.clone()
    }

    /// Forget recorded calls
    pub async fn clear_round_trips(&self) {
        self.round_trips.lock().await.clear();
    }

    /// Make every following call fail with `message`
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    /// Stop failing calls
    pub async fn clear_failure(&self) {
        *self.failure.lock().await = None;
    }

    async fn begin(&self, trip: RoundTrip) -> std::result::Result<(), StoreError> {
        self.round_trips.lock().await.push(trip);
        match self.failure.lock().await.clone() {
            Some(message) => Err(StoreError::Injected(message)),
            None => Ok(()),
        }
    }
}

fn run_find(documents: &[Document], query: &FindQuery) -> std::result::Result<Vec<Document>, StoreError> {
    let mut found = Vec::new();
    for doc in documents {
        if matches(doc, &query.filter)? {
            found.push(doc.clone());
        }
    }

    sort_documents(&mut found, &query.sort);

    let skip = query.skip.map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
    let limit = query.limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
    let window = found.into_iter().skip(skip).take(limit);

    Ok(match &query.projection {
        Some(projection) => window.map(|doc| project(&doc, projection)).collect(),
        None => window.collect(),
    })
}

#[async_trait]
impl DocumentSource for MemoryStore {
    async fn find(&self, query: &FindQuery) -> Result<Vec<Document>> {
        self.begin(RoundTrip::Find(query.clone()))
            .await
            .map_err(Error::upstream)?;

        let documents = self.documents.read().await;
        run_find(&documents, query).map_err(Error::upstream)
    }

    async fn count(&self, filter: &Document) -> Result<u64> {
        self.begin(RoundTrip::Count(filter.clone()))
            .await
            .map_err(Error::upstream)?;

        let documents = self.documents.read().await;
        let mut count = 0_u64;
        for doc in documents.iter() {
            if matches(doc, filter).map_err(Error::upstream)? {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn aggregate(&self, pipeline: &[Document]) -> Result<Vec<Document>> {
        self.begin(RoundTrip::Aggregate(pipeline.to_vec()))
            .await
            .map_err(Error::upstream)?;

        let documents = self.documents.read().await.clone();
        run_pipeline(documents, pipeline).map_err(Error::upstream)
    }
}
