//! Filter/sort/skip/limit query

use super::{Fetched, QueryDescriptor, SortKey, SortOrder};
use crate::error::Result;
use crate::source::DocumentSource;
use crate::types::QueryKind;
use async_trait::async_trait;
use bson::{doc, Document};

/// A find query against one collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    /// Filter document, empty matches everything
    pub filter: Document,
    /// Ordering, applied before skip/limit
    pub sort: Vec<SortKey>,
    /// Number of matches to skip
    pub skip: Option<u64>,
    /// Maximum number of documents
    pub limit: Option<u64>,
    /// Fields to return
    pub projection: Option<Document>,
}

impl FindQuery {
    /// Query matching every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Query matching `filter`
    pub fn with_filter(filter: Document) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Add a sort field
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort.push(SortKey {
            field: field.into(),
            order,
        });
        self
    }

    /// Restrict the returned fields
    #[must_use]
    pub fn with_projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }
}

#[async_trait]
impl QueryDescriptor for FindQuery {
    fn kind(&self) -> QueryKind {
        QueryKind::Find
    }

    fn has_sort(&self) -> bool {
        !self.sort.is_empty()
    }

    fn append_filter(mut self, filter: Document) -> Self {
        self.filter = if self.filter.is_empty() {
            filter
        } else {
            doc! { "$and": [self.filter, filter] }
        };
        self
    }

    fn set_sort(mut self, sort: Vec<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    fn set_window(mut self, skip: u64, limit: u64) -> Self {
        self.skip = (skip > 0).then_some(skip);
        self.limit = Some(limit);
        self
    }

    async fn fetch(
        &self,
        window: Self,
        source: &dyn DocumentSource,
        with_total: bool,
    ) -> Result<Fetched> {
        if !with_total {
            let documents = source.find(&window).await?;
            return Ok(Fetched {
                documents,
                total: None,
            });
        }

        // Independent round trips; no snapshot is shared between them
        let (documents, total) =
            futures::try_join!(source.find(&window), source.count(&self.filter))?;

        Ok(Fetched {
            documents,
            total: Some(total),
        })
    }
}
