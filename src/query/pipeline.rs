//! Aggregation pipeline query

use super::{bson_count, sort_document, Fetched, QueryDescriptor, SortKey};
use crate::error::{Error, Result};
use crate::source::DocumentSource;
use crate::types::QueryKind;
use async_trait::async_trait;
use bson::{doc, Bson, Document};

/// `$facet` branch holding the windowed documents
pub const DATA_BRANCH: &str = "data";

/// `$facet` branch holding the count
pub const METADATA_BRANCH: &str = "metadata";

/// Field written by the `$count` stage of the metadata branch
pub const COUNT_FIELD: &str = "total";

/// An ordered list of aggregation stages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Document>,
}

impl Pipeline {
    /// Pipeline from stages
    pub fn new(stages: Vec<Document>) -> Self {
        Self { stages }
    }

    /// Append a stage
    #[must_use]
    pub fn stage(mut self, stage: Document) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stages in order
    pub fn stages(&self) -> &[Document] {
        &self.stages
    }

    /// Take the stages
    pub fn into_stages(self) -> Vec<Document> {
        self.stages
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether there are no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The upstream stages followed by one `$facet` that runs `branch` as the
    /// data branch and, optionally, counts the upstream results
    pub fn branched(&self, branch: &[Document], with_total: bool) -> Vec<Document> {
        let mut facet = Document::new();
        facet.insert(DATA_BRANCH, branch.to_vec());
        if with_total {
            facet.insert(METADATA_BRANCH, vec![doc! { "$count": COUNT_FIELD }]);
        }

        let mut stages = self.stages.clone();
        stages.push(doc! { "$facet": facet });
        stages
    }
}

impl From<Vec<Document>> for Pipeline {
    fn from(stages: Vec<Document>) -> Self {
        Self::new(stages)
    }
}

#[async_trait]
impl QueryDescriptor for Pipeline {
    fn kind(&self) -> QueryKind {
        QueryKind::Pipeline
    }

    fn has_sort(&self) -> bool {
        self.stages.iter().any(|s| s.contains_key("$sort"))
    }

    fn append_filter(self, filter: Document) -> Self {
        self.stage(doc! { "$match": filter })
    }

    fn set_sort(self, sort: Vec<SortKey>) -> Self {
        self.stage(doc! { "$sort": sort_document(&sort) })
    }

    fn set_window(self, skip: u64, limit: u64) -> Self {
        // $limit first: it has to cover the skipped documents too
        let windowed = self.stage(doc! { "$limit": bson_count(limit.saturating_add(skip)) });
        if skip > 0 {
            windowed.stage(doc! { "$skip": bson_count(skip) })
        } else {
            windowed
        }
    }

    async fn fetch(
        &self,
        window: Self,
        source: &dyn DocumentSource,
        with_total: bool,
    ) -> Result<Fetched> {
        let branch = window
            .stages
            .strip_prefix(self.stages.as_slice())
            .ok_or_else(|| Error::Other("window pipeline does not extend the base pipeline".into()))?;

        let stages = self.branched(branch, with_total);
        let mut results = source.aggregate(&stages).await?;
        let result = if results.is_empty() {
            Document::new()
        } else {
            results.swap_remove(0)
        };

        let documents = match result.get(DATA_BRANCH) {
            Some(Bson::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Bson::Document(d) => Ok(d.clone()),
                    other => Err(Error::Other(format!(
                        "{DATA_BRANCH} branch returned a non-document value: {other}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };

        let total = with_total.then(|| read_total(&result));
        Ok(Fetched { documents, total })
    }
}

/// `metadata[0].total`, 0 when the branch is empty
pub(super) fn read_total(result: &Document) -> u64 {
    let count = result
        .get_array(METADATA_BRANCH)
        .ok()
        .and_then(|m| m.first())
        .and_then(Bson::as_document)
        .and_then(|d| d.get(COUNT_FIELD));

    match count {
        Some(Bson::Int32(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Int64(n)) => u64::try_from(*n).unwrap_or(0),
        Some(Bson::Double(n)) if *n > 0.0 => *n as u64,
        _ => 0,
    }
}
