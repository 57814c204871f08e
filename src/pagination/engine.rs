//! Pagination engine

use super::assemble::{apply_transformer, assemble, decode_items};
use super::rewrite::rewrite;
use crate::config::{PaginationConfig, DEFAULT_KEY_FIELD};
use crate::cursor::CursorKey;
use crate::error::{BoxError, Result};
use crate::page::{build_page, AdditionalData, Page};
use crate::params::PaginationParams;
use crate::query::QueryDescriptor;
use crate::source::DocumentSource;
use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::future::Future;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Paginates queries against one document source
///
/// `K` is the type of the primary key cursors are built from.
///
/// ```ignore
/// let paginator = Paginator::<i64>::new(&store);
/// let page: Page<User> = paginator.paginate(&FindQuery::new(), &params).await?;
/// ```
pub struct Paginator<'a, K = ObjectId> {
    source: &'a dyn DocumentSource,
    key_field: String,
    _key: PhantomData<fn() -> K>,
}

impl<K> std::fmt::Debug for Paginator<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("key_field", &self.key_field)
            .finish_non_exhaustive()
    }
}

impl<'a, K: CursorKey> Paginator<'a, K> {
    /// Create a paginator keyed on `_id`
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self {
            source,
            key_field: DEFAULT_KEY_FIELD.to_string(),
            _key: PhantomData,
        }
    }

    /// Create a paginator using the config's key field
    pub fn from_config(source: &'a dyn DocumentSource, config: &PaginationConfig) -> Self {
        Self::new(source).with_key_field(config.key_field.clone())
    }

    /// Key on a different field
    #[must_use]
    pub fn with_key_field(mut self, field: impl Into<String>) -> Self {
        self.key_field = field.into();
        self
    }

    /// Field cursors are built from
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Fetch one page of `query`
    pub async fn paginate<Q, T>(&self, query: &Q, params: &PaginationParams) -> Result<Page<T>>
    where
        Q: QueryDescriptor,
        T: DeserializeOwned,
    {
        self.paginate_with(query, params, AdditionalData::new(), |items: Vec<T>| async move {
            Ok::<_, Infallible>(items)
        })
        .await
    }

    /// Fetch one page of `query`, transforming the decoded items and merging
    /// `additional_data` into the page metadata
    pub async fn paginate_with<Q, T, U, F, Fut, E>(
        &self,
        query: &Q,
        params: &PaginationParams,
        additional_data: AdditionalData,
        transformer: F,
    ) -> Result<Page<U>>
    where
        Q: QueryDescriptor,
        T: DeserializeOwned,
        F: FnOnce(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<Vec<U>, E>>,
        E: Into<BoxError>,
    {
        debug!(
            "Paginating {} query in {} mode on {}",
            query.kind(),
            params.mode(),
            self.key_field
        );

        let rewritten = rewrite::<Q, K>(query, params, &self.key_field)?;
        trace!("Window query: {:?}", rewritten.window);

        let fetched = query
            .fetch(rewritten.window, self.source, params.include_total())
            .await?;
        trace!("Fetched {} documents", fetched.documents.len());

        let assembled = assemble(fetched, &rewritten.plan, &self.key_field)?;
        let items = decode_items::<T>(assembled.documents)?;
        let items = apply_transformer(items, transformer).await?;

        let mut additional_data = additional_data;
        if let Some(navigation) = assembled.navigation {
            additional_data.set_navigation(navigation.next, navigation.previous);
        }

        let page = build_page(items, assembled.total, params, additional_data);
        debug!(
            "Page has {} items (total: {:?}, next: {:?}, previous: {:?})",
            page.len(),
            page.total,
            page.next_page(),
            page.previous_page()
        );
        Ok(page)
    }
}
