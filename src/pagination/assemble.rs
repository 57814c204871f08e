//! Result assembly

use super::rewrite::WindowPlan;
use crate::cursor::{boundary_token, CursorKey, Direction};
use crate::error::{BoxError, Error, Result};
use crate::query::Fetched;
use crate::source::get_path;
use bson::Document;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Cursor-mode navigation tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// Documents of one page in display order
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub documents: Vec<Document>,
    pub total: Option<u64>,
    /// Present in cursor mode only
    pub navigation: Option<Navigation>,
}

/// Turn fetched documents into a page's worth of documents
///
/// In cursor mode the lookahead document is dropped, backward windows are
/// reversed into ascending order, and the tokens are derived from the first
/// and last remaining documents. A token for a side is only produced when
/// something can lie beyond it: `next` needs the lookahead on a forward
/// fetch, `previous` needs it on a backward fetch, and the side the cursor
/// came from always gets one.
pub fn assemble<K: CursorKey>(
    fetched: Fetched,
    plan: &WindowPlan<K>,
    key_field: &str,
) -> Result<Assembled> {
    let Fetched {
        mut documents,
        total,
    } = fetched;

    let (cursor, size) = match plan {
        WindowPlan::LimitOffset => {
            return Ok(Assembled {
                documents,
                total,
                navigation: None,
            });
        }
        WindowPlan::Cursor { cursor, size } => (cursor, *size),
    };

    // The lookahead ends a walk on its last full or partial page; without it
    // the end only shows up as an extra empty page.
    let size = usize::try_from(size).unwrap_or(usize::MAX);
    let has_more = documents.len() > size;
    documents.truncate(size);

    let backward = cursor.as_ref().is_some_and(|c| c.is_backward());
    if backward {
        documents.reverse();
    }

    let first = documents
        .first()
        .map(|d| read_key::<K>(d, key_field))
        .transpose()?;
    let last = documents
        .last()
        .map(|d| read_key::<K>(d, key_field))
        .transpose()?;

    let (next, previous) = if backward {
        (
            boundary_token(Direction::Forward, last.as_ref()),
            has_more
                .then(|| boundary_token(Direction::Backward, first.as_ref()))
                .flatten(),
        )
    } else {
        (
            has_more
                .then(|| boundary_token(Direction::Forward, last.as_ref()))
                .flatten(),
            boundary_token(Direction::Backward, first.as_ref()),
        )
    };

    Ok(Assembled {
        documents,
        total,
        navigation: Some(Navigation { next, previous }),
    })
}

/// Key of `document`, `key_field` may be a dotted path
fn read_key<K: CursorKey>(document: &Document, key_field: &str) -> Result<K> {
    get_path(document, key_field)
        .and_then(K::from_bson)
        .ok_or_else(|| Error::missing_key(key_field))
}

/// Decode documents into the projection model
pub fn decode_items<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>> {
    documents
        .into_iter()
        .map(|d| bson::from_document(d).map_err(Error::from))
        .collect()
}

/// Run the caller's transformer over a page of items
///
/// The transformer must return exactly one item per input item.
pub async fn apply_transformer<T, U, F, Fut, E>(items: Vec<T>, transformer: F) -> Result<Vec<U>>
where
    F: FnOnce(Vec<T>) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<U>, E>>,
    E: Into<BoxError>,
{
    let expected = items.len();
    let transformed = transformer(items).await.map_err(Error::transformer)?;

    if transformed.len() != expected {
        return Err(Error::TransformerLength {
            expected,
            actual: transformed.len(),
        });
    }
    Ok(transformed)
}
