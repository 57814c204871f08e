//! Query rewriting

use crate::cursor::{Cursor, CursorKey};
use crate::error::{Error, Result};
use crate::params::PaginationParams;
use crate::query::{QueryDescriptor, SortKey, SortOrder};
use bson::{Bson, Document};
use tracing::warn;

/// What the assembler needs to know about a rewritten query
#[derive(Debug, Clone, PartialEq)]
pub enum WindowPlan<K> {
    /// Plain skip/limit window
    LimitOffset,
    /// Keyset window fetching `size + 1` documents
    Cursor {
        /// Decoded cursor, `None` for the head of the collection
        cursor: Option<Cursor<K>>,
        /// Items per page
        size: u64,
    },
}

/// Window query plus its plan
#[derive(Debug, Clone)]
pub struct Rewritten<Q, K> {
    /// Query to execute
    pub window: Q,
    /// How to interpret its results
    pub plan: WindowPlan<K>,
}

/// `{ <key_field>: { <op>: <key> } }`
pub fn keyset_filter(key_field: &str, op: &str, key: Bson) -> Document {
    let mut condition = Document::new();
    condition.insert(op, key);

    let mut filter = Document::new();
    filter.insert(key_field, condition);
    filter
}

/// Derive the window query for `params` from a clone of `query`
pub fn rewrite<Q, K>(query: &Q, params: &PaginationParams, key_field: &str) -> Result<Rewritten<Q, K>>
where
    Q: QueryDescriptor,
    K: CursorKey,
{
    match params {
        PaginationParams::LimitOffset(p) => {
            if p.limit == 0 {
                return Err(Error::invalid_param("limit", "must be greater than 0"));
            }

            Ok(Rewritten {
                window: query.clone().set_window(p.offset, p.limit),
                plan: WindowPlan::LimitOffset,
            })
        }
        PaginationParams::Cursor(p) => {
            if p.size == 0 {
                return Err(Error::invalid_param("size", "must be greater than 0"));
            }
            let cursor = p.cursor.as_deref().map(Cursor::<K>::decode).transpose()?;

            if query.has_sort() {
                warn!(
                    "Cursor pagination orders by {}; the query's own sort is replaced",
                    key_field
                );
            }

            let mut window = query.clone();
            let order = match &cursor {
                Some(c) if c.is_backward() => {
                    window = window.append_filter(keyset_filter(key_field, "$lt", c.key.to_bson()));
                    SortOrder::Descending
                }
                Some(c) => {
                    window = window.append_filter(keyset_filter(key_field, "$gt", c.key.to_bson()));
                    SortOrder::Ascending
                }
                None => SortOrder::Ascending,
            };

            let window = window
                .set_sort(vec![SortKey {
                    field: key_field.to_string(),
                    order,
                }])
                .set_window(0, p.size.saturating_add(1));

            Ok(Rewritten {
                window,
                plan: WindowPlan::Cursor {
                    cursor,
                    size: p.size,
                },
            })
        }
    }
}
