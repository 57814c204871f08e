//! Tests for pagination module

use super::*;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::page::PageInfo;
use crate::params::{CursorParams, LimitOffsetParams, PaginationParams};
use crate::query::{Fetched, FindQuery, Pipeline, SortKey, SortOrder};
use crate::source::{MemoryStore, RoundTrip};
use bson::{doc, Bson, Document};
use pretty_assertions::assert_eq;
use serde::Deserialize;

fn numbered(n: i64) -> Vec<Document> {
    (1..=n).map(|i| doc! { "_id": i, "name": format!("item-{i}") }).collect()
}

fn ids(docs: &[Document]) -> Vec<i64> {
    docs.iter().map(|d| d.get_i64("_id").unwrap()).collect()
}

fn cursor(token: Option<&str>, size: u64) -> PaginationParams {
    let params = CursorParams::new(size);
    match token {
        Some(t) => params.with_cursor(t).into(),
        None => params.into(),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    #[serde(rename = "_id")]
    id: i64,
    name: String,
}

// ============================================================================
// Rewrite Tests
// ============================================================================

#[test]
fn test_rewrite_limit_offset() {
    let query = FindQuery::with_filter(doc! { "active": true });
    let params = LimitOffsetParams::new(20, 80).into();

    let rewritten = rewrite::<_, i64>(&query, &params, "_id").unwrap();

    assert_eq!(rewritten.plan, WindowPlan::LimitOffset);
    assert_eq!(rewritten.window.skip, Some(80));
    assert_eq!(rewritten.window.limit, Some(20));
    assert_eq!(rewritten.window.filter, query.filter);
}

#[test]
fn test_rewrite_cursor_head() {
    let rewritten = rewrite::<_, i64>(&FindQuery::new(), &cursor(None, 10), "_id").unwrap();

    assert_eq!(
        rewritten.plan,
        WindowPlan::Cursor {
            cursor: None,
            size: 10
        }
    );
    assert_eq!(rewritten.window.filter, doc! {});
    assert_eq!(rewritten.window.sort, vec![SortKey::asc("_id")]);
    assert_eq!(rewritten.window.limit, Some(11));
    assert_eq!(rewritten.window.skip, None);
}

#[test]
fn test_rewrite_cursor_forward_and_backward() {
    let query = FindQuery::with_filter(doc! { "active": true });

    let forward = rewrite::<_, i64>(&query, &cursor(Some("10"), 10), "_id").unwrap();
    assert_eq!(
        forward.window.filter,
        doc! { "$and": [{ "active": true }, { "_id": { "$gt": 10_i64 } }] }
    );
    assert_eq!(forward.window.sort, vec![SortKey::asc("_id")]);

    let backward = rewrite::<_, i64>(&query, &cursor(Some("prev_11"), 10), "_id").unwrap();
    assert_eq!(
        backward.window.filter,
        doc! { "$and": [{ "active": true }, { "_id": { "$lt": 11_i64 } }] }
    );
    assert_eq!(backward.window.sort, vec![SortKey::desc("_id")]);
    assert_eq!(
        backward.plan,
        WindowPlan::Cursor {
            cursor: Some(Cursor::backward(11)),
            size: 10
        }
    );
}

#[test]
fn test_rewrite_cursor_replaces_caller_sort() {
    let query = FindQuery::new().sort_by("name", SortOrder::Descending);
    let rewritten = rewrite::<_, i64>(&query, &cursor(None, 5), "sku").unwrap();

    assert_eq!(rewritten.window.sort, vec![SortKey::asc("sku")]);
    assert_eq!(query.sort, vec![SortKey::desc("name")]);
}

#[test]
fn test_rewrite_cursor_pipeline() {
    let query = Pipeline::new(vec![doc! { "$match": { "active": true } }]);
    let rewritten = rewrite::<_, i64>(&query, &cursor(Some("prev_11"), 10), "_id").unwrap();

    assert_eq!(
        rewritten.window.stages(),
        &[
            doc! { "$match": { "active": true } },
            doc! { "$match": { "_id": { "$lt": 11_i64 } } },
            doc! { "$sort": { "_id": -1 } },
            doc! { "$limit": 11_i64 },
        ]
    );
}

#[test]
fn test_rewrite_invalid_cursor() {
    let err = rewrite::<_, i64>(&FindQuery::new(), &cursor(Some("abc"), 10), "_id").unwrap_err();
    assert!(matches!(err, Error::InvalidCursor { ref cursor } if cursor == "abc"));
}

#[test]
fn test_rewrite_rejects_zero_window() {
    let err = rewrite::<_, i64>(&FindQuery::new(), &cursor(None, 0), "_id").unwrap_err();
    assert!(matches!(err, Error::InvalidParam { .. }));

    let params = LimitOffsetParams::new(0, 10).into();
    let err = rewrite::<_, i64>(&FindQuery::new(), &params, "_id").unwrap_err();
    assert!(matches!(err, Error::InvalidParam { .. }));
}

#[test]
fn test_keyset_filter() {
    assert_eq!(
        keyset_filter("user_id", "$gt", Bson::Int32(4)),
        doc! { "user_id": { "$gt": 4 } }
    );
}

// ============================================================================
// Assemble Tests
// ============================================================================

fn fetched(range: std::ops::RangeInclusive<i64>) -> Fetched {
    Fetched {
        documents: range.map(|i| doc! { "_id": i }).collect(),
        total: None,
    }
}

fn fetched_desc(range: std::ops::RangeInclusive<i64>) -> Fetched {
    Fetched {
        documents: range.rev().map(|i| doc! { "_id": i }).collect(),
        total: None,
    }
}

#[test]
fn test_assemble_forward_with_lookahead() {
    let plan = WindowPlan::Cursor {
        cursor: Some(Cursor::forward(10_i64)),
        size: 10,
    };
    let assembled = assemble(fetched(11..=21), &plan, "_id").unwrap();

    assert_eq!(ids(&assembled.documents), (11..=20).collect::<Vec<_>>());
    assert_eq!(
        assembled.navigation,
        Some(Navigation {
            next: Some("20".into()),
            previous: Some("prev_11".into()),
        })
    );
}

#[test]
fn test_assemble_forward_tail() {
    let plan = WindowPlan::Cursor {
        cursor: Some(Cursor::forward(20_i64)),
        size: 10,
    };
    let assembled = assemble(fetched(21..=25), &plan, "_id").unwrap();

    assert_eq!(ids(&assembled.documents), vec![21, 22, 23, 24, 25]);
    let navigation = assembled.navigation.unwrap();
    assert_eq!(navigation.next, None);
    assert_eq!(navigation.previous.as_deref(), Some("prev_21"));
}

#[test]
fn test_assemble_backward_reverses() {
    let plan = WindowPlan::Cursor {
        cursor: Some(Cursor::backward(11_i64)),
        size: 10,
    };
    let assembled = assemble(fetched_desc(1..=10), &plan, "_id").unwrap();

    assert_eq!(ids(&assembled.documents), (1..=10).collect::<Vec<_>>());
    let navigation = assembled.navigation.unwrap();
    assert_eq!(navigation.next.as_deref(), Some("10"));
    assert_eq!(navigation.previous, None);
}

#[test]
fn test_assemble_backward_with_lookahead() {
    let plan = WindowPlan::Cursor {
        cursor: Some(Cursor::backward(21_i64)),
        size: 10,
    };
    let assembled = assemble(fetched_desc(10..=20), &plan, "_id").unwrap();

    assert_eq!(ids(&assembled.documents), (11..=20).collect::<Vec<_>>());
    let navigation = assembled.navigation.unwrap();
    assert_eq!(navigation.next.as_deref(), Some("20"));
    assert_eq!(navigation.previous.as_deref(), Some("prev_11"));
}

#[test]
fn test_assemble_empty_window() {
    let plan = WindowPlan::<i64>::Cursor {
        cursor: None,
        size: 10,
    };
    let assembled = assemble(Fetched::default(), &plan, "_id").unwrap();

    assert!(assembled.documents.is_empty());
    assert_eq!(assembled.navigation, Some(Navigation::default()));
}

#[test]
fn test_assemble_limit_offset_passthrough() {
    let mut input = fetched(1..=3);
    input.total = Some(40);
    let assembled = assemble::<i64>(input, &WindowPlan::LimitOffset, "_id").unwrap();

    assert_eq!(ids(&assembled.documents), vec![1, 2, 3]);
    assert_eq!(assembled.total, Some(40));
    assert_eq!(assembled.navigation, None);
}

#[test]
fn test_assemble_reads_dotted_key_field() {
    let plan = WindowPlan::Cursor {
        cursor: Some(Cursor::forward(1_i64)),
        size: 2,
    };
    let input = Fetched {
        documents: (2..=4).map(|i| doc! { "meta": { "id": i } }).collect(),
        total: None,
    };

    let assembled = assemble(input, &plan, "meta.id").unwrap();

    assert_eq!(assembled.documents.len(), 2);
    assert_eq!(
        assembled.navigation,
        Some(Navigation {
            next: Some("3".into()),
            previous: Some("prev_2".into()),
        })
    );
}

#[test]
fn test_assemble_missing_key() {
    let plan = WindowPlan::<i64>::Cursor {
        cursor: None,
        size: 10,
    };
    let input = Fetched {
        documents: vec![doc! { "name": "keyless" }],
        total: None,
    };

    let err = assemble(input, &plan, "_id").unwrap_err();
    assert!(matches!(err, Error::MissingKey { ref field } if field == "_id"));
}

#[test]
fn test_decode_items() {
    let items: Vec<Item> = decode_items(vec![doc! { "_id": 1_i64, "name": "a", "extra": true }]).unwrap();
    assert_eq!(
        items,
        vec![Item {
            id: 1,
            name: "a".into()
        }]
    );

    let err = decode_items::<Item>(vec![doc! { "_id": "x" }]).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_apply_transformer() {
    let out = apply_transformer(vec![1, 2, 3], |items: Vec<i32>| async move {
        Ok::<_, Error>(items.into_iter().map(|i| i * 10).collect::<Vec<_>>())
    })
    .await
    .unwrap();
    assert_eq!(out, vec![10, 20, 30]);

    let err = apply_transformer(vec![1, 2, 3], |mut items: Vec<i32>| async move {
        items.pop();
        Ok::<_, Error>(items)
    })
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        Error::TransformerLength {
            expected: 3,
            actual: 2
        }
    ));

    let err = apply_transformer(vec![1], |_: Vec<i32>| async move {
        Err::<Vec<i32>, _>(std::io::Error::other("enrichment failed"))
    })
    .await
    .unwrap_err();
    assert!(matches!(err, Error::Transformer(_)));
    assert_eq!(err.to_string(), "enrichment failed");
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[tokio::test]
async fn test_paginator_limit_offset_find() {
    let store = MemoryStore::with_documents(numbered(25));
    let paginator = Paginator::<i64>::new(&store);

    let page: crate::page::Page<Item> = paginator
        .paginate(&FindQuery::new(), &LimitOffsetParams::new(10, 20).into())
        .await
        .unwrap();

    assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![21, 22, 23, 24, 25]);
    assert_eq!(page.items[0].name, "item-21");
    assert_eq!(page.total, Some(25));
    assert_eq!(page.pages(), Some(3));
    assert_eq!(store.round_trips().await.len(), 2);
}

#[tokio::test]
async fn test_paginator_cursor_with_custom_key() {
    let docs = (1..=5).map(|i| doc! { "sku": i * 10, "_id": bson::oid::ObjectId::new() }).collect();
    let store = MemoryStore::with_documents(docs);
    let paginator = Paginator::<i32>::new(&store).with_key_field("sku");
    assert_eq!(paginator.key_field(), "sku");

    let page: crate::page::Page<Document> = paginator
        .paginate(&FindQuery::new(), &cursor(Some("20"), 2))
        .await
        .unwrap();

    let skus: Vec<_> = page.items.iter().map(|d| d.get_i32("sku").unwrap()).collect();
    assert_eq!(skus, vec![30, 40]);
    assert_eq!(page.next_page(), Some("40"));
    assert_eq!(page.previous_page(), Some("prev_30"));
    assert_eq!(page.total, None);
    assert_eq!(store.round_trips().await.len(), 1);
}

#[tokio::test]
async fn test_paginator_from_config() {
    let store = MemoryStore::new();
    let config = crate::config::PaginationConfig::default().with_key_field("user_id");
    let paginator = Paginator::<i64>::from_config(&store, &config);
    assert_eq!(paginator.key_field(), "user_id");
}

#[tokio::test]
async fn test_paginator_invalid_cursor_skips_io() {
    let store = MemoryStore::with_documents(numbered(5));
    let paginator = Paginator::<i64>::new(&store);

    let err = paginator
        .paginate::<_, Document>(&FindQuery::new(), &cursor(Some("not-a-key"), 2))
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(store.round_trips().await.is_empty());
}

#[tokio::test]
async fn test_paginator_additional_data_and_transformer() {
    let store = MemoryStore::with_documents(numbered(3));
    let paginator = Paginator::<i64>::new(&store);
    let additional = crate::page::AdditionalData::new().with("request_id", "r-1");

    let page = paginator
        .paginate_with(
            &Pipeline::default(),
            &cursor(None, 2),
            additional,
            |items: Vec<Item>| async move {
                Ok::<_, Error>(items.into_iter().map(|i| i.name).collect::<Vec<_>>())
            },
        )
        .await
        .unwrap();

    assert_eq!(page.items, vec!["item-1".to_string(), "item-2".to_string()]);
    assert_eq!(
        page.info,
        PageInfo::Cursor {
            current_page: None,
            next_page: Some("2".into()),
            previous_page: Some("prev_1".into()),
        }
    );
    assert_eq!(page.extra.get("request_id"), Some(&serde_json::json!("r-1")));
    assert!(matches!(
        store.round_trips().await.as_slice(),
        [RoundTrip::Aggregate(_)]
    ));
}

#[tokio::test]
async fn test_paginator_nested_key_field_from_config() {
    let docs = (1..=5_i64).map(|i| doc! { "meta": { "id": i } }).collect();
    let store = MemoryStore::with_documents(docs);
    let config = crate::config::PaginationConfig::default().with_key_field("meta.id");
    assert!(config.validate().is_ok());
    let paginator = Paginator::<i64>::from_config(&store, &config);

    let first: crate::page::Page<Document> = paginator
        .paginate(&FindQuery::new(), &cursor(None, 2))
        .await
        .unwrap();
    assert_eq!(first.next_page(), Some("2"));
    assert_eq!(first.previous_page(), Some("prev_1"));

    let second: crate::page::Page<Document> = paginator
        .paginate(&FindQuery::new(), &cursor(first.next_page(), 2))
        .await
        .unwrap();
    let keys: Vec<_> = second
        .items
        .iter()
        .map(|d| d.get_document("meta").unwrap().get_i64("id").unwrap())
        .collect();
    assert_eq!(keys, vec![3, 4]);
    assert_eq!(second.next_page(), Some("4"));
}
