//! Aggregation stage evaluation
//!
//! Supports `$match`, `$sort`, `$skip`, `$limit`, `$count`, and `$facet`.

use super::filter::{matches, sort_documents};
use super::memory::StoreError;
use crate::query::{SortKey, SortOrder};
use bson::{Bson, Document};

/// Run `stages` over `input`
pub(crate) fn run_pipeline(
    mut docs: Vec<Document>,
    stages: &[Document],
) -> Result<Vec<Document>, StoreError> {
    for stage in stages {
        let mut entries = stage.iter();
        let (name, body) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(StoreError::malformed(
                    "pipeline",
                    "each stage must have exactly one field",
                ));
            }
        };

        docs = match name.as_str() {
            "$match" => {
                let filter = body
                    .as_document()
                    .ok_or_else(|| StoreError::malformed("pipeline", "$match takes a document"))?;
                let mut kept = Vec::with_capacity(docs.len());
                for doc in docs {
                    if matches(&doc, filter)? {
                        kept.push(doc);
                    }
                }
                kept
            }
            "$sort" => {
                let body = body
                    .as_document()
                    .ok_or_else(|| StoreError::malformed("pipeline", "$sort takes a document"))?;
                sort_documents(&mut docs, &parse_sort(body)?);
                docs
            }
            "$skip" => {
                let n = as_count(body).ok_or_else(|| {
                    StoreError::malformed("pipeline", "$skip takes a non-negative integer")
                })?;
                docs.into_iter().skip(n).collect()
            }
            "$limit" => {
                let n = as_count(body)
                    .filter(|n| *n > 0)
                    .ok_or_else(|| StoreError::malformed("pipeline", "$limit takes a positive integer"))?;
                docs.truncate(n);
                docs
            }
            "$count" => {
                let field = body
                    .as_str()
                    .filter(|f| !f.is_empty() && !f.starts_with('$'))
                    .ok_or_else(|| StoreError::malformed("pipeline", "$count takes a field name"))?;
                if docs.is_empty() {
                    Vec::new()
                } else {
                    let mut out = Document::new();
                    out.insert(field, i64::try_from(docs.len()).unwrap_or(i64::MAX));
                    vec![out]
                }
            }
            "$facet" => {
                let branches = body
                    .as_document()
                    .ok_or_else(|| StoreError::malformed("pipeline", "$facet takes a document"))?;
                let mut out = Document::new();
                for (branch, branch_stages) in branches {
                    let branch_stages = branch_stages
                        .as_array()
                        .ok_or_else(|| {
                            StoreError::malformed("pipeline", "$facet branches must be arrays")
                        })?
                        .iter()
                        .map(|s| {
                            s.as_document().cloned().ok_or_else(|| {
                                StoreError::malformed("pipeline", "stages must be documents")
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    let result = run_pipeline(docs.clone(), &branch_stages)?;
                    out.insert(branch.clone(), result);
                }
                vec![out]
            }
            other => return Err(StoreError::UnsupportedStage(other.to_string())),
        };
    }
    Ok(docs)
}

fn parse_sort(body: &Document) -> Result<Vec<SortKey>, StoreError> {
    body.iter()
        .map(|(field, direction)| {
            let order = match direction {
                Bson::Int32(1) | Bson::Int64(1) => SortOrder::Ascending,
                Bson::Int32(-1) | Bson::Int64(-1) => SortOrder::Descending,
                Bson::Double(d) if *d == 1.0 => SortOrder::Ascending,
                Bson::Double(d) if *d == -1.0 => SortOrder::Descending,
                _ => {
                    return Err(StoreError::malformed(
                        "pipeline",
                        format!("sort direction for '{field}' must be 1 or -1"),
                    ));
                }
            };
            Ok(SortKey {
                field: field.clone(),
                order,
            })
        })
        .collect()
}

fn as_count(value: &Bson) -> Option<usize> {
    match value {
        Bson::Int32(n) => usize::try_from(*n).ok(),
        Bson::Int64(n) => usize::try_from(*n).ok(),
        Bson::Double(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
        _ => None,
    }
}
