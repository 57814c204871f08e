//! Filter document evaluation
//!
//! MongoDB query semantics over owned documents:
//! - the top-level document is an implicit AND of its entries
//! - `{ "field": value }` is an implicit `$eq`
//! - `{ "field": { "$gt": v, ... } }` applies every operator
//! - `$and` / `$or` / `$nor` take arrays of filter documents
//! - dotted field names walk into sub-documents

use super::memory::StoreError;
use crate::query::{SortKey, SortOrder};
use bson::{Bson, Document};
use regex::Regex;
use std::cmp::Ordering;

/// Whether `doc` satisfies `filter`
pub(crate) fn matches(doc: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (key, value) in filter {
        let ok = match key.as_str() {
            "$and" => {
                let mut all = true;
                for child in logical_children(key, value)? {
                    all &= matches(doc, child)?;
                }
                all
            }
            "$or" => {
                let mut any = false;
                for child in logical_children(key, value)? {
                    any |= matches(doc, child)?;
                }
                any
            }
            "$nor" => {
                let mut any = false;
                for child in logical_children(key, value)? {
                    any |= matches(doc, child)?;
                }
                !any
            }
            k if k.starts_with('$') => {
                return Err(StoreError::UnsupportedOperator(k.to_string()));
            }
            field => field_matches(get_path(doc, field), value)?,
        };

        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn logical_children<'a>(op: &str, value: &'a Bson) -> Result<Vec<&'a Document>, StoreError> {
    let Bson::Array(items) = value else {
        return Err(StoreError::malformed("filter", format!("{op} value must be an array")));
    };
    if items.is_empty() {
        return Err(StoreError::malformed("filter", format!("{op} array must not be empty")));
    }
    items
        .iter()
        .map(|item| {
            item.as_document().ok_or_else(|| {
                StoreError::malformed("filter", format!("{op} array elements must be documents"))
            })
        })
        .collect()
}

fn field_matches(actual: Option<&Bson>, condition: &Bson) -> Result<bool, StoreError> {
    // A sub-document whose first key is an operator is an operator document;
    // anything else is an implicit $eq value
    if let Bson::Document(ops) = condition {
        if ops.keys().next().is_some_and(|k| k.starts_with('$')) {
            return operators_match(actual, ops);
        }
    }
    Ok(values_equal(actual, condition))
}

fn operators_match(actual: Option<&Bson>, ops: &Document) -> Result<bool, StoreError> {
    for (op, operand) in ops {
        let ok = match op.as_str() {
            "$eq" => values_equal(actual, operand),
            "$ne" => !values_equal(actual, operand),
            "$gt" => ordered(actual, operand, Ordering::is_gt),
            "$gte" => ordered(actual, operand, Ordering::is_ge),
            "$lt" => ordered(actual, operand, Ordering::is_lt),
            "$lte" => ordered(actual, operand, Ordering::is_le),
            "$in" => operand_array(op, operand)?
                .iter()
                .any(|v| values_equal(actual, v)),
            "$nin" => !operand_array(op, operand)?
                .iter()
                .any(|v| values_equal(actual, v)),
            "$exists" => match operand {
                Bson::Boolean(expected) => actual.is_some() == *expected,
                _ => {
                    return Err(StoreError::malformed("filter", "$exists value must be a boolean"));
                }
            },
            "$regex" => regex_matches(actual, operand, ops.get("$options"))?,
            "$options" => {
                if !ops.contains_key("$regex") {
                    return Err(StoreError::malformed("filter", "$options without $regex"));
                }
                true
            }
            other => return Err(StoreError::UnsupportedOperator(other.to_string())),
        };

        if !ok {
            return Ok(false);
        }
    }
    Ok(true)
}

fn operand_array<'a>(op: &str, operand: &'a Bson) -> Result<&'a [Bson], StoreError> {
    match operand {
        Bson::Array(items) => Ok(items),
        _ => Err(StoreError::malformed("filter", format!("{op} value must be an array"))),
    }
}

fn regex_matches(
    actual: Option<&Bson>,
    pattern: &Bson,
    options: Option<&Bson>,
) -> Result<bool, StoreError> {
    let Bson::String(pattern) = pattern else {
        return Err(StoreError::malformed("filter", "$regex value must be a string"));
    };

    let full_pattern = match options {
        Some(Bson::String(opts)) if !opts.is_empty() => {
            let mut prefix = String::from("(?");
            for ch in opts.chars() {
                match ch {
                    'i' | 's' | 'm' | 'x' => prefix.push(ch),
                    c => {
                        return Err(StoreError::malformed(
                            "filter",
                            format!("unknown regex option: {c}"),
                        ));
                    }
                }
            }
            prefix.push(')');
            prefix.push_str(pattern);
            prefix
        }
        Some(Bson::String(_)) | None => pattern.clone(),
        Some(_) => return Err(StoreError::malformed("filter", "$options value must be a string")),
    };

    let re = Regex::new(&full_pattern)?;
    Ok(matches!(actual, Some(Bson::String(s)) if re.is_match(s)))
}

fn ordered(actual: Option<&Bson>, operand: &Bson, pred: fn(Ordering) -> bool) -> bool {
    actual
        .and_then(|a| compare_values(a, operand))
        .is_some_and(pred)
}

fn values_equal(actual: Option<&Bson>, expected: &Bson) -> bool {
    match actual {
        None => matches!(expected, Bson::Null),
        Some(a) => compare_values(a, expected) == Some(Ordering::Equal),
    }
}

/// Walk a dotted path
pub(crate) fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

/// Compare two values of the same type bracket, `None` across brackets
pub(crate) fn compare_values(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (a, b) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::Int32(a), Bson::Int32(b)) => Some(a.cmp(b)),
        (Bson::Int64(a), Bson::Int64(b)) => Some(a.cmp(b)),
        (Bson::Int32(a), Bson::Int64(b)) => Some(i64::from(*a).cmp(b)),
        (Bson::Int64(a), Bson::Int32(b)) => Some(a.cmp(&i64::from(*b))),
        (Bson::Double(_), _) | (_, Bson::Double(_)) => as_f64(a)?.partial_cmp(&as_f64(b)?),
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => {
            Some(a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        (Bson::ObjectId(a), Bson::ObjectId(b)) => Some(a.bytes().cmp(&b.bytes())),
        (Bson::Null, Bson::Null) => Some(Ordering::Equal),
        _ => (a == b).then_some(Ordering::Equal),
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

/// Stable sort; missing and null fields sort first
pub(crate) fn sort_documents(docs: &mut [Document], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    docs.sort_by(|a, b| {
        for key in keys {
            let ord = compare_for_sort(get_path(a, &key.field), get_path(b, &key.field));
            let ord = match key.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

fn compare_for_sort(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None | Some(Bson::Null), None | Some(Bson::Null)) => Ordering::Equal,
        (None | Some(Bson::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Bson::Null)) => Ordering::Greater,
        (Some(a), Some(b)) => compare_values(a, b)
            .unwrap_or_else(|| type_rank(a).cmp(&type_rank(b))),
    }
}

/// Cross-type sort order, numbers before strings before documents
fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::Null | Bson::Undefined => 0,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 1,
        Bson::String(_) | Bson::Symbol(_) => 2,
        Bson::Document(_) => 3,
        Bson::Array(_) => 4,
        Bson::Binary(_) => 5,
        Bson::ObjectId(_) => 6,
        Bson::Boolean(_) => 7,
        Bson::DateTime(_) => 8,
        Bson::Timestamp(_) => 9,
        Bson::RegularExpression(_) => 10,
        _ => 11,
    }
}

/// Apply a top-level inclusion or exclusion projection
pub(crate) fn project(doc: &Document, projection: &Document) -> Document {
    let truthy = |v: &Bson| match v {
        Bson::Boolean(b) => *b,
        Bson::Int32(n) => *n != 0,
        Bson::Int64(n) => *n != 0,
        Bson::Double(n) => *n != 0.0,
        _ => true,
    };

    let inclusive = projection
        .iter()
        .any(|(field, v)| field != "_id" && truthy(v));

    if inclusive {
        let keep_id = projection.get("_id").map_or(true, truthy);
        doc.iter()
            .filter(|(field, _)| {
                if field.as_str() == "_id" {
                    keep_id
                } else {
                    projection.get(field.as_str()).is_some_and(truthy)
                }
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    } else {
        doc.iter()
            .filter(|(field, _)| !projection.contains_key(field.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
