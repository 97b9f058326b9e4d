//! Recursive deep-merge over parsed document trees.
//!
//! Merging dispatches on the shape of the *existing* value:
//!
//! - mappings merge key-wise, recursing to unlimited depth;
//! - sequences accumulate, concatenating the incoming elements after the
//!   existing ones; overlay files rely on this to append entries rather
//!   than replace them;
//! - scalars are replaced wholesale by the incoming value.
//!
//! Merging a non-mapping into a mapping, or a non-sequence into a sequence,
//! is a type mismatch and fails with the document path of the conflict.
//! The engine consumes its inputs and builds a fresh tree; callers holding
//! on to a document must clone it first.

use serde_json::{Map, Value};

use crate::error::{StrataError, StrataResult, ValueKind};

/// Deep-merge `incoming` over `existing`, producing a new tree.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata_config::merge;
///
/// let merged = merge(
///     json!({"db": {"host": "x", "port": 1}, "plugins": ["a"]}),
///     json!({"db": {"port": 2}, "plugins": ["b"]}),
/// )?;
/// assert_eq!(
///     merged,
///     json!({"db": {"host": "x", "port": 2}, "plugins": ["a", "b"]}),
/// );
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
///
/// # Errors
///
/// Returns [`StrataError::MergeTypeMismatch`] when `incoming` holds a
/// differently-shaped value where `existing` holds a collection.
pub fn merge(existing: Value, incoming: Value) -> StrataResult<Value> {
    let mut path = Vec::new();
    merge_at(&mut path, existing, incoming)
}

/// Left-fold an ordered sequence of documents into one merged tree.
///
/// Later documents take precedence under the rules of [`merge`]. An empty
/// sequence yields an empty mapping.
///
/// # Errors
///
/// Propagates the first [`StrataError::MergeTypeMismatch`] encountered.
pub fn merge_documents<I>(documents: I) -> StrataResult<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut merged: Option<Value> = None;
    for document in documents {
        merged = Some(match merged {
            Some(accumulated) => merge(accumulated, document)?,
            None => document,
        });
    }
    Ok(merged.unwrap_or_else(|| Value::Object(Map::new())))
}

fn merge_at(path: &mut Vec<String>, existing: Value, incoming: Value) -> StrataResult<Value> {
    match existing {
        Value::Object(existing_map) => match incoming {
            Value::Object(incoming_map) => merge_mappings(path, existing_map, incoming_map),
            other => Err(mismatch(path, ValueKind::Mapping, &other)),
        },
        Value::Array(mut elements) => match incoming {
            Value::Array(additions) => {
                elements.extend(additions);
                Ok(Value::Array(elements))
            }
            other => Err(mismatch(path, ValueKind::Sequence, &other)),
        },
        // Scalars (including null) obey last-write-wins.
        _ => Ok(incoming),
    }
}

fn merge_mappings(
    path: &mut Vec<String>,
    existing: Map<String, Value>,
    incoming: Map<String, Value>,
) -> StrataResult<Value> {
    let mut merged = existing;
    for (key, value) in incoming {
        match merged.remove(&key) {
            Some(current) => {
                path.push(key.clone());
                let combined = merge_at(path, current, value)?;
                path.pop();
                merged.insert(key, combined);
            }
            None => {
                merged.insert(key, value);
            }
        }
    }
    Ok(Value::Object(merged))
}

fn mismatch(
    path: &[String],
    existing: ValueKind,
    incoming: &Value,
) -> std::sync::Arc<StrataError> {
    StrataError::MergeTypeMismatch {
        path: path.join("/"),
        existing,
        incoming: ValueKind::of(incoming),
    }
    .into_shared()
}
