//! Row-per-document flattening of hit lists.

use crate::table::{Row, Table};
use serde_json::{Map, Value};

/// Convert a `hits.hits` sequence into one row per document.
///
/// Columns are `_id` followed by every source field in first-seen order
/// across the hits. Missing fields render as the empty string; arrays
/// and objects are canonicalized to their JSON text.
pub(crate) fn hits_to_table(hits: &[Value]) -> Table {
    let mut columns: Vec<String> = vec!["_id".to_string()];
    for hit in hits {
        if let Some(source) = source_of(hit) {
            for field in source.keys() {
                if !columns.iter().any(|column| column == field) {
                    columns.push(field.clone());
                }
            }
        }
    }

    hits.iter()
        .map(|hit| {
            let source = source_of(hit);
            let mut row = Row::new();
            row.insert(
                "_id".to_string(),
                hit.get("_id").cloned().unwrap_or(Value::Null),
            );
            for column in columns.iter().skip(1) {
                let cell = source
                    .and_then(|source| source.get(column))
                    .map(canonical_cell)
                    .unwrap_or_else(|| Value::String(String::new()));
                row.insert(column.clone(), cell);
            }
            row
        })
        .collect()
}

fn source_of(hit: &Value) -> Option<&Map<String, Value>> {
    hit.get("_source").and_then(Value::as_object)
}

/// Scalars pass through unchanged; containers become their JSON text.
fn canonical_cell(value: &Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
        scalar => scalar.clone(),
    }
}
