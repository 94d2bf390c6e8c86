//! Recursive flattening of aggregation trees into rows.
//!
//! The walk is depth-first and left-to-right: row order in the output
//! equals bucket order in the response. Each invocation owns its path
//! and row allocations, so the walk is a pure function of its inputs.

use crate::classify::{self, NodeShape};
use crate::table::Row;
use serde_json::{Map, Value};

/// Bucket value synthesized for documents outside a terms aggregation's
/// returned top-N buckets.
pub const OTHER_BUCKET: &str = "_other_";

/// Naming context threaded through the walk, fixed per level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkContext<'a> {
    /// Name of the aggregation selected at the top of the response.
    pub top_level_name: Option<&'a str>,
    /// Column name for filters buckets when no nested name applies.
    pub filter_column_name: Option<&'a str>,
    /// Name of the nested aggregation that produced the current node;
    /// unset at the top level.
    pub current_name: Option<&'a str>,
}

impl<'a> WalkContext<'a> {
    fn filters_column(&self) -> &'a str {
        self.current_name
            .or(self.filter_column_name)
            .unwrap_or("filter")
    }

    fn terms_column(&self) -> &'a str {
        self.current_name
            .or(self.top_level_name)
            .unwrap_or("aggregation")
    }
}

/// Ancestry of the row under construction: one (column, value) pair per
/// level descended so far.
pub(crate) type Path = Vec<(String, Value)>;

/// Flatten one aggregation node into rows.
///
/// Metric-shaped and unrecognized nodes contribute nothing; buckets are
/// walked in their response order.
pub(crate) fn walk(node: &Map<String, Value>, ctx: WalkContext, path: &mut Path) -> Vec<Row> {
    match classify::classify(node) {
        Some(NodeShape::Filters(buckets)) => walk_filters(buckets, ctx, path),
        Some(NodeShape::Terms(buckets)) => walk_terms(node, buckets, ctx, path),
        Some(NodeShape::Metric) | None => Vec::new(),
    }
}

fn walk_filters(
    buckets: &Map<String, Value>,
    ctx: WalkContext,
    path: &mut Path,
) -> Vec<Row> {
    let column = ctx.filters_column();
    let mut rows = Vec::new();
    for (bucket_name, bucket) in buckets {
        let Some(bucket) = bucket.as_object() else {
            continue;
        };
        path.push((column.to_string(), Value::String(bucket_name.clone())));
        rows.extend(descend(bucket, ctx, path));
        path.pop();
    }
    rows
}

fn walk_terms(
    node: &Map<String, Value>,
    buckets: &[Value],
    ctx: WalkContext,
    path: &mut Path,
) -> Vec<Row> {
    let column = ctx.terms_column();
    let mut rows = Vec::new();
    for bucket in buckets {
        let Some(bucket) = bucket.as_object() else {
            continue;
        };
        match classify::bucket_key(bucket) {
            Some(key) => {
                path.push((column.to_string(), key.clone()));
                rows.extend(descend(bucket, ctx, path));
                path.pop();
            }
            None => rows.extend(descend(bucket, ctx, path)),
        }
    }

    // Documents beyond the returned top-N buckets surface as one
    // trailing remainder row carrying only a doc_count.
    if let Some(other) = node.get("sum_other_doc_count") {
        if other.as_f64().unwrap_or(0.0) > 0.0 {
            let mut remainder = Map::new();
            remainder.insert("doc_count".to_string(), other.clone());
            path.push((column.to_string(), Value::String(OTHER_BUCKET.to_string())));
            rows.push(row_from_bucket(&remainder, path));
            path.pop();
        }
    }

    rows
}

/// Recurse into a bucket's nested aggregations, or emit its leaf row.
fn descend(bucket: &Map<String, Value>, ctx: WalkContext, path: &mut Path) -> Vec<Row> {
    let nested = classify::nested_aggregations(bucket);
    if nested.is_empty() {
        return vec![row_from_bucket(bucket, path)];
    }

    let mut rows = Vec::new();
    for (name, node) in nested {
        let child_ctx = WalkContext {
            current_name: Some(name),
            ..ctx
        };
        rows.extend(walk(node, child_ctx, path));
    }
    rows
}

/// Assemble one row from a terminal bucket and its ancestry.
///
/// Path entries land first, in order, later duplicates overwriting
/// earlier values. The bucket's own key is added under `key` only when
/// the path did not already fold it in (filters buckets carry the filter
/// name in the path, not the element key).
pub(crate) fn row_from_bucket(bucket: &Map<String, Value>, path: &Path) -> Row {
    let mut row = Row::new();
    for (column, value) in path {
        row.insert(column.clone(), value.clone());
    }

    if let Some(key) = classify::bucket_key(bucket) {
        let folded = path.last().map(|(_, value)| value == key).unwrap_or(false);
        if !folded {
            row.insert("key".to_string(), key.clone());
        }
    }

    if let Some(doc_count) = bucket.get("doc_count") {
        row.insert("doc_count".to_string(), doc_count.clone());
    }

    for (name, value) in classify::metrics(bucket) {
        row.insert(name.to_string(), value.clone());
    }

    row
}
