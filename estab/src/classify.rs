//! Structural classification of aggregation nodes.
//!
//! Search-engine responses carry no explicit type tag on aggregation
//! subtrees; the shape of the `buckets` property decides everything.
//! Classification happens once per node so the walker never re-probes
//! the same structure.

use serde_json::{Map, Value};

/// Bucket properties that are never nested aggregations or metrics.
const RESERVED_KEYS: [&str; 5] = [
    "key",
    "key_as_string",
    "doc_count",
    "doc_count_error_upper_bound",
    "sum_other_doc_count",
];

/// Shape of an aggregation node.
#[derive(Debug)]
pub(crate) enum NodeShape<'a> {
    /// Ordered sequence of buckets (terms, histogram, ranges).
    Terms(&'a Vec<Value>),
    /// Named mapping of buckets (filters).
    Filters(&'a Map<String, Value>),
    /// Scalar-bearing leaf, no buckets at all.
    Metric,
}

/// Classify a node by the shape of its `buckets` property.
///
/// Returns `None` when `buckets` exists but is neither a sequence nor a
/// mapping; such a node contributes no rows.
pub(crate) fn classify(node: &Map<String, Value>) -> Option<NodeShape<'_>> {
    match node.get("buckets") {
        None => Some(NodeShape::Metric),
        Some(Value::Array(buckets)) => Some(NodeShape::Terms(buckets)),
        Some(Value::Object(buckets)) => Some(NodeShape::Filters(buckets)),
        Some(_) => None,
    }
}

fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Nested aggregations of a bucket, in property order.
///
/// A nested aggregation is any non-reserved property whose value is an
/// object carrying a `buckets` property of sequence or mapping shape,
/// named by the property key.
pub(crate) fn nested_aggregations(
    bucket: &Map<String, Value>,
) -> Vec<(&str, &Map<String, Value>)> {
    bucket
        .iter()
        .filter(|(name, _)| !is_reserved(name))
        .filter_map(|(name, value)| value.as_object().map(|obj| (name.as_str(), obj)))
        .filter(|(_, obj)| {
            matches!(
                obj.get("buckets"),
                Some(Value::Array(_)) | Some(Value::Object(_))
            )
        })
        .collect()
}

/// Metric values co-located on a bucket, in property order.
///
/// A metric is any non-reserved object property without a `buckets`
/// property. Filter-style metrics yield their `doc_count`, statistical
/// metrics their `value`; an object carrying neither is skipped.
pub(crate) fn metrics(bucket: &Map<String, Value>) -> Vec<(&str, &Value)> {
    bucket
        .iter()
        .filter(|(name, _)| !is_reserved(name))
        .filter_map(|(name, value)| value.as_object().map(|obj| (name.as_str(), obj)))
        .filter(|(_, obj)| !obj.contains_key("buckets"))
        .filter_map(|(name, obj)| {
            obj.get("doc_count")
                .or_else(|| obj.get("value"))
                .map(|value| (name, value))
        })
        .collect()
}

/// Bucket key, preferring the string rendering when both forms exist.
pub(crate) fn bucket_key(bucket: &Map<String, Value>) -> Option<&Value> {
    bucket.get("key_as_string").or_else(|| bucket.get("key"))
}
