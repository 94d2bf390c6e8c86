//! Row types and the response dispatcher.

use crate::error::{Error, Result};
use crate::flatten::{self, WalkContext};
use crate::hits;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One flat output row. Column order is insertion order.
pub type Row = Map<String, Value>;

/// Ordered sequence of rows. Rows produced by different subtrees of one
/// response are not guaranteed to share a column set.
pub type Table = Vec<Row>;

/// Options for [`es_to_table`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableOptions {
    /// Aggregation to flatten; defaults to the first one in the response.
    pub aggregation_name: Option<String>,
    /// Column name for top-level filters buckets; defaults to the
    /// selected aggregation's name.
    pub filter_column_name: Option<String>,
}

/// Flatten a search response into rows.
///
/// A response with a non-empty `aggregations` object is flattened by the
/// recursive aggregation walk; otherwise a non-empty `hits.hits`
/// sequence becomes one row per document. A response with neither fails
/// with [`Error::NoData`].
pub fn es_to_table(response: &Value, options: &TableOptions) -> Result<Table> {
    let aggregations = response
        .get("aggregations")
        .and_then(Value::as_object)
        .filter(|aggs| !aggs.is_empty());

    if let Some(aggregations) = aggregations {
        let name = match options.aggregation_name.as_deref() {
            Some(name) => name,
            // Checked non-empty above.
            None => match aggregations.keys().next() {
                Some(name) => name.as_str(),
                None => return Err(Error::NoData),
            },
        };
        let node = aggregations
            .get(name)
            .ok_or_else(|| Error::AggregationNotFound(name.to_string()))?;
        tracing::debug!(aggregation = name, "flattening aggregation response");

        let ctx = WalkContext {
            top_level_name: Some(name),
            filter_column_name: Some(options.filter_column_name.as_deref().unwrap_or(name)),
            current_name: None,
        };
        let rows = match node.as_object() {
            Some(node) => flatten::walk(node, ctx, &mut Vec::new()),
            None => Vec::new(),
        };
        return Ok(rows);
    }

    let hit_list = response
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Value::as_array)
        .filter(|hits| !hits.is_empty());

    match hit_list {
        Some(hit_list) => {
            tracing::debug!(hits = hit_list.len(), "flattening hits response");
            Ok(hits::hits_to_table(hit_list))
        }
        None => Err(Error::NoData),
    }
}
