//! estab — flatten search-engine JSON responses into tabular rows and CSV.
//!
//! Aggregation responses are arbitrarily nested trees of buckets; this
//! crate walks them depth-first and emits one flat row per leaf bucket,
//! with ancestry folded into columns. Responses without aggregations
//! fall back to one row per document hit.
//!
//! The core is synchronous and pure: [`es_to_table`] and
//! [`table_to_csv`] allocate their own state per call and touch no I/O,
//! so they are safe to call concurrently without coordination.
//! [`convert_file`] is the thin file wrapper around both.
//!
//! ```no_run
//! use estab::{es_to_table, table_to_csv, CsvOptions, TableOptions};
//! use serde_json::json;
//!
//! let response = json!({
//!     "aggregations": {
//!         "tags": {"buckets": [{"key": "rust", "doc_count": 12}]}
//!     }
//! });
//! let table = es_to_table(&response, &TableOptions::default())?;
//! let csv = table_to_csv(&table, &CsvOptions::default());
//! assert_eq!(csv, "tags,doc_count\nrust,12\n");
//! # Ok::<(), estab::Error>(())
//! ```

mod classify;
mod convert;
mod csv;
mod error;
mod flatten;
mod hits;
mod table;

pub use convert::convert_file;
pub use csv::{table_to_csv, CsvOptions};
pub use error::{Error, Result};
pub use flatten::OTHER_BUCKET;
pub use table::{es_to_table, Row, Table, TableOptions};
