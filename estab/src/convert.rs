//! File-level convenience around the flattening core.

use crate::csv::{table_to_csv, CsvOptions};
use crate::error::Result;
use crate::table::{es_to_table, Table, TableOptions};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a UTF-8 JSON response file, flatten it, and encode it as CSV.
///
/// Writes the CSV to `output` when a path is given. Returns both the row
/// sequence and the CSV text.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    table_options: &TableOptions,
    csv_options: &CsvOptions,
) -> Result<(Table, String)> {
    let raw = fs::read_to_string(input)?;
    let response: Value = serde_json::from_str(&raw)?;

    let table = es_to_table(&response, table_options)?;
    let csv = table_to_csv(&table, csv_options);

    if let Some(output) = output {
        fs::write(output, &csv)?;
        tracing::debug!(
            rows = table.len(),
            bytes = csv.len(),
            output = %output.display(),
            "wrote CSV"
        );
    }

    Ok((table, csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_convert_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("response.json");
        let output = dir.path().join("out.csv");

        let response = json!({
            "aggregations": {
                "tags": {
                    "buckets": [
                        {"key": "a", "doc_count": 2},
                        {"key": "b", "doc_count": 3}
                    ]
                }
            }
        });
        fs::write(&input, serde_json::to_string(&response).unwrap()).unwrap();

        let (table, csv) = convert_file(
            &input,
            Some(&output),
            &TableOptions::default(),
            &CsvOptions::default(),
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(csv, "tags,doc_count\na,2\nb,3\n");
        assert_eq!(fs::read_to_string(&output).unwrap(), csv);
    }

    #[test]
    fn test_convert_file_without_output_path() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("hits.json");
        fs::write(
            &input,
            json!({"hits": {"hits": [{"_id": "1", "_source": {"a": 1}}]}}).to_string(),
        )
        .unwrap();

        let (table, csv) = convert_file(
            &input,
            None,
            &TableOptions::default(),
            &CsvOptions::default(),
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(csv, "_id,a\n1,1\n");
    }

    #[test]
    fn test_convert_file_propagates_parse_errors() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(&input, "{not json").unwrap();

        let result = convert_file(
            &input,
            None,
            &TableOptions::default(),
            &CsvOptions::default(),
        );
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_convert_file_missing_input() {
        let result = convert_file(
            Path::new("/nonexistent/input.json"),
            None,
            &TableOptions::default(),
            &CsvOptions::default(),
        );
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
