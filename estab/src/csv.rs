//! CSV serialization of row tables.

use crate::table::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for [`table_to_csv`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: char,
    /// Emit the header row.
    pub include_headers: bool,
    /// Build the header from the union of all rows' columns instead of
    /// the first row's columns only.
    pub union_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            include_headers: true,
            union_headers: false,
        }
    }
}

/// Serialize rows to delimited text.
///
/// By default the column set of every record comes from the first row
/// alone, so columns appearing only in later rows are dropped. This
/// mirrors the long-standing exporter behavior; `union_headers` widens
/// the layout to every column seen across the table. Each record,
/// including the last, ends with a line terminator. Encoding never
/// fails: absent and null cells degrade to the empty string.
pub fn table_to_csv(table: &[Row], options: &CsvOptions) -> String {
    let Some(first) = table.first() else {
        return String::new();
    };

    let columns: Vec<&str> = if options.union_headers {
        let mut columns: Vec<&str> = Vec::new();
        for row in table {
            for column in row.keys() {
                if !columns.contains(&column.as_str()) {
                    columns.push(column);
                }
            }
        }
        columns
    } else {
        first.keys().map(String::as_str).collect()
    };

    let mut out = String::new();
    if options.include_headers {
        write_record(
            &mut out,
            columns.iter().map(|column| escape_csv(column, options.delimiter)),
            options.delimiter,
        );
    }
    for row in table {
        write_record(
            &mut out,
            columns
                .iter()
                .map(|column| escape_csv(&cell_text(row.get(*column)), options.delimiter)),
            options.delimiter,
        );
    }
    out
}

fn write_record(out: &mut String, cells: impl Iterator<Item = String>, delimiter: char) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(&cell);
    }
    out.push('\n');
}

/// Render a cell as unescaped text. Strings stay verbatim, other values
/// use their JSON rendering, null and absent become empty.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Quote a cell iff it contains the delimiter, a quote, or a line break;
/// internal quotes are doubled.
pub(crate) fn escape_csv(cell: &str, delimiter: char) -> String {
    let needs_quoting = cell.contains(delimiter)
        || cell.contains('"')
        || cell.contains('\n')
        || cell.contains('\r');
    if needs_quoting {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    // ===================================================================
    // escape_csv
    // ===================================================================

    #[test]
    fn test_escape_plain_cell_untouched() {
        assert_eq!(escape_csv("plain", ','), "plain");
        assert_eq!(escape_csv("", ','), "");
    }

    #[test]
    fn test_escape_delimiter_and_quotes() {
        assert_eq!(escape_csv("x,y", ','), "\"x,y\"");
        assert_eq!(escape_csv("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("two\nlines", ','), "\"two\nlines\"");
    }

    #[test]
    fn test_escape_respects_configured_delimiter() {
        assert_eq!(escape_csv("a;b", ';'), "\"a;b\"");
        assert_eq!(escape_csv("a,b", ';'), "a,b");
    }

    // ===================================================================
    // table_to_csv
    // ===================================================================

    #[test]
    fn test_encode_with_headers() {
        let table = vec![row(json!({"a": "x,y", "b": "say \"hi\"", "c": 5}))];
        let csv = table_to_csv(&table, &CsvOptions::default());
        assert_eq!(csv, "a,b,c\n\"x,y\",\"say \"\"hi\"\"\",5\n");
    }

    #[test]
    fn test_encode_without_headers() {
        let table = vec![row(json!({"a": 1, "b": 2}))];
        let options = CsvOptions {
            include_headers: false,
            ..CsvOptions::default()
        };
        assert_eq!(table_to_csv(&table, &options), "1,2\n");
    }

    #[test]
    fn test_custom_delimiter() {
        let table = vec![row(json!({"a": "x", "b": "y"}))];
        let options = CsvOptions {
            delimiter: '\t',
            ..CsvOptions::default()
        };
        assert_eq!(table_to_csv(&table, &options), "a\tb\nx\ty\n");
    }

    #[test]
    fn test_null_and_absent_render_empty() {
        let table = vec![
            row(json!({"a": null, "b": 1})),
            row(json!({"b": 2})),
        ];
        let csv = table_to_csv(&table, &CsvOptions::default());
        assert_eq!(csv, "a,b\n,1\n,2\n");
    }

    #[test]
    fn test_empty_table_encodes_to_empty_string() {
        assert_eq!(table_to_csv(&[], &CsvOptions::default()), "");
    }

    #[test]
    fn test_later_row_extra_columns_dropped_by_default() {
        // Header comes from the first row only; pinned behavior.
        let table = vec![
            row(json!({"a": 1})),
            row(json!({"a": 2, "b": 3})),
        ];
        let csv = table_to_csv(&table, &CsvOptions::default());
        assert_eq!(csv, "a\n1\n2\n");
    }

    #[test]
    fn test_union_headers_keep_every_column() {
        let table = vec![
            row(json!({"a": 1})),
            row(json!({"a": 2, "b": 3})),
        ];
        let options = CsvOptions {
            union_headers: true,
            ..CsvOptions::default()
        };
        let csv = table_to_csv(&table, &options);
        assert_eq!(csv, "a,b\n1,\n2,3\n");
    }

    #[test]
    fn test_boolean_and_number_cells() {
        let mut r = Map::new();
        r.insert("flag".to_string(), json!(true));
        r.insert("n".to_string(), json!(2.5));
        let csv = table_to_csv(&[r], &CsvOptions::default());
        assert_eq!(csv, "flag,n\ntrue,2.5\n");
    }
}
