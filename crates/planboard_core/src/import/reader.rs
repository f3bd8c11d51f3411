//! Header-keyed CSV row reader.
//!
//! # Responsibility
//! - Parse a CSV stream into key->value rows keyed by the header line.
//!
//! # Invariants
//! - Header cells are trimmed; field values are handed over verbatim.
//! - Key lookup is case-sensitive (no case-folding of header names).
//! - Ragged rows are tolerated; missing cells read as absent keys.

use super::ImportError;
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::io::Read;

/// One CSV data row keyed by its (trimmed) header names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Builds a row from explicit key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Returns the raw value for an exact header name, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reads all data rows from a CSV stream whose first line is a header.
///
/// Empty lines are skipped; rows shorter than the header simply miss
/// the trailing keys.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        rows.push(RawRow { fields });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::{read_rows, RawRow};

    #[test]
    fn reads_rows_keyed_by_trimmed_headers() {
        let csv = " type , flexibility ,title\nholidays,firm,Offsite\n";
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("type"), Some("holidays"));
        assert_eq!(rows[0].get("flexibility"), Some("firm"));
        assert_eq!(rows[0].get("title"), Some("Offsite"));
    }

    #[test]
    fn header_lookup_stays_case_sensitive() {
        let csv = "Title\nWrite spec\n";
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].get("Title"), Some("Write spec"));
        assert_eq!(rows[0].get("title"), None);
    }

    #[test]
    fn field_values_are_not_trimmed() {
        let csv = "Title\n  Write spec  \n";
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].get("Title"), Some("  Write spec  "));
    }

    #[test]
    fn short_rows_read_as_missing_keys() {
        let csv = "Project,Title,Duration\nWebsite,Write spec\n";
        let rows = read_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].get("Title"), Some("Write spec"));
        assert_eq!(rows[0].get("Duration"), None);
    }

    #[test]
    fn from_pairs_round_trips() {
        let row = RawRow::from_pairs([("Title", "X")]);
        assert_eq!(row.get("Title"), Some("X"));
        assert!(!row.is_empty());
    }
}
