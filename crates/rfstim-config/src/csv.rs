//! Minimal CSV table: declared columns, header-skipping parse, row query
//! by the first field.
//!
//! The whole file is materialized before any query is answered — callers
//! never observe a partially parsed table.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Split one delimited line into owned fields, trimming surrounding
/// whitespace (including a trailing carriage return).
pub fn split_fields(line: &str, sep: char) -> Vec<String> {
    line.split(sep).map(|f| f.trim().to_string()).collect()
}

/// An in-memory CSV table with a fixed column set.
#[derive(Debug, Default)]
pub struct CsvTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Create an empty table with the given column names.
    ///
    /// Column names must be non-empty and unique.
    pub fn with_columns(columns: &[&str]) -> Result<Self> {
        if columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        let mut seen = HashSet::new();
        for name in columns {
            if !seen.insert(*name) {
                return Err(ConfigError::DuplicateColumn((*name).to_string()));
            }
        }
        Ok(Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows: Vec::new(),
        })
    }

    /// Parse CSV content, replacing any previously held rows.
    ///
    /// The first non-empty line is the header and is skipped; every data
    /// row must carry exactly as many fields as there are columns.
    pub fn parse_str(&mut self, content: &str) -> Result<()> {
        let mut rows = Vec::new();
        let mut header_seen = false;
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if !header_seen {
                header_seen = true;
                continue;
            }
            let fields = split_fields(line, ',');
            if fields.len() != self.columns.len() {
                return Err(ConfigError::MalformedRow {
                    line: idx + 1,
                    expected: self.columns.len(),
                    found: fields.len(),
                });
            }
            rows.push(fields);
        }
        self.rows = rows;
        debug!(rows = self.rows.len(), "csv table parsed");
        Ok(())
    }

    /// Read and parse a CSV file.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_str(&content)
    }

    /// The row whose first field equals `command`, if any.
    pub fn query(&self, command: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row[0] == command)
            .map(|row| row.as_slice())
    }

    /// Declared column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All materialized data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop all materialized rows, keeping the column set.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLIST_CSV: &str = "\
FreqListName,FreqListValue
flist-a,1.8e9|2.4e9|3.7e9
flist-b,900e6
";

    fn flist_table() -> CsvTable {
        let mut table = CsvTable::with_columns(&["FreqListName", "FreqListValue"]).unwrap();
        table.parse_str(FLIST_CSV).unwrap();
        table
    }

    #[test]
    fn parses_rows_and_skips_header() {
        let table = flist_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], vec!["flist-a", "1.8e9|2.4e9|3.7e9"]);
    }

    #[test]
    fn query_matches_first_field() {
        let table = flist_table();
        let row = table.query("flist-b").unwrap();
        assert_eq!(row[1], "900e6");
        assert!(table.query("flist-c").is_none());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut table = CsvTable::with_columns(&["Name", "Value"]).unwrap();
        table
            .parse_str("Name,Value\n\nrow-a,1\n\nrow-b,2\n")
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn column_count_is_validated() {
        let mut table = CsvTable::with_columns(&["Name", "Value"]).unwrap();
        let err = table.parse_str("Name,Value\nrow-a,1,extra\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MalformedRow {
                line: 2,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn fields_are_trimmed() {
        let mut table = CsvTable::with_columns(&["Name", "Value"]).unwrap();
        table.parse_str("Name,Value\r\nrow-a , 42\r\n").unwrap();
        assert_eq!(table.query("row-a").unwrap()[1], "42");
    }

    #[test]
    fn empty_or_duplicate_columns_rejected() {
        assert!(matches!(
            CsvTable::with_columns(&[]),
            Err(ConfigError::NoColumns)
        ));
        assert!(matches!(
            CsvTable::with_columns(&["A", "B", "A"]),
            Err(ConfigError::DuplicateColumn(name)) if name == "A"
        ));
    }

    #[test]
    fn reparse_replaces_rows() {
        let mut table = flist_table();
        table
            .parse_str("FreqListName,FreqListValue\nonly,5e9\n")
            .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.query("flist-a").is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let mut table = CsvTable::with_columns(&["Name"]).unwrap();
        let err = table
            .load(Path::new("/nonexistent/rfstim-test.flist"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn split_fields_on_pipe() {
        assert_eq!(split_fields("1.0|2.5|3.7", '|'), vec!["1.0", "2.5", "3.7"]);
        assert_eq!(split_fields("solo", '|'), vec!["solo"]);
    }
}
