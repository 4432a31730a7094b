//! Bulk input: user identifiers from a CSV file.

use std::io::Read;
use std::path::Path;

use crate::error::{CliError, CliResult};

const USER_ID_COLUMN: &str = "userid";

/// Read user identifiers from a CSV file with a `userid` header column.
///
/// A missing `userid` column is one fatal error for the whole run, not a
/// per-row failure. Row values are returned raw and in input order; the
/// batch driver sanitizes them.
pub fn read_user_ids_from_path(path: &Path) -> CliResult<Vec<String>> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    read_user_ids(reader)
}

pub fn read_user_ids<R: Read>(mut reader: csv::Reader<R>) -> CliResult<Vec<String>> {
    let headers = reader.headers()?.clone();
    let Some(column) = headers.iter().position(|h| h.trim() == USER_ID_COLUMN) else {
        return Err(CliError::Validation(format!(
            "CSV file has no '{USER_ID_COLUMN}' column (found: {})",
            headers.iter().collect::<Vec<_>>().join(", ")
        )));
    };

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        // A row too short to reach the column still produces a unit: the
        // empty value fails sanitization downstream and is counted as
        // failed rather than disappearing from the summary.
        ids.push(record.get(column).unwrap_or_default().to_string());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &str) -> csv::Reader<Cursor<Vec<u8>>> {
        csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(Cursor::new(data.as_bytes().to_vec()))
    }

    #[test]
    fn reads_ids_in_input_order() {
        let ids = read_user_ids(reader("userid,department\njdoe,IT\nasmith,HR\nbbaker,IT\n"))
            .unwrap();
        assert_eq!(ids, vec!["jdoe", "asmith", "bbaker"]);
    }

    #[test]
    fn userid_column_position_does_not_matter() {
        let ids = read_user_ids(reader("department,userid\nIT,jdoe\n")).unwrap();
        assert_eq!(ids, vec!["jdoe"]);
    }

    #[test]
    fn missing_column_is_one_fatal_error() {
        let err = read_user_ids(reader("user,department\njdoe,IT\n")).unwrap_err();
        match err {
            CliError::Validation(message) => {
                assert!(message.contains("userid"));
                assert!(message.contains("department"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn short_rows_yield_an_empty_unit_instead_of_vanishing() {
        let ids = read_user_ids(reader("department,userid\nIT,jdoe\nHR\nIT,asmith\n")).unwrap();
        assert_eq!(ids, vec!["jdoe", "", "asmith"]);
    }

    #[test]
    fn raw_values_are_not_filtered_here() {
        // Sanitization happens in the batch driver, not while reading.
        let ids = read_user_ids(reader("userid\njane doe\n\"\"\n")).unwrap();
        assert_eq!(ids, vec!["jane doe", ""]);
    }
}
