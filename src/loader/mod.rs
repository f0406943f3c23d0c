//! JSONL loader for solver benchmark output.
//!
//! Each non-blank line of the input holds one JSON object describing a
//! single trial. Whitespace-only lines are skipped; anything else that does
//! not decode into a record aborts the load.

use crate::error::{Result, VizError};
use crate::models::TrialRecord;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::{debug, info};

/// Read every trial record from a JSONL file.
pub fn load_records(path: &Path) -> Result<Vec<TrialRecord>> {
    info!("Reading trial records from {}", path.display());

    let file = File::open(path).map_err(|source| VizError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    parse_records(BufReader::new(file), path)
}

/// Parse trial records from any buffered reader.
///
/// `origin` names the input in read errors.
pub fn parse_records<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<TrialRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| {
            if source.kind() == ErrorKind::InvalidData {
                VizError::malformed(index + 1, "line is not valid UTF-8")
            } else {
                VizError::FileAccess {
                    path: origin.to_path_buf(),
                    source,
                }
            }
        })?;

        if line.trim().is_empty() {
            skipped += 1;
            continue;
        }

        records.push(parse_line(index + 1, &line)?);
    }

    debug!("Parsed {} records ({} blank lines skipped)", records.len(), skipped);
    Ok(records)
}

/// Decode one line; `line_no` is 1-based and only used for error reporting.
fn parse_line(line_no: usize, line: &str) -> Result<TrialRecord> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| VizError::malformed(line_no, e.to_string()))?;

    if !value.is_object() {
        return Err(VizError::malformed(line_no, "expected a JSON object"));
    }

    serde_json::from_value(value).map_err(|e| VizError::malformed(line_no, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_parse_records_skips_blank_lines() {
        let input = "\n{\"n\":5,\"l\":10,\"sat\":true,\"duration\":12.0}\n   \n\t\n{\"n\":10,\"l\":10,\"sat\":false,\"duration\":3}\n";
        let records = parse_records(Cursor::new(input), Path::new("test.jsonl")).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TrialRecord::new(5, 10, true, 12.0));
        assert_eq!(records[1], TrialRecord::new(10, 10, false, 3.0));
    }

    #[test]
    fn test_parse_records_ignores_extra_keys() {
        let input = r#"{"n":20,"k":3,"l":85,"sat":true,"duration":0.25,"solver":"cdcl"}"#;
        let records = parse_records(Cursor::new(input), Path::new("test.jsonl")).unwrap();
        assert_eq!(records, vec![TrialRecord::new(20, 85, true, 0.25)]);
    }

    #[test]
    fn test_parse_records_reports_malformed_line() {
        let input = "{\"n\":5,\"l\":10,\"sat\":true,\"duration\":1.0}\n\n{\"n\":5,\"l\":10,";
        let err = parse_records(Cursor::new(input), Path::new("test.jsonl")).unwrap_err();

        match err {
            VizError::MalformedRecord { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_records_rejects_missing_key() {
        let input = r#"{"n":5,"l":10,"duration":1.0}"#;
        assert!(matches!(
            parse_records(Cursor::new(input), Path::new("test.jsonl")),
            Err(VizError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_records_rejects_non_object() {
        let input = "[5, 10, true, 1.0]";
        assert!(matches!(
            parse_records(Cursor::new(input), Path::new("test.jsonl")),
            Err(VizError::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_records_reports_non_utf8_line() {
        let input: &[u8] = b"{\"n\":5,\"l\":10,\"sat\":true,\"duration\":1.0}\n{\"n\":\xff\xfe}\n";
        let err = parse_records(Cursor::new(input), Path::new("test.jsonl")).unwrap_err();

        match err {
            VizError::MalformedRecord { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_records_keeps_zero_variable_records() {
        // n == 0 is rejected by the aggregator, not silently dropped here
        let input = r#"{"n":0,"l":10,"sat":true,"duration":1.0}"#;
        let records = parse_records(Cursor::new(input), Path::new("test.jsonl")).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_records_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("results.jsonl");
        std::fs::write(
            &path,
            "{\"n\":5,\"l\":10,\"sat\":true,\"duration\":12.0}\n{\"n\":5,\"l\":10,\"sat\":false,\"duration\":8.0}\n",
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_records_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.jsonl");

        match load_records(&path).unwrap_err() {
            VizError::FileAccess { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_records_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.jsonl");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(load_records(&path).unwrap().is_empty());
    }
}
