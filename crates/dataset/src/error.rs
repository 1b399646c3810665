//! Error types for epicurves-dataset.

use std::path::PathBuf;

/// Error type for all fallible operations in the epicurves-dataset crate.
///
/// Every load-phase failure is fatal and all-or-nothing: partial or
/// corrupt data must never reach the projection or rendering stages.
/// Each variant carries enough context (1-based row/column numbers or a
/// region name) to locate the offending input cell without inspecting
/// the tool's internals.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Returned when the input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when the table's shape is malformed: a header without
    /// region columns, or a row wider than the header.
    #[error("structural error in row {row}: {reason}")]
    Structure {
        /// 1-based row number where the problem was detected.
        row: usize,
        /// Human-readable description of the structural problem.
        reason: String,
    },

    /// Returned when a cell's value does not convert to the type its
    /// field-name suffix declares.
    #[error("error in row {row} / col {col}: expected {expected}, which {value:?} is not")]
    FieldType {
        /// 1-based row number of the offending cell.
        row: usize,
        /// 1-based column number of the offending cell.
        col: usize,
        /// Name of the expected type (e.g. "an integer").
        expected: &'static str,
        /// The raw cell text that failed to convert.
        value: String,
    },

    /// Returned when a configuration row names a field outside the
    /// recognized set (including a known name with the wrong suffix).
    #[error("in row {row} got unexpected field name: {field}")]
    UnknownField {
        /// 1-based row number of the configuration row.
        row: usize,
        /// The field name exactly as written in the input.
        field: String,
    },

    /// Returned when a configuration field is assigned more than once
    /// for the same region.
    #[error("in row {row} found duplicate field name: {field}")]
    DuplicateField {
        /// 1-based row number of the second assignment.
        row: usize,
        /// The field name exactly as written in the input.
        field: String,
    },

    /// Returned when a timeline row's date is not a valid calendar date
    /// under the reference year.
    #[error("invalid date in row {row}: {reason}")]
    InvalidDate {
        /// 1-based row number of the timeline row.
        row: usize,
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned at finalize time when two case-count rows resolve to the
    /// same calendar day for the same region.
    #[error("duplicate case data for region {region}: day {month}--{day} appears twice")]
    DuplicateObservation {
        /// Name of the region with duplicated data.
        region: String,
        /// Month of the duplicated calendar day.
        month: u8,
        /// Day-of-month of the duplicated calendar day.
        day: u8,
    },
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        DatasetError::Csv {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = DatasetError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn display_field_type() {
        let err = DatasetError::FieldType {
            row: 4,
            col: 3,
            expected: "a number",
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "error in row 4 / col 3: expected a number, which \"abc\" is not"
        );
    }

    #[test]
    fn display_unknown_field() {
        let err = DatasetError::UnknownField {
            row: 7,
            field: "bogus_field#".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "in row 7 got unexpected field name: bogus_field#"
        );
    }

    #[test]
    fn display_duplicate_field() {
        let err = DatasetError::DuplicateField {
            row: 9,
            field: "shortname".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "in row 9 found duplicate field name: shortname"
        );
    }

    #[test]
    fn display_duplicate_observation() {
        let err = DatasetError::DuplicateObservation {
            region: "Alpha".to_string(),
            month: 3,
            day: 15,
        };
        assert_eq!(
            err.to_string(),
            "duplicate case data for region Alpha: day 3--15 appears twice"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<DatasetError>();
    }
}
