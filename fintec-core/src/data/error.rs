//! Structured error types for data loading.
//!
//! Errors from the underlying readers (polars, calamine) are wrapped, not
//! translated: the original error stays reachable through `source()`.

use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to parse delimited file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("failed to read workbook {}: {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet '{sheet}' not found in {} (available: {available:?})", path.display())]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("sheet position {position} out of range in {} ({count} sheets)", path.display())]
    SheetIndexOutOfRange {
        path: PathBuf,
        position: usize,
        count: usize,
    },

    #[error("sheet '{sheet}' in {} has no header row", path.display())]
    EmptySheet { path: PathBuf, sheet: String },

    #[error("column {column} not found (columns: {available:?})")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("cannot parse {value:?} in column '{column}' as a date")]
    DateParse { column: String, value: String },

    #[error("column '{column}' of type {dtype} cannot be used as a date index")]
    UnsupportedIndexType { column: String, dtype: String },

    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),
}

/// Coarse classification of a [`DataError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The resolved path does not exist.
    MissingFile,
    /// The file exists but its content could not be turned into a dated table.
    UnparseableContent,
    /// A referenced sheet or index column does not exist.
    MissingIndex,
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::FileNotFound { .. } => ErrorKind::MissingFile,
            DataError::SheetNotFound { .. }
            | DataError::SheetIndexOutOfRange { .. }
            | DataError::ColumnNotFound { .. } => ErrorKind::MissingIndex,
            DataError::Csv { .. }
            | DataError::Spreadsheet { .. }
            | DataError::EmptySheet { .. }
            | DataError::DateParse { .. }
            | DataError::UnsupportedIndexType { .. }
            | DataError::Frame(_) => ErrorKind::UnparseableContent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn kinds_follow_taxonomy() {
        let missing = DataError::FileNotFound {
            path: PathBuf::from("data/x.csv"),
        };
        assert_eq!(missing.kind(), ErrorKind::MissingFile);

        let column = DataError::ColumnNotFound {
            column: "Datum".into(),
            available: vec!["Date".into()],
        };
        assert_eq!(column.kind(), ErrorKind::MissingIndex);

        let date = DataError::DateParse {
            column: "Date".into(),
            value: "yesterday".into(),
        };
        assert_eq!(date.kind(), ErrorKind::UnparseableContent);
    }

    #[test]
    fn wrapped_reader_error_is_the_source() {
        let err = DataError::Csv {
            path: PathBuf::from("broken.csv"),
            source: PolarsError::ComputeError("bad row".into()),
        };
        let source = err.source().expect("source is kept");
        assert!(source.to_string().contains("bad row"));
        assert!(err.to_string().contains("broken.csv"));
    }

    #[test]
    fn display_mentions_missing_path() {
        let err = DataError::FileNotFound {
            path: PathBuf::from("data/fondsen.xlsx"),
        };
        assert!(err.to_string().contains("fondsen.xlsx"));
    }
}
