//! Format dispatch and the selectors that pick index columns and sheets.

use super::error::DataError;
use std::fmt;
use std::path::Path;

/// The two supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-delimited text (`.csv`).
    Delimited,
    /// Spreadsheet workbook; every extension other than `.csv`.
    Spreadsheet,
}

impl FileFormat {
    /// Pick the format from the filename extension, case-insensitively.
    pub fn from_filename(filename: impl AsRef<Path>) -> Self {
        let is_csv = filename
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            FileFormat::Delimited
        } else {
            FileFormat::Spreadsheet
        }
    }
}

/// Which column(s) form the row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexColumn {
    /// Column at this position.
    Position(usize),
    /// Column with this header.
    Name(String),
    /// Several columns by position, forming a multi-level index.
    Positions(Vec<usize>),
    /// No index column; rows are identified by position only.
    None,
}

impl IndexColumn {
    /// Resolve to column names against the header of a freshly read table.
    pub fn resolve(&self, columns: &[String]) -> Result<Vec<String>, DataError> {
        let by_position = |pos: usize| {
            columns
                .get(pos)
                .cloned()
                .ok_or_else(|| DataError::ColumnNotFound {
                    column: format!("at position {pos}"),
                    available: columns.to_vec(),
                })
        };

        match self {
            IndexColumn::Position(pos) => Ok(vec![by_position(*pos)?]),
            IndexColumn::Name(name) => {
                if columns.iter().any(|c| c == name) {
                    Ok(vec![name.clone()])
                } else {
                    Err(DataError::ColumnNotFound {
                        column: format!("'{name}'"),
                        available: columns.to_vec(),
                    })
                }
            }
            IndexColumn::Positions(positions) => {
                positions.iter().map(|&pos| by_position(pos)).collect()
            }
            IndexColumn::None => Ok(Vec::new()),
        }
    }
}

impl Default for IndexColumn {
    fn default() -> Self {
        IndexColumn::Position(0)
    }
}

impl From<usize> for IndexColumn {
    fn from(pos: usize) -> Self {
        IndexColumn::Position(pos)
    }
}

impl From<&str> for IndexColumn {
    fn from(name: &str) -> Self {
        IndexColumn::Name(name.to_string())
    }
}

impl From<String> for IndexColumn {
    fn from(name: String) -> Self {
        IndexColumn::Name(name)
    }
}

impl From<Vec<usize>> for IndexColumn {
    fn from(positions: Vec<usize>) -> Self {
        IndexColumn::Positions(positions)
    }
}

/// Worksheet selection within a workbook. Ignored for CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    Name(String),
    Position(usize),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Position(0)
    }
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        SheetSelector::Name(name.to_string())
    }
}

impl From<String> for SheetSelector {
    fn from(name: String) -> Self {
        SheetSelector::Name(name)
    }
}

impl From<usize> for SheetSelector {
    fn from(pos: usize) -> Self {
        SheetSelector::Position(pos)
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Name(name) => write!(f, "'{name}'"),
            SheetSelector::Position(pos) => write!(f, "#{pos}"),
        }
    }
}
