//! Spreadsheet workbook reader.
//!
//! The selected sheet's first row is the header; every following row is data.
//! Column types are inferred from the cells: integers, floats, dates,
//! booleans, and text for anything mixed. Empty and error cells are missing.
//!
//! Column positions count from column A even when the used range starts
//! further right: leading empty columns come back as all-missing
//! `Unnamed: <pos>` columns.

use super::dates::{datetime_to_millis, parse_datetime_str};
use super::error::DataError;
use super::format::SheetSelector;
use calamine::{open_workbook_auto, Data, Range, Reader};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

static EMPTY_CELL: Data = Data::Empty;

/// Read the selected sheet of a workbook into a frame.
pub fn read_sheet(path: &Path, sheet: &SheetSelector) -> Result<DataFrame, DataError> {
    let spreadsheet_err = |source| DataError::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let names = workbook.sheet_names();

    let sheet_name = match sheet {
        SheetSelector::Name(name) => names
            .iter()
            .find(|n| *n == name)
            .cloned()
            .ok_or_else(|| DataError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: name.clone(),
                available: names.clone(),
            })?,
        SheetSelector::Position(pos) => {
            names
                .get(*pos)
                .cloned()
                .ok_or_else(|| DataError::SheetIndexOutOfRange {
                    path: path.to_path_buf(),
                    position: *pos,
                    count: names.len(),
                })?
        }
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(spreadsheet_err)?;

    range_to_frame(&range)?.ok_or_else(|| DataError::EmptySheet {
        path: path.to_path_buf(),
        sheet: sheet_name.clone(),
    })
}

/// Build a frame from a cell range. `None` when the range has no header row.
fn range_to_frame(range: &Range<Data>) -> Result<Option<DataFrame>, DataError> {
    // Columns left of the used range are empty but still count.
    let offset = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(None);
    };
    let body: Vec<&[Data]> = rows.collect();

    let header: Vec<Data> = (0..offset + header.len())
        .map(|pos| cell_at(header, offset, pos).clone())
        .collect();

    let columns = header_names(&header)
        .into_iter()
        .enumerate()
        .map(|(pos, name)| {
            let cells: Vec<&Data> = body.iter().map(|row| cell_at(row, offset, pos)).collect();
            build_column(&name, &cells).map(Column::from)
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(Some(DataFrame::new(columns)?))
}

/// Cell at sheet column `pos` of a row whose first cell sits at column `offset`.
fn cell_at(row: &[Data], offset: usize, pos: usize) -> &Data {
    pos.checked_sub(offset)
        .and_then(|i| row.get(i))
        .unwrap_or(&EMPTY_CELL)
}

/// Header labels with blanks named by position and duplicates suffixed `.1`, `.2`, ...
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(pos, cell)| {
            let base = match cell {
                Data::Empty | Data::Error(_) => format!("Unnamed: {pos}"),
                Data::String(s) if s.trim().is_empty() => format!("Unnamed: {pos}"),
                Data::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Missing,
    Int,
    Float,
    DateTime,
    Bool,
    Text,
}

impl CellKind {
    fn of(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellKind::Missing,
            Data::String(s) if s.trim().is_empty() => CellKind::Missing,
            Data::Int(_) => CellKind::Int,
            Data::Float(_) => CellKind::Float,
            Data::DateTime(dt) if dt.as_datetime().is_some() => CellKind::DateTime,
            Data::DateTimeIso(s) if parse_datetime_str(s).is_some() => CellKind::DateTime,
            Data::Bool(_) => CellKind::Bool,
            _ => CellKind::Text,
        }
    }

    fn merge(self, other: CellKind) -> CellKind {
        match (self, other) {
            (CellKind::Missing, k) | (k, CellKind::Missing) => k,
            (a, b) if a == b => a,
            (CellKind::Int, CellKind::Float) | (CellKind::Float, CellKind::Int) => CellKind::Float,
            _ => CellKind::Text,
        }
    }
}

fn cell_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        _ => None,
    }
}

fn cell_millis(cell: &Data) -> Option<i64> {
    match cell {
        Data::DateTime(dt) => dt.as_datetime().map(datetime_to_millis),
        Data::DateTimeIso(s) => parse_datetime_str(s).map(datetime_to_millis),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match CellKind::of(cell) {
        CellKind::Missing => None,
        _ => Some(cell.to_string()),
    }
}

/// Build a typed series from one column of cells.
fn build_column(name: &str, cells: &[&Data]) -> Result<Series, DataError> {
    let kind = cells
        .iter()
        .map(|c| CellKind::of(c))
        .fold(CellKind::Missing, CellKind::merge);
    let has_missing = cells.iter().any(|c| CellKind::of(c) == CellKind::Missing);
    let name = PlSmallStr::from(name);

    let series = match kind {
        CellKind::Int if !has_missing => {
            let values: Vec<i64> = cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => *i,
                    _ => 0,
                })
                .collect();
            Series::new(name, values)
        }
        CellKind::Missing | CellKind::Int | CellKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(|c| cell_f64(c)).collect();
            Series::new(name, values)
        }
        CellKind::DateTime => {
            let values: Vec<Option<i64>> = cells.iter().map(|c| cell_millis(c)).collect();
            Series::new(name, values).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|c| match c {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name, values)
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|c| cell_text(c)).collect();
            Series::new(name, values)
        }
    };
    Ok(series)
}
