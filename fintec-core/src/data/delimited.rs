//! Comma-delimited text reader.

use super::error::DataError;
use polars::prelude::*;
use std::path::Path;

/// Rows scanned for schema inference.
const INFER_SCHEMA_ROWS: usize = 1000;

/// Cell contents treated as missing values.
const NA_TOKENS: [&str; 13] = [
    "", "#N/A", "#NA", "N/A", "NA", "n/a", "NaN", "nan", "-NaN", "NULL", "null", "<NA>", "None",
];

/// Read a CSV file with a header row into a frame.
///
/// Dates are not parsed here; they stay text and go through the same
/// coercion as spreadsheet cells.
pub fn read_csv(path: &Path) -> Result<DataFrame, DataError> {
    let null_values = NullValues::AllColumns(NA_TOKENS.iter().map(|t| (*t).into()).collect());

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_header_and_missing_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("koersen.csv");
        std::fs::write(
            &path,
            "Datum,Fonds A,Fonds B\n2020-01-01,10.0,1\n2020-01-02,,NA\n2020-01-03,12.0,3\n",
        )
        .unwrap();

        let df = read_csv(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 3);
        let a = df.column("Fonds A").unwrap().as_materialized_series();
        assert_eq!(a.null_count(), 1);
        let b = df.column("Fonds B").unwrap().as_materialized_series();
        assert_eq!(b.null_count(), 1);
    }

    #[test]
    fn missing_file_surfaces_as_csv_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataError::Csv { .. }));
    }
}
