//! The tabular loader: resolve, read, index, coerce dates, fill gaps.

use super::delimited::read_csv;
use super::error::DataError;
use super::format::{FileFormat, IndexColumn, SheetSelector};
use super::frame::DatedFrame;
use super::interpolate::interpolate_nearest;
use super::spreadsheet::read_sheet;
use crate::config::DataConfig;
use crate::paths::PathResolver;
use std::path::Path;
use tracing::debug;

/// Workbook holding the fund rates.
pub const RATES_FILENAME: &str = "fondsen.xlsx";

/// Sheet with the rates inside [`RATES_FILENAME`].
pub const RATES_SHEET: &str = "koersen";

/// Loads date-indexed tables from files under a base directory.
///
/// Every call reads the file afresh; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct TabularLoader {
    paths: PathResolver,
}

impl TabularLoader {
    pub fn new(paths: PathResolver) -> Self {
        Self { paths }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(PathResolver::from_config(config))
    }

    /// Loader for the base directory currently configured in the environment.
    pub fn from_env() -> Self {
        Self::new(PathResolver::from_env())
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    /// Load `filename` (relative to the base directory) as a date-indexed table.
    ///
    /// `.csv` files are read as delimited text and `sheet` is ignored; any
    /// other extension is read as a workbook, taking the sheet `sheet` selects.
    /// The `index` column(s) are converted to datetimes and interior gaps in
    /// numeric columns are filled with the nearest value.
    pub fn load(
        &self,
        filename: impl AsRef<Path>,
        index: &IndexColumn,
        sheet: &SheetSelector,
    ) -> Result<DatedFrame, DataError> {
        let filename = filename.as_ref();
        let path = self.paths.resolve(filename);
        if !path.exists() {
            return Err(DataError::FileNotFound { path });
        }

        let format = FileFormat::from_filename(filename);
        debug!(path = %path.display(), ?format, ?index, %sheet, "loading table");

        let raw = match format {
            FileFormat::Delimited => read_csv(&path)?,
            FileFormat::Spreadsheet => read_sheet(&path, sheet)?,
        };

        let columns: Vec<String> = raw
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let index_names = index.resolve(&columns)?;

        let mut frame = DatedFrame::new(raw, index_names)?;
        frame.coerce_index()?;
        interpolate_nearest(&mut frame)?;

        debug!(
            rows = frame.height(),
            columns = frame.value_columns().len(),
            "table loaded"
        );
        Ok(frame)
    }

    /// Load the fund rates: sheet `koersen` of `fondsen.xlsx`, dates in the first column.
    pub fn rates(&self) -> Result<DatedFrame, DataError> {
        self.load_rates(&RatesRequest::default())
    }

    /// Load rates with any of the defaults overridden.
    pub fn load_rates(&self, request: &RatesRequest) -> Result<DatedFrame, DataError> {
        self.load(&request.filename, &request.index, &request.sheet)
    }
}

/// Arguments for [`TabularLoader::load_rates`], defaulting to the fund rates workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatesRequest {
    pub filename: String,
    pub index: IndexColumn,
    pub sheet: SheetSelector,
}

impl RatesRequest {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_index(mut self, index: impl Into<IndexColumn>) -> Self {
        self.index = index.into();
        self
    }

    pub fn with_sheet(mut self, sheet: impl Into<SheetSelector>) -> Self {
        self.sheet = sheet.into();
        self
    }
}

impl Default for RatesRequest {
    fn default() -> Self {
        Self {
            filename: RATES_FILENAME.to_string(),
            index: IndexColumn::default(),
            sheet: SheetSelector::Name(RATES_SHEET.to_string()),
        }
    }
}
