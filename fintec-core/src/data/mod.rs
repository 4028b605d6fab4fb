//! Loading of date-indexed tabular data from CSV and spreadsheet files.

pub mod dates;
pub mod delimited;
pub mod error;
pub mod format;
pub mod frame;
pub mod interpolate;
pub mod loader;
pub mod spreadsheet;

pub use error::{DataError, ErrorKind};
pub use format::{FileFormat, IndexColumn, SheetSelector};
pub use frame::DatedFrame;
pub use loader::{RatesRequest, TabularLoader, RATES_FILENAME, RATES_SHEET};
