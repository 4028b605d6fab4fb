//! fintec core: local data access for fund prices and market indices.
//!
//! - Path resolution against a configurable data directory (`paths`, `config`)
//! - CSV / spreadsheet loading into a date-indexed frame with gap filling (`data`)
//! - Closed catalog of market indices with their cache paths and source URLs (`indices`)

pub mod config;
pub mod data;
pub mod indices;
pub mod paths;

pub use config::{DataConfig, BASE_DIR_ENV, DEFAULT_BASE_DIR};
pub use data::{DataError, DatedFrame, IndexColumn, SheetSelector, TabularLoader};
pub use indices::{MarketIndex, ParseMarketIndexError};
pub use paths::PathResolver;
