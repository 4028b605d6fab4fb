//! Catalog of market indices.
//!
//! A closed set: each index carries the identifier used by investing.com and
//! derives its local cache path, its historical-data URL and the filename of
//! the page saved by hand when seeding the cache.

use crate::data::{DataError, DatedFrame, IndexColumn, SheetSelector, TabularLoader};
use crate::paths::PathResolver;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const HISTORICAL_DATA_URL_PREFIX: &str = "https://www.investing.com/indices/";
const HISTORICAL_DATA_URL_SUFFIX: &str = "-historical-data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketIndex {
    /// Dow Jones Industrial Average.
    Dow,
    /// S&P 500.
    Spx,
    /// Nasdaq 100.
    Nasdaq100,
    /// Amsterdam Exchange index.
    Aex,
    /// DAX 30.
    Dax,
    /// FTSE 100.
    Ftse,
    /// Shanghai Composite.
    Shanghai,
}

impl MarketIndex {
    pub const ALL: [MarketIndex; 7] = [
        MarketIndex::Dow,
        MarketIndex::Spx,
        MarketIndex::Nasdaq100,
        MarketIndex::Aex,
        MarketIndex::Dax,
        MarketIndex::Ftse,
        MarketIndex::Shanghai,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MarketIndex::Dow => "DOW",
            MarketIndex::Spx => "SPX",
            MarketIndex::Nasdaq100 => "NASDAQ100",
            MarketIndex::Aex => "AEX",
            MarketIndex::Dax => "DAX",
            MarketIndex::Ftse => "FTSE",
            MarketIndex::Shanghai => "SHANGHAI",
        }
    }

    /// The investing.com identifier.
    pub fn identifier(self) -> &'static str {
        match self {
            MarketIndex::Dow => "us-30",
            MarketIndex::Spx => "us-spx-500",
            MarketIndex::Nasdaq100 => "nq-100",
            MarketIndex::Aex => "netherlands-25",
            MarketIndex::Dax => "germany-30",
            MarketIndex::Ftse => "uk-100",
            MarketIndex::Shanghai => "shanghai-composite",
        }
    }

    /// `(name, identifier)`.
    pub fn describe(self) -> (&'static str, &'static str) {
        (self.name(), self.identifier())
    }

    /// Path of the local cache file relative to the base directory.
    fn cache_filename(self) -> String {
        format!("indices/{}.csv", self.name().to_lowercase())
    }

    /// Local cache file, `indices/<name>.csv` under the resolver's base directory.
    pub fn local_filename(self, paths: &PathResolver) -> PathBuf {
        paths.resolve(self.cache_filename())
    }

    /// [`local_filename`](Self::local_filename) against the environment's base directory.
    pub fn local_filename_from_env(self) -> PathBuf {
        self.local_filename(&PathResolver::from_env())
    }

    pub fn historical_data_url(self) -> String {
        format!(
            "{HISTORICAL_DATA_URL_PREFIX}{}{HISTORICAL_DATA_URL_SUFFIX}",
            self.identifier()
        )
    }

    /// Page saved by hand from the historical-data URL, `html/<name>.html`.
    ///
    /// Relative to the working directory, not the data base directory.
    pub fn manual_download_filename(self) -> String {
        format!("html/{}.html", self.name().to_lowercase())
    }

    /// Read this index's local cache file.
    pub fn load(self, loader: &TabularLoader) -> Result<DatedFrame, DataError> {
        loader.load(
            self.cache_filename(),
            &IndexColumn::default(),
            &SheetSelector::default(),
        )
    }
}

impl fmt::Display for MarketIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown market index '{0}'")]
pub struct ParseMarketIndexError(pub String);

impl FromStr for MarketIndex {
    type Err = ParseMarketIndexError;

    /// Accepts the name (any case) or the investing.com identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MarketIndex::ALL
            .into_iter()
            .find(|idx| idx.name().eq_ignore_ascii_case(s) || idx.identifier() == s)
            .ok_or_else(|| ParseMarketIndexError(s.to_string()))
    }
}
