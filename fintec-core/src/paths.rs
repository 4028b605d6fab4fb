//! Resolution of logical data filenames to paths under the base directory.

use crate::config::DataConfig;
use std::path::{Path, PathBuf};

/// Joins relative data filenames onto a base directory.
///
/// Resolution is purely textual: the resulting path is not checked for
/// existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.base_dir.clone())
    }

    /// Resolver for the base directory currently configured in the environment.
    pub fn from_env() -> Self {
        Self::from_config(&DataConfig::from_env())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Platform join of the base directory and `filename`.
    pub fn resolve(&self, filename: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(filename)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::from_config(&DataConfig::default())
    }
}

impl From<DataConfig> for PathResolver {
    fn from(config: DataConfig) -> Self {
        Self::new(config.base_dir)
    }
}

/// Resolve `filename` against the base directory configured in the environment.
pub fn data_path(filename: impl AsRef<Path>) -> PathBuf {
    PathResolver::from_env().resolve(filename)
}
