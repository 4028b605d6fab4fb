//! Data directory configuration.
//!
//! The base directory is read from `U_FIN_DATA_BASE` by the caller and handed
//! to the resolver/loader as a plain value. `.env` files are only consulted
//! through [`DataConfig::from_dotenv`], and are read without touching the
//! process environment.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the base directory for all data files.
pub const BASE_DIR_ENV: &str = "U_FIN_DATA_BASE";

/// Base directory used when `U_FIN_DATA_BASE` is not set.
pub const DEFAULT_BASE_DIR: &str = "data";

/// Where data files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root folder that relative data filenames are joined onto.
    pub base_dir: PathBuf,
}

impl DataConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// Not cached: every call sees the current value of `U_FIN_DATA_BASE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Like [`from_env`](Self::from_env), falling back to the first `.env` file
    /// found in the working directory or its parents.
    ///
    /// A variable set in the process wins over the file. A missing `.env` is
    /// not an error.
    pub fn from_dotenv() -> Result<Self, dotenvy::Error> {
        match dotenvy::dotenv_iter() {
            Ok(entries) => Self::from_dotenv_entries(entries, |key| std::env::var_os(key)),
            Err(err) if err.not_found() => Ok(Self::from_env()),
            Err(err) => Err(err),
        }
    }

    /// Like [`from_dotenv`](Self::from_dotenv) with an explicit `.env` path.
    pub fn from_dotenv_path(path: impl AsRef<Path>) -> Result<Self, dotenvy::Error> {
        Self::from_dotenv_entries(dotenvy::from_path_iter(path)?, |key| {
            std::env::var_os(key)
        })
    }

    fn from_dotenv_entries<I, F>(entries: I, lookup: F) -> Result<Self, dotenvy::Error>
    where
        I: IntoIterator<Item = Result<(String, String), dotenvy::Error>>,
        F: Fn(&str) -> Option<OsString>,
    {
        let mut from_file = None;
        for entry in entries {
            let (key, value) = entry?;
            if key == BASE_DIR_ENV && from_file.is_none() {
                from_file = Some(OsString::from(value));
            }
        }
        Ok(Self::from_lookup(|key| {
            lookup(key).or_else(|| (key == BASE_DIR_ENV).then(|| from_file.clone()).flatten())
        }))
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// A variable that is set but empty is used as-is (an empty base directory
    /// resolves filenames relative to the working directory).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        match lookup(BASE_DIR_ENV) {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DIR)
    }
}
