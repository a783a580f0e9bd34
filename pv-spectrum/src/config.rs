//! Data directory configuration.
//!
//! Tabulated reference spectra are read from a data directory. By default this
//! is the `data/` directory shipped next to the crate manifest; it can be moved
//! with the `PV_SPECTRUM_DATA_DIR` environment variable or an explicit path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default data directory
pub const DATA_DIR_ENV: &str = "PV_SPECTRUM_DATA_DIR";

/// Locator for the data files used by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataStore {
    /// Root directory holding the data files
    root_path: PathBuf,
}

impl DataStore {
    /// Create a data store at the default location
    ///
    /// Uses `PV_SPECTRUM_DATA_DIR` when set, otherwise the crate's bundled
    /// `data/` directory.
    pub fn new() -> Self {
        Self {
            root_path: resolve_root(std::env::var_os(DATA_DIR_ENV)),
        }
    }

    /// Create a data store with a custom root path
    pub fn with_path(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    /// Get the root data path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Full path of a file inside the data directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.root_path.join(file_name)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn resolve_root(env_value: Option<OsString>) -> PathBuf {
    match env_value {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => bundled_data_dir(),
    }
}
