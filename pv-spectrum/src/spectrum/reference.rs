//! Standard reference spectra.
//!
//! ASTM G173-03 tabulates the extraterrestrial spectrum and the AM1.5 global
//! tilt and direct+circumsolar spectra from 280 nm to 4000 nm. The table is
//! read from the data directory (file `ASTMG173.csv`, a title line, a header
//! line, then four numeric columns) and cached for the life of the process.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use log::debug;
use once_cell::sync::Lazy;
use thiserror::Error;

use super::table::{SpectralTable, TableError};
use crate::config::{DataStore, DATA_DIR_ENV};

/// Column names of every reference table, in file order
pub const REFERENCE_COLUMNS: [&str; 3] = ["extraterrestrial", "global", "direct"];

/// Errors from loading reference spectra
#[derive(Debug, Error)]
pub enum ReferenceSpectrumError {
    #[error("Invalid standard identifier '{0}'. Available standards are: ASTM G173-03")]
    InvalidStandard(String),

    #[error(
        "Reference spectrum {standard} not found at {path}: install the table there or set {}",
        DATA_DIR_ENV
    )]
    MissingData {
        standard: ReferenceStandard,
        path: PathBuf,
    },

    #[error("Failed to read reference spectrum {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed reference spectrum {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed reference spectrum {path}, record {record}: {message}")]
    Parse {
        path: PathBuf,
        record: usize,
        message: String,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Published reference spectrum standards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReferenceStandard {
    /// ASTM G173-03 (AM1.5)
    #[default]
    AstmG173_03,
}

impl ReferenceStandard {
    pub fn identifier(&self) -> &'static str {
        match self {
            ReferenceStandard::AstmG173_03 => "ASTM G173-03",
        }
    }

    /// File name inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ReferenceStandard::AstmG173_03 => "ASTMG173.csv",
        }
    }
}

impl fmt::Display for ReferenceStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ReferenceStandard {
    type Err = ReferenceSpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASTM G173-03" => Ok(ReferenceStandard::AstmG173_03),
            _ => Err(ReferenceSpectrumError::InvalidStandard(s.to_string())),
        }
    }
}

/// Parsed tables keyed by file path. Entries are never invalidated.
static TABLE_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<SpectralTable>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Parse a reference table file: title line, header line, then records of
/// wavelength and one value per reference column.
fn read_reference_table(path: &Path) -> Result<SpectralTable, ReferenceSpectrumError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReferenceSpectrumError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // Skip the title line; the csv reader takes the header from the next one
    let body = content.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut wavelengths = Vec::new();
    let mut columns: [Vec<f64>; 3] = Default::default();

    for (record_index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| ReferenceSpectrumError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |message: String| ReferenceSpectrumError::Parse {
            path: path.to_path_buf(),
            record: record_index + 1,
            message,
        };

        if record.len() < REFERENCE_COLUMNS.len() + 1 {
            return Err(parse_error(format!(
                "expected {} fields, found {}",
                REFERENCE_COLUMNS.len() + 1,
                record.len()
            )));
        }

        let mut fields = record.iter().map(|field| {
            field
                .parse::<f64>()
                .map_err(|e| parse_error(format!("'{field}': {e}")))
        });
        // Length was checked above so every `next` yields a field
        if let Some(wavelength) = fields.next() {
            wavelengths.push(wavelength?);
        }
        for column in columns.iter_mut() {
            if let Some(value) = fields.next() {
                column.push(value?);
            }
        }
    }

    let mut table = SpectralTable::new(wavelengths)?;
    for (name, values) in REFERENCE_COLUMNS.iter().zip(columns) {
        table = table.with_column(*name, values)?;
    }
    debug!(
        "Loaded reference spectrum {} ({} wavelengths)",
        path.display(),
        table.len()
    );
    Ok(table)
}

fn load_cached(path: PathBuf) -> Result<Arc<SpectralTable>, ReferenceSpectrumError> {
    // A poisoned lock only means another loader panicked; the map is still valid
    let mut cache = TABLE_CACHE.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(table) = cache.get(&path) {
        return Ok(Arc::clone(table));
    }
    let table = Arc::new(read_reference_table(&path)?);
    cache.insert(path, Arc::clone(&table));
    Ok(table)
}

/// Reference spectra of a standard, optionally sampled on a custom grid.
///
/// # Arguments
/// * `store` - Data directory holding the tabulated standard
/// * `wavelengths` - Grid in nm to interpolate onto; `None` returns the table
///   at its own wavelengths
/// * `standard` - Which standard to load
///
/// # Returns
/// Table with `extraterrestrial`, `global` and `direct` columns in
/// W/m²/nm. Linear interpolation, zero outside the tabulated range.
pub fn get_reference_spectra(
    store: &DataStore,
    wavelengths: Option<&[f64]>,
    standard: ReferenceStandard,
) -> Result<SpectralTable, ReferenceSpectrumError> {
    let path = store.file_path(standard.file_name());
    if !path.is_file() {
        return Err(ReferenceSpectrumError::MissingData { standard, path });
    }
    let table = load_cached(path)?;
    match wavelengths {
        Some(grid) => Ok(table.resample(grid)?),
        None => Ok(table.as_ref().clone()),
    }
}

/// The full ASTM G173-03 table at its tabulated wavelengths
pub fn get_astmg173(store: &DataStore) -> Result<SpectralTable, ReferenceSpectrumError> {
    get_reference_spectra(store, None, ReferenceStandard::AstmG173_03)
}
