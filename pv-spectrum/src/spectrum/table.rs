//! Wavelength-indexed spectral data.
//!
//! Three containers cover the shapes spectral data comes in:
//!
//! - [`SpectralCurve`]: one named column over a wavelength grid, such as a
//!   spectral response or a single measured sun spectrum
//! - [`SpectralTable`]: several named columns sharing a grid, such as the
//!   extraterrestrial/global/direct reference spectra
//! - [`SpectraRows`]: many labeled spectra (one per row) on a shared grid,
//!   such as a time series of measured spectra
//!
//! Wavelengths are in nanometers and must be strictly ascending. Values
//! between grid points are linearly interpolated and values outside the grid
//! are zero.

use ndarray::{Array2, ArrayView1};
use thiserror::Error;

use crate::algo::interp::{interp, interp_zero_fill};
use crate::algo::trap_integrate;

/// Errors from building spectral tables
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("Wavelength and value vectors must have the same length ({wavelengths} vs {values})")]
    LengthMismatch { wavelengths: usize, values: usize },

    #[error("{labels} row labels for {rows} spectra")]
    RowMismatch { labels: usize, rows: usize },

    #[error("Spectral data needs at least one wavelength")]
    Empty,

    #[error("Wavelengths must be strictly ascending (index {0})")]
    NotAscending(usize),

    #[error("Column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("Spectral irradiance must be non-negative, got {value} at {wavelength} nm")]
    NegativeIrradiance { wavelength: f64, value: f64 },
}

fn validate_grid(wavelengths: &[f64]) -> Result<(), TableError> {
    if wavelengths.is_empty() {
        return Err(TableError::Empty);
    }
    // Negated comparison so NaN wavelengths are rejected too
    match (1..wavelengths.len()).find(|&i| !(wavelengths[i] > wavelengths[i - 1])) {
        Some(i) => Err(TableError::NotAscending(i)),
        None => Ok(()),
    }
}

fn check_length(wavelengths: &[f64], values: usize) -> Result<(), TableError> {
    if wavelengths.len() != values {
        return Err(TableError::LengthMismatch {
            wavelengths: wavelengths.len(),
            values,
        });
    }
    Ok(())
}

/// A single spectral quantity sampled over wavelength
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralCurve {
    name: Option<String>,

    /// Wavelengths in nanometers (nm)
    wavelengths: Vec<f64>,

    values: Vec<f64>,
}

impl SpectralCurve {
    /// Create a curve from wavelength and value tables
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors differ in length, are empty, or the
    /// wavelengths are not strictly ascending.
    pub fn new(wavelengths: Vec<f64>, values: Vec<f64>) -> Result<Self, TableError> {
        check_length(&wavelengths, values.len())?;
        validate_grid(&wavelengths)?;
        Ok(Self {
            name: None,
            wavelengths,
            values,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a wavelength, linearly interpolated, zero outside the grid
    pub fn at(&self, wavelength_nm: f64) -> f64 {
        interp(wavelength_nm, &self.wavelengths, &self.values, 0.0, 0.0)
    }

    /// Same curve sampled on another grid. The name is kept.
    pub fn resample(&self, wavelengths: &[f64]) -> Result<SpectralCurve, TableError> {
        validate_grid(wavelengths)?;
        Ok(SpectralCurve {
            name: self.name.clone(),
            wavelengths: wavelengths.to_vec(),
            values: interp_zero_fill(wavelengths, &self.wavelengths, &self.values),
        })
    }

    /// Replace the values, keeping grid and name
    pub fn with_values(&self, values: Vec<f64>) -> Result<SpectralCurve, TableError> {
        check_length(&self.wavelengths, values.len())?;
        Ok(SpectralCurve {
            name: self.name.clone(),
            wavelengths: self.wavelengths.clone(),
            values,
        })
    }

    /// Trapezoidal integral over wavelength
    pub fn integrate(&self) -> f64 {
        trap_integrate(&self.wavelengths, &self.values)
    }

    /// Fail on the first negative value
    pub fn check_non_negative(&self) -> Result<(), TableError> {
        match self.values.iter().position(|&v| v < 0.0) {
            Some(i) => Err(TableError::NegativeIrradiance {
                wavelength: self.wavelengths[i],
                value: self.values[i],
            }),
            None => Ok(()),
        }
    }
}

/// Named columns sharing one wavelength grid
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralTable {
    /// Wavelengths in nanometers (nm)
    wavelengths: Vec<f64>,

    columns: Vec<(String, Vec<f64>)>,
}

impl SpectralTable {
    /// Create an empty table over a wavelength grid
    pub fn new(wavelengths: Vec<f64>) -> Result<Self, TableError> {
        validate_grid(&wavelengths)?;
        Ok(Self {
            wavelengths,
            columns: Vec::new(),
        })
    }

    /// Append a column
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        check_length(&self.wavelengths, values.len())?;
        if self.column(&name).is_some() {
            return Err(TableError::DuplicateColumn(name));
        }
        self.columns.push((name, values));
        Ok(self)
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Number of wavelengths
    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Copy one column out as a named curve
    pub fn curve(&self, name: &str) -> Option<SpectralCurve> {
        self.column(name).map(|values| SpectralCurve {
            name: Some(name.to_string()),
            wavelengths: self.wavelengths.clone(),
            values: values.to_vec(),
        })
    }

    /// Sample every column on another grid, zero outside this table's grid
    pub fn resample(&self, wavelengths: &[f64]) -> Result<SpectralTable, TableError> {
        validate_grid(wavelengths)?;
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                (
                    name.clone(),
                    interp_zero_fill(wavelengths, &self.wavelengths, values),
                )
            })
            .collect();
        Ok(SpectralTable {
            wavelengths: wavelengths.to_vec(),
            columns,
        })
    }
}

/// Labeled spectra, one per row, on a shared wavelength grid
#[derive(Debug, Clone, PartialEq)]
pub struct SpectraRows<I> {
    labels: Vec<I>,

    /// Wavelengths in nanometers (nm), one per column
    wavelengths: Vec<f64>,

    /// Shape (labels, wavelengths)
    irradiance: Array2<f64>,
}

impl<I: Clone> SpectraRows<I> {
    pub fn new(
        labels: Vec<I>,
        wavelengths: Vec<f64>,
        irradiance: Array2<f64>,
    ) -> Result<Self, TableError> {
        validate_grid(&wavelengths)?;
        check_length(&wavelengths, irradiance.ncols())?;
        if labels.len() != irradiance.nrows() {
            return Err(TableError::RowMismatch {
                labels: labels.len(),
                rows: irradiance.nrows(),
            });
        }
        Ok(Self {
            labels,
            wavelengths,
            irradiance,
        })
    }

    pub fn labels(&self) -> &[I] {
        &self.labels
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn irradiance(&self) -> &Array2<f64> {
        &self.irradiance
    }

    /// Number of spectra
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.irradiance.row(index)
    }

    /// One spectrum as a curve
    pub fn row_curve(&self, index: usize) -> SpectralCurve {
        SpectralCurve {
            name: None,
            wavelengths: self.wavelengths.clone(),
            values: self.irradiance.row(index).to_vec(),
        }
    }
}
