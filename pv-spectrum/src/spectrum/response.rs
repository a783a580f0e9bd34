//! Spectral response and quantum efficiency.
//!
//! Spectral response (SR, A/W) and external quantum efficiency (QE,
//! electrons per photon) describe the same device property in different
//! units:
//!
//! QE(λ) = SR(λ) · h c / (q λ)
//!
//! With λ in nanometers `h c / q` is about 1239.842 V⋅nm (see
//! [`SI::HC_OVER_Q_NM`]).

use thiserror::Error;

use super::constants::SI;
use super::table::{SpectralCurve, TableError};
use crate::algo::{CubicSpline, SplineError};
use crate::series::{Series, SeriesError};

/// Knots of a typical crystalline silicon spectral response (nm, relative)
const EXAMPLE_SR_WAVELENGTHS: [f64; 13] = [
    290.0, 350.0, 400.0, 500.0, 650.0, 800.0, 900.0, 950.0, 1000.0, 1050.0, 1100.0, 1150.0,
    1190.0,
];
const EXAMPLE_SR_VALUES: [f64; 13] = [
    0.00, 0.27, 0.37, 0.52, 0.71, 0.88, 0.97, 1.00, 0.93, 0.58, 0.21, 0.05, 0.00,
];

/// Errors from spectral response conversions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResponseError {
    #[error("Input has no wavelength index: must have an '.index' attribute or 'wavelength' must be provided")]
    MissingWavelength,

    #[error("{wavelengths} wavelengths given for {values} values")]
    LengthMismatch { wavelengths: usize, values: usize },

    #[error(transparent)]
    Spline(#[from] SplineError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Containers that SR/QE conversions accept and return.
///
/// Conversions return the same container type they were given, keeping its
/// wavelength index and name.
pub trait ResponseData: Sized {
    /// The response values
    fn response_values(&self) -> Vec<f64>;

    /// Wavelengths in nm carried by the container, if any
    fn wavelength_index(&self) -> Option<&[f64]>;

    /// Same container holding new values
    fn with_response_values(&self, values: Vec<f64>) -> Result<Self, ResponseError>;
}

impl ResponseData for SpectralCurve {
    fn response_values(&self) -> Vec<f64> {
        self.values().to_vec()
    }

    fn wavelength_index(&self) -> Option<&[f64]> {
        Some(self.wavelengths())
    }

    fn with_response_values(&self, values: Vec<f64>) -> Result<Self, ResponseError> {
        Ok(self.with_values(values)?)
    }
}

/// Series labeled by wavelength in nm
impl ResponseData for Series<f64> {
    fn response_values(&self) -> Vec<f64> {
        self.values().to_vec()
    }

    fn wavelength_index(&self) -> Option<&[f64]> {
        Some(self.index())
    }

    fn with_response_values(&self, values: Vec<f64>) -> Result<Self, ResponseError> {
        let relabeled = self.relabel(values.into())?;
        Ok(match self.name() {
            Some(name) => relabeled.with_name(name),
            None => relabeled,
        })
    }
}

impl ResponseData for Vec<f64> {
    fn response_values(&self) -> Vec<f64> {
        self.clone()
    }

    fn wavelength_index(&self) -> Option<&[f64]> {
        None
    }

    fn with_response_values(&self, values: Vec<f64>) -> Result<Self, ResponseError> {
        Ok(values)
    }
}

/// Divide by the largest value, ignoring NaN
pub fn normalize_max(values: &[f64]) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|v| v / max).collect()
}

fn convert<T: ResponseData>(
    input: &T,
    wavelength: Option<&[f64]>,
    normalize: bool,
    f: impl Fn(f64, f64) -> f64,
) -> Result<T, ResponseError> {
    let values = input.response_values();
    let wavelength = wavelength
        .or_else(|| input.wavelength_index())
        .ok_or(ResponseError::MissingWavelength)?;
    if wavelength.len() != values.len() {
        return Err(ResponseError::LengthMismatch {
            wavelengths: wavelength.len(),
            values: values.len(),
        });
    }

    let converted: Vec<f64> = values
        .iter()
        .zip(wavelength)
        .map(|(&value, &wavelength_nm)| f(value, wavelength_nm))
        .collect();
    let converted = if normalize {
        normalize_max(&converted)
    } else {
        converted
    };
    input.with_response_values(converted)
}

/// Convert spectral response (A/W) to external quantum efficiency.
///
/// # Arguments
/// * `sr` - Spectral response values
/// * `wavelength` - Wavelengths in nm; defaults to the input's own index
/// * `normalize` - Divide the result by its maximum
///
/// # Errors
/// [`ResponseError::MissingWavelength`] when neither a wavelength argument
/// nor an index is available
pub fn sr_to_qe<T: ResponseData>(
    sr: &T,
    wavelength: Option<&[f64]>,
    normalize: bool,
) -> Result<T, ResponseError> {
    convert(sr, wavelength, normalize, |sr, wavelength_nm| {
        sr * SI::HC_OVER_Q_NM / wavelength_nm
    })
}

/// Convert external quantum efficiency to spectral response (A/W).
///
/// Arguments and errors mirror [`sr_to_qe`].
pub fn qe_to_sr<T: ResponseData>(
    qe: &T,
    wavelength: Option<&[f64]>,
    normalize: bool,
) -> Result<T, ResponseError> {
    convert(qe, wavelength, normalize, |qe, wavelength_nm| {
        qe * wavelength_nm / SI::HC_OVER_Q_NM
    })
}

/// Default grid of [`get_example_spectral_response`]: 280 to 1200 nm by 5 nm
pub fn example_wavelength_grid() -> Vec<f64> {
    (0..185).map(|i| 280.0 + 5.0 * i as f64).collect()
}

/// Relative spectral response of a typical crystalline silicon module.
///
/// The 13-point curve is interpolated with a not-a-knot cubic spline and is
/// zero outside 290 to 1190 nm.
///
/// # Arguments
/// * `wavelengths` - Grid in nm; defaults to [`example_wavelength_grid`]
pub fn get_example_spectral_response(
    wavelengths: Option<&[f64]>,
) -> Result<SpectralCurve, ResponseError> {
    let spline = CubicSpline::new(EXAMPLE_SR_WAVELENGTHS.to_vec(), EXAMPLE_SR_VALUES.to_vec())?;
    let grid = match wavelengths {
        Some(grid) => grid.to_vec(),
        None => example_wavelength_grid(),
    };
    let values = grid
        .iter()
        .map(|&wavelength| spline.evaluate(wavelength).unwrap_or(0.0))
        .collect();
    Ok(SpectralCurve::new(grid, values)?.with_name("spectral_response"))
}
