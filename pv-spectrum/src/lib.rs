//! Photovoltaic spectral mismatch and solar spectrum modeling
//!
//! This crate provides empirical spectral mismatch factor models for PV
//! modules, the SPECTRL2 clear-sky spectral irradiance model, reference
//! spectrum loading, and conversions between spectral response and quantum
//! efficiency.

pub mod algo;
pub mod config;
pub mod mismatch;
pub mod series;
pub mod spectrum;
pub mod units;

// Re-exports for easier access
pub use algo::{trap_integrate, CubicSpline};
pub use config::DataStore;
pub use mismatch::{
    martin_ruiz, spectral_factor_caballero, spectral_factor_firstsolar, spectral_factor_jrc,
    spectral_factor_pvspec, spectral_factor_sapm, MismatchError, ModuleType,
};
pub use series::{Series, SeriesError};
pub use spectrum::{
    average_photon_energy, calc_spectral_mismatch_field, get_reference_spectra, qe_to_sr,
    spectrl2, sr_to_qe, SpectralCurve, SpectralTable,
};
