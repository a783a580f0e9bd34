//! Type-safe wavelength units
//!
//! Spectral tables in this crate are indexed in nanometers, while the
//! SPECTRL2 coefficients are written in micrometers and photon energies need
//! meters. These helpers use the `uom` crate so the conversions are explicit
//! at the call site.

use uom::si::length::{meter, micrometer, nanometer};

/// Type alias for wavelength measurements
pub type Wavelength = uom::si::f64::Length;

/// Extension trait for wavelength conversions
pub trait WavelengthExt {
    /// Create wavelength from nanometers
    fn from_nanometers(nm: f64) -> Self;

    /// Get wavelength in micrometers
    fn as_micrometers(&self) -> f64;

    /// Get wavelength in meters
    fn as_meters(&self) -> f64;
}

impl WavelengthExt for Wavelength {
    fn from_nanometers(nm: f64) -> Self {
        Wavelength::new::<nanometer>(nm)
    }

    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }

    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }
}

/// Convert a wavelength in nanometers to micrometers
pub fn nm_to_um(nm: f64) -> f64 {
    Wavelength::from_nanometers(nm).as_micrometers()
}

/// Convert a wavelength in nanometers to meters
pub fn nm_to_m(nm: f64) -> f64 {
    Wavelength::from_nanometers(nm).as_meters()
}
