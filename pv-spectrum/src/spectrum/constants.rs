//! Physical constants in SI units.

use crate::units::nm_to_m;

/// Exact SI defining constants used by the photon calculations.
pub struct SI {}

impl SI {
    /// Planck's constant
    /// Units: J⋅s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-34;

    /// Speed of light in vacuum
    /// Units: m/s
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

    /// Elementary charge
    /// Units: C
    pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

    /// `h c / q` with wavelength in nanometers, about 1239.842 V⋅nm.
    ///
    /// Photon energy in eV is this constant over the wavelength in nm.
    pub const HC_OVER_Q_NM: f64 =
        Self::PLANCK_CONSTANT * Self::SPEED_OF_LIGHT / Self::ELEMENTARY_CHARGE / 1e-9;
}

/// Energy of one photon in joules
///
/// # Arguments
/// * `wavelength_nm` - Photon wavelength in nanometers, must be positive
pub fn wavelength_to_joules(wavelength_nm: f64) -> f64 {
    SI::PLANCK_CONSTANT * SI::SPEED_OF_LIGHT / nm_to_m(wavelength_nm)
}
