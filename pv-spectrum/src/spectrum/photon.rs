//! Photon flux and average photon energy of spectra.

use thiserror::Error;

use super::constants::{wavelength_to_joules, SI};
use super::table::{SpectraRows, SpectralCurve, TableError};
use crate::series::{Series, SeriesError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhotonEnergyError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Photon flux density of a spectral irradiance.
///
/// # Arguments
/// * `spectrum` - Spectral irradiance in W/m²/nm
///
/// # Returns
/// Photon flux density in photons/s/m²/nm on the same wavelengths
pub fn photon_flux_density(spectrum: &SpectralCurve) -> Result<SpectralCurve, TableError> {
    let flux = spectrum
        .wavelengths()
        .iter()
        .zip(spectrum.values())
        .map(|(&wavelength, &irradiance)| irradiance / wavelength_to_joules(wavelength))
        .collect();
    spectrum.with_values(flux)
}

/// Average photon energy (APE) of a spectrum in eV.
///
/// APE = ∫ E(λ) dλ / (q ∫ Φ(λ) dλ) where Φ is the photon flux density. A
/// higher APE means a bluer spectrum.
///
/// # Errors
/// Negative spectral irradiance is rejected.
pub fn average_photon_energy(spectrum: &SpectralCurve) -> Result<f64, TableError> {
    spectrum.check_non_negative()?;
    let flux = photon_flux_density(spectrum)?;
    Ok(spectrum.integrate() / (SI::ELEMENTARY_CHARGE * flux.integrate()))
}

/// Average photon energy of every row, labeled like the input rows
pub fn average_photon_energy_rows<I: Clone + PartialEq>(
    spectra: &SpectraRows<I>,
) -> Result<Series<I>, PhotonEnergyError> {
    let mut energies = Vec::with_capacity(spectra.len());
    for i in 0..spectra.len() {
        let row = spectra.row_curve(i);
        energies.push(average_photon_energy(&row)?);
    }
    Ok(Series::new(spectra.labels().to_vec(), energies.into())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    #[test]
    fn test_flat_spectrum() {
        // ∫λ dλ over 300..1000 nm is exact under the trapezoidal rule
        let spectrum = SpectralCurve::new(vec![300.0, 650.0, 1000.0], vec![1.0, 1.0, 1.0]).unwrap();
        let expected = SI::HC_OVER_Q_NM * 700.0 / 455_000.0;
        assert_relative_eq!(
            average_photon_energy(&spectrum).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_narrow_line() {
        let spectrum = SpectralCurve::new(vec![599.0, 600.0, 601.0], vec![0.0, 1.0, 0.0]).unwrap();
        assert_relative_eq!(
            average_photon_energy(&spectrum).unwrap(),
            SI::HC_OVER_Q_NM / 600.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_bluer_is_higher() {
        let blue = SpectralCurve::new(vec![400.0, 700.0, 1000.0], vec![2.0, 1.0, 0.5]).unwrap();
        let red = SpectralCurve::new(vec![400.0, 700.0, 1000.0], vec![0.5, 1.0, 2.0]).unwrap();
        assert!(average_photon_energy(&blue).unwrap() > average_photon_energy(&red).unwrap());
    }

    #[test]
    fn test_negative_rejected() {
        let spectrum = SpectralCurve::new(vec![400.0, 500.0], vec![1.0, -1.0]).unwrap();
        assert!(matches!(
            average_photon_energy(&spectrum),
            Err(TableError::NegativeIrradiance { .. })
        ));
    }

    #[test]
    fn test_photon_flux_density() {
        let spectrum = SpectralCurve::new(vec![500.0, 1000.0], vec![1.0, 1.0]).unwrap();
        let flux = photon_flux_density(&spectrum).unwrap();
        // Twice the wavelength, half the photon energy, twice the photons
        assert_relative_eq!(flux.values()[1] / flux.values()[0], 2.0, max_relative = 1e-12);
        assert_relative_eq!(flux.values()[0], 1.0 / wavelength_to_joules(500.0), max_relative = 1e-12);
    }

    #[test]
    fn test_rows() {
        let spectra = SpectraRows::new(
            vec![10, 20],
            vec![300.0, 650.0, 1000.0],
            arr2(&[[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]),
        )
        .unwrap();
        let ape = average_photon_energy_rows(&spectra).unwrap();
        assert_eq!(ape.index(), &[10, 20]);
        assert_relative_eq!(ape.values()[0], ape.values()[1], max_relative = 1e-12);
    }
}
