//! Spectral mismatch from measured spectra.
//!
//! The usable fraction of a spectrum is the share of its broadband irradiance
//! a device can convert:
//!
//! UF = ∫ E(λ) SR(λ) dλ / ∫ E(λ) dλ
//!
//! and the mismatch factor is the ratio of the usable fraction under the
//! measured sun spectrum to that under a reference spectrum. The spectral
//! response is linearly interpolated onto each spectrum's own wavelengths,
//! zero outside its tabulated range, and the integrals use the trapezoidal
//! rule on those wavelengths.

use thiserror::Error;

use super::reference::{get_reference_spectra, ReferenceSpectrumError, ReferenceStandard};
use super::table::{SpectraRows, SpectralCurve, TableError};
use crate::algo::interp::interp_zero_fill;
use crate::algo::trap_integrate;
use crate::config::DataStore;
use crate::series::{Series, SeriesError};

/// Errors from the field mismatch calculation
#[derive(Debug, Error)]
pub enum FieldMismatchError {
    #[error(transparent)]
    Reference(#[from] ReferenceSpectrumError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("Reference table has no '{0}' column")]
    MissingReferenceColumn(&'static str),
}

/// Spectrum the sun spectra are compared against
#[derive(Debug, Clone, Copy)]
pub enum MismatchReference<'a> {
    /// ASTM G173-03 global tilt spectrum, interpolated to the sun wavelengths
    Standard(&'a DataStore),
    /// A caller-supplied spectrum on its own wavelengths
    Custom(&'a SpectralCurve),
}

/// Usable fraction of one spectrum given SR already on its wavelengths
fn usable_fraction(wavelengths: &[f64], irradiance: &[f64], sr: &[f64]) -> f64 {
    let weighted: Vec<f64> = irradiance.iter().zip(sr).map(|(e, s)| e * s).collect();
    trap_integrate(wavelengths, &weighted) / trap_integrate(wavelengths, irradiance)
}

/// Usable fraction of the reference, evaluated on the sun wavelengths for the
/// standard spectrum.
fn reference_usable_fraction(
    sr: &SpectralCurve,
    sun_wavelengths: &[f64],
    e_ref: MismatchReference<'_>,
) -> Result<f64, FieldMismatchError> {
    let reference = match e_ref {
        MismatchReference::Custom(curve) => curve.clone(),
        MismatchReference::Standard(store) => {
            let table =
                get_reference_spectra(store, Some(sun_wavelengths), ReferenceStandard::AstmG173_03)?;
            table
                .curve("global")
                .ok_or(FieldMismatchError::MissingReferenceColumn("global"))?
        }
    };

    let sr_ref = interp_zero_fill(reference.wavelengths(), sr.wavelengths(), sr.values());
    Ok(usable_fraction(
        reference.wavelengths(),
        reference.values(),
        &sr_ref,
    ))
}

/// Spectral mismatch factor of one measured sun spectrum.
///
/// # Arguments
/// * `sr` - Relative or absolute spectral response of the device
/// * `e_sun` - Measured spectral irradiance (W/m²/nm)
/// * `e_ref` - Reference spectrum
///
/// # Returns
/// Ratio of usable fractions, exactly 1.0 when `e_sun` equals the reference
pub fn calc_spectral_mismatch_field(
    sr: &SpectralCurve,
    e_sun: &SpectralCurve,
    e_ref: MismatchReference<'_>,
) -> Result<f64, FieldMismatchError> {
    let uf_ref = reference_usable_fraction(sr, e_sun.wavelengths(), e_ref)?;
    let sr_sun = interp_zero_fill(e_sun.wavelengths(), sr.wavelengths(), sr.values());
    let uf_sun = usable_fraction(e_sun.wavelengths(), e_sun.values(), &sr_sun);
    Ok(uf_sun / uf_ref)
}

/// Spectral mismatch factor for every row of a set of sun spectra.
///
/// Returns one factor per row, labeled and ordered like the input rows.
pub fn calc_spectral_mismatch_field_rows<I: Clone + PartialEq>(
    sr: &SpectralCurve,
    e_sun: &SpectraRows<I>,
    e_ref: MismatchReference<'_>,
) -> Result<Series<I>, FieldMismatchError> {
    let uf_ref = reference_usable_fraction(sr, e_sun.wavelengths(), e_ref)?;
    let sr_sun = interp_zero_fill(e_sun.wavelengths(), sr.wavelengths(), sr.values());

    let factors: Vec<f64> = (0..e_sun.len())
        .map(|i| {
            let row = e_sun.row(i).to_vec();
            usable_fraction(e_sun.wavelengths(), &row, &sr_sun) / uf_ref
        })
        .collect();

    Ok(Series::new(e_sun.labels().to_vec(), factors.into())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    fn step_response() -> SpectralCurve {
        // Responds only between 400 and 700 nm
        SpectralCurve::new(vec![400.0, 400.001, 700.0, 700.001], vec![0.0, 1.0, 1.0, 0.0]).unwrap()
    }

    fn flat(level: f64) -> SpectralCurve {
        let wavelengths: Vec<f64> = (0..=10).map(|i| 300.0 + 50.0 * i as f64).collect();
        let values = vec![level; wavelengths.len()];
        SpectralCurve::new(wavelengths, values).unwrap()
    }

    #[test]
    fn test_identical_spectra_give_one() {
        let sun = flat(1.0);
        let out =
            calc_spectral_mismatch_field(&step_response(), &sun, MismatchReference::Custom(&sun))
                .unwrap();
        assert_eq!(out, 1.0);
    }

    #[test]
    fn test_scale_invariant() {
        let out = calc_spectral_mismatch_field(
            &step_response(),
            &flat(3.0),
            MismatchReference::Custom(&flat(0.5)),
        )
        .unwrap();
        assert_relative_eq!(out, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_red_shifted_sun() {
        // Sun spectrum with extra power outside the response band
        let wavelengths: Vec<f64> = (0..=10).map(|i| 300.0 + 50.0 * i as f64).collect();
        let values: Vec<f64> = wavelengths
            .iter()
            .map(|&w| if w > 700.0 { 3.0 } else { 1.0 })
            .collect();
        let sun = SpectralCurve::new(wavelengths, values).unwrap();

        let out = calc_spectral_mismatch_field(
            &step_response(),
            &sun,
            MismatchReference::Custom(&flat(1.0)),
        )
        .unwrap();
        assert!(out < 1.0);
    }

    #[test]
    fn test_rows_keep_labels_and_order() {
        let wavelengths: Vec<f64> = (0..=10).map(|i| 300.0 + 50.0 * i as f64).collect();
        let mut irradiance = ndarray::Array2::<f64>::ones((3, wavelengths.len()));
        irradiance.row_mut(1).fill(2.0);
        irradiance[[2, 10]] = 5.0;
        let rows = SpectraRows::new(vec!["09:00", "12:00", "15:00"], wavelengths, irradiance)
            .unwrap();

        let out = calc_spectral_mismatch_field_rows(
            &step_response(),
            &rows,
            MismatchReference::Custom(&flat(1.0)),
        )
        .unwrap();

        assert_eq!(out.index(), &["09:00", "12:00", "15:00"]);
        assert_relative_eq!(out.values()[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(out.values()[1], 1.0, epsilon = 1e-12);
        assert!(out.values()[2] < 1.0);
    }

    #[test]
    fn test_rows_match_single() {
        let rows = SpectraRows::new(
            vec![0usize, 1],
            vec![400.0, 550.0, 700.0, 850.0],
            arr2(&[[1.0, 2.0, 1.5, 0.5], [0.2, 1.0, 1.2, 2.0]]),
        )
        .unwrap();
        let reference = flat(1.0);

        let batch = calc_spectral_mismatch_field_rows(
            &step_response(),
            &rows,
            MismatchReference::Custom(&reference),
        )
        .unwrap();
        for i in 0..rows.len() {
            let single = calc_spectral_mismatch_field(
                &step_response(),
                &rows.row_curve(i),
                MismatchReference::Custom(&reference),
            )
            .unwrap();
            assert_relative_eq!(batch.values()[i], single, epsilon = 1e-12);
        }
    }
}
