//! PVSPEC spectral factor from airmass and clear-sky index.
//!
//! Pelland, S., Beswick, C., Thevenard, D., Côté, A., Pai, A. and Poissant,
//! Y., "Development and Testing of the PVSPEC Model of Photovoltaic Spectral
//! Mismatch Factor", IEEE PVSC 2020.

use ndarray::{Array, ArrayView, Dimension};
use serde::{Deserialize, Serialize};

use super::{resolve_coefficients, MismatchError, ModuleType};
use crate::algo::zip2;

/// Fit coefficients `(A, B, C)` of `A * kc^B * am^C`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PvspecCoefficients(pub [f64; 3]);

impl PvspecCoefficients {
    pub fn published(module_type: ModuleType) -> Option<Self> {
        let c = match module_type {
            ModuleType::Polysi => [0.9847, -0.05237, 0.03034],
            ModuleType::Monosi => [0.9845, -0.05169, 0.03034],
            ModuleType::Fs2 => [1.002, -0.07108, 0.02465],
            ModuleType::Fs4 => [0.9981, -0.05776, 0.02336],
            ModuleType::Cigs => [0.9791, -0.03904, 0.03096],
            ModuleType::Asi => [1.051, -0.1033, 0.009838],
            _ => return None,
        };
        Some(Self(c))
    }

    pub fn factor(&self, airmass_absolute: f64, clearsky_index: f64) -> f64 {
        let [a, b, c] = self.0;
        a * clearsky_index.powf(b) * airmass_absolute.powf(c)
    }
}

/// Spectral mismatch modifier from absolute airmass and clear-sky index.
///
/// The clear-sky index is measured global horizontal irradiance over modeled
/// clear-sky global horizontal irradiance.
pub fn spectral_factor_pvspec<D: Dimension>(
    airmass_absolute: ArrayView<'_, f64, D>,
    clearsky_index: ArrayView<'_, f64, D>,
    module_type: Option<ModuleType>,
    coefficients: Option<PvspecCoefficients>,
) -> Result<Array<f64, D>, MismatchError> {
    let coefficients = resolve_coefficients(
        "spectral_factor_pvspec",
        "coefficients",
        module_type,
        coefficients,
        PvspecCoefficients::published,
    )?;

    Ok(zip2(airmass_absolute, clearsky_index, |am, kc| {
        coefficients.factor(am, kc)
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;
    use approx::assert_relative_eq;
    use ndarray::{arr0, arr1};

    const AMS: [f64; 4] = [1.0, 1.5, 2.0, 1.5];
    const KCS: [f64; 4] = [0.4, 0.6, 0.8, 1.4];

    fn check(module_type: ModuleType, expected: [f64; 4]) {
        let out = spectral_factor_pvspec(
            arr1(&AMS).view(),
            arr1(&KCS).view(),
            Some(module_type),
            None,
        )
        .unwrap();
        for (a, e) in out.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_published_coefficients() {
        check(ModuleType::Asi, [1.15534029, 1.1123772, 1.08286684, 1.01915462]);
        check(ModuleType::Fs2, [1.0694323, 1.04948777, 1.03556288, 0.9881471]);
        check(ModuleType::Fs4, [1.05234725, 1.037771, 1.0275516, 0.98820533]);
        check(ModuleType::Polysi, [1.03310403, 1.02391703, 1.01744833, 0.97947605]);
        check(ModuleType::Monosi, [1.03225083, 1.02335353, 1.01708734, 0.97950110]);
        check(ModuleType::Cigs, [1.01475834, 1.01143927, 1.00909094, 0.97852966]);
    }

    #[test]
    fn test_series_matches_array() {
        let am = Series::new(vec!["a", "b", "c", "d"], arr1(&AMS)).unwrap();
        let kc = Series::new(vec!["a", "b", "c", "d"], arr1(&KCS)).unwrap();

        let out = Series::try_zip2(&am, &kc, |am, kc| {
            spectral_factor_pvspec(am, kc, Some(ModuleType::Asi), None)
        })
        .unwrap();
        assert_eq!(out.index(), &["a", "b", "c", "d"]);
        assert_relative_eq!(out.values()[3], 1.01915462, epsilon = 1e-6);
    }

    #[test]
    fn test_supplied_coefficients() {
        let out = spectral_factor_pvspec(
            arr0(1.5).view(),
            arr0(0.8).view(),
            None,
            Some(PvspecCoefficients([0.9847, -0.05237, 0.03034])),
        )
        .unwrap();
        assert_relative_eq!(out.into_scalar(), 1.00860641, epsilon = 1e-8);
    }

    #[test]
    fn test_redundant_and_missing() {
        let err = spectral_factor_pvspec(
            arr0(1.5).view(),
            arr0(0.8).view(),
            Some(ModuleType::Polysi),
            Some(PvspecCoefficients([0.9847, -0.05237, 0.03034])),
        )
        .unwrap_err();
        assert!(err.to_string().contains("supply only one of"));

        let err = spectral_factor_pvspec(arr0(1.5).view(), arr0(0.8).view(), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("No valid input provided"));
    }
}
