//! JRC spectral factor from airmass and clear-sky index.
//!
//! Huld, T., Sample, T., and Dunlop, E., "A simple model for estimating the
//! influence of spectrum variations on PV performance", 24th EU PVSEC, 2009.

use ndarray::{Array, ArrayView, Dimension};
use serde::{Deserialize, Serialize};

use super::{resolve_coefficients, MismatchError, ModuleType};
use crate::algo::zip2;

/// Fit coefficients `(c1, c2, c3)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JrcCoefficients(pub [f64; 3]);

impl JrcCoefficients {
    pub fn published(module_type: ModuleType) -> Option<Self> {
        match module_type {
            ModuleType::Polysi => Some(Self([0.494, 0.146, 0.00103])),
            ModuleType::Cdte => Some(Self([0.559, 0.113, 0.00940])),
            _ => None,
        }
    }

    /// `1 + c1 (exp(-kc) - exp(-1)) + c2 (kc - 1) + c3 (am - 1.5)`
    pub fn factor(&self, airmass: f64, clearsky_index: f64) -> f64 {
        let [c1, c2, c3] = self.0;
        1.0 + c1 * ((-clearsky_index).exp() - (-1.0f64).exp())
            + c2 * (clearsky_index - 1.0)
            + c3 * (airmass - 1.5)
    }
}

/// Spectral mismatch modifier from relative airmass and clear-sky index.
pub fn spectral_factor_jrc<D: Dimension>(
    airmass: ArrayView<'_, f64, D>,
    clearsky_index: ArrayView<'_, f64, D>,
    module_type: Option<ModuleType>,
    coefficients: Option<JrcCoefficients>,
) -> Result<Array<f64, D>, MismatchError> {
    let coefficients = resolve_coefficients(
        "spectral_factor_jrc",
        "coefficients",
        module_type,
        coefficients,
        JrcCoefficients::published,
    )?;

    Ok(zip2(airmass, clearsky_index, |am, kc| coefficients.factor(am, kc))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr0, arr1};

    #[test]
    fn test_published_coefficients() {
        let ams = arr1(&[1.0, 1.5, 2.0, 1.5]);
        let kcs = arr1(&[0.4, 0.6, 0.8, 1.4]);

        for (module_type, expected) in [
            (ModuleType::Polysi, [1.06129, 1.03098, 1.01155, 0.99849]),
            (ModuleType::Cdte, [1.09657, 1.05594, 1.02763, 0.97740]),
        ] {
            let out = spectral_factor_jrc(ams.view(), kcs.view(), Some(module_type), None).unwrap();
            for (a, e) in out.iter().zip(expected.iter()) {
                assert_relative_eq!(*a, *e, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_supplied_coefficients() {
        let out = spectral_factor_jrc(
            arr0(1.0).view(),
            arr0(0.8).view(),
            None,
            Some(JrcCoefficients([0.494, 0.146, 0.00103])),
        )
        .unwrap();
        assert_relative_eq!(out.into_scalar(), 1.01052106, epsilon = 1e-6);
    }

    #[test]
    fn test_nan_only_in_place() {
        let out = spectral_factor_jrc(
            arr1(&[1.0, f64::NAN, 2.0]).view(),
            arr1(&[0.4, 0.6, 0.8]).view(),
            Some(ModuleType::Cdte),
            None,
        )
        .unwrap();
        assert!(!out[0].is_nan());
        assert!(out[1].is_nan());
        assert!(!out[2].is_nan());
    }

    #[test]
    fn test_redundant_and_missing() {
        let err = spectral_factor_jrc(
            arr0(1.0).view(),
            arr0(0.8).view(),
            Some(ModuleType::Polysi),
            Some(JrcCoefficients([0.494, 0.146, 0.00103])),
        )
        .unwrap_err();
        assert!(matches!(err, MismatchError::AmbiguousInput { .. }));

        let err = spectral_factor_jrc(arr0(1.0).view(), arr0(0.8).view(), None, None).unwrap_err();
        assert!(matches!(err, MismatchError::MissingInput { .. }));
    }

    #[test]
    fn test_unsupported_module_type() {
        let err = spectral_factor_jrc(arr0(1.0).view(), arr0(0.8).view(), Some(ModuleType::Asi), None)
            .unwrap_err();
        assert!(err.is_not_implemented());
    }
}
