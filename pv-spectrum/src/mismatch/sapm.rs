//! Sandia Array Performance Model airmass polynomial.
//!
//! King, D. et al, "Sandia Photovoltaic Array Performance Model",
//! SAND Report 3535, Sandia National Laboratories, 2004.

use ndarray::{Array, ArrayView, Dimension};
use serde::{Deserialize, Serialize};

/// Airmass polynomial coefficients `A0..A4` of a SAPM module record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SapmSpectralCoefficients {
    #[serde(rename = "A0")]
    pub a0: f64,
    #[serde(rename = "A1")]
    pub a1: f64,
    #[serde(rename = "A2")]
    pub a2: f64,
    #[serde(rename = "A3")]
    pub a3: f64,
    #[serde(rename = "A4")]
    pub a4: f64,
}

impl SapmSpectralCoefficients {
    /// Evaluate the polynomial at one airmass. NaN and negative results are 0.
    pub fn factor(&self, airmass_absolute: f64) -> f64 {
        let am = airmass_absolute;
        let value = self.a0 + am * (self.a1 + am * (self.a2 + am * (self.a3 + am * self.a4)));
        if value.is_nan() {
            0.0
        } else {
            value.max(0.0)
        }
    }
}

/// SAPM spectral loss function of absolute airmass.
///
/// Unlike the other mismatch models a NaN airmass yields 0, not NaN.
pub fn spectral_factor_sapm<D: Dimension>(
    airmass_absolute: ArrayView<'_, f64, D>,
    module: &SapmSpectralCoefficients,
) -> Array<f64, D> {
    airmass_absolute.mapv(|am| module.factor(am))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr0, arr2};

    fn module() -> SapmSpectralCoefficients {
        SapmSpectralCoefficients {
            a0: 0.928385,
            a1: 0.068093,
            a2: -0.0157738,
            a3: 0.0016606,
            a4: -6.93e-05,
        }
    }

    #[test]
    fn test_scalar() {
        let out = spectral_factor_sapm(arr0(1.5).view(), &module());
        assert_relative_eq!(out.into_scalar(), 1.00028714375, epsilon = 1e-4);
    }

    #[test]
    fn test_nan_becomes_zero() {
        let out = spectral_factor_sapm(arr2(&[[10.0, f64::NAN]]).view(), &module());
        assert_relative_eq!(out[[0, 0]], 0.999535, epsilon = 1e-4);
        assert_eq!(out[[0, 1]], 0.0);
    }

    #[test]
    fn test_negative_clipped() {
        let out = spectral_factor_sapm(arr0(40.0).view(), &module());
        assert_eq!(out.into_scalar(), 0.0);
    }

    #[test]
    fn test_deserialize_module_record() {
        let module: SapmSpectralCoefficients = serde_json::from_str(
            r#"{"A0": 0.928385, "A1": 0.068093, "A2": -0.0157738, "A3": 0.0016606, "A4": -6.93e-05}"#,
        )
        .unwrap();
        assert_relative_eq!(module.factor(5.0), 1.0387675, epsilon = 1e-4);
    }
}
