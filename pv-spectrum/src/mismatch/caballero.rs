//! Caballero spectral factor from airmass, aerosol optical depth and
//! precipitable water.
//!
//! Caballero, J.A., Fernández, E., Theristis, M., Almonacid, F., and
//! Nofuentes, G., "Spectral Corrections Based on Air Mass, Aerosol Optical
//! Depth and Precipitable Water for PV Performance Modeling", IEEE Journal of
//! Photovoltaics 8 (2018).

use ndarray::{Array, ArrayView, Dimension};
use serde::{Deserialize, Serialize};

use super::{resolve_coefficients, MismatchError, ModuleType};
use crate::algo::zip3;

/// Aerosol optical depth at 500 nm of the reference spectrum
const AOD500_REF: f64 = 0.084;

/// Precipitable water (cm) of the reference spectrum
const PW_REF: f64 = 1.42;

/// Twelve fit coefficients `c0..c11`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaballeroCoefficients(pub [f64; 12]);

impl CaballeroCoefficients {
    /// Published coefficients for a module technology
    pub fn published(module_type: ModuleType) -> Option<Self> {
        let c = match module_type {
            ModuleType::Cdte => [
                1.0044, 0.0095, -0.0037, 0.0002, 0.0000, -0.0046, -0.0182, 0.0, 0.0095, 0.0068,
                0.0, 1.0,
            ],
            ModuleType::Monosi => [
                0.9706, 0.0377, -0.0123, 0.0025, -0.0002, 0.0159, -0.0165, 0.0, -0.0016, -0.0027,
                1.0, 0.0,
            ],
            ModuleType::Polysi => [
                0.9836, 0.0254, -0.0085, 0.0016, -0.0001, 0.0094, -0.0132, 0.0, -0.0002, -0.0011,
                1.0, 0.0,
            ],
            ModuleType::Cigs => [
                0.9801, 0.0283, -0.0092, 0.0019, -0.0001, 0.0117, -0.0126, 0.0, -0.0011, -0.0019,
                1.0, 0.0,
            ],
            ModuleType::Asi => [
                1.1060, -0.0848, 0.0302, -0.0076, 0.0006, -0.1283, 0.0986, -0.0254, 0.0156,
                0.0146, 1.0, 0.0,
            ],
            ModuleType::Perovskite => [
                1.0637, -0.0491, 0.0180, -0.0047, 0.0004, -0.0773, 0.0583, -0.0159, 0.01251,
                0.0109, 1.0, 0.0,
            ],
            _ => return None,
        };
        Some(Self(c))
    }

    /// Sum of the airmass, aerosol and water terms
    pub fn factor(&self, precipitable_water: f64, airmass_absolute: f64, aod500: f64) -> f64 {
        let c = &self.0;
        let am = airmass_absolute;
        let ln_am = am.ln();

        let f_am = c[0] + am * (c[1] + am * (c[2] + am * (c[3] + am * c[4])));
        let f_aod = (aod500 - AOD500_REF)
            * (c[5] + c[10] * c[6] * am + c[11] * c[6] * ln_am + c[7] * am * am);
        let f_pw = (precipitable_water - PW_REF) * (c[8] + c[9] * ln_am);

        f_am + f_aod + f_pw
    }
}

/// Spectral mismatch modifier from precipitable water, absolute airmass and
/// aerosol optical depth at 500 nm.
///
/// # Arguments
/// * `precipitable_water` - Atmospheric precipitable water (cm)
/// * `airmass_absolute` - Absolute airmass
/// * `aod500` - Aerosol optical depth at 500 nm
/// * `module_type` - Technology with published coefficients
/// * `coefficients` - Custom coefficients instead of a module type
pub fn spectral_factor_caballero<D: Dimension>(
    precipitable_water: ArrayView<'_, f64, D>,
    airmass_absolute: ArrayView<'_, f64, D>,
    aod500: ArrayView<'_, f64, D>,
    module_type: Option<ModuleType>,
    coefficients: Option<CaballeroCoefficients>,
) -> Result<Array<f64, D>, MismatchError> {
    let coefficients = resolve_coefficients(
        "spectral_factor_caballero",
        "coefficients",
        module_type,
        coefficients,
        CaballeroCoefficients::published,
    )?;

    Ok(zip3(
        precipitable_water,
        airmass_absolute,
        aod500,
        |pw, am, aod| coefficients.factor(pw, am, aod),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr0, arr1};

    fn check(module_type: ModuleType, expected: [f64; 6]) {
        let ams = arr1(&[3.0, 1.5, 3.0, 1.5, 1.5, 3.0]);
        let aods = arr1(&[1.0, 1.0, 0.02, 0.02, 0.08, 0.08]);
        let pws = arr1(&[1.42, 1.42, 1.42, 1.42, 4.0, 1.0]);

        let out =
            spectral_factor_caballero(pws.view(), ams.view(), aods.view(), Some(module_type), None)
                .unwrap();
        for (a, e) in out.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_published_coefficients() {
        check(ModuleType::Asi, [0.9108, 0.9897, 0.9707, 1.0265, 1.0798, 0.9537]);
        check(ModuleType::Perovskite, [0.9422, 0.9932, 0.9868, 1.0183, 1.0604, 0.9737]);
        check(ModuleType::Cdte, [0.9824, 1.0000, 1.0065, 1.0117, 1.042, 0.9979]);
        check(ModuleType::Polysi, [0.9907, 0.9979, 1.0203, 1.0081, 1.0058, 1.019]);
        check(ModuleType::Monosi, [0.9935, 0.9987, 1.0264, 1.0074, 0.9999, 1.0263]);
        check(ModuleType::Cigs, [1.0014, 1.0011, 1.0270, 1.0082, 1.0029, 1.026]);
    }

    #[test]
    fn test_supplied_coefficients() {
        let coefficients = CaballeroCoefficients([
            1.0044, 0.0095, -0.0037, 0.0002, 0.0000, -0.0046, -0.0182, 0.0, 0.0095, 0.0068, 0.0,
            1.0,
        ]);
        let out = spectral_factor_caballero(
            arr0(1.0).view(),
            arr0(1.0).view(),
            arr0(1.0).view(),
            None,
            Some(coefficients),
        )
        .unwrap();
        assert_relative_eq!(out.into_scalar(), 1.0021964, epsilon = 1e-6);
    }

    #[test]
    fn test_redundant_and_missing() {
        let one = arr0(1.0);
        let coefficients = CaballeroCoefficients::published(ModuleType::Cdte);

        let err = spectral_factor_caballero(
            one.view(),
            one.view(),
            one.view(),
            Some(ModuleType::Cdte),
            coefficients,
        )
        .unwrap_err();
        assert!(matches!(err, MismatchError::AmbiguousInput { .. }));

        let err = spectral_factor_caballero(one.view(), one.view(), one.view(), None, None)
            .unwrap_err();
        assert!(matches!(err, MismatchError::MissingInput { .. }));
    }

    #[test]
    fn test_unsupported_module_type() {
        let one = arr0(1.0);
        let err =
            spectral_factor_caballero(one.view(), one.view(), one.view(), Some(ModuleType::Fs2), None)
                .unwrap_err();
        assert!(err.is_not_implemented());
    }
}
