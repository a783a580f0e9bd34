//! First Solar spectral correction from precipitable water and airmass.
//!
//! Lee, M. and Panchula, A., "Spectral Correction for Photovoltaic Module
//! Performance Based on Air Mass and Precipitable Water", IEEE PVSC 2016.

use log::warn;
use ndarray::{Array, ArrayView, Dimension};
use serde::{Deserialize, Serialize};

use super::{resolve_coefficients, MismatchError, ModuleType};
use crate::algo::zip2;

/// Validity range of the First Solar fit
///
/// Precipitable water below the minimum is raised to it with a warning and
/// values above the maximum become NaN with a warning. Airmass below the
/// minimum is raised with a warning; airmass above the maximum is clamped
/// without one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstSolarLimits {
    /// Lower bound on precipitable water (cm)
    pub min_precipitable_water: f64,
    /// Upper bound on precipitable water (cm)
    pub max_precipitable_water: f64,
    /// Lower bound on absolute airmass
    pub min_airmass_absolute: f64,
    /// Upper bound on absolute airmass
    pub max_airmass_absolute: f64,
}

impl Default for FirstSolarLimits {
    fn default() -> Self {
        Self {
            min_precipitable_water: 0.1,
            max_precipitable_water: 8.0,
            min_airmass_absolute: 0.58,
            max_airmass_absolute: 10.0,
        }
    }
}

/// Six fit coefficients `c0..c5`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FirstSolarCoefficients(pub [f64; 6]);

impl FirstSolarCoefficients {
    /// Published coefficients for a module technology
    pub fn published(module_type: ModuleType) -> Option<Self> {
        let c = match module_type {
            ModuleType::Cdte => [0.86273, -0.038948, -0.012506, 0.098871, 0.084658, -0.0042948],
            ModuleType::Monosi => [0.85914, -0.020880, -0.0058853, 0.12029, 0.026814, -0.0017810],
            ModuleType::Polysi => [0.84090, -0.027539, -0.0079224, 0.13570, 0.038024, -0.0021218],
            ModuleType::Cigs => [0.85252, -0.022314, -0.0047216, 0.13666, 0.013342, -0.0008945],
            ModuleType::Asi => [1.12094, -0.047620, -0.0083627, -0.10443, 0.098382, -0.0033818],
            _ => return None,
        };
        Some(Self(c))
    }

    /// `c0 + c1 am + c2 pw + c3 sqrt(am) + c4 sqrt(pw) + c5 am / sqrt(pw)`
    pub fn factor(&self, precipitable_water: f64, airmass_absolute: f64) -> f64 {
        let [c0, c1, c2, c3, c4, c5] = self.0;
        let (pw, am) = (precipitable_water, airmass_absolute);
        c0 + c1 * am + c2 * pw + c3 * am.sqrt() + c4 * pw.sqrt() + c5 * am / pw.sqrt()
    }
}

/// Spectral mismatch modifier based on precipitable water and absolute
/// (pressure-adjusted) airmass.
///
/// # Arguments
/// * `precipitable_water` - Atmospheric precipitable water (cm)
/// * `airmass_absolute` - Absolute airmass
/// * `module_type` - Technology with published coefficients
/// * `coefficients` - Custom coefficients instead of a module type
/// * `limits` - Validity range applied to the drivers before evaluation
///
/// # Returns
/// Modifier with the broadcast shape of the drivers
pub fn spectral_factor_firstsolar<D: Dimension>(
    precipitable_water: ArrayView<'_, f64, D>,
    airmass_absolute: ArrayView<'_, f64, D>,
    module_type: Option<ModuleType>,
    coefficients: Option<FirstSolarCoefficients>,
    limits: &FirstSolarLimits,
) -> Result<Array<f64, D>, MismatchError> {
    let coefficients = resolve_coefficients(
        "spectral_factor_firstsolar",
        "coefficients",
        module_type,
        coefficients,
        FirstSolarCoefficients::published,
    )?;

    let (mut low_pw, mut high_pw) = (false, false);
    let pw = precipitable_water.mapv(|pw| {
        if pw < limits.min_precipitable_water {
            low_pw = true;
            limits.min_precipitable_water
        } else if pw > limits.max_precipitable_water {
            high_pw = true;
            f64::NAN
        } else {
            pw
        }
    });
    if low_pw {
        warn!(
            "Low precipitable water values replaced with {} cm in the calculation of spectral mismatch.",
            limits.min_precipitable_water
        );
    }
    if high_pw {
        warn!("High precipitable water values replaced with NaN in the calculation of spectral mismatch.");
    }

    let mut low_am = false;
    let am = airmass_absolute.mapv(|am| {
        if am > limits.max_airmass_absolute {
            limits.max_airmass_absolute
        } else if am < limits.min_airmass_absolute {
            low_am = true;
            limits.min_airmass_absolute
        } else {
            am
        }
    });
    if low_am {
        warn!(
            "Low airmass values replaced with {} in the calculation of spectral mismatch.",
            limits.min_airmass_absolute
        );
    }

    Ok(zip2(pw.view(), am.view(), |pw, am| coefficients.factor(pw, am))?)
}
