//! Martin & Ruiz spectral mismatch, per irradiance component.
//!
//! N. Martin and J. M. Ruiz, "A new method for the spectral characterisation
//! of PV modules", Progress in Photovoltaics 7 (1999), and the component
//! parameterization in "Calculation of the PV modules angular losses under
//! field conditions by means of an analytical model", Solar Energy Materials
//! and Solar Cells 70 (2001).

use std::collections::HashMap;

use log::debug;
use ndarray::{Array, ArrayView, Dimension};
use serde::{Deserialize, Serialize};

use super::{resolve_coefficients, MismatchError, ModuleType};
use crate::algo::zip2;
use crate::series::Series;

/// Irradiance components the model is defined for, in output order
pub const COMPONENTS: [&str; 3] = ["poa_direct", "poa_sky_diffuse", "poa_ground_diffuse"];

/// Fit parameters for one irradiance component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MartinRuizCoefficients {
    pub c: f64,
    pub a: f64,
    pub b: f64,
}

impl MartinRuizCoefficients {
    pub const fn new(c: f64, a: f64, b: f64) -> Self {
        Self { c, a, b }
    }

    /// `c * exp(a * (kt - 0.74) + b * (am - 1.5))`
    pub fn factor(&self, clearness_index: f64, airmass_absolute: f64) -> f64 {
        self.c * (self.a * (clearness_index - 0.74) + self.b * (airmass_absolute - 1.5)).exp()
    }
}

/// Parameters for all three components.
///
/// A component left as `None` evaluates to NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MartinRuizParameters {
    pub poa_direct: Option<MartinRuizCoefficients>,
    pub poa_sky_diffuse: Option<MartinRuizCoefficients>,
    pub poa_ground_diffuse: Option<MartinRuizCoefficients>,
}

impl MartinRuizParameters {
    /// Published parameters for a module technology
    pub fn published(module_type: ModuleType) -> Option<Self> {
        let (direct, sky, ground) = match module_type {
            ModuleType::Monosi => (
                MartinRuizCoefficients::new(1.029, -3.13e-1, 5.24e-3),
                MartinRuizCoefficients::new(0.764, -8.82e-1, -2.04e-2),
                MartinRuizCoefficients::new(0.970, -2.44e-1, 1.29e-2),
            ),
            ModuleType::Polysi => (
                MartinRuizCoefficients::new(1.029, -3.11e-1, 6.26e-3),
                MartinRuizCoefficients::new(0.764, -9.29e-1, -1.92e-2),
                MartinRuizCoefficients::new(0.970, -2.70e-1, 1.58e-2),
            ),
            ModuleType::Asi => (
                MartinRuizCoefficients::new(1.024, -2.22e-1, 9.20e-3),
                MartinRuizCoefficients::new(0.840, -7.28e-1, -1.83e-2),
                MartinRuizCoefficients::new(0.989, -2.19e-1, 1.79e-2),
            ),
            _ => return None,
        };
        Some(Self {
            poa_direct: Some(direct),
            poa_sky_diffuse: Some(sky),
            poa_ground_diffuse: Some(ground),
        })
    }

    /// Build parameters from a `component -> {key -> value}` mapping.
    ///
    /// Every entry must have exactly the keys `a`, `b` and `c`. Components
    /// other than the three known ones are accepted and ignored.
    pub fn from_mapping(
        mapping: &HashMap<String, HashMap<String, f64>>,
    ) -> Result<Self, MismatchError> {
        let mut components: Vec<_> = mapping.iter().collect();
        components.sort_by(|(l, _), (r, _)| l.cmp(r));

        let mut params = Self::default();
        for (component, keys) in components {
            let value = |key: &str| keys.get(key).copied();
            let coefficients = match (keys.len(), value("c"), value("a"), value("b")) {
                (3, Some(c), Some(a), Some(b)) => MartinRuizCoefficients::new(c, a, b),
                _ => {
                    let mut found: Vec<String> = keys.keys().cloned().collect();
                    found.sort();
                    return Err(MismatchError::MalformedParameters {
                        component: component.clone(),
                        keys: found,
                    });
                }
            };

            match component.as_str() {
                "poa_direct" => params.poa_direct = Some(coefficients),
                "poa_sky_diffuse" => params.poa_sky_diffuse = Some(coefficients),
                "poa_ground_diffuse" => params.poa_ground_diffuse = Some(coefficients),
                other => debug!("Ignoring Martin & Ruiz parameters for unknown component '{other}'"),
            }
        }
        Ok(params)
    }
}

/// One value per irradiance component
#[derive(Debug, Clone, PartialEq)]
pub struct MartinRuizFactors<T> {
    pub poa_direct: T,
    pub poa_sky_diffuse: T,
    pub poa_ground_diffuse: T,
}

/// Spectral mismatch modifiers for the direct, sky diffuse and ground diffuse
/// components of plane-of-array irradiance.
///
/// # Arguments
/// * `clearness_index` - Clearness index of the sky
/// * `airmass_absolute` - Absolute (pressure-corrected) airmass
/// * `module_type` - Technology with published parameters (monosi, polysi, asi)
/// * `model_parameters` - Custom parameters instead of a module type
///
/// # Returns
/// Modifiers per component with the broadcast shape of the drivers. NaN
/// drivers produce NaN in the same positions only.
pub fn martin_ruiz<D: Dimension>(
    clearness_index: ArrayView<'_, f64, D>,
    airmass_absolute: ArrayView<'_, f64, D>,
    module_type: Option<ModuleType>,
    model_parameters: Option<MartinRuizParameters>,
) -> Result<MartinRuizFactors<Array<f64, D>>, MismatchError> {
    let params = resolve_coefficients(
        "martin_ruiz",
        "model_parameters",
        module_type,
        model_parameters,
        MartinRuizParameters::published,
    )?;

    let component = |coefficients: Option<MartinRuizCoefficients>| match coefficients {
        Some(c) => zip2(clearness_index.view(), airmass_absolute.view(), |kt, am| {
            c.factor(kt, am)
        }),
        None => zip2(clearness_index.view(), airmass_absolute.view(), |_, _| f64::NAN),
    };

    Ok(MartinRuizFactors {
        poa_direct: component(params.poa_direct)?,
        poa_sky_diffuse: component(params.poa_sky_diffuse)?,
        poa_ground_diffuse: component(params.poa_ground_diffuse)?,
    })
}

/// [`martin_ruiz`] over labeled inputs; each component keeps the input index
/// and is named after the component.
pub fn martin_ruiz_series<I: Clone + PartialEq>(
    clearness_index: &Series<I>,
    airmass_absolute: &Series<I>,
    module_type: Option<ModuleType>,
    model_parameters: Option<MartinRuizParameters>,
) -> Result<MartinRuizFactors<Series<I>>, MismatchError> {
    clearness_index.check_aligned(airmass_absolute)?;
    let factors = martin_ruiz(
        clearness_index.view(),
        airmass_absolute.view(),
        module_type,
        model_parameters,
    )?;

    Ok(MartinRuizFactors {
        poa_direct: clearness_index
            .relabel(factors.poa_direct)?
            .with_name(COMPONENTS[0]),
        poa_sky_diffuse: clearness_index
            .relabel(factors.poa_sky_diffuse)?
            .with_name(COMPONENTS[1]),
        poa_ground_diffuse: clearness_index
            .relabel(factors.poa_ground_diffuse)?
            .with_name(COMPONENTS[2]),
    })
}
