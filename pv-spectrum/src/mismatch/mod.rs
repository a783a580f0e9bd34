//! Empirical spectral mismatch factors.
//!
//! Each model turns a few atmospheric drivers (airmass, clearness index,
//! precipitable water, aerosol optical depth) into a multiplicative correction
//! for plane-of-array irradiance. Models are parameterized either by a
//! [`ModuleType`] with published coefficients or by caller-supplied
//! coefficients, never both.
//!
//! Drivers are `ndarray` views of any dimension. Inputs broadcast against each
//! other and outputs take the broadcast shape. Labeled inputs go through
//! [`crate::series::Series::try_zip2`] and friends.

pub mod caballero;
pub mod firstsolar;
pub mod jrc;
pub mod martin_ruiz;
pub mod pvspec;
pub mod sapm;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::algo::BroadcastError;
use crate::series::SeriesError;

pub use caballero::{spectral_factor_caballero, CaballeroCoefficients};
pub use firstsolar::{spectral_factor_firstsolar, FirstSolarCoefficients, FirstSolarLimits};
pub use jrc::{spectral_factor_jrc, JrcCoefficients};
pub use martin_ruiz::{
    martin_ruiz, martin_ruiz_series, MartinRuizCoefficients, MartinRuizFactors,
    MartinRuizParameters,
};
pub use pvspec::{spectral_factor_pvspec, PvspecCoefficients};
pub use sapm::{spectral_factor_sapm, SapmSpectralCoefficients};

/// Errors raised by the mismatch models
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MismatchError {
    /// Both a module type and explicit coefficients were given
    #[error("Cannot resolve input: must supply only one of \"module_type\" or \"{param}\"")]
    AmbiguousInput { param: &'static str },

    /// Neither a module type nor explicit coefficients were given
    #[error("No valid input provided: you must pass at least \"module_type\" or \"{param}\" as arguments.")]
    MissingInput { param: &'static str },

    /// Label that names no known module technology
    #[error("Cell type parameters not defined in algorithm. Unknown module type '{0}'")]
    UnknownModuleType(String),

    /// Known technology without published coefficients for this model
    #[error("Cell type parameters not defined in algorithm. {model} has no coefficients for '{module_type}'")]
    UnsupportedModuleType {
        model: &'static str,
        module_type: ModuleType,
    },

    /// Custom Martin & Ruiz parameters with the wrong keys
    #[error("You must specify model parameters with keys 'a','b','c' for each irradiation component. Component '{component}' has keys {keys:?}")]
    MalformedParameters {
        component: String,
        keys: Vec<String>,
    },

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),

    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl MismatchError {
    /// True for the "not implemented" family of errors
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            MismatchError::UnknownModuleType(_) | MismatchError::UnsupportedModuleType { .. }
        )
    }
}

/// PV module technology
///
/// Labels parse case-insensitively. `xsi` is an alias of `monosi` and
/// `multisi` an alias of `polysi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    /// Monocrystalline silicon
    Monosi,
    /// Multicrystalline silicon
    Polysi,
    /// Amorphous silicon
    Asi,
    /// Cadmium telluride
    Cdte,
    /// Copper indium gallium selenide
    Cigs,
    /// Perovskite
    Perovskite,
    /// First Solar Series 2 CdTe
    Fs2,
    /// First Solar Series 4 CdTe
    Fs4,
}

impl ModuleType {
    /// All known technologies
    pub const ALL: [ModuleType; 8] = [
        ModuleType::Monosi,
        ModuleType::Polysi,
        ModuleType::Asi,
        ModuleType::Cdte,
        ModuleType::Cigs,
        ModuleType::Perovskite,
        ModuleType::Fs2,
        ModuleType::Fs4,
    ];

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            ModuleType::Monosi => "monosi",
            ModuleType::Polysi => "polysi",
            ModuleType::Asi => "asi",
            ModuleType::Cdte => "cdte",
            ModuleType::Cigs => "cigs",
            ModuleType::Perovskite => "perovskite",
            ModuleType::Fs2 => "fs-2",
            ModuleType::Fs4 => "fs-4",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModuleType {
    type Err = MismatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monosi" | "xsi" => Ok(ModuleType::Monosi),
            "polysi" | "multisi" => Ok(ModuleType::Polysi),
            "asi" => Ok(ModuleType::Asi),
            "cdte" => Ok(ModuleType::Cdte),
            "cigs" => Ok(ModuleType::Cigs),
            "perovskite" => Ok(ModuleType::Perovskite),
            "fs-2" => Ok(ModuleType::Fs2),
            "fs-4" => Ok(ModuleType::Fs4),
            _ => Err(MismatchError::UnknownModuleType(s.to_string())),
        }
    }
}

/// Pick the coefficients for a model call from exactly one of the two sources.
///
/// # Arguments
/// * `model` - Model name used in error messages
/// * `param` - Name of the explicit coefficient argument
/// * `module_type` - Optional technology selector
/// * `coefficients` - Optional explicit coefficients
/// * `lookup` - Published coefficients for a technology, if any
pub(crate) fn resolve_coefficients<C>(
    model: &'static str,
    param: &'static str,
    module_type: Option<ModuleType>,
    coefficients: Option<C>,
    lookup: impl FnOnce(ModuleType) -> Option<C>,
) -> Result<C, MismatchError> {
    match (module_type, coefficients) {
        (Some(_), Some(_)) => Err(MismatchError::AmbiguousInput { param }),
        (None, None) => Err(MismatchError::MissingInput { param }),
        (None, Some(coefficients)) => Ok(coefficients),
        (Some(module_type), None) => {
            lookup(module_type).ok_or(MismatchError::UnsupportedModuleType { model, module_type })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("monosi".parse::<ModuleType>().unwrap(), ModuleType::Monosi);
        assert_eq!("xSi".parse::<ModuleType>().unwrap(), ModuleType::Monosi);
        assert_eq!("multisi".parse::<ModuleType>().unwrap(), ModuleType::Polysi);
        assert_eq!("CdTe".parse::<ModuleType>().unwrap(), ModuleType::Cdte);
        assert_eq!("fs-4".parse::<ModuleType>().unwrap(), ModuleType::Fs4);
    }

    #[test]
    fn test_labels_round_trip() {
        for module_type in ModuleType::ALL {
            assert_eq!(module_type.label().parse::<ModuleType>().unwrap(), module_type);
        }
    }

    #[test]
    fn test_unknown_label_not_implemented() {
        let err = "".parse::<ModuleType>().unwrap_err();
        assert!(err.is_not_implemented());
        assert!(err
            .to_string()
            .starts_with("Cell type parameters not defined in algorithm."));
    }

    #[test]
    fn test_resolve_exclusive() {
        let lookup = |_: ModuleType| Some(1.0);
        assert_eq!(
            resolve_coefficients("m", "coefficients", Some(ModuleType::Asi), Some(2.0), lookup),
            Err(MismatchError::AmbiguousInput {
                param: "coefficients"
            })
        );
        assert_eq!(
            resolve_coefficients("m", "coefficients", None, None::<f64>, lookup),
            Err(MismatchError::MissingInput {
                param: "coefficients"
            })
        );
        assert_eq!(
            resolve_coefficients("m", "coefficients", None, Some(2.0), lookup),
            Ok(2.0)
        );
        assert_eq!(
            resolve_coefficients("m", "coefficients", Some(ModuleType::Asi), None, lookup),
            Ok(1.0)
        );
    }

    #[test]
    fn test_resolve_unsupported() {
        let err = resolve_coefficients(
            "jrc",
            "coefficients",
            Some(ModuleType::Asi),
            None::<f64>,
            |_| None,
        )
        .unwrap_err();
        assert!(err.is_not_implemented());
    }
}
