//! SPECTRL2 clear-sky spectral irradiance model.
//!
//! Bird and Riordan's model attenuates the extraterrestrial spectrum by
//! Rayleigh scattering, aerosol extinction, water vapor, ozone and uniformly
//! mixed gas absorption, then splits the scattered light into sky diffuse
//! components and projects everything onto a tilted plane. It is evaluated on
//! a fixed grid of 122 wavelengths from 300 nm to 4045 nm.
//!
//! Bird, R. and Riordan, C., "Simple solar spectral model for direct and
//! diffuse irradiance on horizontal and tilted planes at the earth's surface
//! for cloudless atmospheres", Journal of Climate and Applied Meteorology 25
//! (1986); and Bird, R., "A simple spectral model for direct normal and
//! diffuse horizontal irradiance", Solar Energy 32 (1984).

mod coefficients;

pub use coefficients::N_WAVELENGTHS;

use std::f64::consts::PI;

use log::debug;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

use super::table::{SpectralTable, TableError};
use crate::units::nm_to_um;
use coefficients::{
    EXTRATERRESTRIAL, MIXED_GAS_ABSORPTION, OZONE_ABSORPTION, WATER_ABSORPTION, WAVELENGTH_NM,
};

/// Surface pressure the Rayleigh optical depth is referenced to (Pa)
const REFERENCE_PRESSURE: f64 = 101_300.0;

/// Airmass used for the sky reflectivity terms
const REFLECTIVITY_AIRMASS: f64 = 1.8;

/// Ozone layer height over Earth radius, both in km
const OZONE_HEIGHT_RATIO: f64 = 22.0 / 6370.0;

/// Errors raised by [`spectrl2`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Spectrl2Error {
    #[error("dayofyear must be specified if the inputs carry no timestamps")]
    MissingDayOfYear,

    #[error("input '{name}' has {len} values, expected 1 or {expected}")]
    ShapeMismatch {
        name: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("input '{0}' is empty")]
    Empty(&'static str),

    #[error("time step {step} is out of range for {steps} time steps")]
    StepOutOfRange { step: usize, steps: usize },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Aerosol optical properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AerosolParameters {
    /// Single scattering albedo at 400 nm
    pub scattering_albedo_400nm: f64,
    /// Ångström turbidity exponent
    pub alpha: f64,
    /// Wavelength variation factor of the scattering albedo
    pub wavelength_variation_factor: f64,
    /// Aerosol asymmetry factor (mean cosine of the scattering angle)
    pub aerosol_asymmetry_factor: f64,
}

impl Default for AerosolParameters {
    fn default() -> Self {
        Self {
            scattering_albedo_400nm: 0.945,
            alpha: 1.14,
            wavelength_variation_factor: 0.095,
            aerosol_asymmetry_factor: 0.65,
        }
    }
}

/// Geometry and atmospheric state for one or more time steps.
///
/// Each array holds either one value, used for every time step, or one value
/// per time step.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrl2Inputs {
    /// Refraction-corrected solar zenith angle (degrees)
    pub apparent_zenith: Array1<f64>,
    /// Angle of incidence on the tilted plane (degrees)
    pub aoi: Array1<f64>,
    /// Plane tilt from horizontal (degrees)
    pub surface_tilt: Array1<f64>,
    /// Ground reflectance (unitless)
    pub ground_albedo: Array1<f64>,
    /// Surface pressure (Pa)
    pub surface_pressure: Array1<f64>,
    /// Relative airmass, not pressure corrected
    pub relative_airmass: Array1<f64>,
    /// Atmospheric water vapor (cm)
    pub precipitable_water: Array1<f64>,
    /// Atmospheric ozone (atm-cm)
    pub ozone: Array1<f64>,
    /// Aerosol optical depth at 500 nm
    pub aerosol_turbidity_500nm: Array1<f64>,
    /// Day of year, 1 through 365
    pub dayofyear: Option<Array1<f64>>,
    /// Timestamps of the time steps; supply the day of year when `dayofyear`
    /// is absent
    pub timestamps: Option<Vec<OffsetDateTime>>,
}

impl Spectrl2Inputs {
    fn driver_arrays(&self) -> [(&'static str, &Array1<f64>); 9] {
        [
            ("apparent_zenith", &self.apparent_zenith),
            ("aoi", &self.aoi),
            ("surface_tilt", &self.surface_tilt),
            ("ground_albedo", &self.ground_albedo),
            ("surface_pressure", &self.surface_pressure),
            ("relative_airmass", &self.relative_airmass),
            ("precipitable_water", &self.precipitable_water),
            ("ozone", &self.ozone),
            ("aerosol_turbidity_500nm", &self.aerosol_turbidity_500nm),
        ]
    }

    /// Number of time steps after broadcasting
    pub fn time_steps(&self) -> Result<usize, Spectrl2Error> {
        let mut lengths: Vec<(&'static str, usize)> = self
            .driver_arrays()
            .iter()
            .map(|(name, values)| (*name, values.len()))
            .collect();
        if let Some(doy) = &self.dayofyear {
            lengths.push(("dayofyear", doy.len()));
        }
        if let Some(timestamps) = &self.timestamps {
            lengths.push(("timestamps", timestamps.len()));
        }

        if let Some((name, _)) = lengths.iter().find(|(_, len)| *len == 0) {
            return Err(Spectrl2Error::Empty(*name));
        }
        let expected = lengths.iter().map(|(_, len)| *len).max().unwrap_or(1);
        match lengths.iter().find(|(_, len)| *len != 1 && *len != expected) {
            Some((name, len)) => Err(Spectrl2Error::ShapeMismatch {
                name: *name,
                len: *len,
                expected,
            }),
            None => Ok(expected),
        }
    }

    /// Day of year for each time step
    fn days_of_year(&self, n: usize) -> Result<Vec<f64>, Spectrl2Error> {
        match (&self.dayofyear, &self.timestamps) {
            (Some(doy), _) => Ok((0..n).map(|j| broadcast_at(doy, j)).collect()),
            (None, Some(timestamps)) => Ok((0..n)
                .map(|j| {
                    let ts = if timestamps.len() == 1 {
                        timestamps[0]
                    } else {
                        timestamps[j]
                    };
                    f64::from(ts.ordinal())
                })
                .collect()),
            (None, None) => Err(Spectrl2Error::MissingDayOfYear),
        }
    }
}

fn broadcast_at(values: &Array1<f64>, j: usize) -> f64 {
    if values.len() == 1 {
        values[0]
    } else {
        values[j]
    }
}

/// Modeled spectra, each shaped (wavelengths, time steps), in W/m²/nm.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrl2Output {
    /// Wavelength grid (nm)
    pub wavelength: Array1<f64>,
    /// Extraterrestrial spectrum corrected for Earth-Sun distance
    pub dni_extra: Array2<f64>,
    /// Diffuse horizontal spectrum
    pub dhi: Array2<f64>,
    /// Direct normal spectrum
    pub dni: Array2<f64>,
    pub poa_sky_diffuse: Array2<f64>,
    pub poa_ground_diffuse: Array2<f64>,
    pub poa_direct: Array2<f64>,
    pub poa_global: Array2<f64>,
    /// Timestamps copied from the inputs
    pub timestamps: Option<Vec<OffsetDateTime>>,
}

impl Spectrl2Output {
    /// Number of time steps
    pub fn len(&self) -> usize {
        self.dni.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.dni.ncols() == 0
    }

    /// All spectra of one time step as a table
    pub fn spectra_at(&self, step: usize) -> Result<SpectralTable, Spectrl2Error> {
        if step >= self.len() {
            return Err(Spectrl2Error::StepOutOfRange {
                step,
                steps: self.len(),
            });
        }
        let columns = [
            ("dni_extra", &self.dni_extra),
            ("dhi", &self.dhi),
            ("dni", &self.dni),
            ("poa_sky_diffuse", &self.poa_sky_diffuse),
            ("poa_ground_diffuse", &self.poa_ground_diffuse),
            ("poa_direct", &self.poa_direct),
            ("poa_global", &self.poa_global),
        ];
        let mut table = SpectralTable::new(self.wavelength.to_vec())?;
        for (name, values) in columns {
            table = table.with_column(name, values.column(step).to_vec())?;
        }
        Ok(table)
    }
}

/// Earth-Sun distance correction to extraterrestrial irradiance (Spencer)
fn earth_sun_distance_factor(dayofyear: f64) -> f64 {
    let b = 2.0 * PI * (dayofyear - 1.0) / 365.0;
    1.00011 + 0.034221 * b.cos() + 0.00128 * b.sin() + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin()
}

/// Water vapor and mixed gas transmittances share this saturating form
fn band_transmittance(scale: f64, saturation: f64, path: f64) -> f64 {
    (-scale * path / (1.0 + saturation * path).powf(0.45)).exp()
}

fn rayleigh_transmittance(wavelength_um: f64, airmass: f64) -> f64 {
    (-airmass / (wavelength_um.powi(4) * (115.6406 - 1.335 / wavelength_um.powi(2)))).exp()
}

/// Per-time-step quantities that do not depend on wavelength
struct TimeStep {
    cos_zenith: f64,
    cos_tilt: f64,
    cos_aoi: f64,
    ground_albedo: f64,
    airmass: f64,
    airmass_absolute: f64,
    ozone_mass: f64,
    precipitable_water: f64,
    ozone: f64,
    aod500: f64,
    distance_factor: f64,
    forward_scatter: f64,
    forward_scatter_reflect: f64,
}

/// Spectral irradiance at one wavelength, W/m²/µm
struct SpectralPoint {
    dni_extra: f64,
    dni: f64,
    dhi: f64,
    poa_sky_diffuse: f64,
    poa_ground_diffuse: f64,
    poa_direct: f64,
}

impl TimeStep {
    fn new(inputs: &Spectrl2Inputs, aerosol: &AerosolParameters, j: usize, doy: f64) -> Self {
        let at = |values: &Array1<f64>| broadcast_at(values, j);
        let cos_zenith = at(&inputs.apparent_zenith).to_radians().cos();
        let airmass = at(&inputs.relative_airmass);

        // Fraction of aerosol scattering in the forward direction
        let alg = (1.0 - aerosol.aerosol_asymmetry_factor).ln();
        let afs = alg * (1.459 + alg * (0.1595 + alg * 0.4129));
        let bfs = alg * (0.0783 + alg * (-0.3824 - alg * 0.5874));

        Self {
            cos_zenith,
            cos_tilt: at(&inputs.surface_tilt).to_radians().cos(),
            cos_aoi: at(&inputs.aoi).to_radians().cos(),
            ground_albedo: at(&inputs.ground_albedo),
            airmass,
            airmass_absolute: airmass * at(&inputs.surface_pressure) / REFERENCE_PRESSURE,
            ozone_mass: (1.0 + OZONE_HEIGHT_RATIO)
                / (cos_zenith.powi(2) + 2.0 * OZONE_HEIGHT_RATIO).sqrt(),
            precipitable_water: at(&inputs.precipitable_water),
            ozone: at(&inputs.ozone),
            aod500: at(&inputs.aerosol_turbidity_500nm),
            distance_factor: earth_sun_distance_factor(doy),
            forward_scatter: 1.0 - 0.5 * ((afs + bfs * cos_zenith) * cos_zenith).exp(),
            forward_scatter_reflect: 1.0
                - 0.5 * ((afs + bfs / REFLECTIVITY_AIRMASS) / REFLECTIVITY_AIRMASS).exp(),
        }
    }

    fn spectral_point(&self, i: usize, aerosol: &AerosolParameters) -> SpectralPoint {
        let wavelength = nm_to_um(WAVELENGTH_NM[i]);
        let extraterrestrial = EXTRATERRESTRIAL[i] * self.distance_factor;

        let tau = self.aod500 * (wavelength / 0.5).powf(-aerosol.alpha);
        let scattering_albedo = aerosol.scattering_albedo_400nm
            * (-aerosol.wavelength_variation_factor * (wavelength / 0.4).ln().powi(2)).exp();

        let water = |airmass: f64| {
            band_transmittance(
                0.2385,
                20.07,
                WATER_ABSORPTION[i] * self.precipitable_water * airmass,
            )
        };
        let mixed = |airmass: f64| {
            band_transmittance(
                1.41,
                118.93,
                MIXED_GAS_ABSORPTION[i] * airmass,
            )
        };

        let t_rayleigh = rayleigh_transmittance(wavelength, self.airmass_absolute);
        let t_aerosol = (-tau * self.airmass).exp();
        let t_water = water(self.airmass);
        let t_ozone = (-OZONE_ABSORPTION[i] * self.ozone * self.ozone_mass).exp();
        let t_mixed = mixed(self.airmass_absolute);
        let t_absorb = (-(1.0 - scattering_albedo) * tau * self.airmass).exp();
        let t_scatter = (-scattering_albedo * tau * self.airmass).exp();

        // Sky reflectivity at the fixed reflectivity airmass
        let m = REFLECTIVITY_AIRMASS;
        let t_rayleigh_r = rayleigh_transmittance(wavelength, m);
        let t_absorb_r = (-(1.0 - scattering_albedo) * tau * m).exp();
        let t_scatter_r = (-scattering_albedo * tau * m).exp();
        let sky_reflectivity = mixed(m)
            * water(m)
            * t_absorb_r
            * (0.5 * (1.0 - t_rayleigh_r)
                + (1.0 - self.forward_scatter_reflect) * t_rayleigh_r * (1.0 - t_scatter_r));

        let dni = extraterrestrial * t_rayleigh * t_aerosol * t_water * t_ozone * t_mixed;
        let common = extraterrestrial * self.cos_zenith * t_ozone * t_mixed * t_water * t_absorb;
        let rayleigh_diffuse = common * (1.0 - t_rayleigh.powf(0.95)) * 0.5;
        let aerosol_diffuse =
            common * t_rayleigh.powf(1.5) * (1.0 - t_scatter) * self.forward_scatter;
        let ground_sky_diffuse = (dni * self.cos_zenith + rayleigh_diffuse + aerosol_diffuse)
            * sky_reflectivity
            * self.ground_albedo
            / (1.0 - sky_reflectivity * self.ground_albedo);

        let correction = if wavelength <= 0.45 {
            (wavelength + 0.55).powf(1.8)
        } else {
            1.0
        };
        let dhi = (rayleigh_diffuse + aerosol_diffuse + ground_sky_diffuse) * correction;

        let poa_direct = (dni * self.cos_aoi).max(0.0);
        let poa_sky_diffuse = dhi
            * (poa_direct / (extraterrestrial * self.cos_zenith)
                + 0.5 * (1.0 + self.cos_tilt) * (1.0 - dni / extraterrestrial));
        let poa_ground_diffuse =
            0.5 * (dni * self.cos_zenith + dhi) * self.ground_albedo * (1.0 - self.cos_tilt);

        SpectralPoint {
            dni_extra: extraterrestrial,
            dni,
            dhi,
            poa_sky_diffuse,
            poa_ground_diffuse,
            poa_direct,
        }
    }
}

/// Clear-sky spectral irradiance from the SPECTRL2 model.
///
/// # Arguments
/// * `inputs` - Geometry and atmosphere per time step
/// * `aerosol` - Aerosol optical properties
///
/// # Returns
/// Spectra shaped (122, time steps) in W/m²/nm. `poa_direct` is zero when the
/// sun is behind the plane, so `poa_global` is never negative.
///
/// # Errors
/// [`Spectrl2Error::MissingDayOfYear`] when neither `dayofyear` nor
/// timestamps are given, and shape errors for inputs that do not broadcast.
pub fn spectrl2(
    inputs: &Spectrl2Inputs,
    aerosol: &AerosolParameters,
) -> Result<Spectrl2Output, Spectrl2Error> {
    let n = inputs.time_steps()?;
    let days = inputs.days_of_year(n)?;
    debug!("SPECTRL2 over {} time steps", n);

    let shape = (N_WAVELENGTHS, n);
    let mut dni_extra = Array2::zeros(shape);
    let mut dni = Array2::zeros(shape);
    let mut dhi = Array2::zeros(shape);
    let mut poa_sky_diffuse = Array2::zeros(shape);
    let mut poa_ground_diffuse = Array2::zeros(shape);
    let mut poa_direct = Array2::zeros(shape);

    for (j, &doy) in days.iter().enumerate() {
        let step = TimeStep::new(inputs, aerosol, j, doy);
        for i in 0..N_WAVELENGTHS {
            let point = step.spectral_point(i, aerosol);
            dni_extra[[i, j]] = point.dni_extra;
            dni[[i, j]] = point.dni;
            dhi[[i, j]] = point.dhi;
            poa_sky_diffuse[[i, j]] = point.poa_sky_diffuse;
            poa_ground_diffuse[[i, j]] = point.poa_ground_diffuse;
            poa_direct[[i, j]] = point.poa_direct;
        }
    }

    // W/m²/µm to W/m²/nm
    let per_nm = |values: Array2<f64>| values / 1000.0;
    let poa_direct = per_nm(poa_direct);
    let poa_sky_diffuse = per_nm(poa_sky_diffuse);
    let poa_ground_diffuse = per_nm(poa_ground_diffuse);
    let poa_global = &poa_direct + &poa_sky_diffuse + &poa_ground_diffuse;

    Ok(Spectrl2Output {
        wavelength: Array1::from(WAVELENGTH_NM.to_vec()),
        dni_extra: per_nm(dni_extra),
        dhi: per_nm(dhi),
        dni: per_nm(dni),
        poa_sky_diffuse,
        poa_ground_diffuse,
        poa_direct,
        poa_global,
        timestamps: inputs.timestamps.clone(),
    })
}
