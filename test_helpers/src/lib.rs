//! Test helpers for pv-spectrum
//!
//! Shared fixtures for integration tests: synthetic reference spectrum files
//! and published SR/QE and SPECTRL2 test cases.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name the reference spectrum loader looks for
pub const REFERENCE_FILE_NAME: &str = "ASTMG173.csv";

/// Error type for test helper operations
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("Failed to write fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write fixture: {0}")]
    Csv(#[from] csv::Error),
}

/// Blackbody irradiance at 1 AU from a 5778 K sun, W/m²/nm
fn solar_blackbody(wavelength_nm: f64) -> f64 {
    const H: f64 = 6.626_070_15e-34;
    const C: f64 = 299_792_458.0;
    const K: f64 = 1.380_649e-23;
    const TEMPERATURE: f64 = 5778.0;
    // (R_sun / AU)^2
    const DILUTION: f64 = 2.1626e-5;

    let wavelength = wavelength_nm * 1e-9;
    let radiance = 2.0 * H * C * C
        / wavelength.powi(5)
        / ((H * C / (wavelength * K * TEMPERATURE)).exp() - 1.0);
    std::f64::consts::PI * radiance * DILUTION * 1e-9
}

/// Smooth stand-ins for the three ASTM G173-03 columns at one wavelength.
///
/// Returns (extraterrestrial, global, direct) in W/m²/nm. The ground
/// spectra apply a Rayleigh-like blue loss to the blackbody, so
/// `direct < global < extraterrestrial` everywhere.
pub fn synthetic_reference_row(wavelength_nm: f64) -> (f64, f64, f64) {
    let extraterrestrial = solar_blackbody(wavelength_nm);
    let blue_loss = (500.0 / wavelength_nm).powi(4);
    let global = 0.75 * extraterrestrial * (-0.15 * blue_loss).exp();
    let direct = 0.70 * extraterrestrial * (-0.20 * blue_loss).exp();
    (extraterrestrial, global, direct)
}

/// Wavelengths of the synthetic reference file: 280 to 4000 nm by 5 nm
pub fn synthetic_reference_wavelengths() -> Vec<f64> {
    (0..=744).map(|i| 280.0 + 5.0 * i as f64).collect()
}

/// Write a synthetic reference spectrum in the ASTM G173 file layout.
///
/// The file has a title line, a header line and four numeric columns, like
/// the published table, and lands at `dir/ASTMG173.csv`.
pub fn write_reference_fixture(dir: &Path) -> Result<PathBuf, TestHelperError> {
    let path = dir.join(REFERENCE_FILE_NAME);
    let mut file = File::create(&path)?;
    writeln!(file, "ASTM G173-03 Reference Spectra Derived from SMARTS v. 2.9.2")?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([
        "Wvlgth nm",
        "Etr W*m-2*nm-1",
        "Global tilt  W*m-2*nm-1",
        "Direct+circumsolar W*m-2*nm-1",
    ])?;
    for wavelength in synthetic_reference_wavelengths() {
        let (etr, global, direct) = synthetic_reference_row(wavelength);
        writer.write_record([
            format!("{wavelength}"),
            format!("{etr:.6e}"),
            format!("{global:.6e}"),
            format!("{direct:.6e}"),
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

/// Wavelengths of the SR/QE fixture (nm)
pub fn response_wavelengths() -> Vec<f64> {
    (0..16).map(|i| 300.0 + 50.0 * i as f64).collect()
}

/// Quantum efficiency on [`response_wavelengths`]
pub fn quantum_efficiency() -> Vec<f64> {
    vec![
        0.85, 0.86, 0.87, 0.88, 0.89, 0.90, 0.91, 0.92, 0.93, 0.94, 0.95, 0.90, 0.80, 0.70, 0.6,
        0.4,
    ]
}

/// Spectral response (A/W) equivalent to [`quantum_efficiency`]
pub fn spectral_response() -> Vec<f64> {
    let hc_over_q_nm = 1239.841_984_332_002_5;
    response_wavelengths()
        .iter()
        .zip(quantum_efficiency())
        .map(|(wavelength, qe)| qe * wavelength / hc_over_q_nm)
        .collect()
}

/// Scalar drivers of a SPECTRL2 run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spectrl2Case {
    pub apparent_zenith: f64,
    pub aoi: f64,
    pub surface_tilt: f64,
    pub ground_albedo: f64,
    pub surface_pressure: f64,
    pub relative_airmass: f64,
    pub precipitable_water: f64,
    pub ozone: f64,
    pub aerosol_turbidity_500nm: f64,
    pub dayofyear: f64,
}

/// Clear mid-March morning on a horizontal plane
pub const CLEAR_SKY_MARCH: Spectrl2Case = Spectrl2Case {
    apparent_zenith: 47.912086486816406,
    aoi: 47.91208648681641,
    surface_tilt: 0.0,
    ground_albedo: 0.2,
    surface_pressure: 101300.0,
    relative_airmass: 1.4899535986910446,
    precipitable_water: 1.42,
    ozone: 0.344,
    aerosol_turbidity_500nm: 0.1,
    dayofyear: 75.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_reference_is_solar_like() {
        let wavelengths = synthetic_reference_wavelengths();
        assert_eq!(wavelengths.first(), Some(&280.0));
        assert_eq!(wavelengths.last(), Some(&4000.0));

        // Total extraterrestrial irradiance near the solar constant
        let total: f64 = wavelengths
            .windows(2)
            .map(|w| {
                let (left, _, _) = synthetic_reference_row(w[0]);
                let (right, _, _) = synthetic_reference_row(w[1]);
                0.5 * (w[1] - w[0]) * (left + right)
            })
            .sum();
        assert!((1250.0..1400.0).contains(&total), "total {total}");

        for &wavelength in &wavelengths {
            let (etr, global, direct) = synthetic_reference_row(wavelength);
            assert!(direct < global && global < etr);
        }
    }

    #[test]
    fn test_spectral_response_fixture() {
        let sr = spectral_response();
        assert_eq!(sr.len(), 16);
        assert!((sr[0] - 0.205671370402405).abs() < 1e-12);
    }

    #[test]
    fn test_write_reference_fixture() {
        let dir = std::env::temp_dir()
            .join(format!("pv-spectrum-fixture-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_reference_fixture(&dir).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("ASTM G173-03"));
        assert!(lines[1].starts_with("Wvlgth nm"));
        assert_eq!(lines.len(), 2 + 745);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
