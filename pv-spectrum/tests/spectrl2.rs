//! SPECTRL2 response to atmosphere and plane orientation

use ndarray::{arr1, Array2};
use pv_spectrum::algo::trap_integrate;
use pv_spectrum::spectrum::{spectrl2, AerosolParameters, Spectrl2Inputs, Spectrl2Output};
use test_helpers::CLEAR_SKY_MARCH;

fn inputs() -> Spectrl2Inputs {
    let case = CLEAR_SKY_MARCH;
    Spectrl2Inputs {
        apparent_zenith: arr1(&[case.apparent_zenith]),
        aoi: arr1(&[case.aoi]),
        surface_tilt: arr1(&[case.surface_tilt]),
        ground_albedo: arr1(&[case.ground_albedo]),
        surface_pressure: arr1(&[case.surface_pressure]),
        relative_airmass: arr1(&[case.relative_airmass]),
        precipitable_water: arr1(&[case.precipitable_water]),
        ozone: arr1(&[case.ozone]),
        aerosol_turbidity_500nm: arr1(&[case.aerosol_turbidity_500nm]),
        dayofyear: Some(arr1(&[case.dayofyear])),
        timestamps: None,
    }
}

/// Broadband total of one output field for every time step
fn broadband(out: &Spectrl2Output, pick: fn(&Spectrl2Output) -> &Array2<f64>) -> Vec<f64> {
    let wavelengths = out.wavelength.to_vec();
    pick(out)
        .columns()
        .into_iter()
        .map(|column| trap_integrate(&wavelengths, &column.to_vec()))
        .collect()
}

#[test]
fn test_turbidity_trades_direct_for_diffuse() {
    let _ = env_logger::builder().is_test(true).try_init();
    let hazy = Spectrl2Inputs {
        aerosol_turbidity_500nm: arr1(&[0.05, 0.1, 0.4]),
        ..inputs()
    };
    let out = spectrl2(&hazy, &AerosolParameters::default()).unwrap();

    let dni = broadband(&out, |o| &o.dni);
    let dhi = broadband(&out, |o| &o.dhi);
    assert!(dni[0] > dni[1] && dni[1] > dni[2]);
    assert!(dhi[0] < dhi[1] && dhi[1] < dhi[2]);
}

#[test]
fn test_tilted_plane_sees_ground() {
    let tilted = Spectrl2Inputs {
        surface_tilt: arr1(&[0.0, 30.0, 90.0]),
        aoi: arr1(&[CLEAR_SKY_MARCH.aoi, 20.0, 45.0]),
        ..inputs()
    };
    let out = spectrl2(&tilted, &AerosolParameters::default()).unwrap();

    let ground = broadband(&out, |o| &o.poa_ground_diffuse);
    assert_eq!(ground[0], 0.0);
    assert!(ground[1] > 0.0);
    assert!(ground[2] > ground[1]);

    // Extraterrestrial and beam spectra do not depend on orientation
    assert_eq!(out.dni.column(0), out.dni.column(2));
    assert_eq!(out.dni_extra.column(0), out.dni_extra.column(1));
}

#[test]
fn test_water_vapor_deepens_absorption_bands() {
    let humid = Spectrl2Inputs {
        precipitable_water: arr1(&[0.5, 4.0]),
        ..inputs()
    };
    let out = spectrl2(&humid, &AerosolParameters::default()).unwrap();

    // 937 nm water band
    let band = out.wavelength.iter().position(|&w| w == 937.0).unwrap();
    assert!(out.dni[[band, 1]] < out.dni[[band, 0]]);

    // Visible light is untouched by water vapor
    let green = out.wavelength.iter().position(|&w| w == 550.0).unwrap();
    assert_eq!(out.dni[[green, 0]], out.dni[[green, 1]]);
}
