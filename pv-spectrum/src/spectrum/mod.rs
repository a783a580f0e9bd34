//! Solar spectra, spectral response and spectrum-derived quantities

pub mod constants;
pub mod mismatch_field;
pub mod photon;
pub mod reference;
pub mod response;
pub mod spectrl2;
pub mod table;

pub use constants::SI;
pub use mismatch_field::{
    calc_spectral_mismatch_field, calc_spectral_mismatch_field_rows, FieldMismatchError,
    MismatchReference,
};
pub use photon::{
    average_photon_energy, average_photon_energy_rows, photon_flux_density, PhotonEnergyError,
};
pub use reference::{
    get_astmg173, get_reference_spectra, ReferenceSpectrumError, ReferenceStandard,
};
pub use response::{
    get_example_spectral_response, qe_to_sr, sr_to_qe, ResponseData, ResponseError,
};
pub use spectrl2::{
    spectrl2, AerosolParameters, Spectrl2Error, Spectrl2Inputs, Spectrl2Output,
};
pub use table::{SpectraRows, SpectralCurve, SpectralTable, TableError};
