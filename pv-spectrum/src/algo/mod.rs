//! Numeric building blocks shared by the spectral models

pub mod broadcast;
pub mod interp;
pub mod spline;
pub mod trapezoid;

pub use broadcast::{zip2, zip3, BroadcastError};
pub use interp::interp;
pub use spline::{CubicSpline, SplineError};
pub use trapezoid::trap_integrate;
