//! Trapezoidal integration over tabulated samples.

/// Integrate `y(x)` with the trapezoidal rule.
///
/// The sample points need not be evenly spaced. Fewer than two samples
/// integrate to zero.
pub fn trap_integrate(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}
