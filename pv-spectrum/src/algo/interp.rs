//! One-dimensional piecewise linear interpolation.

/// Linearly interpolate `x` over the sample points (`xp`, `fp`).
///
/// `xp` must be ascending. Points below the first sample evaluate to `left`,
/// points above the last sample evaluate to `right`, and NaN stays NaN.
pub fn interp(x: f64, xp: &[f64], fp: &[f64], left: f64, right: f64) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    if x.is_nan() || xp.is_empty() {
        return f64::NAN;
    }

    let last = xp.len() - 1;
    if x < xp[0] {
        return left;
    }
    if x > xp[last] {
        return right;
    }
    if x == xp[last] {
        return fp[last];
    }

    // First index with xp[i] > x, so x lies in [xp[i - 1], xp[i])
    let upper = xp.partition_point(|&v| v <= x);
    let lower = upper - 1;
    let t = (x - xp[lower]) / (xp[upper] - xp[lower]);
    fp[lower] * (1.0 - t) + fp[upper] * t
}

/// Interpolate every point of `x`, with zero outside the sampled domain.
pub fn interp_zero_fill(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| interp(v, xp, fp, 0.0, 0.0)).collect()
}
