use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Errors from constructing a [`CubicSpline`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplineError {
    #[error("X and Y vectors must have same length ({x_len} vs {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Need at least 2 points for interpolation, got {0}")]
    TooFewPoints(usize),

    #[error("X values must be sorted in strictly ascending order (index {0})")]
    NotAscending(usize),

    #[error("Spline system is singular")]
    Singular,
}

/// Cubic spline interpolation with not-a-knot end conditions
///
/// The spline passes through every knot and keeps the third derivative
/// continuous across the second and second-to-last knots, so the first two
/// and last two segments are each a single cubic. This matches the default
/// end conditions of common scientific spline libraries, which matters when
/// reproducing published response curves.
///
/// Three knots give the interpolating parabola and two knots give a straight
/// line.
///
/// # Mathematical Background
///
/// With second derivatives `M_i` at the knots and segment widths `h_i`, the
/// interior rows are
///
/// h_{i-1} M_{i-1} + 2 (h_{i-1} + h_i) M_i + h_i M_{i+1}
///     = 6 [(y_{i+1} - y_i) / h_i - (y_i - y_{i-1}) / h_{i-1}]
///
/// and the system is solved densely with an LU factorization.
///
/// # Examples
///
/// ```rust
/// use pv_spectrum::algo::spline::CubicSpline;
///
/// let x = vec![0.0, 1.0, 2.0, 3.0];
/// let y = vec![0.0, 1.0, 8.0, 27.0];
/// let spline = CubicSpline::new(x, y).unwrap();
///
/// // A cubic is reproduced exactly
/// assert!((spline.evaluate(1.5).unwrap() - 3.375).abs() < 1e-10);
/// assert!(spline.evaluate(4.0).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    second_derivs: Vec<f64>,
}

impl CubicSpline {
    /// Create a new cubic spline from input points
    ///
    /// # Arguments
    /// * `x` - X coordinates (must be sorted in ascending order, no duplicates)
    /// * `y` - Y coordinates corresponding to x values
    ///
    /// # Returns
    /// A `CubicSpline` ready for evaluation, or a [`SplineError`] describing
    /// why the knots are unusable
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, SplineError> {
        if x.len() != y.len() {
            return Err(SplineError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(SplineError::TooFewPoints(x.len()));
        }
        if let Some(i) = (1..x.len()).find(|&i| x[i] <= x[i - 1]) {
            return Err(SplineError::NotAscending(i));
        }

        let second_derivs = Self::solve_second_derivatives(&x, &y)?;
        Ok(Self {
            x,
            y,
            second_derivs,
        })
    }

    fn solve_second_derivatives(x: &[f64], y: &[f64]) -> Result<Vec<f64>, SplineError> {
        let n = x.len();
        if n == 2 {
            return Ok(vec![0.0; 2]);
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);

        for i in 1..n - 1 {
            a[(i, i - 1)] = h[i - 1];
            a[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            a[(i, i + 1)] = h[i];
            rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }

        if n == 3 {
            // Single parabola: constant second derivative
            a[(0, 0)] = 1.0;
            a[(0, 1)] = -1.0;
            a[(2, 1)] = 1.0;
            a[(2, 2)] = -1.0;
        } else {
            // Third derivative continuous at x[1]
            a[(0, 0)] = h[1];
            a[(0, 1)] = -(h[0] + h[1]);
            a[(0, 2)] = h[0];

            // ... and at x[n - 2]
            a[(n - 1, n - 3)] = h[n - 2];
            a[(n - 1, n - 2)] = -(h[n - 3] + h[n - 2]);
            a[(n - 1, n - 1)] = h[n - 3];
        }

        let solution = a.lu().solve(&rhs).ok_or(SplineError::Singular)?;
        Ok(solution.iter().copied().collect())
    }

    /// Evaluate the spline at a given x value
    ///
    /// Returns `None` outside the knot range; callers choose their own fill.
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let last = self.x.len() - 1;
        if !(x >= self.x[0] && x <= self.x[last]) {
            return None;
        }
        if x == self.x[last] {
            return Some(self.y[last]);
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        let (m0, m1) = (self.second_derivs[i], self.second_derivs[i + 1]);
        let h = x1 - x0;
        let dl = x1 - x;
        let dr = x - x0;

        Some(
            m0 * dl.powi(3) / (6.0 * h)
                + m1 * dr.powi(3) / (6.0 * h)
                + (y0 / h - m0 * h / 6.0) * dl
                + (y1 / h - m1 * h / 6.0) * dr,
        )
    }

    /// Index of the left knot of the segment containing `x`
    fn find_segment(&self, x: f64) -> usize {
        let mut left = 0;
        let mut right = self.x.len() - 1;

        while left < right - 1 {
            let mid = (left + right) / 2;
            if x < self.x[mid] {
                right = mid;
            } else {
                left = mid;
            }
        }
        left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_point_spline() {
        let spline = CubicSpline::new(vec![0.0, 10.0], vec![5.0, 15.0]).unwrap();

        assert_relative_eq!(spline.evaluate(5.0).unwrap(), 10.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(2.5).unwrap(), 7.5, epsilon = 1e-10);
    }

    #[test]
    fn test_three_points_give_parabola() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 3.0], vec![0.0, 1.0, 9.0]).unwrap();

        assert_relative_eq!(spline.evaluate(2.0).unwrap(), 4.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(0.5).unwrap(), 0.25, epsilon = 1e-10);
    }

    #[test]
    fn test_reproduces_cubic() {
        // Not-a-knot splines are exact for any cubic polynomial
        let f = |x: f64| x * x * x - 2.0 * x * x + x + 1.0;
        let x = vec![0.0, 0.5, 1.0, 1.7, 2.0, 3.1];
        let y: Vec<f64> = x.iter().map(|&v| f(v)).collect();
        let spline = CubicSpline::new(x, y).unwrap();

        for &t in &[0.1, 0.75, 1.3, 1.99, 2.5, 3.0] {
            assert_relative_eq!(spline.evaluate(t).unwrap(), f(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_passes_through_knots() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y = vec![0.0, 1.0, 0.0, -1.0, 0.0];
        let spline = CubicSpline::new(x.clone(), y.clone()).unwrap();

        for (xi, yi) in x.iter().zip(&y) {
            assert_relative_eq!(spline.evaluate(*xi).unwrap(), *yi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_constant_data() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![5.0; 4]).unwrap();

        assert_relative_eq!(spline.evaluate(0.5).unwrap(), 5.0, epsilon = 1e-10);
        assert_relative_eq!(spline.evaluate(2.5).unwrap(), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_outside_range() {
        let spline = CubicSpline::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 4.0, 9.0]).unwrap();

        assert!(spline.evaluate(-0.001).is_none());
        assert!(spline.evaluate(3.001).is_none());
        assert!(spline.evaluate(f64::NAN).is_none());
        assert_relative_eq!(spline.evaluate(3.0).unwrap(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = CubicSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(err, SplineError::LengthMismatch { x_len: 3, y_len: 2 });
    }

    #[test]
    fn test_unsorted_x() {
        let err = CubicSpline::new(vec![0.0, 2.0, 1.0], vec![0.0, 4.0, 1.0]).unwrap_err();
        assert_eq!(err, SplineError::NotAscending(2));
    }

    #[test]
    fn test_single_point_error() {
        let err = CubicSpline::new(vec![1.0], vec![1.0]).unwrap_err();
        assert_eq!(err, SplineError::TooFewPoints(1));
    }
}
