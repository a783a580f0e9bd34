//! Labeled one-dimensional series.
//!
//! A [`Series`] pairs a vector of index labels (timestamps, row numbers,
//! wavelengths) with an `Array1<f64>` of values. Model functions operate on
//! plain arrays; the helpers here check that two series share an index and put
//! the labels back on the computed values.

use ndarray::{Array1, ArrayView1};
use thiserror::Error;

/// Errors from building or combining series
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("index has {index} labels but there are {values} values")]
    LengthMismatch { index: usize, values: usize },

    #[error("series indexes are not aligned")]
    IndexMismatch,
}

/// Values with an index label per element and an optional name
#[derive(Debug, Clone, PartialEq)]
pub struct Series<I> {
    index: Vec<I>,
    values: Array1<f64>,
    name: Option<String>,
}

impl<I: Clone + PartialEq> Series<I> {
    /// Build a series, checking that every value has a label
    pub fn new(index: Vec<I>, values: Array1<f64>) -> Result<Self, SeriesError> {
        if index.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            index,
            values,
            name: None,
        })
    }

    /// Attach a name to the series
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn index(&self) -> &[I] {
        &self.index
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a position, if in range
    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    /// Put this series' labels on a new set of values. The name is not carried.
    pub fn relabel(&self, values: Array1<f64>) -> Result<Series<I>, SeriesError> {
        Series::new(self.index.clone(), values)
    }

    /// Fail unless both series carry the same labels in the same order
    pub fn check_aligned(&self, other: &Series<I>) -> Result<(), SeriesError> {
        if self.index == other.index {
            Ok(())
        } else {
            Err(SeriesError::IndexMismatch)
        }
    }

    /// Run an array computation over two aligned series and relabel its output.
    ///
    /// # Arguments
    /// * `a`, `b` - Input series, which must share an index
    /// * `f` - Computation over the raw value arrays
    ///
    /// # Returns
    /// The computed values labeled with the shared index, or the first error
    /// from alignment or from `f`
    pub fn try_zip2<F, E>(a: &Series<I>, b: &Series<I>, f: F) -> Result<Series<I>, E>
    where
        F: FnOnce(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> Result<Array1<f64>, E>,
        E: From<SeriesError>,
    {
        a.check_aligned(b)?;
        let values = f(a.view(), b.view())?;
        Ok(a.relabel(values)?)
    }

    /// Three-input variant of [`Series::try_zip2`]
    pub fn try_zip3<F, E>(
        a: &Series<I>,
        b: &Series<I>,
        c: &Series<I>,
        f: F,
    ) -> Result<Series<I>, E>
    where
        F: FnOnce(
            ArrayView1<'_, f64>,
            ArrayView1<'_, f64>,
            ArrayView1<'_, f64>,
        ) -> Result<Array1<f64>, E>,
        E: From<SeriesError>,
    {
        a.check_aligned(b)?;
        a.check_aligned(c)?;
        let values = f(a.view(), b.view(), c.view())?;
        Ok(a.relabel(values)?)
    }
}

impl Series<usize> {
    /// Series labeled with positions `0..n`
    pub fn from_values(values: Array1<f64>) -> Self {
        Self {
            index: (0..values.len()).collect(),
            values,
            name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_length_checked() {
        let err = Series::new(vec![1, 2], arr1(&[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { index: 2, values: 3 });
    }

    #[test]
    fn test_from_values_positions() {
        let s = Series::from_values(arr1(&[0.5, 0.25]));
        assert_eq!(s.index(), &[0, 1]);
        assert_eq!(s.get(1), Some(0.25));
        assert_eq!(s.get(2), None);
    }

    #[test]
    fn test_try_zip2_relabels() {
        let a = Series::new(vec!["t0", "t1"], arr1(&[1.0, 2.0])).unwrap();
        let b = Series::new(vec!["t0", "t1"], arr1(&[3.0, 4.0])).unwrap();
        let out = Series::try_zip2(&a, &b, |x, y| Ok::<_, SeriesError>(&x + &y)).unwrap();
        assert_eq!(out.index(), &["t0", "t1"]);
        assert_eq!(out.values(), &arr1(&[4.0, 6.0]));
    }

    #[test]
    fn test_misaligned() {
        let a = Series::new(vec![0, 1], arr1(&[1.0, 2.0])).unwrap();
        let b = Series::new(vec![1, 0], arr1(&[3.0, 4.0])).unwrap();
        let err = Series::try_zip2(&a, &b, |x, _| Ok::<_, SeriesError>(x.to_owned())).unwrap_err();
        assert_eq!(err, SeriesError::IndexMismatch);
    }
}
