//! Element-wise evaluation over broadcast arrays.
//!
//! Model drivers arrive as arrays of any dimension (0-d for scalars). Two
//! arrays combine when every axis has equal length or one of the lengths is 1,
//! following the usual numpy rules restricted to equal rank.

use ndarray::{Array, ArrayView, Dimension, Zip};
use thiserror::Error;

/// Errors raised when combining driver arrays
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BroadcastError {
    #[error("operands could not be broadcast together with shapes {left:?} and {right:?}")]
    Incompatible { left: Vec<usize>, right: Vec<usize> },
}

/// Compute the shape two equal-rank arrays broadcast to.
pub fn co_broadcast_shape<D: Dimension>(left: &D, right: &D) -> Result<D, BroadcastError> {
    let mut shape = left.clone();
    for (axis, (&l, &r)) in left.slice().iter().zip(right.slice()).enumerate() {
        shape[axis] = match (l, r) {
            (l, r) if l == r => l,
            (1, r) => r,
            (l, 1) => l,
            _ => {
                return Err(BroadcastError::Incompatible {
                    left: left.slice().to_vec(),
                    right: right.slice().to_vec(),
                })
            }
        };
    }
    Ok(shape)
}

fn incompatible<D: Dimension>(left: &D, right: &D) -> BroadcastError {
    BroadcastError::Incompatible {
        left: left.slice().to_vec(),
        right: right.slice().to_vec(),
    }
}

/// Apply `f` element-wise over two broadcast arrays.
pub fn zip2<D, F>(
    a: ArrayView<'_, f64, D>,
    b: ArrayView<'_, f64, D>,
    mut f: F,
) -> Result<Array<f64, D>, BroadcastError>
where
    D: Dimension,
    F: FnMut(f64, f64) -> f64,
{
    let shape = co_broadcast_shape(&a.raw_dim(), &b.raw_dim())?;
    let a_b = a
        .broadcast(shape.clone())
        .ok_or_else(|| incompatible(&a.raw_dim(), &shape))?;
    let b_b = b
        .broadcast(shape.clone())
        .ok_or_else(|| incompatible(&b.raw_dim(), &shape))?;

    Ok(Zip::from(&a_b).and(&b_b).map_collect(|&x, &y| f(x, y)))
}

/// Apply `f` element-wise over three broadcast arrays.
pub fn zip3<D, F>(
    a: ArrayView<'_, f64, D>,
    b: ArrayView<'_, f64, D>,
    c: ArrayView<'_, f64, D>,
    mut f: F,
) -> Result<Array<f64, D>, BroadcastError>
where
    D: Dimension,
    F: FnMut(f64, f64, f64) -> f64,
{
    let shape = co_broadcast_shape(&a.raw_dim(), &b.raw_dim())?;
    let shape = co_broadcast_shape(&shape, &c.raw_dim())?;
    let a_b = a
        .broadcast(shape.clone())
        .ok_or_else(|| incompatible(&a.raw_dim(), &shape))?;
    let b_b = b
        .broadcast(shape.clone())
        .ok_or_else(|| incompatible(&b.raw_dim(), &shape))?;
    let c_b = c
        .broadcast(shape.clone())
        .ok_or_else(|| incompatible(&c.raw_dim(), &shape))?;

    Ok(Zip::from(&a_b)
        .and(&b_b)
        .and(&c_b)
        .map_collect(|&x, &y, &z| f(x, y, z)))
}
