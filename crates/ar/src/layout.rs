//! Shape bookkeeping for `(..., T, d)` series arrays.
//!
//! **Not part of the public API.**

use ndarray::{Array2, ArrayBase, Data, Dimension};

use crate::error::ShapeError;

/// Trailing axes of a series array, with every leading axis folded into `batch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SeriesDims {
    pub(crate) batch: usize,
    pub(crate) timesteps: usize,
    pub(crate) dim: usize,
}

impl SeriesDims {
    /// Reads `(..., T, d)` from a shape slice.
    pub(crate) fn of(shape: &[usize]) -> Result<Self, ShapeError> {
        let ndim = shape.len();
        if ndim < 2 {
            return Err(ShapeError::RankTooLow { ndim });
        }
        Ok(Self {
            batch: shape[..ndim - 2].iter().product(),
            timesteps: shape[ndim - 2],
            dim: shape[ndim - 1],
        })
    }
}

/// Fails unless `1 <= nlags < timesteps`.
pub(crate) fn check_lag_order(timesteps: usize, nlags: usize) -> Result<(), ShapeError> {
    if nlags == 0 {
        return Err(ShapeError::ZeroLags);
    }
    if timesteps <= nlags {
        return Err(ShapeError::SeriesTooShort { timesteps, nlags });
    }
    Ok(())
}

/// Copies an array into a `(rows, last_axis)` matrix in logical (row-major) order.
pub(crate) fn flatten_rows<S, D>(a: &ArrayBase<S, D>) -> Result<Array2<f64>, ShapeError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let shape = a.shape();
    let (lead, cols) = match shape.split_last() {
        Some((&cols, lead)) => (lead, cols),
        None => (shape, 1),
    };
    let rows = lead.iter().product::<usize>();
    Ok(Array2::from_shape_vec(
        (rows, cols),
        a.iter().copied().collect(),
    )?)
}
