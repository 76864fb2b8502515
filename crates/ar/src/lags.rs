//! Lag matrices and lag-order inference.
//!
//! For a series whose last rows are `x[t-2], x[t-1], x[t]`, three lags give
//!
//! ```text
//! [ x[t-5]  x[t-4]  x[t-3] ]
//! [ x[t-4]  x[t-3]  x[t-2] ]
//! [ x[t-3]  x[t-2]  x[t-1] ]
//! ```
//!
//! i.e. each output row lists the `nlags` observations that precede its
//! target, oldest first. The first `nlags` timesteps have no complete
//! history and produce no row.

use ndarray::{Array, ArrayBase, Axis, Data, Dimension, Slice};
use tracing::trace;

use crate::error::ShapeError;
use crate::layout::{SeriesDims, check_lag_order};

/// Builds the lag matrix of a batch of `d`-dimensional series.
///
/// `x` has shape `(..., T, d)`; the result has shape
/// `(..., T - nlags, d * nlags)`. Row `i` of the result is
/// `[x[i], x[i+1], …, x[i+nlags-1]]`, the history of target `x[i+nlags]`.
/// Leading axes are carried through unchanged.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ShapeError::ZeroLags`] | `nlags == 0` |
/// | [`ShapeError::RankTooLow`] | `x` has fewer than two axes |
/// | [`ShapeError::SeriesTooShort`] | `T <= nlags` |
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use moseq_ar::get_lags;
///
/// let x = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
/// let lagged = get_lags(&x, 2).unwrap();
/// assert_eq!(lagged, array![[0.0, 1.0], [1.0, 2.0], [2.0, 3.0]]);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(shape = ?x.shape(), nlags = nlags))]
pub fn get_lags<S, D>(x: &ArrayBase<S, D>, nlags: usize) -> Result<Array<f64, D>, ShapeError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let dims = SeriesDims::of(x.shape())?;
    check_lag_order(dims.timesteps, nlags)?;

    let time_axis = Axis(x.ndim() - 2);
    let feature_axis = Axis(x.ndim() - 1);
    let rows = dims.timesteps - nlags;
    let d = dims.dim;

    let mut out_dim = x.raw_dim();
    out_dim[time_axis.index()] = rows;
    out_dim[feature_axis.index()] = d * nlags;
    let mut out = Array::zeros(out_dim);

    // Block `lag` holds the window starting `lag` steps into the series.
    for lag in 0..nlags {
        let window = x.slice_axis(time_axis, Slice::from(lag..lag + rows));
        out.slice_axis_mut(feature_axis, Slice::from(lag * d..(lag + 1) * d))
            .assign(&window);
    }

    trace!(rows, width = d * nlags, batch = dims.batch, "lag matrix built");
    Ok(out)
}

/// Infers the lag order of an affine AR parameter matrix.
///
/// `Ab` has shape `(..., d, d * nlags + 1)`, the last column being the bias.
/// Returns `nlags`. Only the two trailing axes are inspected, so a stack of
/// per-state parameters shares one lag order.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ShapeError::RankTooLow`] | `Ab` has fewer than two axes |
/// | [`ShapeError::NotAffine`] | the width is not `d * nlags + 1` for some `nlags >= 1` |
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use moseq_ar::get_nlags;
///
/// let ab = Array2::<f64>::zeros((3, 3 * 4 + 1));
/// assert_eq!(get_nlags(&ab).unwrap(), 4);
/// ```
pub fn get_nlags<S, D>(ab: &ArrayBase<S, D>) -> Result<usize, ShapeError>
where
    S: Data,
    D: Dimension,
{
    let shape = ab.shape();
    let ndim = shape.len();
    if ndim < 2 {
        return Err(ShapeError::RankTooLow { ndim });
    }
    nlags_from_shape(shape[ndim - 2], shape[ndim - 1])
}

pub(crate) fn nlags_from_shape(rows: usize, cols: usize) -> Result<usize, ShapeError> {
    if rows == 0 || cols <= rows || (cols - 1) % rows != 0 {
        return Err(ShapeError::NotAffine { rows, cols });
    }
    Ok((cols - 1) / rows)
}
