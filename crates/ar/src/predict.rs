//! One-step-ahead AR predictions.

use ndarray::{Array, ArrayBase, ArrayView2, Data, Dimension};
use tracing::debug;

use crate::affine::{Affine, AffineMap};
use crate::error::ShapeError;
use crate::lags::{get_lags, get_nlags};
use crate::layout::{SeriesDims, flatten_rows};

/// Predicts `x[t]` from its `nlags` predecessors with the standard affine map.
///
/// `x` has shape `(..., T, d)` and `Ab` shape `(d, d * nlags + 1)`; the
/// result has shape `(..., T - nlags, d)` and row `i` is the prediction for
/// `x[i + nlags]`.
///
/// # Errors
///
/// Any error from [`get_nlags`] or [`get_lags`], or
/// [`ShapeError::FeatureMismatch`] when `x`'s feature dimension is not `d`.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use moseq_ar::apply_ar_params;
///
/// // x_t = 0.5 x_{t-1} + 1
/// let ab = array![[0.5, 1.0]];
/// let x = array![[2.0], [4.0], [6.0]];
/// let mu = apply_ar_params(&x, ab.view()).unwrap();
/// assert_eq!(mu, array![[2.0], [3.0]]);
/// ```
pub fn apply_ar_params<S, D>(
    x: &ArrayBase<S, D>,
    ab: ArrayView2<'_, f64>,
) -> Result<Array<f64, D>, ShapeError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    apply_ar_params_with(x, ab, &Affine)
}

/// Same as [`apply_ar_params`] with a caller-supplied [`AffineMap`].
#[tracing::instrument(level = "debug", skip_all, fields(shape = ?x.shape(), ab = ?ab.dim()))]
pub fn apply_ar_params_with<S, D, M>(
    x: &ArrayBase<S, D>,
    ab: ArrayView2<'_, f64>,
    affine: &M,
) -> Result<Array<f64, D>, ShapeError>
where
    S: Data<Elem = f64>,
    D: Dimension,
    M: AffineMap + ?Sized,
{
    let nlags = get_nlags(&ab)?;
    let d = ab.nrows();
    let dims = SeriesDims::of(x.shape())?;
    if dims.dim != d {
        return Err(ShapeError::FeatureMismatch {
            got: dims.dim,
            expected: d,
        });
    }

    let x_in = flatten_rows(&get_lags(x, nlags)?)?;
    let mu = affine.apply(x_in.view(), ab)?;
    if mu.ncols() != d {
        return Err(ShapeError::FeatureMismatch {
            got: mu.ncols(),
            expected: d,
        });
    }
    debug!(nlags, rows = mu.nrows(), "applied AR parameters");

    let mut out_dim = x.raw_dim();
    out_dim[x.ndim() - 2] = dims.timesteps - nlags;
    Ok(Array::from_shape_vec(out_dim, mu.iter().copied().collect())?)
}
