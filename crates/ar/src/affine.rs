//! Affine maps from stacked lag features to predicted means.

use ndarray::{Array2, ArrayView2, s};

use crate::error::ShapeError;

/// Maps row-stacked lag features through AR parameters.
///
/// Implementors receive `x_in` of shape `(rows, d * nlags)` and `Ab` of
/// shape `(d, d * nlags + 1)` and return predicted means of shape
/// `(rows, d)`. [`Affine`] is the standard map; functions and closures with
/// the same signature implement the trait too, which lets callers swap in a
/// different parameterisation without touching the lag or likelihood code.
pub trait AffineMap {
    /// Applies the map to every row of `x_in`.
    fn apply(
        &self,
        x_in: ArrayView2<'_, f64>,
        ab: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, ShapeError>;
}

/// The standard affine map `x_in · Aᵀ + b`; see [`apply_affine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affine;

impl AffineMap for Affine {
    fn apply(
        &self,
        x_in: ArrayView2<'_, f64>,
        ab: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, ShapeError> {
        apply_affine(x_in, ab)
    }
}

impl<F> AffineMap for F
where
    F: Fn(ArrayView2<'_, f64>, ArrayView2<'_, f64>) -> Result<Array2<f64>, ShapeError>,
{
    fn apply(
        &self,
        x_in: ArrayView2<'_, f64>,
        ab: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>, ShapeError> {
        self(x_in, ab)
    }
}

/// Applies `Ab = [A | b]` to each row of `x_in`: `x_in · Aᵀ + b`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ShapeError::NotAffine`] | `Ab` has no columns |
/// | [`ShapeError::FeatureMismatch`] | `x_in` width differs from `Ab` width minus one |
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use moseq_ar::apply_affine;
///
/// let ab = array![[2.0, 0.0, 1.0], [0.0, 3.0, -1.0]];
/// let mu = apply_affine(array![[1.0, 1.0]].view(), ab.view()).unwrap();
/// assert_eq!(mu, array![[3.0, 2.0]]);
/// ```
pub fn apply_affine(
    x_in: ArrayView2<'_, f64>,
    ab: ArrayView2<'_, f64>,
) -> Result<Array2<f64>, ShapeError> {
    let (rows, cols) = ab.dim();
    if cols == 0 {
        return Err(ShapeError::NotAffine { rows, cols });
    }
    let k = cols - 1;
    if x_in.ncols() != k {
        return Err(ShapeError::FeatureMismatch {
            got: x_in.ncols(),
            expected: k,
        });
    }

    let a = ab.slice(s![.., ..k]);
    let b = ab.column(k);
    let mut mu = x_in.dot(&a.t());
    mu += &b;
    Ok(mu)
}
