//! Matrix-normal sampling.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use moseq_linalg::{cholesky_lower, to_array2};

use crate::error::MniwError;

/// Draws `X ~ MatrixNormal(mean, row_cov, col_cov)`.
///
/// `mean` is `(r, c)`, `row_cov` is `(r, r)` and `col_cov` is `(c, c)`;
/// the draw is `mean + chol(row_cov) · G · chol(col_cov)ᵀ` with `G` iid
/// standard normal, so `vec(X)` has covariance `col_cov ⊗ row_cov`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`MniwError::DimensionMismatch`] | a covariance does not match `mean` |
/// | [`MniwError::Linalg`] | a covariance is not symmetric positive-definite |
pub fn sample_matrix_normal<R: Rng + ?Sized>(
    rng: &mut R,
    mean: ArrayView2<'_, f64>,
    row_cov: ArrayView2<'_, f64>,
    col_cov: ArrayView2<'_, f64>,
) -> Result<Array2<f64>, MniwError> {
    let (r, c) = mean.dim();
    check_shape("row covariance", row_cov, (r, r))?;
    check_shape("column covariance", col_cov, (c, c))?;

    let row_chol = cholesky_lower(row_cov).map_err(MniwError::linalg("row covariance"))?;
    let col_chol = cholesky_lower(col_cov).map_err(MniwError::linalg("column covariance"))?;

    let g = DMatrix::<f64>::from_fn(r, c, |_, _| StandardNormal.sample(rng));
    let noise = row_chol * g * col_chol.transpose();
    Ok(&mean + &to_array2(&noise))
}

pub(crate) fn check_shape(
    name: &'static str,
    a: ArrayView2<'_, f64>,
    expected: (usize, usize),
) -> Result<(), MniwError> {
    if a.dim() != expected {
        return Err(MniwError::DimensionMismatch {
            name,
            got: a.dim(),
            expected,
        });
    }
    Ok(())
}
