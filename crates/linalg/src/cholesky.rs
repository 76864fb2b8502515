//! Validated Cholesky factorisation.

use nalgebra::{Cholesky, DMatrix};
use ndarray::ArrayView2;

use crate::bridge::to_dmatrix;
use crate::error::LinalgError;

/// Relative tolerance used when checking `a[i, j] == a[j, i]`.
pub const SYMMETRY_TOL: f64 = 1e-8;

/// Returns the lower-triangular Cholesky factor `L` with `L Lᵀ = a`.
///
/// The matrix is checked, in order, for squareness, finiteness, symmetry
/// (relative to [`SYMMETRY_TOL`]) and positive-definiteness. No jitter is
/// added: a matrix that is only positive semi-definite is rejected.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`LinalgError::NotSquare`] | `a` is not square |
/// | [`LinalgError::NonFinite`] | any entry is NaN or infinite |
/// | [`LinalgError::NotSymmetric`] | an off-diagonal pair disagrees |
/// | [`LinalgError::NotPositiveDefinite`] | the factorisation breaks down |
pub fn cholesky_lower(a: ArrayView2<'_, f64>) -> Result<DMatrix<f64>, LinalgError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    if a.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite);
    }
    for i in 0..rows {
        for j in 0..i {
            let (lo, up) = (a[[i, j]], a[[j, i]]);
            let scale = lo.abs().max(up.abs()).max(1.0);
            if (lo - up).abs() > SYMMETRY_TOL * scale {
                return Err(LinalgError::NotSymmetric { row: i, col: j });
            }
        }
    }

    Cholesky::new(to_dmatrix(a))
        .map(Cholesky::unpack)
        .ok_or(LinalgError::NotPositiveDefinite { dim: rows })
}

/// `ln |a|` computed from the Cholesky factor of `a`: `2 Σ ln L_ii`.
pub fn log_det_from_cholesky(l: &DMatrix<f64>) -> f64 {
    2.0 * l.diagonal().iter().map(|v| v.ln()).sum::<f64>()
}
