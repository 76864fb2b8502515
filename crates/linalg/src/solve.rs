//! Triangular solves against a Cholesky factor.

use nalgebra::DMatrix;

use crate::error::LinalgError;

/// Solves `L X = B` for lower-triangular `L`.
pub fn solve_lower(l: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    check_rhs(l, b)?;
    l.solve_lower_triangular(b).ok_or(LinalgError::Singular)
}

/// Solves `U X = B` for upper-triangular `U`.
pub fn solve_upper(u: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, LinalgError> {
    check_rhs(u, b)?;
    u.solve_upper_triangular(b).ok_or(LinalgError::Singular)
}

fn check_rhs(t: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<(), LinalgError> {
    if t.nrows() != t.ncols() {
        return Err(LinalgError::NotSquare {
            rows: t.nrows(),
            cols: t.ncols(),
        });
    }
    if b.nrows() != t.nrows() {
        return Err(LinalgError::RhsMismatch {
            rhs_rows: b.nrows(),
            expected: t.nrows(),
        });
    }
    Ok(())
}
