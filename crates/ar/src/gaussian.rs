//! Multivariate normal density with a full, shared covariance.
//!
//! **Not part of the public API.**

use std::f64::consts::PI;

use nalgebra::DMatrix;
use ndarray::{Array1, ArrayView2};

use moseq_linalg::{LinalgError, cholesky_lower, log_det_from_cholesky, solve_lower};

use crate::error::ArError;

/// `N(·, Q)` with the Cholesky factor of `Q` and the normalising constant
/// computed once.
#[derive(Clone, Debug)]
pub(crate) struct GaussianNoise {
    chol: DMatrix<f64>,
    log_norm: f64,
}

impl GaussianNoise {
    /// Factorises `Q`. No jitter is added.
    pub(crate) fn new(q: ArrayView2<'_, f64>) -> Result<Self, ArError> {
        let dim = q.nrows();
        let chol = cholesky_lower(q).map_err(|source| invalid(dim, source))?;
        let log_norm = -0.5 * (dim as f64 * (2.0 * PI).ln() + log_det_from_cholesky(&chol));
        Ok(Self { chol, log_norm })
    }

    pub(crate) fn dim(&self) -> usize {
        self.chol.nrows()
    }

    /// Log-density of each row of `x` under `N(mu[row], Q)`.
    ///
    /// `x` and `mu` must both be `(rows, d)`.
    pub(crate) fn log_prob_rows(
        &self,
        x: ArrayView2<'_, f64>,
        mu: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>, ArError> {
        let d = self.dim();
        let rows = x.nrows();
        debug_assert_eq!(x.dim(), mu.dim());

        // residuals as columns, so one triangular solve whitens them all
        let resid = DMatrix::from_fn(d, rows, |i, j| x[[j, i]] - mu[[j, i]]);
        let white = solve_lower(&self.chol, &resid).map_err(|source| invalid(d, source))?;

        Ok(white
            .column_iter()
            .map(|z| self.log_norm - 0.5 * z.norm_squared())
            .collect())
    }

    /// Maps iid standard normal draws `z` to a `N(0, Q)` draw: `L z`.
    pub(crate) fn correlate(&self, z: &[f64]) -> Array1<f64> {
        let d = self.dim();
        Array1::from_shape_fn(d, |i| (0..=i).map(|j| self.chol[(i, j)] * z[j]).sum())
    }
}

fn invalid(dim: usize, source: LinalgError) -> ArError {
    ArError::InvalidCovariance { dim, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn univariate(x: f64, mu: f64, var: f64) -> f64 {
        -0.5 * ((2.0 * PI * var).ln() + (x - mu).powi(2) / var)
    }

    #[test]
    fn standard_normal_at_mean() {
        let noise = GaussianNoise::new(array![[1.0]].view()).unwrap();
        let lp = noise
            .log_prob_rows(array![[0.0]].view(), array![[0.0]].view())
            .unwrap();
        assert_abs_diff_eq!(lp[0], -0.5 * (2.0 * PI).ln(), epsilon = 1e-12);
    }

    #[test]
    fn scalar_matches_closed_form() {
        let noise = GaussianNoise::new(array![[2.5]].view()).unwrap();
        let x = array![[1.0], [-3.0], [0.2]];
        let mu = array![[0.0], [1.0], [0.2]];
        let lp = noise.log_prob_rows(x.view(), mu.view()).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(lp[i], univariate(x[[i, 0]], mu[[i, 0]], 2.5), epsilon = 1e-12);
        }
    }

    #[test]
    fn correlated_bivariate_matches_explicit_inverse() {
        let q = array![[2.0, 0.6], [0.6, 1.0]];
        let det: f64 = 2.0 * 1.0 - 0.36;
        let inv = array![[1.0, -0.6], [-0.6, 2.0]] / det;
        let r = array![0.7, -1.2];
        let maha = r.dot(&inv.dot(&r));
        let expected = -0.5 * (2.0 * (2.0 * PI).ln() + det.ln() + maha);

        let noise = GaussianNoise::new(q.view()).unwrap();
        let lp = noise
            .log_prob_rows(array![[0.7, -1.2]].view(), array![[0.0, 0.0]].view())
            .unwrap();
        assert_abs_diff_eq!(lp[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn correlate_reproduces_cholesky_product() {
        let q = array![[4.0, 2.0], [2.0, 3.0]];
        let noise = GaussianNoise::new(q.view()).unwrap();
        // L = [[2, 0], [1, sqrt(2)]]
        let v = noise.correlate(&[1.0, 1.0]);
        assert_abs_diff_eq!(v[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[1], 1.0 + 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn indefinite_covariance() {
        let err = GaussianNoise::new(array![[1.0, 3.0], [3.0, 1.0]].view()).unwrap_err();
        assert_eq!(
            err,
            ArError::InvalidCovariance {
                dim: 2,
                source: LinalgError::NotPositiveDefinite { dim: 2 }
            }
        );
    }
}
