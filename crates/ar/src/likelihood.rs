//! Gaussian log-likelihood of a series under an AR(k) model.

use ndarray::{Array, ArrayBase, Axis, Data, RemoveAxis, Slice};
use tracing::debug;

use crate::affine::{Affine, AffineMap};
use crate::error::ArError;
use crate::gaussian::GaussianNoise;
use crate::layout::flatten_rows;
use crate::params::ArParams;
use crate::predict::apply_ar_params_with;

/// Per-timestep log-likelihood of `x` under AR parameters `(Ab, Q)`.
///
/// Each target `x[t]`, `t >= nlags`, is scored under
/// `N(A · [x[t-nlags] … x[t-1]] + b, Q)`. `x` has shape `(..., T, d)`;
/// the result has shape `(..., T - nlags)`, entry `i` belonging to
/// `x[i + nlags]`. The density uses the full covariance `Q` as given, with
/// no regularisation.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArError::Shape`] | `x` is too short, has the wrong rank, or its feature dimension is not `d` |
/// | [`ArError::InvalidCovariance`] | `Q` is non-finite, asymmetric or not positive-definite |
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use moseq_ar::{ArParams, ar_log_likelihood};
///
/// let params = ArParams::new(array![[0.5, 0.0]], array![[1.0]]).unwrap();
/// let x = array![[0.0], [0.0], [0.0]];
/// let ll = ar_log_likelihood(&x, &params).unwrap();
/// assert_eq!(ll.len(), 2);
/// let at_mean = -0.5 * (2.0 * std::f64::consts::PI).ln();
/// assert!((ll[0] - at_mean).abs() < 1e-12);
/// ```
pub fn ar_log_likelihood<S, D>(
    x: &ArrayBase<S, D>,
    params: &ArParams,
) -> Result<Array<f64, D::Smaller>, ArError>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    ar_log_likelihood_with(x, params, &Affine)
}

/// Same as [`ar_log_likelihood`] with a caller-supplied [`AffineMap`].
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(shape = ?x.shape(), nlags = params.nlags())
)]
pub fn ar_log_likelihood_with<S, D, M>(
    x: &ArrayBase<S, D>,
    params: &ArParams,
    affine: &M,
) -> Result<Array<f64, D::Smaller>, ArError>
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
    M: AffineMap + ?Sized,
{
    let mu = apply_ar_params_with(x, params.ab(), affine)?;

    let n = x.ndim();
    let targets = x.slice_axis(Axis(n - 2), Slice::from(params.nlags()..));
    let noise = GaussianNoise::new(params.q())?;
    let log_prob = noise.log_prob_rows(
        flatten_rows(&targets)?.view(),
        flatten_rows(&mu)?.view(),
    )?;
    debug!(
        n_scored = log_prob.len(),
        total = log_prob.sum(),
        "scored AR log-likelihood"
    );

    let out_dim = mu.raw_dim().remove_axis(Axis(n - 1));
    Ok(Array::from_shape_vec(out_dim, log_prob.to_vec())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use moseq_linalg::LinalgError;
    use ndarray::{Array2, Array3, array};
    use std::f64::consts::PI;

    use crate::error::ShapeError;

    fn univariate(x: f64, mu: f64, var: f64) -> f64 {
        -0.5 * ((2.0 * PI * var).ln() + (x - mu).powi(2) / var)
    }

    #[test]
    fn scalar_ar1_matches_closed_form() {
        let params = ArParams::new(array![[0.8, 0.5]], array![[0.3]]).unwrap();
        let x = array![[1.0], [1.5], [0.2], [-0.4]];
        let ll = ar_log_likelihood(&x, &params).unwrap();
        assert_eq!(ll.len(), 3);
        for t in 1..4 {
            let mu = 0.8 * x[[t - 1, 0]] + 0.5;
            assert_abs_diff_eq!(ll[t - 1], univariate(x[[t, 0]], mu, 0.3), epsilon = 1e-12);
        }
    }

    #[test]
    fn diagonal_covariance_factorises() {
        let ab = array![[0.5, 0.1, 0.0], [-0.2, 0.9, 1.0]];
        let q = array![[0.5, 0.0], [0.0, 2.0]];
        let params = ArParams::new(ab, q).unwrap();
        let x = array![[0.0, 1.0], [0.3, 0.4], [1.0, -1.0]];
        let ll = ar_log_likelihood(&x, &params).unwrap();
        for t in 1..3 {
            let mu0 = 0.5 * x[[t - 1, 0]] + 0.1 * x[[t - 1, 1]];
            let mu1 = -0.2 * x[[t - 1, 0]] + 0.9 * x[[t - 1, 1]] + 1.0;
            let expected = univariate(x[[t, 0]], mu0, 0.5) + univariate(x[[t, 1]], mu1, 2.0);
            assert_abs_diff_eq!(ll[t - 1], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn batch_output_shape() {
        let params = ArParams::new(Array2::zeros((2, 7)), Array2::eye(2)).unwrap();
        let x = Array3::<f64>::zeros((5, 9, 2));
        let ll = ar_log_likelihood(&x, &params).unwrap();
        assert_eq!(ll.shape(), &[5, 6]);
    }

    #[test]
    fn invalid_covariance_is_propagated() {
        let params = ArParams::new(array![[0.5, 0.0]], array![[0.0]]).unwrap();
        let x = array![[1.0], [2.0]];
        assert_eq!(
            ar_log_likelihood(&x, &params),
            Err(ArError::InvalidCovariance {
                dim: 1,
                source: LinalgError::NotPositiveDefinite { dim: 1 }
            })
        );
    }

    #[test]
    fn shape_errors_take_precedence() {
        let params = ArParams::new(array![[0.5, 0.0]], array![[-1.0]]).unwrap();
        let x = array![[1.0]];
        assert_eq!(
            ar_log_likelihood(&x, &params),
            Err(ArError::Shape(ShapeError::SeriesTooShort {
                timesteps: 1,
                nlags: 1
            }))
        );
    }
}
