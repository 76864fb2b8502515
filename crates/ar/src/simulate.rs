//! Synthetic series from AR parameters.

use ndarray::{Array1, Array2, Array3, ArrayView2, s};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::error::{ArError, ShapeError};
use crate::gaussian::GaussianNoise;
use crate::params::ArParams;

/// Draws `n_steps` new observations continuing `history`.
///
/// Each step follows `x[t] = A · [x[t-nlags] … x[t-1]] + b + ε`,
/// `ε ~ N(0, Q)`. `history` is `(h, d)` with `h >= nlags`; it is copied
/// unchanged into the first `h` rows of the `(h + n_steps, d)` result. With
/// `h == nlags` the result scored by
/// [`ar_log_likelihood`](crate::ar_log_likelihood) yields exactly `n_steps`
/// values.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ShapeError::FeatureMismatch`] | `history` width is not `d` |
/// | [`ShapeError::HistoryTooShort`] | `history` has fewer than `nlags` rows |
/// | [`ArError::InvalidCovariance`] | `Q` cannot be factorised |
///
/// # Example
///
/// ```
/// use ndarray::{Array2, array};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use moseq_ar::{ArParams, simulate_ar};
///
/// let params = ArParams::new(array![[0.9, 0.0]], array![[0.1]]).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
/// let x = simulate_ar(&params, Array2::zeros((1, 1)).view(), 50, &mut rng).unwrap();
/// assert_eq!(x.dim(), (51, 1));
/// ```
#[tracing::instrument(level = "debug", skip(params, history, rng), fields(nlags = params.nlags()))]
pub fn simulate_ar<R: Rng + ?Sized>(
    params: &ArParams,
    history: ArrayView2<'_, f64>,
    n_steps: usize,
    rng: &mut R,
) -> Result<Array2<f64>, ArError> {
    let noise = check_history(params, history)?;
    Ok(simulate_with(params, &noise, history, n_steps, rng))
}

/// Draws `n_series` independent continuations of one shared `history`.
///
/// Returns `(n_series, h + n_steps, d)`; series `i` is what
/// [`simulate_ar`] would return for the `i`-th consecutive use of `rng`.
///
/// # Errors
///
/// Same as [`simulate_ar`].
#[tracing::instrument(level = "debug", skip(params, history, rng), fields(nlags = params.nlags()))]
pub fn simulate_ar_batch<R: Rng + ?Sized>(
    params: &ArParams,
    history: ArrayView2<'_, f64>,
    n_series: usize,
    n_steps: usize,
    rng: &mut R,
) -> Result<Array3<f64>, ArError> {
    let noise = check_history(params, history)?;
    let rows = history.nrows() + n_steps;
    let mut out = Array3::zeros((n_series, rows, params.dim()));
    for mut series in out.outer_iter_mut() {
        series.assign(&simulate_with(params, &noise, history, n_steps, rng));
    }
    Ok(out)
}

fn check_history(params: &ArParams, history: ArrayView2<'_, f64>) -> Result<GaussianNoise, ArError> {
    let (rows, cols) = history.dim();
    if cols != params.dim() {
        return Err(ShapeError::FeatureMismatch {
            got: cols,
            expected: params.dim(),
        }
        .into());
    }
    if rows < params.nlags() {
        return Err(ShapeError::HistoryTooShort {
            rows,
            nlags: params.nlags(),
        }
        .into());
    }
    GaussianNoise::new(params.q())
}

fn simulate_with<R: Rng + ?Sized>(
    params: &ArParams,
    noise: &GaussianNoise,
    history: ArrayView2<'_, f64>,
    n_steps: usize,
    rng: &mut R,
) -> Array2<f64> {
    let nlags = params.nlags();
    let d = params.dim();
    let h = history.nrows();
    let coeffs = params.coefficients();
    let bias = params.bias();

    let mut out = Array2::zeros((h + n_steps, d));
    out.slice_mut(s![..h, ..]).assign(&history);

    let mut z = vec![0.0; d];
    for t in h..h + n_steps {
        // rows t-nlags..t flattened row-major match the oldest-first layout of A
        let lagged: Array1<f64> = out.slice(s![t - nlags..t, ..]).iter().copied().collect();
        for zi in z.iter_mut() {
            *zi = StandardNormal.sample(rng);
        }
        let next = coeffs.dot(&lagged) + &bias + noise.correlate(&z);
        out.row_mut(t).assign(&next);
    }

    debug!(h, n_steps, "simulated AR series");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use moseq_linalg::LinalgError;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ar1() -> ArParams {
        ArParams::new(array![[0.5, 0.0, 1.0], [0.0, 0.5, -1.0]], array![[1.0, 0.3], [0.3, 1.0]])
            .unwrap()
    }

    #[test]
    fn history_is_preserved() {
        let history = array![[3.0, 4.0], [5.0, 6.0]];
        let mut rng = StdRng::seed_from_u64(1);
        let x = simulate_ar(&ar1(), history.view(), 10, &mut rng).unwrap();
        assert_eq!(x.dim(), (12, 2));
        assert_eq!(x.slice(s![..2, ..]), history);
    }

    #[test]
    fn same_seed_same_series() {
        let history = Array2::zeros((1, 2));
        let a = simulate_ar(&ar1(), history.view(), 20, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = simulate_ar(&ar1(), history.view(), 20, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_noise_follows_mean_dynamics() {
        let params = ArParams::new(array![[0.5, 1.0]], array![[1e-20]]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let x = simulate_ar(&params, array![[0.0]].view(), 3, &mut rng).unwrap();
        assert_abs_diff_eq!(x[[1, 0]], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(x[[2, 0]], 1.5, epsilon = 1e-8);
        assert_abs_diff_eq!(x[[3, 0]], 1.75, epsilon = 1e-8);
    }

    #[test]
    fn zero_steps_returns_history() {
        let history = array![[1.0, 2.0]];
        let mut rng = StdRng::seed_from_u64(0);
        let x = simulate_ar(&ar1(), history.view(), 0, &mut rng).unwrap();
        assert_eq!(x, history);
    }

    #[test]
    fn batch_matches_sequential_draws() {
        let history = Array2::zeros((1, 2));
        let batch =
            simulate_ar_batch(&ar1(), history.view(), 3, 15, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(batch.dim(), (3, 16, 2));

        let mut rng = StdRng::seed_from_u64(5);
        for i in 0..3 {
            let single = simulate_ar(&ar1(), history.view(), 15, &mut rng).unwrap();
            assert_eq!(batch.index_axis(ndarray::Axis(0), i), single);
        }
    }

    #[test]
    fn history_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            simulate_ar(&ar1(), Array2::zeros((1, 3)).view(), 5, &mut rng),
            Err(ArError::Shape(ShapeError::FeatureMismatch {
                got: 3,
                expected: 2
            }))
        );

        let ar2 = ArParams::new(Array2::zeros((1, 3)), array![[1.0]]).unwrap();
        assert_eq!(
            simulate_ar(&ar2, Array2::zeros((1, 1)).view(), 5, &mut rng),
            Err(ArError::Shape(ShapeError::HistoryTooShort { rows: 1, nlags: 2 }))
        );
    }

    #[test]
    fn invalid_covariance() {
        let params = ArParams::new(array![[0.5, 0.0]], array![[-2.0]]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            simulate_ar(&params, array![[0.0]].view(), 5, &mut rng),
            Err(ArError::InvalidCovariance {
                dim: 1,
                source: LinalgError::NotPositiveDefinite { dim: 1 }
            })
        );
    }
}
