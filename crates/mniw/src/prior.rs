//! The joint MNIW draw and a validated prior bundle.

use ndarray::{Array2, ArrayView2};
use rand::Rng;
use tracing::trace;

use moseq_linalg::cholesky_lower;

use crate::error::MniwError;
use crate::invwishart::{check_dof, sample_invwishart};
use crate::matrix_normal::{check_shape, sample_matrix_normal};

/// Draws `(Ab, Q)` from `MNIW(nu, S, M, K)`.
///
/// `Q ~ InvWishart(S, nu)` first, then `Ab ~ MatrixNormal(M, Q, K)` using
/// the freshly drawn `Q` as row covariance. `S` is `(d, d)`, `M` is
/// `(d, k)` and `K` is `(k, k)`. Returns `(Ab, Q)`.
///
/// # Errors
///
/// Any error of [`sample_invwishart`] or [`sample_matrix_normal`];
/// [`MniwError::DimensionMismatch`] when `M` has a row count other than `d`.
#[tracing::instrument(level = "debug", skip_all, fields(nu = nu, mean = ?mean.dim()))]
pub fn sample_mniw<R: Rng + ?Sized>(
    rng: &mut R,
    nu: f64,
    scale: ArrayView2<'_, f64>,
    mean: ArrayView2<'_, f64>,
    col_cov: ArrayView2<'_, f64>,
) -> Result<(Array2<f64>, Array2<f64>), MniwError> {
    let d = scale.nrows();
    check_shape("mean", mean, (d, mean.ncols()))?;
    check_shape("scale", scale, (d, d))?;

    let sigma = sample_invwishart(rng, scale, nu)?;
    let ab = sample_matrix_normal(rng, mean, sigma.view(), col_cov)?;
    trace!(d, k = ab.ncols(), "drew MNIW sample");
    Ok((ab, sigma))
}

/// Validated MNIW hyperparameters `(nu, S, M, K)`.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use moseq_mniw::MniwPrior;
///
/// let prior = MniwPrior::new(
///     5.0,
///     Array2::eye(2),
///     Array2::zeros((2, 5)),
///     Array2::eye(5),
/// )
/// .unwrap();
/// assert_eq!(prior.dim(), 2);
/// assert_eq!(prior.nlags(), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MniwPrior {
    nu: f64,
    scale: Array2<f64>,
    mean: Array2<f64>,
    col_cov: Array2<f64>,
}

impl MniwPrior {
    /// Checks shapes, degrees of freedom and that `S` and `K` factorise.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`MniwError::DimensionMismatch`] | `S`, `M` and `K` disagree |
    /// | [`MniwError::InvalidDegreesOfFreedom`] | `nu <= d - 1` or non-finite |
    /// | [`MniwError::Linalg`] | `S` or `K` is not symmetric positive-definite |
    pub fn new(
        nu: f64,
        scale: Array2<f64>,
        mean: Array2<f64>,
        col_cov: Array2<f64>,
    ) -> Result<Self, MniwError> {
        let (d, k) = mean.dim();
        check_shape("scale", scale.view(), (d, d))?;
        check_shape("column covariance", col_cov.view(), (k, k))?;
        check_dof(nu, d)?;
        cholesky_lower(scale.view()).map_err(MniwError::linalg("scale"))?;
        cholesky_lower(col_cov.view()).map_err(MniwError::linalg("column covariance"))?;
        Ok(Self {
            nu,
            scale,
            mean,
            col_cov,
        })
    }

    /// Weakly informative prior for `d`-dimensional AR(`nlags`) parameters.
    ///
    /// Zero mean, identity `S` and `K`, `nu = d + 2`.
    pub fn default_for(d: usize, nlags: usize) -> Result<Self, MniwError> {
        let k = d * nlags + 1;
        Self::new(
            d as f64 + 2.0,
            Array2::eye(d),
            Array2::zeros((d, k)),
            Array2::eye(k),
        )
    }

    /// Draws `(Ab, Q)`; see [`sample_mniw`].
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Array2<f64>, Array2<f64>), MniwError> {
        sample_mniw(
            rng,
            self.nu,
            self.scale.view(),
            self.mean.view(),
            self.col_cov.view(),
        )
    }

    /// Returns the inverse-Wishart degrees of freedom.
    pub fn nu(&self) -> f64 {
        self.nu
    }

    /// Returns the inverse-Wishart scale `S`.
    pub fn scale(&self) -> ArrayView2<'_, f64> {
        self.scale.view()
    }

    /// Returns the matrix-normal mean `M`.
    pub fn mean(&self) -> ArrayView2<'_, f64> {
        self.mean.view()
    }

    /// Returns the matrix-normal column covariance `K`.
    pub fn col_cov(&self) -> ArrayView2<'_, f64> {
        self.col_cov.view()
    }

    /// Returns the feature dimension `d`.
    pub fn dim(&self) -> usize {
        self.mean.nrows()
    }

    /// Returns the lag order implied by an affine mean `(d, d * nlags + 1)`,
    /// or `None` when the width does not have that form.
    pub fn nlags(&self) -> Option<usize> {
        let (d, k) = self.mean.dim();
        (d > 0 && k > d && (k - 1) % d == 0).then(|| (k - 1) / d)
    }
}
