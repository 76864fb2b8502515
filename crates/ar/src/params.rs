//! Validated AR parameter pairs.

use ndarray::{Array2, ArrayView1, ArrayView2, s};

use crate::error::ShapeError;
use crate::lags::nlags_from_shape;

/// AR(k) transition parameters `Ab` with noise covariance `Q`.
///
/// Construction checks shapes only: `Ab` must be `(d, d * nlags + 1)` and
/// `Q` must be `(d, d)`. Whether `Q` is positive-definite is only known
/// once it is factorised, so that failure surfaces from
/// [`ar_log_likelihood`](crate::ar_log_likelihood) and
/// [`simulate_ar`](crate::simulate_ar) as
/// [`ArError::InvalidCovariance`](crate::ArError::InvalidCovariance).
#[derive(Clone, Debug, PartialEq)]
pub struct ArParams {
    ab: Array2<f64>,
    q: Array2<f64>,
    nlags: usize,
}

impl ArParams {
    /// Pairs `Ab` with `Q` after checking their shapes agree.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ShapeError::NotAffine`] | `Ab` is not `(d, d * nlags + 1)` |
    /// | [`ShapeError::CovarianceShape`] | `Q` is not `(d, d)` |
    ///
    /// # Example
    ///
    /// ```
    /// use ndarray::array;
    /// use moseq_ar::ArParams;
    ///
    /// let params = ArParams::new(array![[0.9, 0.0]], array![[1.0]]).unwrap();
    /// assert_eq!(params.nlags(), 1);
    /// assert_eq!(params.dim(), 1);
    /// ```
    pub fn new(ab: Array2<f64>, q: Array2<f64>) -> Result<Self, ShapeError> {
        let (d, cols) = ab.dim();
        let nlags = nlags_from_shape(d, cols)?;
        if q.dim() != (d, d) {
            return Err(ShapeError::CovarianceShape {
                rows: q.nrows(),
                cols: q.ncols(),
                d,
            });
        }
        Ok(Self { ab, q, nlags })
    }

    /// Returns the full affine parameter matrix `Ab`.
    pub fn ab(&self) -> ArrayView2<'_, f64> {
        self.ab.view()
    }

    /// Returns the noise covariance `Q`.
    pub fn q(&self) -> ArrayView2<'_, f64> {
        self.q.view()
    }

    /// Returns the lag order.
    pub fn nlags(&self) -> usize {
        self.nlags
    }

    /// Returns the feature dimension `d`.
    pub fn dim(&self) -> usize {
        self.ab.nrows()
    }

    /// Returns the lag coefficients `A`, shape `(d, d * nlags)`, oldest lag first.
    pub fn coefficients(&self) -> ArrayView2<'_, f64> {
        self.ab.slice(s![.., ..self.ab.ncols() - 1])
    }

    /// Returns the bias column `b`.
    pub fn bias(&self) -> ArrayView1<'_, f64> {
        self.ab.column(self.ab.ncols() - 1)
    }

    /// Consumes the parameters, returning `(Ab, Q)`.
    pub fn into_parts(self) -> (Array2<f64>, Array2<f64>) {
        (self.ab, self.q)
    }
}

impl TryFrom<(Array2<f64>, Array2<f64>)> for ArParams {
    type Error = ShapeError;

    fn try_from((ab, q): (Array2<f64>, Array2<f64>)) -> Result<Self, Self::Error> {
        Self::new(ab, q)
    }
}
