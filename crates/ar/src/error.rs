//! Error types for the moseq-ar crate.

use moseq_linalg::LinalgError;

/// Shape violations between series, lag order and AR parameters.
///
/// Every variant carries the offending dimensions so a caller can tell
/// which input was malformed without re-inspecting the arrays.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// Returned when a series array has fewer than two axes.
    #[error("series must have shape (..., T, d), got {ndim} axes")]
    RankTooLow {
        /// Number of axes of the offending array.
        ndim: usize,
    },

    /// Returned when a lag order of zero is requested.
    #[error("nlags must be >= 1, got 0")]
    ZeroLags,

    /// Returned when the time axis is not longer than the lag order.
    #[error("time axis of length {timesteps} is too short for {nlags} lags (need at least {})", .nlags + 1)]
    SeriesTooShort {
        /// Length of the time axis.
        timesteps: usize,
        /// Requested lag order.
        nlags: usize,
    },

    /// Returned when a simulation history has fewer rows than the lag order.
    #[error("history has {rows} rows, need at least {nlags}")]
    HistoryTooShort {
        /// Rows in the history.
        rows: usize,
        /// Lag order of the parameters.
        nlags: usize,
    },

    /// Returned when `Ab` is not `(d, d * nlags + 1)` for some `nlags >= 1`.
    #[error("Ab of shape {rows}x{cols} is not (d, d*nlags + 1) for any nlags >= 1")]
    NotAffine {
        /// Rows of `Ab`.
        rows: usize,
        /// Columns of `Ab`.
        cols: usize,
    },

    /// Returned when a feature width disagrees with the AR parameters.
    #[error("feature dimension {got} does not match expected {expected}")]
    FeatureMismatch {
        /// Width found on the input.
        got: usize,
        /// Width required by `Ab`.
        expected: usize,
    },

    /// Returned when `Q` is not `(d, d)`.
    #[error("covariance of shape {rows}x{cols} does not match feature dimension {d}")]
    CovarianceShape {
        /// Rows of `Q`.
        rows: usize,
        /// Columns of `Q`.
        cols: usize,
        /// Feature dimension of `Ab`.
        d: usize,
    },

    /// Returned when an intermediate array cannot be laid out in the
    /// requested shape.
    ///
    /// The `message` field is a `String` because `ndarray::ShapeError` is
    /// not `Eq`.
    #[error("array layout error: {message}")]
    Layout {
        /// Message from `ndarray`.
        message: String,
    },
}

impl From<ndarray::ShapeError> for ShapeError {
    fn from(e: ndarray::ShapeError) -> Self {
        Self::Layout {
            message: e.to_string(),
        }
    }
}

/// Error type for all fallible operations in the moseq-ar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArError {
    /// Inputs have incompatible shapes.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The noise covariance cannot be used as a Gaussian covariance.
    #[error("invalid {dim}x{dim} noise covariance: {source}")]
    InvalidCovariance {
        /// Feature dimension `d`.
        dim: usize,
        /// Underlying factorisation failure.
        #[source]
        source: LinalgError,
    },
}

impl From<ndarray::ShapeError> for ArError {
    fn from(e: ndarray::ShapeError) -> Self {
        Self::Shape(e.into())
    }
}
