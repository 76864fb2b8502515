//! Error types for the moseq-mniw crate.

use moseq_linalg::LinalgError;

/// Error type for all fallible operations in the moseq-mniw crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MniwError {
    /// Returned when the inverse-Wishart degrees of freedom are too small.
    #[error("degrees of freedom {nu} must be finite and greater than {}", *.dim as f64 - 1.0)]
    InvalidDegreesOfFreedom {
        /// Degrees of freedom supplied.
        nu: f64,
        /// Dimension of the scale matrix.
        dim: usize,
    },

    /// Returned when a matrix argument has the wrong shape.
    #[error("{name} has shape {}x{}, expected {}x{}", .got.0, .got.1, .expected.0, .expected.1)]
    DimensionMismatch {
        /// Which argument was malformed.
        name: &'static str,
        /// Shape supplied.
        got: (usize, usize),
        /// Shape required.
        expected: (usize, usize),
    },

    /// Returned when a covariance argument cannot be factorised.
    #[error("{name}: {source}")]
    Linalg {
        /// Which argument failed.
        name: &'static str,
        /// Underlying factorisation failure.
        #[source]
        source: LinalgError,
    },
}

impl MniwError {
    pub(crate) fn linalg(name: &'static str) -> impl FnOnce(LinalgError) -> Self {
        move |source| Self::Linalg { name, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_degrees_of_freedom() {
        let e = MniwError::InvalidDegreesOfFreedom { nu: 1.5, dim: 3 };
        assert_eq!(
            e.to_string(),
            "degrees of freedom 1.5 must be finite and greater than 2"
        );
    }

    #[test]
    fn error_dimension_mismatch() {
        let e = MniwError::DimensionMismatch {
            name: "column covariance",
            got: (3, 3),
            expected: (5, 5),
        };
        assert_eq!(
            e.to_string(),
            "column covariance has shape 3x3, expected 5x5"
        );
    }

    #[test]
    fn error_linalg() {
        let e = MniwError::Linalg {
            name: "scale",
            source: LinalgError::NotPositiveDefinite { dim: 2 },
        };
        assert_eq!(e.to_string(), "scale: 2x2 matrix is not positive-definite");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<MniwError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<MniwError>();
    }
}
