//! Error types for the moseq-linalg crate.

/// Error type for all fallible operations in the moseq-linalg crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// Returned when a matrix that must be square is not.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when a matrix contains NaN or infinity.
    #[error("matrix contains non-finite values")]
    NonFinite,

    /// Returned when `a[row, col]` and `a[col, row]` disagree beyond tolerance.
    #[error("matrix is not symmetric at ({row}, {col})")]
    NotSymmetric {
        /// Row of the first offending entry.
        row: usize,
        /// Column of the first offending entry.
        col: usize,
    },

    /// Returned when the Cholesky factorisation breaks down.
    #[error("{dim}x{dim} matrix is not positive-definite")]
    NotPositiveDefinite {
        /// Matrix dimension.
        dim: usize,
    },

    /// Returned when a triangular solve meets a zero pivot.
    #[error("triangular system is singular")]
    Singular,

    /// Returned when the right-hand side of a solve has the wrong row count.
    #[error("right-hand side has {rhs_rows} rows, expected {expected}")]
    RhsMismatch {
        /// Rows of the right-hand side.
        rhs_rows: usize,
        /// Rows required by the triangular factor.
        expected: usize,
    },
}
