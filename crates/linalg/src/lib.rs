//! # moseq-linalg
//!
//! Small dense linear-algebra layer shared by the moseq crates.
//!
//! Public APIs across the workspace speak [`ndarray`]; factorisations run
//! on [`nalgebra`]. This crate owns the bridge between the two and the
//! validation that has to happen before a covariance matrix is factorised.
//!
//! ```text
//! ArrayView2 ──to_dmatrix──▶ DMatrix ──cholesky_lower──▶ L
//!                                            │
//!                     solve_lower / solve_upper / log_det_from_cholesky
//! ```
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use moseq_linalg::{cholesky_lower, log_det_from_cholesky};
//!
//! let q = array![[4.0, 2.0], [2.0, 3.0]];
//! let l = cholesky_lower(q.view()).unwrap();
//! let log_det = log_det_from_cholesky(&l);
//! assert!((log_det - 8.0_f64.ln()).abs() < 1e-12);
//! ```

mod bridge;
mod cholesky;
mod error;
mod solve;

pub use bridge::{to_array2, to_dmatrix};
pub use cholesky::{SYMMETRY_TOL, cholesky_lower, log_det_from_cholesky};
pub use error::LinalgError;
pub use solve::{solve_lower, solve_upper};
