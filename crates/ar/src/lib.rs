//! # moseq-ar
//!
//! Autoregressive building blocks for behavioral time-series models:
//! lag matrices, affine one-step predictions, and Gaussian
//! log-likelihoods under an AR(k) model with full-covariance noise.
//!
//! ## Data Flow
//!
//! ```mermaid
//! graph LR
//!     X["x: (..., T, d)"] -->|"get_lags(&x, nlags)?"| L["lags: (..., T-nlags, d·nlags)"]
//!     L -->|"AffineMap::apply"| M["mu: (..., T-nlags, d)"]
//!     M -->|"N(mu, Q)"| LL["log p: (..., T-nlags)"]
//! ```
//!
//! ## Quick start
//!
//! ```
//! use ndarray::{Array2, array};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use moseq_ar::{ArParams, ar_log_likelihood, simulate_ar};
//!
//! // x_t = 0.9 x_{t-1} + 0.1 + ε,  ε ~ N(0, 0.25)
//! let params = ArParams::new(array![[0.9, 0.1]], array![[0.25]]).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let x = simulate_ar(&params, Array2::zeros((1, 1)).view(), 100, &mut rng).unwrap();
//!
//! let ll = ar_log_likelihood(&x, &params).unwrap();
//! assert_eq!(ll.len(), 100);
//! ```
//!
//! ## Parameter layout
//!
//! | Symbol | Shape | Meaning |
//! |--------|-------|---------|
//! | `Ab` | `(d, d·nlags + 1)` | lag coefficients, oldest lag first, then the bias column |
//! | `Q` | `(d, d)` | noise covariance, symmetric positive-definite |
//! | `nlags` | | [`get_nlags`]: `(cols - 1) / d`, exact division required |
//!
//! Any number of leading batch axes may precede `(T, d)`; they are carried
//! through every operation unchanged.

mod affine;
mod error;
mod lags;
mod likelihood;
mod params;
mod predict;
mod simulate;

pub(crate) mod gaussian;
pub(crate) mod layout;

pub use affine::{Affine, AffineMap, apply_affine};
pub use error::{ArError, ShapeError};
pub use lags::{get_lags, get_nlags};
pub use likelihood::{ar_log_likelihood, ar_log_likelihood_with};
pub use params::ArParams;
pub use predict::{apply_ar_params, apply_ar_params_with};
pub use simulate::{simulate_ar, simulate_ar_batch};
