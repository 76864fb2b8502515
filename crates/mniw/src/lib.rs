//! # moseq-mniw
//!
//! Matrix-Normal-Inverse-Wishart (MNIW) sampling, the conjugate prior
//! family for AR parameters `(Ab, Q)`:
//!
//! ```text
//! Q  ~ InvWishart(S, nu)
//! Ab ~ MatrixNormal(M, Q, K)        (row covariance Q, column covariance K)
//! ```
//!
//! All samplers take the RNG explicitly, so draws are reproducible from a
//! seeded [`rand::rngs::StdRng`].
//!
//! # Example
//!
//! ```
//! use moseq_mniw::MniwPrior;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let prior = MniwPrior::default_for(2, 3).unwrap();
//! let mut rng = StdRng::seed_from_u64(0);
//! let (ab, q) = prior.sample(&mut rng).unwrap();
//! assert_eq!(ab.dim(), (2, 7));
//! assert_eq!(q.dim(), (2, 2));
//! ```

mod error;
mod invwishart;
mod matrix_normal;
mod prior;

pub use error::MniwError;
pub use invwishart::sample_invwishart;
pub use matrix_normal::sample_matrix_normal;
pub use prior::{MniwPrior, sample_mniw};
