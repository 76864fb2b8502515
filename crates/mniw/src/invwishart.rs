//! Inverse-Wishart sampling via the Bartlett decomposition.

use nalgebra::DMatrix;
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::{ChiSquared, Distribution, StandardNormal};

use moseq_linalg::{cholesky_lower, solve_lower, to_array2};

use crate::error::MniwError;

/// Draws `Σ ~ InvWishart(scale, nu)`.
///
/// With `L = chol(scale)` and the upper-triangular Bartlett factor `B`
/// (`B_ii = sqrt(χ²(nu - i))`, `B_ij ~ N(0, 1)` above the diagonal),
/// returns `Σ = (L B⁻¹)(L B⁻¹)ᵀ`. Then `Σ⁻¹ ~ Wishart(scale⁻¹, nu)` and
/// `E[Σ] = scale / (nu - d - 1)` when `nu > d + 1`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`MniwError::Linalg`] | `scale` is not symmetric positive-definite |
/// | [`MniwError::InvalidDegreesOfFreedom`] | `nu <= d - 1` or non-finite |
pub fn sample_invwishart<R: Rng + ?Sized>(
    rng: &mut R,
    scale: ArrayView2<'_, f64>,
    nu: f64,
) -> Result<Array2<f64>, MniwError> {
    let d = scale.nrows();
    let chol = cholesky_lower(scale).map_err(MniwError::linalg("scale"))?;
    check_dof(nu, d)?;

    let mut bartlett = DMatrix::<f64>::zeros(d, d);
    for i in 0..d {
        let chi2 = ChiSquared::new(nu - i as f64)
            .map_err(|_| MniwError::InvalidDegreesOfFreedom { nu, dim: d })?;
        bartlett[(i, i)] = chi2.sample(rng).sqrt();
        for j in i + 1..d {
            bartlett[(i, j)] = StandardNormal.sample(rng);
        }
    }

    // T = L B⁻¹  <=>  Bᵀ Tᵀ = Lᵀ
    let t = solve_lower(&bartlett.transpose(), &chol.transpose())
        .map_err(MniwError::linalg("Bartlett factor"))?
        .transpose();
    let sigma = to_array2(&(&t * t.transpose()));
    Ok(symmetrize(sigma))
}

pub(crate) fn check_dof(nu: f64, dim: usize) -> Result<(), MniwError> {
    if !nu.is_finite() || nu <= dim as f64 - 1.0 {
        return Err(MniwError::InvalidDegreesOfFreedom { nu, dim });
    }
    Ok(())
}

fn symmetrize(a: Array2<f64>) -> Array2<f64> {
    (&a + &a.t()) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use moseq_linalg::LinalgError;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draw_is_symmetric_positive_definite() {
        let mut rng = StdRng::seed_from_u64(42);
        let scale = array![[2.0, 0.5, 0.1], [0.5, 1.0, 0.2], [0.1, 0.2, 0.7]];
        for _ in 0..50 {
            let sigma = sample_invwishart(&mut rng, scale.view(), 5.0).unwrap();
            assert_eq!(sigma, sigma.t());
            assert!(cholesky_lower(sigma.view()).is_ok());
        }
    }

    #[test]
    fn scalar_case_is_scaled_inverse_chi_square() {
        // d = 1: Σ = s / χ²(nu), so s / Σ is a chi-square draw with mean nu
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let mean_chi2 = (0..n)
            .map(|_| 3.0 / sample_invwishart(&mut rng, array![[3.0]].view(), 6.0).unwrap()[[0, 0]])
            .sum::<f64>()
            / n as f64;
        assert_abs_diff_eq!(mean_chi2, 6.0, epsilon = 0.1);
    }

    #[test]
    fn seeded_draws_repeat() {
        let scale = Array2::<f64>::eye(2);
        let a = sample_invwishart(&mut StdRng::seed_from_u64(1), scale.view(), 4.0).unwrap();
        let b = sample_invwishart(&mut StdRng::seed_from_u64(1), scale.view(), 4.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_small_degrees_of_freedom() {
        let mut rng = StdRng::seed_from_u64(0);
        let scale = Array2::<f64>::eye(3);
        assert_eq!(
            sample_invwishart(&mut rng, scale.view(), 2.0),
            Err(MniwError::InvalidDegreesOfFreedom { nu: 2.0, dim: 3 })
        );
        assert!(sample_invwishart(&mut rng, scale.view(), 2.5).is_ok());
        assert!(matches!(
            sample_invwishart(&mut rng, scale.view(), f64::NAN),
            Err(MniwError::InvalidDegreesOfFreedom { dim: 3, .. })
        ));
    }

    #[test]
    fn rejects_indefinite_scale() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            sample_invwishart(&mut rng, array![[1.0, 2.0], [2.0, 1.0]].view(), 5.0),
            Err(MniwError::Linalg {
                name: "scale",
                source: LinalgError::NotPositiveDefinite { dim: 2 }
            })
        );
    }
}
