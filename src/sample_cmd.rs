use anyhow::{Context, Result};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use moseq_ar::{ArParams, ar_log_likelihood, simulate_ar};

use crate::cli::SampleArgs;
use crate::config;
use crate::convert;

/// Draw `(Ab, Q)` from the `[prior]` section and score one series drawn from them.
pub fn run(args: SampleArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let prior = convert::build_prior(&config.prior)?;

    let mut rng = match args.seed.or(config.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let (ab, q) = prior.sample(&mut rng).context("MNIW sampling failed")?;
    println!("Ab =\n{ab:.4}");
    println!("Q =\n{q:.4}");

    let params = ArParams::new(ab, q).context("prior mean is not an affine AR shape")?;
    info!(d = params.dim(), nlags = params.nlags(), "sampled AR parameters");

    let history = Array2::zeros((params.nlags(), params.dim()));
    let x = simulate_ar(&params, history.view(), config.simulate.n_steps, &mut rng)
        .context("simulation failed")?;
    let ll = ar_log_likelihood(&x, &params).context("scoring failed")?;
    if let Some(mean) = ll.mean() {
        println!(
            "mean log-likelihood {mean:.4} over {} simulated steps",
            ll.len()
        );
    }

    Ok(())
}
