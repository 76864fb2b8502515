use anyhow::{Context, Result, anyhow};
use ndarray::Axis;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use moseq_ar::{ar_log_likelihood, simulate_ar_batch};

use crate::cli::SimulateArgs;
use crate::config;
use crate::convert;

/// Simulate series from `[model]` and report their per-step log-likelihood.
pub fn run(args: SimulateArgs) -> Result<()> {
    let config = config::load(&args.config)?;

    // Step 1: Resolve parameters and sizes
    let model = config
        .model
        .as_ref()
        .ok_or_else(|| anyhow!("no AR parameters: add a [model] section to the config"))?;
    let params = convert::build_params(model)?;
    let history = convert::build_history(model, &params)?;
    let n_series = args.n_series.unwrap_or(config.simulate.n_series);
    let n_steps = args.n_steps.unwrap_or(config.simulate.n_steps);

    // Step 2: Create seeded RNG
    let mut rng = match args.seed.or(config.seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // Step 3: Simulate
    info!(
        d = params.dim(),
        nlags = params.nlags(),
        n_series,
        n_steps,
        "simulating AR series"
    );
    let x = simulate_ar_batch(&params, history.view(), n_series, n_steps, &mut rng)
        .context("simulation failed")?;

    // Step 4: Score under the generating parameters
    let ll = ar_log_likelihood(&x, &params).context("scoring failed")?;
    info!(n_scored = ll.len(), "scored simulated series");

    let per_series = ll
        .mean_axis(Axis(1))
        .ok_or_else(|| anyhow!("no scored timesteps: n_steps and history are both too short"))?;
    for (i, mean) in per_series.iter().enumerate() {
        println!("series {i}: mean log-likelihood {mean:.4}");
    }
    if let Some(overall) = ll.mean() {
        println!("overall: mean log-likelihood {overall:.4} over {} steps", ll.len());
    }

    Ok(())
}
