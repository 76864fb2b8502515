//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};
use ndarray::Array2;

use moseq_ar::ArParams;
use moseq_mniw::MniwPrior;

use crate::config::{ModelToml, PriorToml};

/// Builds a dense matrix from TOML rows, rejecting ragged input.
pub fn matrix_from_rows(name: &str, rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        bail!(
            "{name}: row {i} has {} entries, expected {n_cols}",
            row.len()
        );
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Ok(Array2::from_shape_vec((n_rows, n_cols), flat)?)
}

/// Converts the `[model]` section into validated AR parameters.
pub fn build_params(model: &ModelToml) -> Result<ArParams> {
    let ab = matrix_from_rows("model.ab", &model.ab)?;
    let q = matrix_from_rows("model.q", &model.q)?;
    ArParams::new(ab, q).context("invalid [model] parameters")
}

/// Returns the configured history, or `nlags` rows of zeros.
pub fn build_history(model: &ModelToml, params: &ArParams) -> Result<Array2<f64>> {
    match &model.history {
        Some(rows) => matrix_from_rows("model.history", rows),
        None => Ok(Array2::zeros((params.nlags(), params.dim()))),
    }
}

/// Converts the `[prior]` section into an MNIW prior.
pub fn build_prior(prior: &PriorToml) -> Result<MniwPrior> {
    let defaults = MniwPrior::default_for(prior.dim, prior.nlags)
        .context("invalid [prior] dimensions")?;

    let nu = prior.nu.unwrap_or(defaults.nu());
    let scale = match &prior.scale {
        Some(rows) => matrix_from_rows("prior.scale", rows)?,
        None => defaults.scale().to_owned(),
    };
    let mean = match &prior.mean {
        Some(rows) => matrix_from_rows("prior.mean", rows)?,
        None => defaults.mean().to_owned(),
    };
    let col_cov = match &prior.col_cov {
        Some(rows) => matrix_from_rows("prior.col_cov", rows)?,
        None => defaults.col_cov().to_owned(),
    };

    MniwPrior::new(nu, scale, mean, col_cov).context("invalid [prior] hyperparameters")
}
