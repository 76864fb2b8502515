use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level moseq configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoseqConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Fixed AR parameters used by `simulate`.
    #[serde(default)]
    pub model: Option<ModelToml>,

    /// Simulation sizes.
    #[serde(default)]
    pub simulate: SimulateToml,

    /// MNIW prior used by `sample-params`.
    #[serde(default)]
    pub prior: PriorToml,
}

/// AR parameters written out row by row.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// `Ab`, shape `(d, d*nlags + 1)`, bias in the last column.
    pub ab: Vec<Vec<f64>>,
    /// Noise covariance `Q`, shape `(d, d)`.
    pub q: Vec<Vec<f64>>,
    /// Initial history, `nlags` rows of width `d`. Zeros if omitted.
    #[serde(default)]
    pub history: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateToml {
    #[serde(default = "default_n_series")]
    pub n_series: usize,
    #[serde(default = "default_n_steps")]
    pub n_steps: usize,
}

impl Default for SimulateToml {
    fn default() -> Self {
        Self {
            n_series: default_n_series(),
            n_steps: default_n_steps(),
        }
    }
}

fn default_n_series() -> usize {
    1
}
fn default_n_steps() -> usize {
    1000
}

/// MNIW hyperparameters. Anything omitted falls back to
/// `MniwPrior::default_for(dim, nlags)`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriorToml {
    #[serde(default = "default_dim")]
    pub dim: usize,
    #[serde(default = "default_nlags")]
    pub nlags: usize,
    #[serde(default)]
    pub nu: Option<f64>,
    #[serde(default)]
    pub scale: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub mean: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub col_cov: Option<Vec<Vec<f64>>>,
}

impl Default for PriorToml {
    fn default() -> Self {
        Self {
            dim: default_dim(),
            nlags: default_nlags(),
            nu: None,
            scale: None,
            mean: None,
            col_cov: None,
        }
    }
}

fn default_dim() -> usize {
    2
}
fn default_nlags() -> usize {
    1
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<MoseqConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
