use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level run description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Bin-grid settings.
    #[serde(default)]
    pub binning: BinningToml,

    /// Event thresholds.
    pub thresholds: ThresholdsToml,

    /// Ensemble settings, required by the `ensemble` subcommand.
    #[serde(default)]
    pub ensemble: Option<EnsembleToml>,

    /// Independent (station, event) cases.
    #[serde(default, rename = "case")]
    pub cases: Vec<CaseToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BinningToml {
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for BinningToml {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            verbose: false,
        }
    }
}

fn default_window_secs() -> f64 {
    binevent_binning::DEFAULT_WINDOW_SECS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdsToml {
    pub observation: f64,
    /// Defaults to the observation threshold.
    #[serde(default)]
    pub forecast: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnsembleToml {
    /// Deterministic model the ensembles are compared against.
    pub reference: String,
    #[serde(default = "default_min_votes")]
    pub min_votes: usize,
    /// Per-member forecast thresholds for NPC voting.
    #[serde(default)]
    pub forecast_thresholds: BTreeMap<String, f64>,
}

fn default_min_votes() -> usize {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseToml {
    pub label: String,
    /// Observation series file.
    pub observed: PathBuf,
    /// Model name -> forecast series file.
    pub forecasts: BTreeMap<String, PathBuf>,
    /// Range start, ISO-8601 UTC (e.g. `2003-10-29T06:00:00`).
    #[serde(default)]
    pub start: Option<String>,
    /// Range stop (exclusive), same format as `start`.
    #[serde(default)]
    pub stop: Option<String>,
}

/// Reads and parses a run description.
///
/// Relative series paths are resolved against the config file's directory.
pub fn load(path: &Path) -> Result<RunConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let mut config: RunConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for case in &mut config.cases {
        case.observed = base.join(&case.observed);
        for file in case.forecasts.values_mut() {
            *file = base.join(&*file);
        }
    }
    Ok(config)
}

impl RunConfig {
    /// Returns every model named by any case, sorted.
    pub fn models(&self) -> Vec<String> {
        let mut models: Vec<String> = self
            .cases
            .iter()
            .flat_map(|c| c.forecasts.keys().cloned())
            .collect();
        models.sort();
        models.dedup();
        models
    }
}
