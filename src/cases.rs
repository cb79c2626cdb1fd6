//! Loading the configured cases into memory.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use binevent_binning::{Series, TimeRange};
use binevent_contingency::Case;

use crate::config::RunConfig;
use crate::convert;
use crate::input::read_series;

/// One case with all its series read.
#[derive(Debug)]
pub struct LoadedCase {
    pub label: String,
    pub observed: Series,
    pub forecasts: BTreeMap<String, Series>,
    pub range: Option<TimeRange>,
}

/// Reads every case's observation and forecast files.
pub fn load_cases(config: &RunConfig) -> Result<Vec<LoadedCase>> {
    let cases = config
        .cases
        .iter()
        .map(|case| {
            let range = convert::build_range(case)?;
            let observed = read_series(&case.observed)?;
            let forecasts = case
                .forecasts
                .iter()
                .map(|(model, path)| Ok((model.clone(), read_series(path)?)))
                .collect::<Result<BTreeMap<_, _>>>()
                .with_context(|| format!("failed to load forecasts for case {:?}", case.label))?;
            Ok(LoadedCase {
                label: case.label.clone(),
                observed,
                forecasts,
                range,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    info!(n_cases = cases.len(), "cases loaded");
    Ok(cases)
}

/// Views of every case that has a forecast from `model`.
pub fn select<'a>(cases: &'a [LoadedCase], model: &str) -> Vec<Case<'a>> {
    cases
        .iter()
        .filter_map(|c| {
            let Some(forecast) = c.forecasts.get(model) else {
                debug!(case = %c.label, model, "case has no forecast for model");
                return None;
            };
            let case = Case::new(c.label.clone(), &c.observed, forecast);
            Some(match c.range {
                Some(range) => case.with_range(range),
                None => case,
            })
        })
        .collect()
}
