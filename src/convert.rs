//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;

use binevent_binning::{BinConfig, Thresholds, TimeRange};

use crate::config::*;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO-8601 UTC datetime into seconds since the Unix epoch.
pub fn parse_datetime(s: &str) -> Result<f64> {
    let s = s.trim().trim_end_matches('Z');
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            let utc = dt.and_utc();
            return Ok(utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9);
        }
    }
    bail!("invalid datetime {s:?}: expected ISO-8601 such as 2003-10-29T06:00:00")
}

/// Builds a [`BinConfig`] from the TOML binning configuration.
pub fn build_bin_config(binning: &BinningToml) -> Result<BinConfig> {
    let cfg = BinConfig::default()
        .with_window(binning.window_secs)
        .with_verbose(binning.verbose);
    cfg.validate().context("invalid [binning] config")?;
    Ok(cfg)
}

/// Builds [`Thresholds`] from the TOML thresholds configuration.
///
/// The forecast threshold falls back to the observation threshold.
pub fn build_thresholds(t: &ThresholdsToml) -> Result<Thresholds> {
    let forecast = t.forecast.unwrap_or(t.observation);
    Thresholds::new(t.observation, forecast).context("invalid [thresholds] config")
}

/// Resolves a case's optional `start`/`stop` pair into a [`TimeRange`].
///
/// Exactly one of the two being set is an error.
pub fn build_range(case: &CaseToml) -> Result<Option<TimeRange>> {
    match (&case.start, &case.stop) {
        (None, None) => Ok(None),
        (Some(start), Some(stop)) => {
            let range = TimeRange::new(parse_datetime(start)?, parse_datetime(stop)?)
                .with_context(|| format!("invalid time range for case {:?}", case.label))?;
            Ok(Some(range))
        }
        _ => bail!(
            "case {:?} must set both start and stop, or neither",
            case.label
        ),
    }
}

/// Forecast threshold for one ensemble member.
///
/// Uses the member's entry in `[ensemble].forecast_thresholds` if present,
/// otherwise the run's forecast threshold.
pub fn member_thresholds(
    base: Thresholds,
    ensemble: &EnsembleToml,
    model: &str,
) -> Result<Thresholds> {
    match ensemble.forecast_thresholds.get(model) {
        Some(&t) => base
            .with_forecast(t)
            .with_context(|| format!("invalid forecast threshold for member {model:?}")),
        None => Ok(base),
    }
}
