//! Forecast-threshold sweeps over the retained per-bin maxima.

use binevent_binning::Thresholds;
use serde::Serialize;
use tracing::debug;

use crate::error::ContingencyError;
use crate::event_table::EventTable;
use crate::metrics::Metric;
use crate::output::SkillScores;
use crate::table::ContingencyTable;

/// Scores at one forecast threshold of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub forecast_threshold: f64,
    pub counts: ContingencyTable,
    pub scores: SkillScores,
}

/// `steps` forecast thresholds from `base` down to `base * (1 - max_reduction)`.
///
/// The reductions are evenly spaced and the first threshold is `base`
/// itself, so `scaled_thresholds(0.3, 0.9, 21)` runs from 0.3 down to 0.03.
///
/// # Errors
///
/// Returns [`ContingencyError::InvalidSweep`] if `steps` is zero,
/// `max_reduction` is outside `[0, 1)` or `base` is not finite.
pub fn scaled_thresholds(
    base: f64,
    max_reduction: f64,
    steps: usize,
) -> Result<Vec<f64>, ContingencyError> {
    if steps == 0 {
        return Err(ContingencyError::InvalidSweep {
            reason: "steps must be >= 1".to_string(),
        });
    }
    if !(0.0..1.0).contains(&max_reduction) {
        return Err(ContingencyError::InvalidSweep {
            reason: format!("max_reduction must be in [0, 1), got {max_reduction}"),
        });
    }
    if !base.is_finite() {
        return Err(ContingencyError::InvalidSweep {
            reason: format!("base threshold must be finite, got {base}"),
        });
    }
    Ok(binevent_stats::linspace(0.0, max_reduction * base, steps)
        .into_iter()
        .map(|r| base - r)
        .collect())
}

/// Re-scores `table` once per forecast threshold.
///
/// The observation side is reclassified against `observation_threshold`
/// for every point, so the sweep does not depend on how `table` was built.
pub fn sweep(
    table: &EventTable,
    observation_threshold: f64,
    forecast_thresholds: &[f64],
) -> Result<Vec<SweepPoint>, ContingencyError> {
    forecast_thresholds
        .iter()
        .map(|&forecast_threshold| {
            let thresholds = Thresholds::new(observation_threshold, forecast_threshold)?;
            let counts = table.reclassify(thresholds).counts();
            debug!(
                forecast_threshold,
                hits = counts.hits(),
                false_alarms = counts.false_alarms(),
                "sweep point"
            );
            Ok(SweepPoint {
                forecast_threshold,
                counts,
                scores: SkillScores::from_table(&counts),
            })
        })
        .collect()
}

/// Returns the point that scores best on `metric`.
///
/// Points where the metric is undefined are skipped; ties keep the earliest
/// point.
pub fn best_threshold(points: &[SweepPoint], metric: Metric) -> Option<&SweepPoint> {
    let mut best: Option<(&SweepPoint, f64)> = None;
    for point in points {
        let Some(value) = point.scores.get(metric) else {
            continue;
        };
        match best {
            Some((_, incumbent)) if !metric.is_better(value, incumbent) => {}
            _ => best = Some((point, value)),
        }
    }
    best.map(|(point, _)| point)
}
