//! Sweep command: re-score one model over a range of forecast thresholds.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use binevent_contingency::{Metric, aggregate, best_threshold, scaled_thresholds, sweep, to_json};

use crate::cases::{load_cases, select};
use crate::cli::SweepArgs;
use crate::config;
use crate::convert;
use crate::report::{self, RunSummary, SweepReport};

/// Run the threshold sweep.
pub fn run(args: SweepArgs) -> Result<()> {
    let _cmd = info_span!("sweep", model = %args.model).entered();
    let config = config::load(&args.config)?;
    let bin_cfg = convert::build_bin_config(&config.binning)?;
    let thresholds = convert::build_thresholds(&config.thresholds)?;

    let cases = load_cases(&config)?;
    let selected = select(&cases, &args.model);
    if selected.is_empty() {
        bail!("no case has a forecast for model {:?}", args.model);
    }
    let agg = aggregate(&selected, thresholds, &bin_cfg);
    if agg.cases.is_empty() {
        bail!("every case failed for model {:?}", args.model);
    }

    let forecast_thresholds =
        scaled_thresholds(thresholds.observation(), args.max_reduction, args.steps)
            .context("invalid sweep parameters")?;
    let points = sweep(&agg.table, thresholds.observation(), &forecast_thresholds)?;

    let metrics = if args.metrics.is_empty() {
        Metric::ALL.to_vec()
    } else {
        args.metrics.clone()
    };
    let best: BTreeMap<String, f64> = metrics
        .into_iter()
        .filter_map(|metric| {
            let point = best_threshold(&points, metric)?;
            info!(%metric, forecast_threshold = point.forecast_threshold, "best threshold");
            Some((metric.to_string(), point.forecast_threshold))
        })
        .collect();

    let out = SweepReport {
        run: RunSummary::new(&bin_cfg, thresholds, selected.len()),
        model: args.model.clone(),
        points,
        best,
        skipped: report::skipped_cases(&agg),
    };
    let json = to_json(&out).context("failed to serialize sweep report")?;
    report::write(&json, args.output.as_deref())
}
