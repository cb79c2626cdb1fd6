//! Score command: per-model scores aggregated across all cases.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use binevent_contingency::{aggregate, to_json};

use crate::cases::{load_cases, select};
use crate::cli::ScoreArgs;
use crate::config;
use crate::convert;
use crate::report::{self, ModelReport, RunSummary, ScoreReport};

/// Run the scoring pipeline.
pub fn run(args: ScoreArgs) -> Result<()> {
    let _cmd = info_span!("score").entered();
    let config = config::load(&args.config)?;
    let bin_cfg = convert::build_bin_config(&config.binning)?;
    let thresholds = convert::build_thresholds(&config.thresholds)?;

    let cases = load_cases(&config)?;
    if cases.is_empty() {
        bail!("no [[case]] entries in {}", args.config.display());
    }

    let models: Vec<ModelReport> = config
        .models()
        .iter()
        .map(|model| {
            let _span = info_span!("model", %model).entered();
            let agg = aggregate(&select(&cases, model), thresholds, &bin_cfg);
            if agg.cases.is_empty() {
                warn!(
                    n_skipped = agg.skipped.len(),
                    "every case failed for model; its table is empty"
                );
            }
            info!(
                hits = agg.table.counts().hits(),
                misses = agg.table.counts().misses(),
                false_alarms = agg.table.counts().false_alarms(),
                true_negatives = agg.table.counts().true_negatives(),
                "model scored"
            );
            ModelReport::from_aggregate(model, &agg)
        })
        .collect();
    if models.iter().all(|m| m.cases.is_empty()) {
        bail!("every case failed for every model; see warnings above");
    }

    let out = ScoreReport {
        run: RunSummary::new(&bin_cfg, thresholds, cases.len()),
        models,
    };
    let json = to_json(&out).context("failed to serialize score report")?;
    report::write(&json, args.output.as_deref())
}
