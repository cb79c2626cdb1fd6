//! Ensemble command: NPC, mean and median ensembles against a reference model.

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span};

use binevent_binning::{BinConfig, BinGrid, Thresholds, TimeRange};
use binevent_contingency::{EventTable, SkillScores, par_build, to_json};
use binevent_ensemble::{Reducer, npc, reduced_table};

use crate::cases::{LoadedCase, load_cases};
use crate::cli::EnsembleArgs;
use crate::config::{self, EnsembleToml};
use crate::convert;
use crate::report::{self, EnsembleEntry, EnsembleReport, RunSummary, SkippedCase, TableReport};

/// Per-case tables for the reference model and the three ensembles.
#[derive(Debug, Default)]
struct CaseTables {
    reference: EventTable,
    npc: EventTable,
    mean: EventTable,
    median: EventTable,
}

impl std::ops::Add for CaseTables {
    type Output = CaseTables;

    fn add(self, rhs: Self) -> Self {
        Self {
            reference: self.reference + rhs.reference,
            npc: self.npc + rhs.npc,
            mean: self.mean + rhs.mean,
            median: self.median + rhs.median,
        }
    }
}

/// Run the ensemble comparison.
pub fn run(args: EnsembleArgs) -> Result<()> {
    let _cmd = info_span!("ensemble").entered();
    let config = config::load(&args.config)?;
    let settings = config
        .ensemble
        .as_ref()
        .ok_or_else(|| anyhow!("no [ensemble] section in {}", args.config.display()))?;
    let bin_cfg = convert::build_bin_config(&config.binning)?;
    let thresholds = convert::build_thresholds(&config.thresholds)?;
    let min_votes = args.min_votes.unwrap_or(settings.min_votes);

    let cases = load_cases(&config)?;
    if cases.is_empty() {
        bail!("no [[case]] entries in {}", args.config.display());
    }

    let (built, failed) = par_build(
        &cases,
        |case| case.label.as_str(),
        |case| {
            build_case(case, settings, min_votes, thresholds, &bin_cfg).map_err(|e| format!("{e:#}"))
        },
    );
    if built.is_empty() {
        bail!("every case failed; see warnings above");
    }
    let combined = built
        .into_iter()
        .fold(CaseTables::default(), |acc, (_, tables)| acc + tables);
    let skipped: Vec<SkippedCase> = failed
        .into_iter()
        .map(|(label, reason)| SkippedCase { label, reason })
        .collect();
    info!(
        n_cases = cases.len() - skipped.len(),
        n_skipped = skipped.len(),
        "ensembles built"
    );

    let reference = TableReport::from(&combined.reference);
    let out = EnsembleReport {
        run: RunSummary::new(&bin_cfg, thresholds, cases.len()),
        reference_model: settings.reference.clone(),
        members: config.models(),
        min_votes,
        npc: EnsembleEntry::new(&combined.npc, &reference.scores),
        mean: EnsembleEntry::new(&combined.mean, &reference.scores),
        median: EnsembleEntry::new(&combined.median, &reference.scores),
        reference,
        skipped,
    };
    log_comparison(&out.reference.scores, &out.npc.combined.scores);
    let json = to_json(&out).context("failed to serialize ensemble report")?;
    report::write(&json, args.output.as_deref())
}

/// Builds the member, reference and ensemble tables for one case.
///
/// Cases without an explicit range are binned over the reference
/// forecast's span so all members share one grid.
fn build_case(
    case: &LoadedCase,
    settings: &EnsembleToml,
    min_votes: usize,
    thresholds: Thresholds,
    bin_cfg: &BinConfig,
) -> Result<CaseTables> {
    let reference_series = case
        .forecasts
        .get(&settings.reference)
        .ok_or_else(|| anyhow!("no forecast for reference model {:?}", settings.reference))?;

    let range = match case.range {
        Some(range) => range,
        None => {
            let grid = BinGrid::spanning(reference_series, bin_cfg.window())?;
            TimeRange::new(grid.start(), grid.stop())?
        }
    };
    let config = bin_cfg.clone().with_range(range);

    let members = case
        .forecasts
        .iter()
        .map(|(model, series)| {
            let member_thresholds = convert::member_thresholds(thresholds, settings, model)?;
            EventTable::build(&case.observed, series, member_thresholds, &config)
                .with_context(|| format!("member {model:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CaseTables {
        reference: EventTable::build(&case.observed, reference_series, thresholds, &config)?,
        npc: npc(&members, min_votes)?,
        mean: reduced_table(&members, Reducer::Mean, thresholds)?,
        median: reduced_table(&members, Reducer::Median, thresholds)?,
    })
}

fn log_comparison(reference: &SkillScores, ensemble: &SkillScores) {
    info!(
        reference_pod = ?reference.pod,
        npc_pod = ?ensemble.pod,
        reference_hss = ?reference.hss,
        npc_hss = ?ensemble.hss,
        "NPC vs reference"
    );
}
