//! JSON report structures for the subcommands.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use binevent_binning::{BinConfig, Thresholds};
use binevent_contingency::{Aggregate, EventTable, ScoreDiff, SkillScores, SweepPoint};

/// Summary of the run settings.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub window_secs: f64,
    pub observation_threshold: f64,
    pub forecast_threshold: f64,
    pub n_cases: usize,
}

impl RunSummary {
    pub fn new(config: &BinConfig, thresholds: Thresholds, n_cases: usize) -> Self {
        Self {
            window_secs: config.window(),
            observation_threshold: thresholds.observation(),
            forecast_threshold: thresholds.forecast(),
            n_cases,
        }
    }
}

/// Scores of one event table.
#[derive(Debug, Serialize)]
pub struct TableReport {
    pub n_bins: usize,
    pub n_missing: usize,
    pub scores: SkillScores,
}

impl From<&EventTable> for TableReport {
    fn from(table: &EventTable) -> Self {
        Self {
            n_bins: table.len(),
            n_missing: table.n_missing(),
            scores: SkillScores::from_table(&table.counts()),
        }
    }
}

/// A case left out of an aggregate.
#[derive(Debug, Serialize)]
pub struct SkippedCase {
    pub label: String,
    pub reason: String,
}

/// One model scored across all its cases.
#[derive(Debug, Serialize)]
pub struct ModelReport {
    pub model: String,
    pub combined: TableReport,
    pub cases: BTreeMap<String, TableReport>,
    pub skipped: Vec<SkippedCase>,
}

impl ModelReport {
    pub fn from_aggregate(model: &str, agg: &Aggregate) -> Self {
        Self {
            model: model.to_string(),
            combined: TableReport::from(&agg.table),
            cases: agg
                .cases
                .iter()
                .map(|(label, table)| (label.clone(), TableReport::from(table)))
                .collect(),
            skipped: skipped_cases(agg),
        }
    }
}

/// The cases an aggregate left out, with their errors as text.
pub fn skipped_cases(agg: &Aggregate) -> Vec<SkippedCase> {
    agg.skipped
        .iter()
        .map(|(label, e)| SkippedCase {
            label: label.clone(),
            reason: e.to_string(),
        })
        .collect()
}

/// Output of `binevent score`.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub run: RunSummary,
    pub models: Vec<ModelReport>,
}

/// Output of `binevent sweep`.
#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub run: RunSummary,
    pub model: String,
    pub points: Vec<SweepPoint>,
    /// Metric name -> forecast threshold that scores best on it.
    pub best: BTreeMap<String, f64>,
    pub skipped: Vec<SkippedCase>,
}

/// An ensemble model's scores and its change from the reference model.
#[derive(Debug, Serialize)]
pub struct EnsembleEntry {
    pub combined: TableReport,
    pub vs_reference: ScoreDiff,
}

impl EnsembleEntry {
    pub fn new(table: &EventTable, reference: &SkillScores) -> Self {
        let combined = TableReport::from(table);
        let vs_reference = ScoreDiff::between(reference, &combined.scores);
        Self {
            combined,
            vs_reference,
        }
    }
}

/// Output of `binevent ensemble`.
#[derive(Debug, Serialize)]
pub struct EnsembleReport {
    pub run: RunSummary,
    pub reference_model: String,
    pub members: Vec<String>,
    pub min_votes: usize,
    pub reference: TableReport,
    pub npc: EnsembleEntry,
    pub mean: EnsembleEntry,
    pub median: EnsembleEntry,
    pub skipped: Vec<SkippedCase>,
}

/// Writes a JSON report to `output`, or to stdout when `None`.
pub fn write(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write report to stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binevent_contingency::to_json;

    fn table() -> EventTable {
        EventTable::from_flags(
            vec![0.0, 1.0, 2.0],
            vec![Some(0.5), Some(0.1), None],
            vec![Some(0.5), Some(0.5), Some(0.5)],
            vec![Some(true), Some(false), None],
            vec![Some(true), Some(true), Some(true)],
        )
        .unwrap()
    }

    #[test]
    fn table_report_counts_missing() {
        let r = TableReport::from(&table());
        assert_eq!(r.n_bins, 3);
        assert_eq!(r.n_missing, 1);
        assert_eq!(r.scores.pod, Some(1.0));
    }

    #[test]
    fn ensemble_entry_diff_against_reference() {
        let reference = SkillScores::from_table(&table().counts());
        let entry = EnsembleEntry::new(&table(), &reference);
        assert_eq!(entry.vs_reference.pod, Some(0.0));
        assert_eq!(entry.vs_reference.bias, Some(0.0));
    }

    #[test]
    fn run_summary_serializes() {
        let run = RunSummary::new(
            &BinConfig::default(),
            Thresholds::new(0.3, 0.2).unwrap(),
            4,
        );
        let json = to_json(&run).unwrap();
        assert!(json.contains("\"window_secs\": 1200.0"));
        assert!(json.contains("\"forecast_threshold\": 0.2"));
        assert!(json.contains("\"n_cases\": 4"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("report.json");
        write("{\"ok\": true}", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"ok\": true}");
    }
}
