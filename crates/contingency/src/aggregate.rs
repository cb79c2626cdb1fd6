//! Parallel construction and combination of event tables across cases.

use std::fmt;

use binevent_binning::{BinConfig, Series, Thresholds, TimeRange};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::ContingencyError;
use crate::event_table::EventTable;

/// One independent bin population, e.g. a (station, event) pair.
#[derive(Debug, Clone)]
pub struct Case<'a> {
    label: String,
    observed: &'a Series,
    forecast: &'a Series,
    range: Option<TimeRange>,
}

impl<'a> Case<'a> {
    pub fn new(label: impl Into<String>, observed: &'a Series, forecast: &'a Series) -> Self {
        Self {
            label: label.into(),
            observed,
            forecast,
            range: None,
        }
    }

    /// Bins this case over `range` instead of the shared configuration's.
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn observed(&self) -> &Series {
        self.observed
    }

    pub fn forecast(&self) -> &Series {
        self.forecast
    }

    pub fn range(&self) -> Option<TimeRange> {
        self.range
    }

    /// Builds this case's event table.
    pub fn build(
        &self,
        thresholds: Thresholds,
        config: &BinConfig,
    ) -> Result<EventTable, ContingencyError> {
        match self.range {
            Some(range) => {
                let config = config.clone().with_range(range);
                EventTable::build(self.observed, self.forecast, thresholds, &config)
            }
            None => EventTable::build(self.observed, self.forecast, thresholds, config),
        }
    }
}

/// Combined result of [`aggregate`].
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// All successful cases combined in input order.
    pub table: EventTable,
    /// Each successful case's own table, in input order.
    pub cases: Vec<(String, EventTable)>,
    /// Cases that failed to build, with the reason.
    pub skipped: Vec<(String, ContingencyError)>,
}

/// Runs `build` over `items` in parallel and splits the outcomes by label.
///
/// Both halves keep input order. Each failure is logged with `warn!` and
/// does not stop the other items.
pub fn par_build<C, T, E, L, F>(
    items: &[C],
    label: L,
    build: F,
) -> (Vec<(String, T)>, Vec<(String, E)>)
where
    C: Sync,
    T: Send,
    E: Send + fmt::Display,
    L: Fn(&C) -> &str,
    F: Fn(&C) -> Result<T, E> + Sync + Send,
{
    let results: Vec<Result<T, E>> = items.par_iter().map(&build).collect();

    let mut built = Vec::with_capacity(results.len());
    let mut failed = Vec::new();
    for (item, result) in items.iter().zip(results) {
        let name = label(item).to_string();
        match result {
            Ok(value) => built.push((name, value)),
            Err(e) => {
                warn!(case = %name, error = %e, "skipping case");
                failed.push((name, e));
            }
        }
    }
    (built, failed)
}

/// Builds one event table per case in parallel and combines the successes.
///
/// A failing case is logged and recorded in [`Aggregate::skipped`]; it does
/// not stop the others. The combined counts do not depend on case order.
pub fn aggregate(cases: &[Case<'_>], thresholds: Thresholds, config: &BinConfig) -> Aggregate {
    let (cases, skipped) = par_build(cases, Case::label, |case| case.build(thresholds, config));
    let out = Aggregate {
        table: cases.iter().map(|(_, table)| table).sum(),
        cases,
        skipped,
    };
    info!(
        n_cases = out.cases.len(),
        n_skipped = out.skipped.len(),
        n_bins = out.table.len(),
        n_scored = out.table.n_scored(),
        "aggregated cases"
    );
    out
}
