//! Mean and median ensemble models.

use binevent_binning::{BinnedPair, Thresholds};
use binevent_contingency::EventTable;
use tracing::debug;

use crate::error::EnsembleError;
use crate::members::validate;

/// How member maxima are reduced to one ensemble value per bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Mean,
    Median,
}

impl Reducer {
    /// Short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Mean => "mean",
            Reducer::Median => "median",
        }
    }

    fn reduce(&self, values: &[f64]) -> Option<f64> {
        match self {
            Reducer::Mean => binevent_stats::mean(values),
            Reducer::Median => binevent_stats::median(values),
        }
    }
}

/// Reduces the members' forecast maxima bin by bin.
///
/// Members without data in a bin are left out of that bin's reduction; a
/// bin where no member has data is `None`.
pub fn combine_maxima(
    members: &[EventTable],
    reducer: Reducer,
) -> Result<Vec<Option<f64>>, EnsembleError> {
    let first = validate(members)?;
    Ok(reduce_bins(first.len(), members, reducer))
}

fn reduce_bins(n_bins: usize, members: &[EventTable], reducer: Reducer) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(members.len());
    (0..n_bins)
        .map(|i| {
            values.clear();
            values.extend(members.iter().filter_map(|m| m.modmax()[i]));
            reducer.reduce(&values)
        })
        .collect()
}

/// Builds the mean or median model's event table.
///
/// The reduced maxima are classified against `thresholds` like any single
/// model; the observation side is the first member's.
pub fn reduced_table(
    members: &[EventTable],
    reducer: Reducer,
    thresholds: Thresholds,
) -> Result<EventTable, EnsembleError> {
    let first = validate(members)?;
    let modmax = reduce_bins(first.len(), members, reducer);
    let pair = BinnedPair::from_parts(first.time().to_vec(), first.obsmax().to_vec(), modmax)?;
    let table = EventTable::from_binned(pair, thresholds);
    debug!(
        reducer = reducer.name(),
        n_members = members.len(),
        hits = table.counts().hits(),
        false_alarms = table.counts().false_alarms(),
        "built reduced ensemble"
    );
    Ok(table)
}
