//! Naive probabilistic classifier (NPC) ensembles.

use binevent_contingency::EventTable;
use tracing::debug;

use crate::error::EnsembleError;
use crate::members::validate;

/// Number of members forecasting an event in each bin.
///
/// Only members with forecast data in a bin vote there. A bin where no
/// member has data is `None`.
pub fn vote_counts(members: &[EventTable]) -> Result<Vec<Option<usize>>, EnsembleError> {
    let first = validate(members)?;
    Ok(count_votes(first.len(), members))
}

fn count_votes(n_bins: usize, members: &[EventTable]) -> Vec<Option<usize>> {
    (0..n_bins)
        .map(|i| {
            members
                .iter()
                .filter_map(|m| m.forecast()[i])
                .fold(None, |acc: Option<usize>, event| {
                    Some(acc.unwrap_or(0) + usize::from(event))
                })
        })
        .collect()
}

/// Builds the NPC ensemble table: a bin is a forecast event when at least
/// `min_votes` members forecast one.
///
/// The observation side is taken from the first member. The returned
/// table's forecast maxima hold the vote counts.
pub fn npc(members: &[EventTable], min_votes: usize) -> Result<EventTable, EnsembleError> {
    if min_votes == 0 {
        return Err(EnsembleError::InvalidVotes { min_votes });
    }
    let first = validate(members)?;
    let votes = count_votes(first.len(), members);
    let forecast = votes.iter().map(|v| v.map(|n| n >= min_votes)).collect();
    let modmax = votes.iter().map(|v| v.map(|n| n as f64)).collect();
    let table = EventTable::from_flags(
        first.time().to_vec(),
        first.obsmax().to_vec(),
        modmax,
        first.observed().to_vec(),
        forecast,
    )?;
    debug!(
        n_members = members.len(),
        min_votes,
        hits = table.counts().hits(),
        false_alarms = table.counts().false_alarms(),
        "built NPC ensemble"
    );
    Ok(table)
}
