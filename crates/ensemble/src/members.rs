//! Consistency checks across ensemble members.

use binevent_contingency::EventTable;

use crate::error::EnsembleError;

/// Checks that all members share one bin grid and one set of observations.
///
/// Returns the first member, which supplies the time axis and the
/// observation side of any table built from the ensemble.
pub fn validate(members: &[EventTable]) -> Result<&EventTable, EnsembleError> {
    let (first, rest) = members.split_first().ok_or(EnsembleError::NoMembers)?;
    for (i, member) in rest.iter().enumerate() {
        if member.time() != first.time() {
            return Err(EnsembleError::GridMismatch { member: i + 1 });
        }
        if member.observed() != first.observed() {
            return Err(EnsembleError::ObservationMismatch { member: i + 1 });
        }
    }
    Ok(first)
}
