//! Error types for the binevent-ensemble crate.

use binevent_binning::BinningError;
use binevent_contingency::ContingencyError;

/// Error type for all fallible operations in the binevent-ensemble crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnsembleError {
    /// Returned when the member slice is empty.
    #[error("ensemble has no members")]
    NoMembers,

    /// Returned when a member's bins differ from the first member's.
    #[error("member {member} is not on the same bin grid as member 0")]
    GridMismatch {
        /// Index of the offending member.
        member: usize,
    },

    /// Returned when a member's observed-event flags differ from the first member's.
    #[error("member {member} was verified against different observations than member 0")]
    ObservationMismatch {
        /// Index of the offending member.
        member: usize,
    },

    /// Returned when the NPC vote threshold is zero.
    #[error("min_votes must be >= 1, got {min_votes}")]
    InvalidVotes {
        /// The invalid vote threshold.
        min_votes: usize,
    },

    /// Returned when assembling the ensemble table fails.
    #[error(transparent)]
    Contingency(#[from] ContingencyError),
}

impl From<BinningError> for EnsembleError {
    fn from(e: BinningError) -> Self {
        EnsembleError::Contingency(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_members_display() {
        assert_eq!(EnsembleError::NoMembers.to_string(), "ensemble has no members");
    }

    #[test]
    fn test_grid_mismatch_display() {
        let msg = EnsembleError::GridMismatch { member: 3 }.to_string();
        assert!(msg.contains("member 3"));
        assert!(msg.contains("bin grid"));
    }

    #[test]
    fn test_invalid_votes_display() {
        let err = EnsembleError::InvalidVotes { min_votes: 0 };
        assert_eq!(err.to_string(), "min_votes must be >= 1, got 0");
    }

    #[test]
    fn test_binning_error_converts() {
        let err = EnsembleError::from(BinningError::InvalidWindow { window: -1.0 });
        assert!(matches!(
            err,
            EnsembleError::Contingency(ContingencyError::Binning(_))
        ));
        assert_eq!(err.to_string(), "bin window must be finite and positive, got -1");
    }
}
