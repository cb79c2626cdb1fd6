//! Contingency error types.

use binevent_binning::BinningError;

/// Errors that can occur while building or reporting event tables.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContingencyError {
    /// Binning or classification of the input series failed.
    #[error(transparent)]
    Binning(#[from] BinningError),

    /// Observed and forecast flag arrays differ in length.
    #[error("observed flags have length {observed}, forecast flags {forecast}")]
    FlagLengthMismatch { observed: usize, forecast: usize },

    /// A threshold sweep was requested with an invalid parameter.
    #[error("invalid sweep: {reason}")]
    InvalidSweep { reason: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
