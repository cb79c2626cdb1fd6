//! Contingency tables and skill scores for binary event forecasts.
//!
//! Builds [`EventTable`]s from observation/forecast series, combines them
//! across stations and events, and scores the resulting 2×2 table. Scores
//! that are undefined for a table (a zero denominator) come back as
//! [`UndefinedMetric`] rather than a number.

mod aggregate;
mod error;
mod event_table;
mod metrics;
mod output;
mod sweep;
mod table;

pub use aggregate::{Aggregate, Case, aggregate, par_build};
pub use error::ContingencyError;
pub use event_table::EventTable;
pub use metrics::{Metric, Orientation, Score, UndefinedMetric};
pub use output::{ScoreDiff, SkillScores, UndefinedScore, to_json};
pub use sweep::{SweepPoint, best_threshold, scaled_thresholds, sweep};
pub use table::{ContingencyTable, Outcome};
