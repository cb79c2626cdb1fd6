//! The 2×2 contingency table and its combination operator.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::error::ContingencyError;

/// Outcome of comparing one bin's forecast against its observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Forecast yes, observed yes.
    Hit,
    /// Forecast no, observed yes.
    Miss,
    /// Forecast yes, observed no.
    FalseAlarm,
    /// Forecast no, observed no.
    TrueNegative,
}

impl Outcome {
    /// Classifies one bin from its observed and forecast event flags.
    pub fn from_flags(observed: bool, forecast: bool) -> Self {
        match (observed, forecast) {
            (true, true) => Outcome::Hit,
            (true, false) => Outcome::Miss,
            (false, true) => Outcome::FalseAlarm,
            (false, false) => Outcome::TrueNegative,
        }
    }
}

/// Counts of hits, misses, false alarms and true negatives.
///
/// Tables over disjoint bin populations combine with `+`, which is
/// associative and commutative with [`ContingencyTable::default`] as
/// identity, so per-station or per-event tables can be summed in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ContingencyTable {
    hits: u64,
    misses: u64,
    false_alarms: u64,
    true_negatives: u64,
}

impl ContingencyTable {
    /// Creates a table from explicit counts.
    pub fn new(hits: u64, misses: u64, false_alarms: u64, true_negatives: u64) -> Self {
        Self {
            hits,
            misses,
            false_alarms,
            true_negatives,
        }
    }

    /// Accumulates a table from per-bin flags.
    ///
    /// Bins where either flag is `None` have no data and are left out of all
    /// four counts.
    pub fn from_flags(
        observed: &[Option<bool>],
        forecast: &[Option<bool>],
    ) -> Result<Self, ContingencyError> {
        if observed.len() != forecast.len() {
            return Err(ContingencyError::FlagLengthMismatch {
                observed: observed.len(),
                forecast: forecast.len(),
            });
        }
        let mut table = Self::default();
        for (o, f) in observed.iter().zip(forecast) {
            if let (Some(o), Some(f)) = (o, f) {
                table.record(Outcome::from_flags(*o, *f));
            }
        }
        Ok(table)
    }

    /// Adds one classified bin.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::FalseAlarm => self.false_alarms += 1,
            Outcome::TrueNegative => self.true_negatives += 1,
        }
    }

    /// Returns the number of hits.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the number of misses.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Returns the number of false alarms.
    pub fn false_alarms(&self) -> u64 {
        self.false_alarms
    }

    /// Returns the number of true negatives.
    pub fn true_negatives(&self) -> u64 {
        self.true_negatives
    }

    /// Total number of classified bins.
    pub fn total(&self) -> u64 {
        self.hits + self.misses + self.false_alarms + self.true_negatives
    }

    /// Bins with an observed event (hits + misses).
    pub fn observed_events(&self) -> u64 {
        self.hits + self.misses
    }

    /// Bins with a forecast event (hits + false alarms).
    pub fn forecast_events(&self) -> u64 {
        self.hits + self.false_alarms
    }
}

impl Add for ContingencyTable {
    type Output = ContingencyTable;

    fn add(self, rhs: Self) -> Self {
        Self {
            hits: self.hits + rhs.hits,
            misses: self.misses + rhs.misses,
            false_alarms: self.false_alarms + rhs.false_alarms,
            true_negatives: self.true_negatives + rhs.true_negatives,
        }
    }
}

impl AddAssign for ContingencyTable {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ContingencyTable {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a ContingencyTable> for ContingencyTable {
    fn sum<I: Iterator<Item = &'a ContingencyTable>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
