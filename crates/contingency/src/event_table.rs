//! Binary event tables: per-bin arrays plus their contingency counts.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use binevent_binning::{BinConfig, BinnedPair, Series, Thresholds, bin_pair, classify};
use tracing::debug;

use crate::error::ContingencyError;
use crate::metrics::Score;
use crate::table::{ContingencyTable, Outcome};

/// The result of verifying one forecast series against one observation series.
///
/// Keeps the bin-indexed time axis, both per-bin maxima and both event-flag
/// arrays for downstream use, alongside the contingency counts derived from
/// them. Tables combine with `+`, which concatenates the bins and sums the
/// counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTable {
    time: Vec<f64>,
    obsmax: Vec<Option<f64>>,
    modmax: Vec<Option<f64>>,
    observed: Vec<Option<bool>>,
    forecast: Vec<Option<bool>>,
    counts: ContingencyTable,
}

impl EventTable {
    /// Bins, classifies and counts an observation/forecast pair.
    ///
    /// # Errors
    ///
    /// Returns [`ContingencyError::Binning`] for invalid windows or ranges
    /// (see [`bin_pair`]).
    pub fn build(
        observed: &Series,
        forecast: &Series,
        thresholds: Thresholds,
        config: &BinConfig,
    ) -> Result<Self, ContingencyError> {
        let pair = bin_pair(observed, forecast, config)?;
        let table = Self::from_binned(pair, thresholds);
        debug!(
            hits = table.counts.hits(),
            misses = table.counts.misses(),
            false_alarms = table.counts.false_alarms(),
            true_negatives = table.counts.true_negatives(),
            n_missing = table.n_missing(),
            "built event table"
        );
        Ok(table)
    }

    /// Classifies and counts already-binned maxima.
    pub fn from_binned(pair: BinnedPair, thresholds: Thresholds) -> Self {
        let (observed, forecast) = pair.classify(&thresholds).into_parts();
        let (time, obsmax, modmax) = pair.into_parts();
        let mut table = Self {
            time,
            obsmax,
            modmax,
            observed,
            forecast,
            counts: ContingencyTable::default(),
        };
        table.recount();
        table
    }

    /// Assembles a table from precomputed event flags.
    ///
    /// Used when the forecast flags do not come from thresholding `modmax`
    /// directly, e.g. ensemble votes.
    pub fn from_flags(
        time: Vec<f64>,
        obsmax: Vec<Option<f64>>,
        modmax: Vec<Option<f64>>,
        observed: Vec<Option<bool>>,
        forecast: Vec<Option<bool>>,
    ) -> Result<Self, ContingencyError> {
        let pair = BinnedPair::from_parts(time, obsmax, modmax)?;
        if observed.len() != pair.len() || forecast.len() != pair.len() {
            return Err(ContingencyError::FlagLengthMismatch {
                observed: observed.len(),
                forecast: forecast.len(),
            });
        }
        let (time, obsmax, modmax) = pair.into_parts();
        let mut table = Self {
            time,
            obsmax,
            modmax,
            observed,
            forecast,
            counts: ContingencyTable::default(),
        };
        table.recount();
        Ok(table)
    }

    /// Rebuilds flags and counts from the retained maxima with new thresholds.
    pub fn reclassify(&self, thresholds: Thresholds) -> Self {
        let mut table = Self {
            time: self.time.clone(),
            obsmax: self.obsmax.clone(),
            modmax: self.modmax.clone(),
            observed: classify(&self.obsmax, thresholds.observation()),
            forecast: classify(&self.modmax, thresholds.forecast()),
            counts: ContingencyTable::default(),
        };
        table.recount();
        table
    }

    fn recount(&mut self) {
        self.counts = self
            .observed
            .iter()
            .zip(&self.forecast)
            .fold(ContingencyTable::default(), |mut acc, (o, f)| {
                if let (Some(o), Some(f)) = (o, f) {
                    acc.record(Outcome::from_flags(*o, *f));
                }
                acc
            });
    }

    /// Returns the start time of each bin.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Returns the per-bin observation maxima.
    pub fn obsmax(&self) -> &[Option<f64>] {
        &self.obsmax
    }

    /// Returns the per-bin forecast maxima.
    pub fn modmax(&self) -> &[Option<f64>] {
        &self.modmax
    }

    /// Returns the observed-event flags.
    pub fn observed(&self) -> &[Option<bool>] {
        &self.observed
    }

    /// Returns the forecast-event flags.
    pub fn forecast(&self) -> &[Option<bool>] {
        &self.forecast
    }

    /// Returns the contingency counts.
    pub fn counts(&self) -> ContingencyTable {
        self.counts
    }

    /// Returns the number of bins, including bins without data.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the table has no bins.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the number of bins that entered the counts.
    pub fn n_scored(&self) -> usize {
        self.counts.total() as usize
    }

    /// Returns the number of bins left out for lack of data.
    pub fn n_missing(&self) -> usize {
        self.len() - self.n_scored()
    }

    /// Probability of detection.
    pub fn pod(&self) -> Score {
        self.counts.pod()
    }

    /// Probability of false detection.
    pub fn pofd(&self) -> Score {
        self.counts.pofd()
    }

    /// Frequency bias.
    pub fn bias(&self) -> Score {
        self.counts.bias()
    }

    /// Heidke skill score.
    pub fn heidke(&self) -> Score {
        self.counts.heidke()
    }
}

impl Add for EventTable {
    type Output = EventTable;

    fn add(mut self, rhs: Self) -> Self {
        self.time.extend(rhs.time);
        self.obsmax.extend(rhs.obsmax);
        self.modmax.extend(rhs.modmax);
        self.observed.extend(rhs.observed);
        self.forecast.extend(rhs.forecast);
        self.counts += rhs.counts;
        self
    }
}

impl AddAssign for EventTable {
    fn add_assign(&mut self, rhs: Self) {
        *self = std::mem::take(self) + rhs;
    }
}

impl Sum for EventTable {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a EventTable> for EventTable {
    fn sum<I: Iterator<Item = &'a EventTable>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, t| {
            acc.time.extend_from_slice(&t.time);
            acc.obsmax.extend_from_slice(&t.obsmax);
            acc.modmax.extend_from_slice(&t.modmax);
            acc.observed.extend_from_slice(&t.observed);
            acc.forecast.extend_from_slice(&t.forecast);
            acc.counts += t.counts;
            acc
        })
    }
}
