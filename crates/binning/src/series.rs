//! Validated (timestamp, magnitude) series.

use crate::error::BinningError;

/// An irregularly sampled time series of scalar magnitudes.
///
/// Guarantees:
/// - `time` and `value` have the same length
/// - every timestamp is finite
/// - timestamps are non-decreasing
///
/// Timestamps are seconds on any epoch shared by the series being compared.
/// Values may be NaN; a NaN value marks an absent sample and never
/// contributes to a bin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    time: Vec<f64>,
    value: Vec<f64>,
}

impl Series {
    /// Creates a new `Series` after validating the arrays.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`BinningError::LengthMismatch`] | `time.len() != value.len()` |
    /// | [`BinningError::NonFiniteTimestamp`] | a timestamp is NaN or infinite |
    /// | [`BinningError::UnsortedTimestamps`] | a timestamp is smaller than its predecessor |
    pub fn new(time: Vec<f64>, value: Vec<f64>) -> Result<Self, BinningError> {
        if time.len() != value.len() {
            return Err(BinningError::LengthMismatch {
                times: time.len(),
                values: value.len(),
            });
        }
        if let Some(index) = time.iter().position(|t| !t.is_finite()) {
            return Err(BinningError::NonFiniteTimestamp { index });
        }
        if let Some(index) = time.windows(2).position(|w| w[1] < w[0]) {
            return Err(BinningError::UnsortedTimestamps { index: index + 1 });
        }
        Ok(Self { time, value })
    }

    /// Returns the timestamps.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Returns the magnitudes.
    pub fn value(&self) -> &[f64] {
        &self.value
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the earliest and latest timestamps, or `None` if empty.
    pub fn span(&self) -> Option<(f64, f64)> {
        match (self.time.first(), self.time.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }

    /// Returns the values whose timestamps fall in `[start, stop)`.
    pub fn values_between(&self, start: f64, stop: f64) -> &[f64] {
        let lo = self.time.partition_point(|&t| t < start);
        let hi = lo + self.time[lo..].partition_point(|&t| t < stop);
        &self.value[lo..hi]
    }
}
