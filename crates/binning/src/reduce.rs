//! Per-bin maximum extraction for a pair of series.

use tracing::debug;

use crate::classify::{Classification, Thresholds, classify};
use crate::config::BinConfig;
use crate::error::BinningError;
use crate::grid::BinGrid;
use crate::series::Series;

/// Per-bin maxima of an observation and a forecast series on a shared grid.
///
/// `None` marks a bin without any (non-NaN) sample on that side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinnedPair {
    time: Vec<f64>,
    obsmax: Vec<Option<f64>>,
    modmax: Vec<Option<f64>>,
}

impl BinnedPair {
    /// Assembles a pair from per-bin arrays computed elsewhere.
    ///
    /// Returns [`BinningError::PartsLengthMismatch`] if the lengths differ.
    pub fn from_parts(
        time: Vec<f64>,
        obsmax: Vec<Option<f64>>,
        modmax: Vec<Option<f64>>,
    ) -> Result<Self, BinningError> {
        if time.len() != obsmax.len() || time.len() != modmax.len() {
            return Err(BinningError::PartsLengthMismatch {
                time: time.len(),
                obsmax: obsmax.len(),
                modmax: modmax.len(),
            });
        }
        Ok(Self {
            time,
            obsmax,
            modmax,
        })
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

    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if there are no bins.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the number of bins where either side has no data.
    pub fn n_missing(&self) -> usize {
        self.obsmax
            .iter()
            .zip(&self.modmax)
            .filter(|(o, m)| o.is_none() || m.is_none())
            .count()
    }

    /// Classifies both sides against their thresholds.
    pub fn classify(&self, thresholds: &Thresholds) -> Classification {
        Classification::new(
            classify(&self.obsmax, thresholds.observation()),
            classify(&self.modmax, thresholds.forecast()),
        )
    }

    /// Splits the pair into its `(time, obsmax, modmax)` arrays.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Option<f64>>, Vec<Option<f64>>) {
        (self.time, self.obsmax, self.modmax)
    }
}

/// Maximum absolute value of the samples in each bin of `grid`.
///
/// Relies on the series being sorted: each bin's samples are a contiguous
/// run, found with a forward-moving cursor.
pub fn bin_max(series: &Series, grid: &BinGrid) -> Vec<Option<f64>> {
    let times = series.time();
    let values = series.value();
    let mut lo = times.partition_point(|&t| t < grid.start());
    (0..grid.len())
        .map(|i| {
            let end = grid.bin_end(i);
            let hi = lo + times[lo..].partition_point(|&t| t < end);
            let max = binevent_stats::max_abs(&values[lo..hi]);
            lo = hi;
            max
        })
        .collect()
}

/// Bins an observation and a forecast series onto a common grid.
///
/// The grid covers the configured range, or the span of the forecast
/// timestamps if none is set. A partial trailing bin of an explicit range is
/// kept only when at least one series has a sample in it.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`BinningError::InvalidWindow`] | window is non-finite or not positive |
/// | [`BinningError::EmptySeries`] | no range given and the forecast is empty |
/// | [`BinningError::InvalidRange`] | derived range has zero length |
pub fn bin_pair(
    observed: &Series,
    forecast: &Series,
    config: &BinConfig,
) -> Result<BinnedPair, BinningError> {
    config.validate()?;
    let mut grid = match config.range() {
        Some(range) => BinGrid::for_range(range, config.window())?,
        None => BinGrid::spanning(forecast, config.window())?,
    };

    if grid.has_partial_tail() {
        let tail = grid.len() - 1;
        let (start, end) = (grid.bin_start(tail), grid.bin_end(tail));
        let has_data = |s: &Series| binevent_stats::max_abs(s.values_between(start, end)).is_some();
        if !has_data(observed) && !has_data(forecast) {
            debug!(start, end, "dropping empty partial trailing bin");
            grid = grid.without_partial_tail();
        }
    }

    let obsmax = bin_max(observed, &grid);
    let modmax = bin_max(forecast, &grid);
    let time = grid.starts();

    if config.verbose() {
        for ((t, o), m) in time.iter().zip(&obsmax).zip(&modmax) {
            debug!(bin_start = t, obsmax = ?o, modmax = ?m, "bin");
        }
    }

    let pair = BinnedPair {
        time,
        obsmax,
        modmax,
    };
    debug!(
        n_bins = pair.len(),
        n_missing = pair.n_missing(),
        window = grid.window(),
        "binned series pair"
    );
    Ok(pair)
}
