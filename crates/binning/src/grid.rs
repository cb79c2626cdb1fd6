//! Fixed-width bin grids.

use crate::config::{TimeRange, validate_window};
use crate::error::BinningError;
use crate::series::Series;

/// Fraction of a window below which a range remainder counts as rounding noise.
const PARTIAL_TOLERANCE: f64 = 1e-9;

/// Largest number of bins a grid may hold.
pub const MAX_BINS: usize = 1 << 28;

/// Contiguous half-open bins of constant width tiling `[start, stop)`.
///
/// Bin `i` covers `[start + i * window, min(start + (i + 1) * window, stop))`.
/// Only the last bin can be shorter than `window`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGrid {
    start: f64,
    stop: f64,
    window: f64,
    n_bins: usize,
    partial_tail: bool,
}

impl BinGrid {
    /// Tiles an explicit range forward from its start.
    ///
    /// A trailing remainder shorter than `window` becomes a partial last bin
    /// (see [`BinGrid::has_partial_tail`]).
    pub fn for_range(range: TimeRange, window: f64) -> Result<Self, BinningError> {
        validate_window(window)?;
        let exact = range.length() / window;
        let rounded = exact.round();
        let (n_bins, partial_tail) = if (exact - rounded).abs() <= PARTIAL_TOLERANCE {
            (checked_bin_count(rounded)?, false)
        } else {
            (checked_bin_count(exact.floor() + 1.0)?, true)
        };
        Ok(Self {
            start: range.start(),
            stop: range.stop(),
            window,
            n_bins,
            partial_tail,
        })
    }

    /// Tiles the span of a series' timestamps, starting at its first sample.
    ///
    /// Uses `floor((last - first) / window) + 1` full bins, plus however many
    /// more rounding requires, so the last sample is always covered.
    pub fn spanning(series: &Series, window: f64) -> Result<Self, BinningError> {
        validate_window(window)?;
        let (first, last) = series
            .span()
            .ok_or(BinningError::EmptySeries { name: "forecast" })?;
        if last <= first {
            return Err(BinningError::InvalidRange {
                start: first,
                stop: last,
            });
        }
        let mut n_bins = checked_bin_count(((last - first) / window).floor() + 1.0)?;
        while first + n_bins as f64 * window <= last {
            n_bins += 1;
        }
        Ok(Self {
            start: first,
            stop: first + n_bins as f64 * window,
            window,
            n_bins,
            partial_tail: false,
        })
    }

    /// Returns the grid with its partial last bin removed.
    ///
    /// A grid without a partial tail is returned unchanged.
    pub fn without_partial_tail(self) -> Self {
        if !self.partial_tail {
            return self;
        }
        let n_bins = self.n_bins - 1;
        Self {
            stop: self.start + n_bins as f64 * self.window,
            n_bins,
            partial_tail: false,
            ..self
        }
    }

    /// Returns the grid origin.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the exclusive end of the last bin.
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Returns the bin width.
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.n_bins
    }

    /// Returns `true` if the grid has no bins.
    pub fn is_empty(&self) -> bool {
        self.n_bins == 0
    }

    /// Returns `true` if the last bin is shorter than `window`.
    pub fn has_partial_tail(&self) -> bool {
        self.partial_tail
    }

    /// Returns the start of bin `i`.
    pub fn bin_start(&self, i: usize) -> f64 {
        self.start + i as f64 * self.window
    }

    /// Returns the exclusive end of bin `i`.
    pub fn bin_end(&self, i: usize) -> f64 {
        if i + 1 >= self.n_bins {
            self.stop
        } else {
            self.bin_start(i + 1)
        }
    }

    /// Returns the start of every bin.
    pub fn starts(&self) -> Vec<f64> {
        (0..self.n_bins).map(|i| self.bin_start(i)).collect()
    }

    /// Maps a timestamp to the bin containing it, if any.
    pub fn bin_index(&self, t: f64) -> Option<usize> {
        if self.n_bins == 0 || !(t >= self.start && t < self.stop) {
            return None;
        }
        let i = ((t - self.start) / self.window).floor() as usize;
        Some(i.min(self.n_bins - 1))
    }
}

/// Converts a whole-number bin count, rejecting counts above [`MAX_BINS`].
fn checked_bin_count(bins: f64) -> Result<usize, BinningError> {
    if bins <= MAX_BINS as f64 {
        Ok(bins as usize)
    } else {
        Err(BinningError::TooManyBins {
            bins,
            limit: MAX_BINS,
        })
    }
}
