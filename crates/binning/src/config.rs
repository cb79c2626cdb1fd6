//! Configuration for bin-grid construction.

use crate::error::BinningError;

/// Default bin width: 20 minutes, in seconds.
pub const DEFAULT_WINDOW_SECS: f64 = 20.0 * 60.0;

/// Explicit half-open time range `[start, stop)`, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    start: f64,
    stop: f64,
}

impl TimeRange {
    /// Creates a new range.
    ///
    /// Returns [`BinningError::InvalidRange`] if either end is non-finite or
    /// `stop <= start`.
    pub fn new(start: f64, stop: f64) -> Result<Self, BinningError> {
        if !start.is_finite() || !stop.is_finite() || stop <= start {
            return Err(BinningError::InvalidRange { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Returns the range start.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the range stop (exclusive).
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Returns `stop - start`.
    pub fn length(&self) -> f64 {
        self.stop - self.start
    }
}

/// Configuration for binning a pair of series.
///
/// # Example
///
/// ```
/// use binevent_binning::{BinConfig, TimeRange};
///
/// let range = TimeRange::new(0.0, 86_400.0).unwrap();
/// let config = BinConfig::default().with_window(600.0).with_range(range);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.window(), 600.0);
/// ```
#[derive(Debug, Clone)]
pub struct BinConfig {
    /// Bin width in seconds.
    window: f64,
    /// Explicit range; `None` derives it from the forecast timestamps.
    range: Option<TimeRange>,
    /// Emit per-bin diagnostics.
    verbose: bool,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW_SECS,
            range: None,
            verbose: false,
        }
    }
}

impl BinConfig {
    /// Sets the bin width in seconds.
    pub fn with_window(mut self, window: f64) -> Self {
        self.window = window;
        self
    }

    /// Restricts binning to an explicit range.
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Enables per-bin debug diagnostics. Has no effect on results.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the bin width in seconds.
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Returns the explicit range, if any.
    pub fn range(&self) -> Option<TimeRange> {
        self.range
    }

    /// Returns the verbosity flag.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), BinningError> {
        validate_window(self.window)
    }
}

pub(crate) fn validate_window(window: f64) -> Result<(), BinningError> {
    if !window.is_finite() || window <= 0.0 {
        return Err(BinningError::InvalidWindow { window });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BinConfig::default();
        assert_eq!(cfg.window(), 1200.0);
        assert!(cfg.range().is_none());
        assert!(!cfg.verbose());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let range = TimeRange::new(100.0, 200.0).unwrap();
        let cfg = BinConfig::default()
            .with_window(10.0)
            .with_range(range)
            .with_verbose(true);
        assert_eq!(cfg.window(), 10.0);
        assert_eq!(cfg.range(), Some(range));
        assert!(cfg.verbose());
    }

    #[test]
    fn test_invalid_window() {
        for w in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = BinConfig::default().with_window(w);
            assert!(matches!(
                cfg.validate(),
                Err(BinningError::InvalidWindow { .. })
            ));
        }
    }

    #[test]
    fn test_range_validation() {
        assert!(TimeRange::new(0.0, 1.0).is_ok());
        assert!(TimeRange::new(1.0, 1.0).is_err());
        assert!(TimeRange::new(2.0, 1.0).is_err());
        assert!(TimeRange::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_range_length() {
        let r = TimeRange::new(21_600.0, 108_000.0).unwrap();
        assert_eq!(r.length(), 86_400.0);
    }
}
