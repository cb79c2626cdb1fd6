//! Threshold classification of per-bin maxima.

use crate::error::BinningError;

/// Event thresholds for the observation and forecast sides.
///
/// The two sides are independent: a forecast can be scored against a lower
/// (or higher) threshold than the observations it is verified against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    observation: f64,
    forecast: f64,
}

impl Thresholds {
    /// Creates thresholds with explicit observation and forecast values.
    ///
    /// Returns [`BinningError::InvalidThreshold`] if either is non-finite.
    pub fn new(observation: f64, forecast: f64) -> Result<Self, BinningError> {
        check_finite("observation", observation)?;
        check_finite("forecast", forecast)?;
        Ok(Self {
            observation,
            forecast,
        })
    }

    /// Uses the same threshold on both sides.
    pub fn uniform(threshold: f64) -> Result<Self, BinningError> {
        Self::new(threshold, threshold)
    }

    /// Replaces the forecast threshold, keeping the observation threshold.
    pub fn with_forecast(self, forecast: f64) -> Result<Self, BinningError> {
        Self::new(self.observation, forecast)
    }

    /// Returns the observation threshold.
    pub fn observation(&self) -> f64 {
        self.observation
    }

    /// Returns the forecast threshold.
    pub fn forecast(&self) -> f64 {
        self.forecast
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), BinningError> {
    if !value.is_finite() {
        return Err(BinningError::InvalidThreshold { name, value });
    }
    Ok(())
}

/// Flags each bin as an event when its maximum reaches `threshold`.
///
/// Bins without data stay `None`.
pub fn classify(maxima: &[Option<f64>], threshold: f64) -> Vec<Option<bool>> {
    maxima.iter().map(|m| m.map(|v| v >= threshold)).collect()
}

/// Per-bin event flags for both sides of a binned pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    observed: Vec<Option<bool>>,
    forecast: Vec<Option<bool>>,
}

impl Classification {
    pub(crate) fn new(observed: Vec<Option<bool>>, forecast: Vec<Option<bool>>) -> Self {
        Self { observed, forecast }
    }

    /// Returns the observed-event flags.
    pub fn observed(&self) -> &[Option<bool>] {
        &self.observed
    }

    /// Returns the forecast-event flags.
    pub fn forecast(&self) -> &[Option<bool>] {
        &self.forecast
    }

    /// Splits into `(observed, forecast)` flag vectors.
    pub fn into_parts(self) -> (Vec<Option<bool>>, Vec<Option<bool>>) {
        (self.observed, self.forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::BinnedPair;

    #[test]
    fn classify_inclusive_threshold() {
        let flags = classify(&[Some(0.3), Some(0.29), None, Some(-1.0)], 0.3);
        assert_eq!(flags, vec![Some(true), Some(false), None, Some(false)]);
    }

    #[test]
    fn thresholds_uniform() {
        let t = Thresholds::uniform(0.3).unwrap();
        assert_eq!(t.observation(), 0.3);
        assert_eq!(t.forecast(), 0.3);
    }

    #[test]
    fn thresholds_with_forecast_override() {
        let t = Thresholds::uniform(0.3).unwrap().with_forecast(0.205).unwrap();
        assert_eq!(t.observation(), 0.3);
        assert_eq!(t.forecast(), 0.205);
    }

    #[test]
    fn thresholds_reject_non_finite() {
        assert_eq!(
            Thresholds::new(0.3, f64::INFINITY),
            Err(BinningError::InvalidThreshold {
                name: "forecast",
                value: f64::INFINITY
            })
        );
        assert!(matches!(
            Thresholds::uniform(f64::NAN),
            Err(BinningError::InvalidThreshold {
                name: "observation",
                ..
            })
        ));
    }

    #[test]
    fn pair_classification_uses_separate_thresholds() {
        let pair = BinnedPair::from_parts(
            vec![0.0, 1.0, 2.0],
            vec![Some(0.5), Some(0.1), None],
            vec![Some(0.25), Some(0.21), Some(0.1)],
        )
        .unwrap();
        let t = Thresholds::new(0.3, 0.2).unwrap();
        let c = pair.classify(&t);
        assert_eq!(c.observed(), &[Some(true), Some(false), None]);
        assert_eq!(c.forecast(), &[Some(true), Some(true), Some(false)]);
    }
}
