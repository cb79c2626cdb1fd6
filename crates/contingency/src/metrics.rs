//! Skill scores derived from a contingency table.
//!
//! Every score is a [`Score`]: either a finite value or an
//! [`UndefinedMetric`] naming the metric and why its denominator vanished.
//! Undefined scores are never reported as `0.0` or NaN.

use std::fmt;

use crate::table::ContingencyTable;

/// A skill score, or the reason it is undefined for a table.
pub type Score = Result<f64, UndefinedMetric>;

/// Forecast-verification scores computed from a [`ContingencyTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Probability of detection (hit rate): H / (H + M).
    ProbabilityOfDetection,
    /// Probability of false detection (false alarm rate): FA / (FA + TN).
    ProbabilityOfFalseDetection,
    /// Frequency bias: (H + FA) / (H + M).
    Bias,
    /// Heidke skill score.
    HeidkeSkillScore,
    /// False alarm ratio: FA / (H + FA).
    FalseAlarmRatio,
    /// Threat score (critical success index): H / (H + M + FA).
    ThreatScore,
}

/// How to rank two values of the same metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    HigherIsBetter,
    LowerIsBetter,
    /// Best at exactly 1.0 (unbiased).
    NearestOne,
}

impl Metric {
    /// All metrics, in reporting order.
    pub const ALL: [Metric; 6] = [
        Metric::ProbabilityOfDetection,
        Metric::ProbabilityOfFalseDetection,
        Metric::HeidkeSkillScore,
        Metric::Bias,
        Metric::FalseAlarmRatio,
        Metric::ThreatScore,
    ];

    /// Short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::ProbabilityOfDetection => "PoD",
            Metric::ProbabilityOfFalseDetection => "PoFD",
            Metric::Bias => "Bias",
            Metric::HeidkeSkillScore => "HSS",
            Metric::FalseAlarmRatio => "FAR",
            Metric::ThreatScore => "TS",
        }
    }

    /// Parses a short name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Computes this metric for `table`.
    pub fn compute(&self, table: &ContingencyTable) -> Score {
        match self {
            Metric::ProbabilityOfDetection => table.pod(),
            Metric::ProbabilityOfFalseDetection => table.pofd(),
            Metric::Bias => table.bias(),
            Metric::HeidkeSkillScore => table.heidke(),
            Metric::FalseAlarmRatio => table.false_alarm_ratio(),
            Metric::ThreatScore => table.threat_score(),
        }
    }

    /// Returns how values of this metric are ranked.
    pub fn orientation(&self) -> Orientation {
        match self {
            Metric::Bias => Orientation::NearestOne,
            Metric::ProbabilityOfFalseDetection | Metric::FalseAlarmRatio => {
                Orientation::LowerIsBetter
            }
            _ => Orientation::HigherIsBetter,
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self.orientation() {
            Orientation::HigherIsBetter => candidate > incumbent,
            Orientation::LowerIsBetter => candidate < incumbent,
            Orientation::NearestOne => (candidate - 1.0).abs() < (incumbent - 1.0).abs(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a metric has no value for a given table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UndefinedMetric {
    /// hits + misses = 0.
    #[error("{metric} is undefined: no observed events (hits + misses = 0)")]
    NoObservedEvents { metric: Metric },

    /// false alarms + true negatives = 0.
    #[error("{metric} is undefined: no observed non-events (false alarms + true negatives = 0)")]
    NoObservedNonEvents { metric: Metric },

    /// hits + false alarms = 0.
    #[error("{metric} is undefined: no forecast events (hits + false alarms = 0)")]
    NoForecastEvents { metric: Metric },

    /// The denominator vanished for any other reason (e.g. all bins in one class).
    #[error("{metric} is undefined: degenerate table")]
    DegenerateTable { metric: Metric },
}

impl UndefinedMetric {
    /// Returns the metric that is undefined.
    pub fn metric(&self) -> Metric {
        match *self {
            UndefinedMetric::NoObservedEvents { metric }
            | UndefinedMetric::NoObservedNonEvents { metric }
            | UndefinedMetric::NoForecastEvents { metric }
            | UndefinedMetric::DegenerateTable { metric } => metric,
        }
    }
}

fn ratio(numerator: u64, denominator: u64, undefined: UndefinedMetric) -> Score {
    if denominator == 0 {
        return Err(undefined);
    }
    Ok(numerator as f64 / denominator as f64)
}

impl ContingencyTable {
    /// Probability of detection, H / (H + M).
    pub fn pod(&self) -> Score {
        ratio(
            self.hits(),
            self.observed_events(),
            UndefinedMetric::NoObservedEvents {
                metric: Metric::ProbabilityOfDetection,
            },
        )
    }

    /// Probability of false detection, FA / (FA + TN).
    pub fn pofd(&self) -> Score {
        ratio(
            self.false_alarms(),
            self.false_alarms() + self.true_negatives(),
            UndefinedMetric::NoObservedNonEvents {
                metric: Metric::ProbabilityOfFalseDetection,
            },
        )
    }

    /// Frequency bias, (H + FA) / (H + M).
    pub fn bias(&self) -> Score {
        ratio(
            self.forecast_events(),
            self.observed_events(),
            UndefinedMetric::NoObservedEvents {
                metric: Metric::Bias,
            },
        )
    }

    /// Heidke skill score,
    /// `2(H·TN − M·FA) / ((H+M)(M+TN) + (H+FA)(FA+TN))`.
    pub fn heidke(&self) -> Score {
        let h = self.hits() as f64;
        let m = self.misses() as f64;
        let fa = self.false_alarms() as f64;
        let tn = self.true_negatives() as f64;
        let denominator = (h + m) * (m + tn) + (h + fa) * (fa + tn);
        if denominator == 0.0 {
            return Err(UndefinedMetric::DegenerateTable {
                metric: Metric::HeidkeSkillScore,
            });
        }
        Ok(2.0 * (h * tn - m * fa) / denominator)
    }

    /// False alarm ratio, FA / (H + FA).
    pub fn false_alarm_ratio(&self) -> Score {
        ratio(
            self.false_alarms(),
            self.forecast_events(),
            UndefinedMetric::NoForecastEvents {
                metric: Metric::FalseAlarmRatio,
            },
        )
    }

    /// Threat score, H / (H + M + FA).
    pub fn threat_score(&self) -> Score {
        ratio(
            self.hits(),
            self.hits() + self.misses() + self.false_alarms(),
            UndefinedMetric::DegenerateTable {
                metric: Metric::ThreatScore,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scores_for_mixed_table() {
        let t = ContingencyTable::new(1, 1, 1, 3);
        assert_relative_eq!(t.pod().unwrap(), 0.5);
        assert_relative_eq!(t.pofd().unwrap(), 0.25);
        assert_relative_eq!(t.bias().unwrap(), 1.0);
        assert_relative_eq!(t.false_alarm_ratio().unwrap(), 0.5);
        assert_relative_eq!(t.threat_score().unwrap(), 1.0 / 3.0);
        // 2(1·3 − 1·1) / ((2)(4) + (2)(4)) = 4 / 16
        assert_relative_eq!(t.heidke().unwrap(), 0.25);
    }

    #[test]
    fn perfect_forecast() {
        let t = ContingencyTable::new(4, 0, 0, 6);
        assert_relative_eq!(t.pod().unwrap(), 1.0);
        assert_relative_eq!(t.pofd().unwrap(), 0.0);
        assert_relative_eq!(t.bias().unwrap(), 1.0);
        assert_relative_eq!(t.heidke().unwrap(), 1.0);
    }

    #[test]
    fn no_observed_events_is_undefined() {
        let t = ContingencyTable::new(0, 0, 2, 5);
        assert_eq!(
            t.pod(),
            Err(UndefinedMetric::NoObservedEvents {
                metric: Metric::ProbabilityOfDetection
            })
        );
        assert_eq!(
            t.bias(),
            Err(UndefinedMetric::NoObservedEvents {
                metric: Metric::Bias
            })
        );
        assert!(t.pofd().is_ok());
    }

    #[test]
    fn no_observed_non_events_is_undefined() {
        let t = ContingencyTable::new(3, 1, 0, 0);
        assert!(matches!(
            t.pofd(),
            Err(UndefinedMetric::NoObservedNonEvents { .. })
        ));
    }

    #[test]
    fn heidke_degenerate_table() {
        assert!(matches!(
            ContingencyTable::default().heidke(),
            Err(UndefinedMetric::DegenerateTable {
                metric: Metric::HeidkeSkillScore
            })
        ));
        // All true negatives: (0)(TN) + (0)(TN) = 0.
        assert!(ContingencyTable::new(0, 0, 0, 12).heidke().is_err());
        // All hits.
        assert!(ContingencyTable::new(9, 0, 0, 0).heidke().is_err());
    }

    #[test]
    fn heidke_worst_case() {
        let t = ContingencyTable::new(0, 5, 5, 0);
        assert_relative_eq!(t.heidke().unwrap(), -1.0);
    }

    #[test]
    fn false_alarm_ratio_without_forecasts() {
        let t = ContingencyTable::new(0, 3, 0, 4);
        assert!(matches!(
            t.false_alarm_ratio(),
            Err(UndefinedMetric::NoForecastEvents { .. })
        ));
    }

    #[test]
    fn undefined_display_names_metric() {
        let e = UndefinedMetric::NoObservedEvents {
            metric: Metric::ProbabilityOfDetection,
        };
        assert_eq!(
            e.to_string(),
            "PoD is undefined: no observed events (hits + misses = 0)"
        );
        assert_eq!(e.metric(), Metric::ProbabilityOfDetection);
    }

    #[test]
    fn compute_dispatches() {
        let t = ContingencyTable::new(2, 2, 1, 5);
        for metric in Metric::ALL {
            assert_eq!(metric.compute(&t), match metric {
                Metric::ProbabilityOfDetection => t.pod(),
                Metric::ProbabilityOfFalseDetection => t.pofd(),
                Metric::Bias => t.bias(),
                Metric::HeidkeSkillScore => t.heidke(),
                Metric::FalseAlarmRatio => t.false_alarm_ratio(),
                Metric::ThreatScore => t.threat_score(),
            });
        }
    }

    #[test]
    fn names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()), Some(metric));
        }
        assert_eq!(Metric::from_name("hss"), Some(Metric::HeidkeSkillScore));
        assert_eq!(Metric::from_name("rmse"), None);
    }

    #[test]
    fn orientation_ranking() {
        assert!(Metric::HeidkeSkillScore.is_better(0.4, 0.3));
        assert!(Metric::ProbabilityOfFalseDetection.is_better(0.1, 0.2));
        assert!(Metric::Bias.is_better(0.95, 1.2));
        assert!(!Metric::Bias.is_better(1.1, 0.95));
    }
}
