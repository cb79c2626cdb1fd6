//! Serializable scorecards and scorecard comparisons.

use serde::Serialize;

use crate::error::ContingencyError;
use crate::metrics::{Metric, Score};
use crate::table::ContingencyTable;

/// A metric that could not be computed, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UndefinedScore {
    pub metric: String,
    pub reason: String,
}

/// All skill scores for one contingency table.
///
/// Undefined metrics serialize as `null` and are listed with their reason
/// in `undefined`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillScores {
    pub counts: ContingencyTable,
    pub pod: Option<f64>,
    pub pofd: Option<f64>,
    pub bias: Option<f64>,
    pub hss: Option<f64>,
    pub far: Option<f64>,
    pub ts: Option<f64>,
    pub undefined: Vec<UndefinedScore>,
}

impl SkillScores {
    /// Scores `table` on every [`Metric`].
    pub fn from_table(table: &ContingencyTable) -> Self {
        let mut undefined = Vec::new();
        let mut value = |score: Score| match score {
            Ok(v) => Some(v),
            Err(e) => {
                undefined.push(UndefinedScore {
                    metric: e.metric().to_string(),
                    reason: e.to_string(),
                });
                None
            }
        };
        let pod = value(table.pod());
        let pofd = value(table.pofd());
        let hss = value(table.heidke());
        let bias = value(table.bias());
        let far = value(table.false_alarm_ratio());
        let ts = value(table.threat_score());
        Self {
            counts: *table,
            pod,
            pofd,
            bias,
            hss,
            far,
            ts,
            undefined,
        }
    }

    /// Returns the value of `metric`, or `None` if it is undefined.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ProbabilityOfDetection => self.pod,
            Metric::ProbabilityOfFalseDetection => self.pofd,
            Metric::Bias => self.bias,
            Metric::HeidkeSkillScore => self.hss,
            Metric::FalseAlarmRatio => self.far,
            Metric::ThreatScore => self.ts,
        }
    }
}

/// Per-metric change from a reference scorecard to a candidate.
///
/// Each entry is `candidate − reference`, except `bias`, which compares
/// distance from an unbiased forecast: `|1 − reference| − |1 − candidate|`.
/// Positive values therefore mean the candidate is closer to unbiased. An
/// entry is `None` when either side is undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreDiff {
    pub pod: Option<f64>,
    pub pofd: Option<f64>,
    pub bias: Option<f64>,
    pub hss: Option<f64>,
    pub far: Option<f64>,
    pub ts: Option<f64>,
}

impl ScoreDiff {
    pub fn between(reference: &SkillScores, candidate: &SkillScores) -> Self {
        let diff = |metric: Metric| {
            let (r, c) = (reference.get(metric)?, candidate.get(metric)?);
            Some(match metric {
                Metric::Bias => (1.0 - r).abs() - (1.0 - c).abs(),
                _ => c - r,
            })
        };
        Self {
            pod: diff(Metric::ProbabilityOfDetection),
            pofd: diff(Metric::ProbabilityOfFalseDetection),
            bias: diff(Metric::Bias),
            hss: diff(Metric::HeidkeSkillScore),
            far: diff(Metric::FalseAlarmRatio),
            ts: diff(Metric::ThreatScore),
        }
    }
}

/// Serialize any report to a pretty-printed JSON string.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, ContingencyError> {
    serde_json::to_string_pretty(report).map_err(|e| ContingencyError::Serialization {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scores_from_mixed_table() {
        let s = SkillScores::from_table(&ContingencyTable::new(1, 1, 1, 3));
        assert_relative_eq!(s.pod.unwrap(), 0.5);
        assert_relative_eq!(s.pofd.unwrap(), 0.25);
        assert_relative_eq!(s.hss.unwrap(), 0.25);
        assert!(s.undefined.is_empty());
    }

    #[test]
    fn test_undefined_scores_are_listed() {
        let s = SkillScores::from_table(&ContingencyTable::new(0, 0, 2, 3));
        assert_eq!(s.pod, None);
        assert_eq!(s.bias, None);
        assert_eq!(s.get(Metric::ProbabilityOfFalseDetection), Some(0.4));
        let names: Vec<&str> = s.undefined.iter().map(|u| u.metric.as_str()).collect();
        assert_eq!(names, vec!["PoD", "Bias"]);
        assert!(s.undefined[0].reason.contains("no observed events"));
    }

    #[test]
    fn test_diff_bias_uses_distance_from_one() {
        let reference = SkillScores::from_table(&ContingencyTable::new(2, 2, 4, 10)); // bias 1.5
        let candidate = SkillScores::from_table(&ContingencyTable::new(3, 1, 2, 10)); // bias 1.25
        let d = ScoreDiff::between(&reference, &candidate);
        assert_relative_eq!(d.bias.unwrap(), 0.25);
        assert_relative_eq!(d.pod.unwrap(), 0.25);
    }

    #[test]
    fn test_diff_undefined_side_is_none() {
        let reference = SkillScores::from_table(&ContingencyTable::new(0, 0, 1, 1));
        let candidate = SkillScores::from_table(&ContingencyTable::new(1, 0, 0, 1));
        let d = ScoreDiff::between(&reference, &candidate);
        assert_eq!(d.pod, None);
        assert_relative_eq!(d.pofd.unwrap(), -0.5);
    }

    #[test]
    fn test_to_json_writes_null_for_undefined() {
        let s = SkillScores::from_table(&ContingencyTable::new(0, 0, 0, 4));
        let json = to_json(&s).unwrap();
        assert!(json.contains("\"pod\": null"));
        assert!(json.contains("\"true_negatives\": 4"));
        assert!(json.contains("\"undefined\""));
    }
}
