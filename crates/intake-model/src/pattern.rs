use intake_config::catalog::pattern::PriorityThresholds;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Severity
///
/// Priority class assigned to a detected pattern. Ordered from least to
/// most urgent so detected patterns can be ranked directly.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Classifies a rounded composite score against the catalog thresholds.
    pub fn classify(score: u8, thresholds: &PriorityThresholds) -> Self {
        if score <= thresholds.low {
            Self::Low
        } else if score <= thresholds.medium {
            Self::Medium
        } else if score <= thresholds.high {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Whether the pattern is urgent enough to reorder upcoming questions.
    pub fn is_escalating(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// # Detected Pattern
///
/// A pattern rule whose gate question was answered affirmatively, scored
/// from the client's intensity and frequency answers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub supporting_question_ids: Vec<String>,
    /// Unrounded weighted blend of intensity and frequency.
    pub weight: f64,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_severity_boundaries() {
        let thresholds = PriorityThresholds::default();

        assert_eq!(Severity::classify(0, &thresholds), Severity::Low);
        assert_eq!(Severity::classify(1, &thresholds), Severity::Low);
        assert_eq!(Severity::classify(2, &thresholds), Severity::Medium);
        assert_eq!(Severity::classify(3, &thresholds), Severity::High);
        assert_eq!(Severity::classify(4, &thresholds), Severity::High);
        assert_eq!(Severity::classify(5, &thresholds), Severity::Critical);
    }

    #[test]
    fn test_severity_ranks_by_urgency() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);

        assert!(Severity::Critical.is_escalating());
        assert!(Severity::High.is_escalating());
        assert!(!Severity::Medium.is_escalating());
        assert!(!Severity::Low.is_escalating());
    }
}
