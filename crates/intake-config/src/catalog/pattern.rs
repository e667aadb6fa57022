use intake_utils::id_map::ItemId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Topic mapping scanned by the pattern matcher. A topic is gated on a yes-no
/// question and scored from dedicated intensity and frequency follow-ups.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PatternRule {
    /// # Unique identifier for the pattern
    pub id: String,
    /// # Human-readable pattern name
    pub name: String,
    /// # Gating question
    /// A yes-no question; the pattern is only emitted while its effective
    /// answer is yes.
    pub gate: String,
    /// # Intensity source
    /// A scale question whose effective answer feeds the intensity signal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    /// # Frequency source
    /// A frequency question whose effective answer feeds the frequency
    /// bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// # Supporting questions
    /// Pulled to the front of the module pool when the pattern escalates to
    /// high or critical.
    #[serde(default)]
    pub supporting_questions: Vec<String>,
}

impl ItemId for PatternRule {
    type IdType = String;

    fn id(&self) -> Self::IdType {
        self.id.clone()
    }
}

/// Constants for the severity blend. Catalogs may override them; the
/// defaults match the scoring the platform has always used.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct ScoringConfig {
    /// # Blend weights
    pub weights: ScoreWeights,
    /// # Severity classification thresholds
    pub thresholds: PriorityThresholds,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct ScoreWeights {
    pub intensity: f64,
    pub frequency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            intensity: 0.6,
            frequency: 0.4,
        }
    }
}

/// Upper score bounds per severity class; anything above `high` is critical.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case", default)]
pub struct PriorityThresholds {
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            low: 1,
            medium: 2,
            high: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_defaults() {
        let scoring: ScoringConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(scoring.weights, ScoreWeights::default());
        assert_eq!(scoring.thresholds.low, 1);
        assert_eq!(scoring.thresholds.medium, 2);
        assert_eq!(scoring.thresholds.high, 4);
    }

    #[test]
    fn test_scoring_override() {
        let scoring: ScoringConfig =
            serde_yml::from_str("weights:\n  intensity: 0.7\n  frequency: 0.3\n").unwrap();
        assert_eq!(scoring.weights.intensity, 0.7);
        assert_eq!(scoring.thresholds, PriorityThresholds::default());
    }
}
