use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Conditional display rule. The owning question is only offered while the
/// question named in `depends_on` has an effective answer matching `show_if`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConditionalTrigger {
    /// # Question this rule depends on
    /// Must reference another question in the same catalog.
    pub depends_on: String,
    /// # Condition on the dependency's answer
    pub show_if: TriggerAnswer,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema, JsonSchema)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TriggerAnswer {
    /// Matches a yes-no dependency answered with exactly this value.
    Bool { value: bool },
    /// Matches a single-choice dependency answered with exactly this option.
    Choice { value: String },
    /// Matches a multi-select dependency with at least one of these options
    /// selected.
    AnySelected { values: Vec<String> },
    /// Matches a scale or numeric dependency compared against `value`.
    Threshold { op: CompareOp, value: f64 },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CompareOp {
    Equals,
    NotEquals,
    GreaterThan,
    AtLeast,
    LessThan,
    AtMost,
}

impl CompareOp {
    #[must_use]
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            CompareOp::Equals => left == right,
            CompareOp::NotEquals => left != right,
            CompareOp::GreaterThan => left > right,
            CompareOp::AtLeast => left >= right,
            CompareOp::LessThan => left < right,
            CompareOp::AtMost => left <= right,
        }
    }
}
