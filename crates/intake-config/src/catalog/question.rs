use crate::catalog::error::ValidationError;
use crate::catalog::trigger::ConditionalTrigger;
use heck::ToSnakeCase;
use intake_utils::id_map::ItemId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Question {
    /// # Unique identifier for the question
    /// This ID is used to reference the question within the catalog.
    pub id: String,
    /// # Module this question belongs to
    /// Must reference a module declared in the same catalog.
    pub module: String,
    /// # Prompt shown to the client
    pub prompt: String,
    /// # Essential flag
    /// Essential questions are asked first, before the module sequence, to
    /// bootstrap pattern detection.
    #[serde(default)]
    pub essential: bool,
    /// # Demographic gate
    /// When set, the question is only offered to clients of this gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_specific: Option<Gender>,
    /// # Conditional display rule
    /// When set, the question is a follow-up that only appears while the
    /// rule's dependency is answered accordingly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<ConditionalTrigger>,
    #[serde(flatten)]
    /// # Body of the question
    /// Contains the response type and its options.
    pub body: QuestionBody,
}

impl ItemId for Question {
    type IdType = String;

    fn id(&self) -> Self::IdType {
        self.id.clone()
    }
}

pub trait QuestionExt {
    fn validate(&self, value: &AnswerValue) -> Result<(), ValidationError>;
}

macro_rules! get_answer_value {
    ($value:ident, $variant:ident { $($field:ident),+ }) => {{
        let AnswerValue::$variant { $($field),+ } = $value else {
            let ty: &'static str = $value.into();
            let expected_type: &'static str = stringify!($variant);
            let expected_type = expected_type.to_snake_case();
            return Err(ValidationError::InvalidAnswerType {
                expected_type,
                actual_type: ty.to_string(),
            });
        };
        ($($field),+)
    }};
}

impl QuestionExt for Question {
    fn validate(&self, value: &AnswerValue) -> Result<(), ValidationError> {
        match &self.body {
            QuestionBody::Scale(q) => {
                let value = *get_answer_value!(value, Scale { value });
                if value < q.min || value > q.max {
                    return Err(ValidationError::AnswerOutOfRange {
                        min: q.min,
                        max: q.max,
                        value,
                    });
                }
            }
            QuestionBody::YesNo(_) => {
                get_answer_value!(value, Bool { value });
            }
            QuestionBody::SingleChoice(q) => {
                let value = get_answer_value!(value, Choice { value });
                if !q.options.contains(value) {
                    return Err(ValidationError::InvalidOption {
                        value: value.to_owned(),
                    });
                }
            }
            QuestionBody::MultiSelect(q) => {
                let values = get_answer_value!(value, MultiSelect { values });
                if let Some(unknown) = values.iter().find(|value| !q.options.contains(value)) {
                    return Err(ValidationError::InvalidOption {
                        value: unknown.to_owned(),
                    });
                }
            }
            QuestionBody::Frequency(_) => {
                get_answer_value!(value, Frequency { value });
            }
            QuestionBody::Duration(_) => {
                let (amount, _) = get_answer_value!(value, Duration { amount, unit });
                if !amount.is_finite() || *amount < 0.0 {
                    return Err(ValidationError::InvalidDuration { amount: *amount });
                }
            }
            QuestionBody::Numeric(q) => {
                let value = *get_answer_value!(value, Numeric { value });
                if !value.is_finite()
                    || q.min.is_some_and(|min| value < min)
                    || q.max.is_some_and(|max| value > max)
                {
                    return Err(ValidationError::NumericOutOfRange { value });
                }
            }
            QuestionBody::Text(_) => {
                get_answer_value!(value, Text { value });
            }
        }
        Ok(())
    }
}

/// One recorded answer, tagged with the response type it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema, strum::Display, strum::IntoStaticStr)]
#[schema(example = json!({"type": "scale", "value": 4}))]
#[serde(tag = "type", rename_all = "kebab-case")]
#[strum(serialize_all = "snake_case")]
pub enum AnswerValue {
    Scale { value: u8 },
    Bool { value: bool },
    Choice { value: String },
    MultiSelect { values: Vec<String> },
    Frequency { value: Frequency },
    Duration { amount: f64, unit: DurationUnit },
    Numeric { value: f64 },
    Text { value: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, IntoStaticStr, ToSchema, JsonSchema)]
#[serde(tag = "type", content = "body")]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionBody {
    Scale(ScaleBody),
    YesNo(YesNoBody),
    SingleChoice(ChoiceBody),
    MultiSelect(ChoiceBody),
    Frequency(FrequencyBody),
    Duration(DurationBody),
    Numeric(NumericBody),
    Text(TextBody),
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ScaleBody {
    pub min: u8,
    pub max: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint_max: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct YesNoBody {
    /// # Label for the affirmative option
    pub yes: Option<String>,
    /// # Label for the negative option
    pub no: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ChoiceBody {
    pub options: Vec<String>,
}

/// Frequency questions carry no options; the label set is fixed.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FrequencyBody {}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct DurationBody {}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct NumericBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TextBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Qualitative frequency labels. The ordinal bucket feeds the severity blend
/// in the pattern matcher.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema, JsonSchema, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Frequency {
    MultipleTimesDaily,
    Daily,
    #[serde(rename = "4-6-per-week")]
    #[strum(serialize = "4-6-per-week")]
    FourToSixPerWeek,
    SeveralPerWeek,
    #[serde(rename = "2-3-per-week")]
    #[strum(serialize = "2-3-per-week")]
    TwoToThreePerWeek,
    Weekly,
    FewPerMonth,
    MonthlyOrLess,
}

impl Frequency {
    #[must_use]
    pub fn bucket(self) -> u8 {
        match self {
            Frequency::MultipleTimesDaily | Frequency::Daily => 5,
            Frequency::FourToSixPerWeek | Frequency::SeveralPerWeek => 4,
            Frequency::TwoToThreePerWeek => 3,
            Frequency::Weekly => 2,
            Frequency::FewPerMonth => 1,
            Frequency::MonthlyOrLess => 0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema, JsonSchema, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DurationUnit {
    Days,
    Weeks,
    Months,
    Years,
}
