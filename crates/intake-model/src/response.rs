use chrono::{DateTime, Utc};
use intake_config::catalog::question::AnswerValue;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// # Response Source
///
/// How an answer entered the record.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Manual,
    AiAssisted,
    Imported,
}

/// # Effective Response
///
/// The latest recorded answer for a question. Earlier answers stay in the
/// append-only history but are superseded by this one.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EffectiveResponse {
    pub question_id: String,
    pub value: AnswerValue,
    pub source: Source,
    pub recorded_at: DateTime<Utc>,
}

/// # Effective Responses
///
/// Per-question latest answers for a session, in first-answered order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EffectiveResponses {
    pub session_id: Uuid,
    pub responses: Vec<EffectiveResponse>,
}
