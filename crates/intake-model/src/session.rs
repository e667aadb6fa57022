use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[repr(u16)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, ToSchema, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Draft = 1,
    InProgress = 2,
    Completed = 3,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentSession {
    pub session_id: Uuid,
    pub client_id: Uuid,
    pub catalog_id: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_module: Option<String>,
    pub questions_asked: i32,
    pub questions_answered: i32,
    pub started_at: DateTime<Utc>,
    pub last_saved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}
