use intake_config::catalog::error::ValidationError;
use intake_db::response::mutation::SubmitError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("catalog {catalog_id} is not loaded")]
    UnknownCatalog { catalog_id: String },

    #[error("question {question_id} is not part of catalog {catalog_id}")]
    UnknownQuestion {
        catalog_id: String,
        question_id: String,
    },

    #[error(transparent)]
    InvalidValue(#[from] ValidationError),

    #[error("session {session_id} is completed and sealed")]
    SealedSession { session_id: Uuid },

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Convert(#[from] intake_model_tools::error::Error),
}

impl From<SubmitError> for EngineError {
    fn from(error: SubmitError) -> Self {
        match error {
            SubmitError::Db(error) => Self::Database(error),
            SubmitError::SealedSession { session_id } => Self::SealedSession { session_id },
        }
    }
}
