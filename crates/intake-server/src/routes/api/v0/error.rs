use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use intake_engine::error::EngineError;
use sea_orm::DbErr;
use std::error::Error;

/// Route-facing wrapper around engine failures. Client mistakes keep their
/// message; everything else is logged and surfaced as an opaque 500.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Engine(error) = self;
        match &error {
            EngineError::UnknownCatalog { .. } | EngineError::Database(DbErr::RecordNotFound(_)) => {
                (StatusCode::NOT_FOUND, error.to_string()).into_response()
            }
            EngineError::UnknownQuestion { .. } | EngineError::InvalidValue(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()).into_response()
            }
            EngineError::SealedSession { .. } => (StatusCode::CONFLICT, error.to_string()).into_response(),
            EngineError::Database(_) | EngineError::Decode(_) | EngineError::Convert(_) => {
                tracing::error!(error = &error as &dyn Error, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
