use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use intake_model::status::ComponentStatus;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(get_status)).with_state(())
}

#[derive(Debug, Clone, ToSchema)]
pub(crate) struct Status {
    database: ComponentStatus,
}

impl Status {
    fn status_code(&self) -> StatusCode {
        if self.database.is_ok() {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<Status> for intake_model::status::Status {
    fn from(val: Status) -> Self {
        intake_model::status::Status {
            database: val.database.into_message(),
        }
    }
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let status: intake_model::status::Status = self.into();
        (status_code, Json(status)).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/status",
    responses(
        (status = OK, description = "Server is ok", body = Status, example = json!( intake_model::status::Status { database: json!("ok") } )),
    ),
    tag = "util"
)]
#[instrument(skip_all)]
pub(crate) async fn get_status(Extension(conn): Extension<DatabaseConnection>) -> impl IntoResponse {
    Status {
        database: intake_engine::status::database_status(&conn, None).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        let status = Status {
            database: ComponentStatus::ok(),
        };
        let model: intake_model::status::Status = status.into();
        assert_eq!(serde_json::to_string(&model).unwrap(), r#"{"database":"ok"}"#);
    }

    #[test]
    fn test_error_text_is_passed_through() {
        let status = Status {
            database: ComponentStatus::from_error_text("no route to host"),
        };
        assert_eq!(status.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let model: intake_model::status::Status = status.into();
        assert_eq!(serde_json::to_string(&model).unwrap(), r#"{"database":"no route to host"}"#);
    }
}
