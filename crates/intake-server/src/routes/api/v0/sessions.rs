use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use intake_config::catalog::question::AnswerValue;
use intake_engine::session;
use intake_model::progress::Progress;
use intake_model::question::{NextQuestion, SubmitResult};
use intake_model::response::{EffectiveResponses, Source};
use intake_model::session::AssessmentSession;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::app::AppConfig;
use crate::client::ExtractClientId;
use crate::routes::api::v0::error::ApiError;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_sessions))
        .nest(
            "/{session_id}",
            Router::new()
                .route("/", get(get_session))
                .route("/questions/next", get(peek_next_question))
                .route("/responses", post(submit_response).get(get_effective_responses))
                .route("/progress", get(get_progress)),
        )
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions",
    params(
        ("X-Client-Id" = Uuid, Header, description = "Client whose sessions are listed"),
    ),
    responses(
        (status = OK, body = Vec<AssessmentSession>, description = "Sessions of the calling client, newest first"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn list_sessions(
    ExtractClientId(client_id): ExtractClientId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Response, ApiError> {
    let sessions = session::list_sessions(&conn, client_id).await?;
    Ok(Json(sessions).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions/{session_id}",
    responses(
        (status = OK, body = AssessmentSession, description = "One session"),
        (status = NOT_FOUND, description = "Unknown session"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn get_session(
    Extension(conn): Extension<DatabaseConnection>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let session = session::load_session(&conn, session_id).await?;
    Ok(Json(session).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions/{session_id}/questions/next",
    responses(
        (status = OK, body = NextQuestion, description = "What should be asked now, without advancing the session"),
        (status = NOT_FOUND, description = "Unknown session"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn peek_next_question(
    Extension(app_config): Extension<AppConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let next = session::next_question(&conn, app_config.catalogs(), app_config.oracle(), session_id).await?;
    Ok(Json(next).into_response())
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct SubmitRequest {
    question_id: String,
    value: AnswerValue,
    #[serde(default)]
    source: Source,
}

#[utoipa::path(
    post,
    path = "/api/v0/sessions/{session_id}/responses",
    request_body = SubmitRequest,
    responses(
        (status = OK, body = SubmitResult, description = "Answer recorded; carries the follow-up question or completion"),
        (status = NOT_FOUND, description = "Unknown session"),
        (status = CONFLICT, description = "Session is completed and sealed"),
        (status = UNPROCESSABLE_ENTITY, description = "Unknown question or ill-shaped value"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn submit_response(
    Extension(app_config): Extension<AppConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Response, ApiError> {
    let result = session::submit_response(
        &conn,
        app_config.catalogs(),
        app_config.oracle(),
        session_id,
        &payload.question_id,
        payload.value,
        payload.source,
    )
    .await?;
    Ok(Json(result).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions/{session_id}/responses",
    responses(
        (status = OK, body = EffectiveResponses, description = "Latest answer per question, in first-answered order"),
        (status = NOT_FOUND, description = "Unknown session"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn get_effective_responses(
    Extension(conn): Extension<DatabaseConnection>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let responses = session::effective_responses(&conn, session_id).await?;
    Ok(Json(responses).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/sessions/{session_id}/progress",
    responses(
        (status = OK, body = Progress, description = "Per-module and overall completion"),
        (status = NOT_FOUND, description = "Unknown session"),
    ),
    tag = "v0/sessions"
)]
pub(crate) async fn get_progress(
    Extension(app_config): Extension<AppConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let progress = session::session_progress(&conn, app_config.catalogs(), session_id).await?;
    Ok(Json(progress).into_response())
}
