use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use intake_config::catalog::question::Gender;
use intake_engine::session;
use intake_model::catalog::CatalogSummary;
use intake_model::question::NextQuestion;
use intake_model::session::AssessmentSession;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::app::AppConfig;
use crate::client::ExtractClientId;
use crate::routes::api::v0::error::ApiError;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_catalogs))
        .route("/{catalog_id}/sessions", post(start_session))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/catalogs",
    responses(
        (status = OK, body = Vec<CatalogSummary>, description = "Catalogs loaded at startup"),
    ),
    tag = "v0/catalogs"
)]
pub(crate) async fn list_catalogs(Extension(app_config): Extension<AppConfig>) -> impl IntoResponse {
    let summaries: Vec<CatalogSummary> = app_config
        .catalogs()
        .catalogs()
        .values()
        .map(|catalog| CatalogSummary {
            catalog_id: catalog.catalog_id.clone(),
            title: catalog.title.clone(),
            modules: catalog.modules.len(),
            questions: catalog.questions.len(),
        })
        .collect();
    Json(summaries)
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct StartSessionRequest {
    /// Demographic input for gender-gated questions. Left unset, those
    /// questions are simply never offered.
    gender: Option<Gender>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct StartedSession {
    session: AssessmentSession,
    next: NextQuestion,
}

#[utoipa::path(
    post,
    path = "/api/v0/catalogs/{catalog_id}/sessions",
    params(
        ("catalog_id" = String, Path, description = "Catalog to interview against"),
        ("X-Client-Id" = Uuid, Header, description = "Client the session belongs to; created on first use"),
    ),
    request_body = StartSessionRequest,
    responses(
        (status = CREATED, body = StartedSession, description = "New session and the first question to ask"),
        (status = NOT_FOUND, description = "Catalog is not loaded"),
    ),
    tag = "v0/catalogs"
)]
pub(crate) async fn start_session(
    ExtractClientId(client_id): ExtractClientId,
    Extension(app_config): Extension<AppConfig>,
    Extension(conn): Extension<DatabaseConnection>,
    Path(catalog_id): Path<String>,
    payload: Option<Json<StartSessionRequest>>,
) -> Result<Response, ApiError> {
    let gender = payload.and_then(|Json(payload)| payload.gender);
    let (session, next) =
        session::start_session(&conn, app_config.catalogs(), &catalog_id, client_id, gender).await?;
    Ok((StatusCode::CREATED, Json(StartedSession { session, next })).into_response())
}
