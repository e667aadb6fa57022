use crate::routes::api;
use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::catalogs::list_catalogs,
        api::v0::catalogs::start_session,
        api::v0::sessions::list_sessions,
        api::v0::sessions::get_session,
        api::v0::sessions::peek_next_question,
        api::v0::sessions::submit_response,
        api::v0::sessions::get_effective_responses,
        api::v0::sessions::get_progress,
    ),
    tags(
        (name = "util", description = "Utility endpoints"),
        (name = "v0/catalogs", description = "Question catalogs and interview entry points"),
        (name = "v0/sessions", description = "Assessment sessions, answers and progress"),
    )
)]
struct ApiDoc;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/api/swagger-ui").url("/api/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/api/redoc", ApiDoc::openapi()))
        // There is no need to create `RapiDoc::with_openapi` because the OpenApi is served
        // via SwaggerUi instead we only make rapidoc to point to the existing doc.
        .merge(RapiDoc::new("/api/api-docs/openapi.json").path("/api/rapidoc"))
}
