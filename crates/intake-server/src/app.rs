use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayerBuilder;
use intake_config::catalog::CatalogConfig;
use intake_engine::oracle::Oracle;
use intake_engine::oracle::openai::OpenAiOracle;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::routes;


struct InnerAppConfig {
    catalogs: CatalogConfig,
    oracle: Option<OpenAiOracle>,
}

/// Shared, cheaply clonable server state handed to handlers as an extension.
#[derive(Clone)]
pub(crate) struct AppConfig(Arc<InnerAppConfig>);

impl AppConfig {
    pub(crate) fn new(catalogs: CatalogConfig, oracle: Option<OpenAiOracle>) -> Self {
        Self(Arc::new(InnerAppConfig { catalogs, oracle }))
    }

    pub(crate) fn catalogs(&self) -> &CatalogConfig {
        &self.0.catalogs
    }

    /// `None` keeps question selection fully deterministic.
    pub(crate) fn oracle(&self) -> Option<&dyn Oracle> {
        self.0.oracle.as_ref().map(|oracle| oracle as &dyn Oracle)
    }
}

pub(crate) fn create_app(app_config: AppConfig, conn: DatabaseConnection) -> Router {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("intake")
        .with_default_metrics()
        .build_pair();

    let api_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(routes::swagger::create_router())
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/catalogs", routes::api::v0::catalogs::create_router())
                .nest("/sessions", routes::api::v0::sessions::create_router())
                .layer(api_cors),
        )
        .route("/api/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer)
        .layer(Extension(app_config))
        .layer(Extension(conn))
}
