use clap::Parser;
use intake_engine::oracle::openai::{OpenAiOracle, OracleConfig};
use intake_utils::loader::Loader;
use intake_utils::net::create_listener;
use sea_orm::{ConnectOptions, Database};
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

use crate::app::AppConfig;
use crate::opt::{Commands, Db, Run};

mod app;
mod client;
mod db;
mod opt;
mod routes;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Error)]
enum ServerError {
    #[error(transparent)]
    Tracing(#[from] intake_utils::tracing::Error),

    #[error(transparent)]
    Loading(#[from] intake_utils::loader::error::LoadingError),

    #[error(transparent)]
    Catalog(#[from] intake_config::catalog::error::CatalogError),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn build_connect_options(db: &Db) -> ConnectOptions {
    let mut options = ConnectOptions::new(db.db_url.clone());
    if let Some(min_connections) = db.db_min_connections {
        options.min_connections(min_connections);
    }
    if let Some(max_connections) = db.db_max_connections {
        options.max_connections(max_connections);
    }
    options
}

async fn run(opt: Run) -> Result<(), ServerError> {
    intake_utils::tracing::setup(
        intake_utils::tracing::TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .env(opt.env.clone())
            .build(),
    )?;
    tracing::info!("starting intake server");

    let loader = Loader::from_url(&opt.catalogs)?;
    let catalogs = intake_config::catalog::load(loader).await?;
    tracing::info!(catalogs = catalogs.catalogs().len(), "catalogs loaded");

    tracing::info!("connecting to database");
    let conn = Database::connect(build_connect_options(&opt.db)).await?;
    db::bootstrap(&conn).await?;

    let oracle = if opt.oracle.is_configured() {
        tracing::info!("oracle tie-breaking enabled");
        Some(OpenAiOracle::new(OracleConfig::from(opt.oracle)))
    } else {
        tracing::info!("no oracle configured, selection stays deterministic");
        None
    };

    let app = app::create_app(AppConfig::new(catalogs, oracle), conn);

    let listener = create_listener((opt.host, opt.port), (DEFAULT_HOST, DEFAULT_PORT)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let opt = opt::Cli::parse();

    match opt.command {
        Commands::Run(opt) => run(opt).await?,
    }

    Ok(())
}
