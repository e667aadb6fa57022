use intake_model::status::ComponentStatus;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::Query;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use std::error::Error;
use std::time::Duration;
use tokio::time::timeout;
use tracing::instrument;

/// Round-trips a trivial query so the health endpoint reports real database
/// connectivity. Bounded, so a stuck pool cannot hang the probe.
#[instrument(skip_all)]
pub async fn database_status(conn: &DatabaseConnection, duration: Option<Duration>) -> ComponentStatus {
    let mut query = Query::select();
    query.expr(Expr::current_timestamp());
    timeout(
        duration.unwrap_or_else(|| Duration::from_secs(5)),
        conn.execute(conn.get_database_backend().build(&query)),
    )
    .await
    .map_err(|_| DbErr::Custom("health check timed out".to_owned()))
    .and_then(|result| result)
    .inspect_err(|error| tracing::error!(error = error as &dyn Error, "db error during health check"))
    .into()
}
