use intake_entity::{client, response, session};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

/// Creates the schema on a fresh database. Every statement carries
/// `IF NOT EXISTS`, so an already-provisioned database boots unchanged.
pub(crate) async fn bootstrap(conn: &DatabaseConnection) -> Result<(), DbErr> {
    tracing::debug!("bootstrapping the schema");
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    for mut statement in [
        schema.create_table_from_entity(client::Entity),
        schema.create_table_from_entity(session::Entity),
        schema.create_table_from_entity(response::Entity),
    ] {
        conn.execute(backend.build(statement.if_not_exists())).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_test_helpers::{SqliteDb, TestDb};
    use sea_orm::Database;
    use test_log::test;

    // Bootstrap twice over fresh connections to make sure it is idempotent.
    #[test(tokio::test)]
    async fn test_bootstrap_is_idempotent() {
        let db = SqliteDb::new().unwrap();
        for _ in 0..2 {
            let conn = Database::connect(db.db_uri().as_ref()).await.unwrap();
            bootstrap(&conn).await.unwrap();
        }
    }
}
