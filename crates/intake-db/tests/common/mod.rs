pub mod session;

use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(intake_entity::client::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(intake_entity::session::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(intake_entity::response::Entity)))
        .await?;
    Ok(())
}
