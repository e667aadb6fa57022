use intake_entity::client::{Gender, Model as Client};
use intake_entity::session::Model as Session;
use sea_orm::DbConn;
use uuid::Uuid;

pub async fn create_test_client(db: &DbConn) -> Client {
    intake_db::client::Mutation::ensure_client(db, Uuid::new_v4(), Some(Gender::Female))
        .await
        .unwrap()
}

pub async fn create_test_session(db: &DbConn, client_id: Uuid) -> Session {
    intake_db::session::Mutation::new_session(db, client_id, "intake".to_owned())
        .await
        .unwrap()
}
