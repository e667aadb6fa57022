use crate::util::RequireRecord;
use intake_entity::client::{Entity as ClientEntity, Model as Client};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn load_client<C: ConnectionTrait>(conn: &C, client_id: Uuid) -> Result<Client, DbErr> {
        ClientEntity::find_by_id(client_id)
            .one(conn)
            .await
            .require()
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %client_id, "failed to load client"))
    }
}
