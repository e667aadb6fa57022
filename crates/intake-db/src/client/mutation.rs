use crate::util::RequireRecord;
use intake_entity::client;
use intake_entity::client::{ActiveModel as ActiveClient, Entity as ClientEntity, Gender, Model as Client};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Clients are created implicitly on first reference. A provided gender
    /// is recorded; an absent one never clears a previously stored value.
    pub async fn ensure_client<C: ConnectionTrait>(
        conn: &C,
        client_id: Uuid,
        gender: Option<Gender>,
    ) -> Result<Client, DbErr> {
        let new_client = ActiveClient {
            id: ActiveValue::Set(client_id),
            gender: ActiveValue::Set(gender),
            created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
        };

        let mut on_conflict = OnConflict::column(client::Column::Id);
        on_conflict.do_nothing();
        ClientEntity::insert(new_client)
            .on_conflict(on_conflict)
            .do_nothing()
            .exec(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %client_id, "failed to ensure client"))?;

        let client = ClientEntity::find_by_id(client_id)
            .one(conn)
            .await
            .require()
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %client_id, "client not found after insertion"),
            )?;

        match gender {
            Some(gender) if client.gender != Some(gender) => {
                let update = ActiveClient {
                    id: ActiveValue::Unchanged(client_id),
                    gender: ActiveValue::Set(Some(gender)),
                    ..Default::default()
                };
                update.update(conn).await.inspect_err(
                    |error| tracing::error!(error = error as &dyn Error, %client_id, "failed to update client gender"),
                )
            }
            _ => Ok(client),
        }
    }
}
