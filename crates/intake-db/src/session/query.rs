use crate::util::RequireRecord;
use intake_entity::client::{Entity as ClientEntity, Model as Client};
use intake_entity::session;
use intake_entity::session::{Entity as SessionEntity, Model as Session};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn load_session<C: ConnectionTrait>(conn: &C, session_id: Uuid) -> Result<Session, DbErr> {
        SessionEntity::find_by_id(session_id)
            .one(conn)
            .await
            .require()
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %session_id, "failed to load session"))
    }

    /// Session together with its client record; the selector needs the
    /// client's demographics for gender-gated questions.
    pub async fn load_session_with_client<C: ConnectionTrait>(
        conn: &C,
        session_id: Uuid,
    ) -> Result<(Session, Client), DbErr> {
        let (session, client) = SessionEntity::find_by_id(session_id)
            .find_also_related(ClientEntity)
            .one(conn)
            .await
            .require()
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %session_id, "failed to load session"))?;
        let client = client.ok_or_else(|| {
            tracing::error!(%session_id, "session has no client record");
            DbErr::RecordNotFound("client not found for session".to_owned())
        })?;
        Ok((session, client))
    }

    pub async fn load_sessions<C: ConnectionTrait>(conn: &C, client_id: Uuid) -> Result<Vec<Session>, DbErr> {
        SessionEntity::find()
            .filter(session::Column::ClientId.eq(client_id))
            .order_by_desc(session::Column::StartedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %client_id, "failed to load sessions"))
    }
}
