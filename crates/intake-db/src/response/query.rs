use indexmap::IndexMap;
use intake_entity::response;
use intake_entity::response::{Entity as ResponseEntity, Model as Response};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    /// Full audit history for one session, oldest record first. Ties on the
    /// timestamp are ordered by the v7 record id, so later appends sort last.
    pub async fn load_responses<C: ConnectionTrait>(conn: &C, session_id: Uuid) -> Result<Vec<Response>, DbErr> {
        ResponseEntity::find()
            .filter(response::Column::SessionId.eq(session_id))
            .order_by_asc(response::Column::RecordedAt)
            .order_by_asc(response::Column::Id)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %session_id, "failed to load responses"),
            )
    }

    /// Latest record per question id. Map positions follow the first time a
    /// question was answered.
    pub async fn load_effective<C: ConnectionTrait>(
        conn: &C,
        session_id: Uuid,
    ) -> Result<IndexMap<String, Response>, DbErr> {
        Ok(fold_effective(Self::load_responses(conn, session_id).await?))
    }

    /// Distinct question ids with at least one record. Duplicate re-answers
    /// must not inflate this counter.
    pub async fn count_answered<C: ConnectionTrait>(conn: &C, session_id: Uuid) -> Result<i32, DbErr> {
        Ok(Self::load_effective(conn, session_id).await?.len() as i32)
    }
}

/// Folds an ordered history into the effective view; the last record per
/// question wins.
pub fn fold_effective(responses: Vec<Response>) -> IndexMap<String, Response> {
    let mut effective = IndexMap::new();
    for response in responses {
        effective.insert(response.question_id.clone(), response);
    }
    effective
}
