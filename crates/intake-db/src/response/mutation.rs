use crate::response::query::Query;
use crate::session;
use crate::util::{FlattenTransactionResultExt, RequireRecord};
use intake_entity::response::{ActiveModel as ActiveResponse, Model as Response, ResponseSource};
use intake_entity::session::{Entity as SessionEntity, Model as Session, SessionStatus};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QuerySelect, TransactionTrait};
use serde_json::Value as Json;
use std::error::Error;
use thiserror::Error as ThisError;
use uuid::Uuid;

#[derive(ThisError, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("session {session_id} is completed and sealed")]
    SealedSession { session_id: Uuid },
}

pub struct Mutation;

impl Mutation {
    /// Appends one immutable record. Existing records are never touched; a
    /// re-answer supersedes by timestamp.
    pub async fn append<C: ConnectionTrait>(
        conn: &C,
        session_id: Uuid,
        question_id: String,
        value: Json,
        source: ResponseSource,
    ) -> Result<Response, DbErr> {
        let response = ActiveResponse {
            id: Set(Uuid::now_v7()),
            session_id: Set(session_id),
            question_id: Set(question_id.clone()),
            value: Set(value),
            source: Set(source),
            recorded_at: Set(chrono::Utc::now().naive_utc()),
        };

        response.insert(conn).await.inspect_err(
            |error| tracing::error!(error = error as &dyn Error, %session_id, %question_id, "failed to append response"),
        )
    }

    /// Appends a response and recounts the session's answered questions as
    /// one atomic unit. The session row is locked for the duration, so
    /// concurrent submissions to the same session serialize; a sealed
    /// session rejects the append before anything is written.
    pub async fn submit_response<C: ConnectionTrait + TransactionTrait>(
        conn: &C,
        session_id: Uuid,
        question_id: String,
        value: Json,
        source: ResponseSource,
    ) -> Result<(Session, Response), SubmitError> {
        conn.transaction(|conn| {
            Box::pin(async move {
                let session = SessionEntity::find_by_id(session_id)
                    .lock_exclusive()
                    .one(conn)
                    .await
                    .require()?;
                if session.status == SessionStatus::Completed {
                    return Err(SubmitError::SealedSession { session_id });
                }
                let response = Self::append(conn, session_id, question_id, value, source).await?;
                let questions_answered = Query::count_answered(conn, session_id).await?;
                let session = session::Mutation::record_progress(conn, &session, questions_answered).await?;
                Ok((session, response))
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| match error {
            SubmitError::SealedSession { .. } => {}
            error => tracing::error!(error = error as &dyn Error, %session_id, "failed to submit response"),
        })
    }
}
