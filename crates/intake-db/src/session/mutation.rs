use intake_entity::session::{ActiveModel as ActiveSession, Model as Session, SessionStatus};
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    pub async fn new_session<C: ConnectionTrait>(
        conn: &C,
        client_id: Uuid,
        catalog_id: String,
    ) -> Result<Session, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        let session = ActiveSession {
            id: Set(Uuid::new_v4()),
            client_id: Set(client_id),
            catalog_id: Set(catalog_id.clone()),
            status: Set(SessionStatus::Draft),
            current_module: ActiveValue::NotSet,
            questions_asked: Set(0),
            questions_answered: Set(0),
            started_at: Set(now),
            last_saved_at: Set(now),
            completed_at: ActiveValue::NotSet,
        };

        session.insert(conn).await.inspect_err(
            |error| tracing::error!(error = error as &dyn Error, %client_id, %catalog_id, "failed to create session"),
        )
    }

    /// Counter bookkeeping inside the submit transaction. Draft sessions move
    /// to in-progress on their first accepted response.
    pub async fn record_progress<C: ConnectionTrait>(
        conn: &C,
        session: &Session,
        questions_answered: i32,
    ) -> Result<Session, DbErr> {
        let status = if session.status == SessionStatus::Draft {
            Set(SessionStatus::InProgress)
        } else {
            ActiveValue::NotSet
        };
        let update = ActiveSession {
            id: Unchanged(session.id),
            status,
            questions_answered: Set(questions_answered),
            last_saved_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };

        update.update(conn).await.inspect_err(
            |error| tracing::error!(error = error as &dyn Error, session_id = %session.id, "failed to update session counters"),
        )
    }

    /// Bookkeeping after a question was served: module pointer and the
    /// questions-asked counter.
    pub async fn record_selection<C: ConnectionTrait>(
        conn: &C,
        session_id: Uuid,
        current_module: Option<String>,
        questions_asked: i32,
    ) -> Result<Session, DbErr> {
        let update = ActiveSession {
            id: Unchanged(session_id),
            current_module: Set(current_module),
            questions_asked: Set(questions_asked),
            last_saved_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };

        update.update(conn).await.inspect_err(
            |error| tracing::error!(error = error as &dyn Error, %session_id, "failed to record selection"),
        )
    }

    /// Seals the session; appends are rejected afterwards.
    pub async fn complete_session<C: ConnectionTrait>(conn: &C, session_id: Uuid) -> Result<Session, DbErr> {
        let now = chrono::Utc::now().naive_utc();
        let update = ActiveSession {
            id: Unchanged(session_id),
            status: Set(SessionStatus::Completed),
            completed_at: Set(Some(now)),
            last_saved_at: Set(now),
            ..Default::default()
        };

        update.update(conn).await.inspect_err(
            |error| tracing::error!(error = error as &dyn Error, %session_id, "failed to complete session"),
        )
    }
}
