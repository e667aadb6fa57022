use crate::convert::{FromDbModel, FromModel, IntoModel};
use intake_entity::session::{Model as SessionModel, SessionStatus};
use intake_model::session::{AssessmentSession, Status};

impl FromDbModel<SessionStatus> for Status {
    fn from_db_model(model: SessionStatus) -> Self {
        match model {
            SessionStatus::Draft => Self::Draft,
            SessionStatus::InProgress => Self::InProgress,
            SessionStatus::Completed => Self::Completed,
        }
    }
}

impl FromModel<Status> for SessionStatus {
    fn from_model(model: Status) -> Self {
        match model {
            Status::Draft => Self::Draft,
            Status::InProgress => Self::InProgress,
            Status::Completed => Self::Completed,
        }
    }
}

impl FromDbModel<SessionModel> for AssessmentSession {
    fn from_db_model(model: SessionModel) -> Self {
        Self {
            session_id: model.id,
            client_id: model.client_id,
            catalog_id: model.catalog_id,
            status: model.status.into_model(),
            current_module: model.current_module,
            questions_asked: model.questions_asked,
            questions_answered: model.questions_answered,
            started_at: model.started_at.and_utc(),
            last_saved_at: model.last_saved_at.and_utc(),
            completed_at: model.completed_at.map(|at| at.and_utc()),
        }
    }
}
