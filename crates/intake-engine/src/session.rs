use indexmap::IndexMap;
use intake_config::catalog::question::{AnswerValue, Gender, Question, QuestionExt};
use intake_config::catalog::{Catalog, CatalogConfig};
use intake_entity::client::Model as Client;
use intake_entity::session::{Model as Session, SessionStatus};
use intake_model::progress::Progress;
use intake_model::question::{NextQuestion, Phase, SubmitResult};
use intake_model::response::{EffectiveResponses, Source};
use intake_model::session::AssessmentSession;
use intake_model_tools::convert::{IntoDbModel, IntoModel, TryIntoModel};
use sea_orm::DatabaseConnection;
use std::error::Error;
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

use crate::error::EngineError;
use crate::oracle::Oracle;
use crate::selector::Selection;
use crate::{pattern, progress, selector};

/// Upper bound on one oracle consultation. Once it elapses the deterministic
/// pick stands and the interview moves on.
const ORACLE_DEADLINE: Duration = Duration::from_secs(15);

/// Opens a session against a loaded catalog and serves the first question.
/// The client record is created on first reference; a supplied gender is
/// recorded, an absent one leaves any stored value untouched.
#[instrument(skip(conn, catalogs))]
pub async fn start_session(
    conn: &DatabaseConnection,
    catalogs: &CatalogConfig,
    catalog_id: &str,
    client_id: Uuid,
    gender: Option<Gender>,
) -> Result<(AssessmentSession, NextQuestion), EngineError> {
    let catalog = require_catalog(catalogs, catalog_id)?;
    let client =
        intake_db::client::Mutation::ensure_client(conn, client_id, gender.map(|gender| Some(gender).into_db_model()))
            .await?;
    let session = intake_db::session::Mutation::new_session(conn, client_id, catalog_id.to_owned()).await?;

    // An empty answer set detects no patterns, so the ranking cannot tie and
    // the oracle sits this one out.
    let answers = IndexMap::new();
    let selection = selector::select_next(catalog, client_gender(&client), &answers);
    let next = resolve(catalog, &answers, None, selection).await;
    let session = record_outcome(conn, &session, &next).await?;
    Ok((session.into_model(), next))
}

/// Records one answer and serves the follow-up question. The append and the
/// counter recount commit as one unit before any selection runs; the oracle,
/// when consulted, runs outside that transaction.
#[instrument(skip(conn, catalogs, oracle, value))]
pub async fn submit_response(
    conn: &DatabaseConnection,
    catalogs: &CatalogConfig,
    oracle: Option<&dyn Oracle>,
    session_id: Uuid,
    question_id: &str,
    value: AnswerValue,
    source: Source,
) -> Result<SubmitResult, EngineError> {
    let (session, client) = intake_db::session::Query::load_session_with_client(conn, session_id).await?;
    let catalog = require_catalog(catalogs, &session.catalog_id)?;
    let question = catalog.question(question_id).ok_or_else(|| {
        tracing::warn!(
            %session_id,
            question_id,
            catalog_id = session.catalog_id,
            "submitted question is not part of the session's catalog"
        );
        EngineError::UnknownQuestion {
            catalog_id: session.catalog_id.clone(),
            question_id: question_id.to_owned(),
        }
    })?;
    question.validate(&value)?;
    let record = serde_json::to_value(&value)?;

    let (session, _) =
        intake_db::response::Mutation::submit_response(conn, session_id, question_id.to_owned(), record, source.into_db_model())
            .await?;

    let answers = load_answers(conn, session_id).await?;
    // A follow-up whose trigger answer was corrected afterwards may arrive
    // while hidden. The record stays; the flag marks it for audit.
    let inconsistent = !crate::conditional::should_show(question, &answers);
    if inconsistent {
        tracing::warn!(%session_id, question_id, "accepted answer for a question hidden by its trigger");
    }

    let selection = selector::select_next(catalog, client_gender(&client), &answers);
    let next = resolve(catalog, &answers, oracle, selection).await;
    let session = record_outcome(conn, &session, &next).await?;

    Ok(SubmitResult {
        session: session.into_model(),
        next,
        inconsistent,
    })
}

/// Read-only peek at the question the selector would serve now. Counters and
/// the session status stay untouched, so peeking never seals a session.
#[instrument(skip(conn, catalogs, oracle))]
pub async fn next_question(
    conn: &DatabaseConnection,
    catalogs: &CatalogConfig,
    oracle: Option<&dyn Oracle>,
    session_id: Uuid,
) -> Result<NextQuestion, EngineError> {
    let (session, client) = intake_db::session::Query::load_session_with_client(conn, session_id).await?;
    let catalog = require_catalog(catalogs, &session.catalog_id)?;
    let answers = load_answers(conn, session_id).await?;

    if session.status == SessionStatus::Completed {
        return Ok(NextQuestion {
            phase: Phase::Complete,
            completed: true,
            question: None,
            patterns: pattern::detect_patterns(catalog, &answers),
        });
    }

    let selection = selector::select_next(catalog, client_gender(&client), &answers);
    Ok(resolve(catalog, &answers, oracle, selection).await)
}

/// Completion percentages against the questions currently eligible for this
/// session's client.
pub async fn session_progress(
    conn: &DatabaseConnection,
    catalogs: &CatalogConfig,
    session_id: Uuid,
) -> Result<Progress, EngineError> {
    let (session, client) = intake_db::session::Query::load_session_with_client(conn, session_id).await?;
    let catalog = require_catalog(catalogs, &session.catalog_id)?;
    let answers = load_answers(conn, session_id).await?;
    Ok(progress::compute(catalog, client_gender(&client), &answers, session_id))
}

/// Latest value per answered question, in first-answered order.
pub async fn effective_responses(conn: &DatabaseConnection, session_id: Uuid) -> Result<EffectiveResponses, EngineError> {
    let session = intake_db::session::Query::load_session(conn, session_id).await?;
    let responses = intake_db::response::Query::load_effective(conn, session_id)
        .await?
        .into_values()
        .map(TryIntoModel::try_into_model)
        .collect::<Result<_, _>>()?;
    Ok(EffectiveResponses {
        session_id: session.id,
        responses,
    })
}

pub async fn load_session(conn: &DatabaseConnection, session_id: Uuid) -> Result<AssessmentSession, EngineError> {
    let session = intake_db::session::Query::load_session(conn, session_id).await?;
    Ok(session.into_model())
}

/// All sessions of one client, newest first.
pub async fn list_sessions(conn: &DatabaseConnection, client_id: Uuid) -> Result<Vec<AssessmentSession>, EngineError> {
    let sessions = intake_db::session::Query::load_sessions(conn, client_id).await?;
    Ok(sessions.into_iter().map(IntoModel::into_model).collect())
}

fn require_catalog<'a>(catalogs: &'a CatalogConfig, catalog_id: &str) -> Result<&'a Catalog, EngineError> {
    catalogs.get(catalog_id).ok_or_else(|| {
        tracing::warn!(catalog_id, "catalog is not loaded");
        EngineError::UnknownCatalog {
            catalog_id: catalog_id.to_owned(),
        }
    })
}

fn client_gender(client: &Client) -> Option<Gender> {
    client.gender.and_then(IntoModel::into_model)
}

/// Effective answers decoded back into typed values, in first-answered order.
async fn load_answers(
    conn: &DatabaseConnection,
    session_id: Uuid,
) -> Result<IndexMap<String, AnswerValue>, EngineError> {
    intake_db::response::Query::load_effective(conn, session_id)
        .await?
        .into_iter()
        .map(|(question_id, response)| Ok((question_id, serde_json::from_value(response.value)?)))
        .collect()
}

/// Turns a selection into the next-question view, letting the oracle break a
/// tie among equally-ranked candidates.
async fn resolve(
    catalog: &Catalog,
    answers: &IndexMap<String, AnswerValue>,
    oracle: Option<&dyn Oracle>,
    selection: Selection,
) -> NextQuestion {
    let question = arbitrate(catalog, answers, oracle, &selection).await;
    NextQuestion {
        phase: selection.phase,
        completed: selection.phase == Phase::Complete,
        question,
        patterns: selection.patterns,
    }
}

/// The ambiguity rule: only a tie among equally-ranked candidates consults
/// the oracle, and every oracle failure mode keeps the deterministic pick.
/// A returned id from outside the candidate set counts as a failure.
async fn arbitrate(
    catalog: &Catalog,
    answers: &IndexMap<String, AnswerValue>,
    oracle: Option<&dyn Oracle>,
    selection: &Selection,
) -> Option<Question> {
    let deterministic = selection.question.clone();
    if !selection.is_ambiguous() {
        return deterministic;
    }
    let Some(oracle) = oracle else {
        return deterministic;
    };
    let Some(module) = selection
        .candidates
        .first()
        .and_then(|question| catalog.modules.get(&question.module))
    else {
        return deterministic;
    };

    let choice = tokio::time::timeout(
        ORACLE_DEADLINE,
        oracle.select_next(answers, &selection.patterns, &selection.candidates, module),
    )
    .await;

    match choice {
        Ok(Ok(Some(question_id))) => match selection.candidates.iter().find(|question| question.id == question_id) {
            Some(question) => Some(question.clone()),
            None => {
                tracing::warn!(question_id, "oracle picked a question outside the candidate set");
                deterministic
            }
        },
        // A null choice means the order does not matter.
        Ok(Ok(None)) => deterministic,
        Ok(Err(error)) => {
            tracing::warn!(error = &error as &dyn Error, "oracle failed, keeping deterministic order");
            deterministic
        }
        Err(_) => {
            tracing::warn!("oracle timed out, keeping deterministic order");
            deterministic
        }
    }
}

/// Persists where the interview moved: the module pointer and the asked
/// counter when a question was served, the seal when nothing is left.
async fn record_outcome(conn: &DatabaseConnection, session: &Session, next: &NextQuestion) -> Result<Session, EngineError> {
    let session = match &next.question {
        Some(question) => {
            intake_db::session::Mutation::record_selection(
                conn,
                session.id,
                Some(question.module.clone()),
                session.questions_asked + 1,
            )
            .await?
        }
        None => intake_db::session::Mutation::complete_session(conn, session.id).await?,
    };
    Ok(session)
}
