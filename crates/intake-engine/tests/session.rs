mod common;

use crate::common::{ESCALATION_CATALOG, FailingOracle, INTAKE_CATALOG, StubOracle, catalog_config, setup_schema};
use intake_config::catalog::CatalogConfig;
use intake_config::catalog::question::{AnswerValue, Frequency, Gender};
use intake_engine::error::EngineError;
use intake_engine::session::{
    effective_responses, list_sessions, load_session, next_question, session_progress, start_session, submit_response,
};
use intake_model::pattern::Severity;
use intake_model::question::{Phase, SubmitResult};
use intake_model::response::Source;
use intake_model::session::Status;
use sea_orm::{Database, DatabaseConnection};
use test_log::test;
use uuid::Uuid;

async fn connect() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(&db).await.unwrap();
    db
}

async fn submit(
    db: &DatabaseConnection,
    catalogs: &CatalogConfig,
    session_id: Uuid,
    question_id: &str,
    value: AnswerValue,
) -> SubmitResult {
    submit_response(db, catalogs, None, session_id, question_id, value, Source::Manual)
        .await
        .unwrap()
}

fn scale(value: u8) -> AnswerValue {
    AnswerValue::Scale { value }
}

fn answer(value: bool) -> AnswerValue {
    AnswerValue::Bool { value }
}

#[test(tokio::test)]
async fn test_start_serves_first_essential() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let client_id = Uuid::new_v4();

    let (session, next) = start_session(&db, &catalogs, "intake", client_id, Some(Gender::Female))
        .await
        .unwrap();

    assert_eq!(session.status, Status::Draft);
    assert_eq!(session.catalog_id, "intake");
    assert_eq!(session.questions_asked, 1);
    assert_eq!(session.questions_answered, 0);
    assert_eq!(session.current_module.as_deref(), Some("screening"));

    assert_eq!(next.phase, Phase::NotStarted);
    assert!(!next.completed);
    assert_eq!(next.question.unwrap().id, "e1-energy");
    assert!(next.patterns.is_empty());

    let sessions = list_sessions(&db, client_id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].session_id, session.session_id);
}

#[test(tokio::test)]
async fn test_affirmative_essential_surfaces_follow_up() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), Some(Gender::Female))
        .await
        .unwrap();
    let id = session.session_id;

    let result = submit(&db, &catalogs, id, "e1-energy", scale(5)).await;
    assert_eq!(result.next.phase, Phase::Essential);
    assert_eq!(result.next.question.unwrap().id, "e2-digestive-issues");
    assert!(!result.inconsistent);

    let result = submit(&db, &catalogs, id, "e2-digestive-issues", answer(true)).await;
    assert_eq!(result.next.question.unwrap().id, "e3-sleep-quality");

    let result = submit(&db, &catalogs, id, "e3-sleep-quality", scale(3)).await;
    assert_eq!(result.next.phase, Phase::Module);
    assert_eq!(result.next.question.unwrap().id, "f1-issue-frequency");
    assert_eq!(result.session.current_module.as_deref(), Some("screening"));

    let peeked = next_question(&db, &catalogs, None, id).await.unwrap();
    assert_eq!(peeked.question.unwrap().id, "f1-issue-frequency");

    // The open follow-up extends the denominator.
    let progress = session_progress(&db, &catalogs, id).await.unwrap();
    assert_eq!(progress.modules[0].questions_in_module, 4);
    assert_eq!(progress.modules[0].questions_answered, 3);
    assert_eq!(progress.modules[0].percent, 75.0);
    assert_eq!(progress.overall_percent, 50.0);
}

#[test(tokio::test)]
async fn test_negative_essential_skips_follow_up() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), Some(Gender::Male))
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "e1-energy", scale(5)).await;
    submit(&db, &catalogs, id, "e2-digestive-issues", answer(false)).await;
    let result = submit(&db, &catalogs, id, "e3-sleep-quality", scale(3)).await;

    // The follow-up stays hidden, so the module phase starts right away.
    assert_eq!(result.next.phase, Phase::Module);
    assert_eq!(result.next.question.unwrap().id, "d-bloating");
    assert_eq!(result.session.current_module.as_deref(), Some("digestive"));

    let progress = session_progress(&db, &catalogs, id).await.unwrap();
    assert_eq!(progress.modules[0].questions_in_module, 3);
    assert_eq!(progress.modules[0].percent, 100.0);
    // Male client: the cycle question is excluded alongside the follow-up.
    assert_eq!(progress.modules[1].questions_in_module, 1);
    assert_eq!(progress.overall_percent, 75.0);
}

#[test(tokio::test)]
async fn test_reanswer_counts_once_and_supersedes() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), None)
        .await
        .unwrap();
    let id = session.session_id;

    let result = submit(&db, &catalogs, id, "e1-energy", scale(2)).await;
    assert_eq!(result.session.questions_answered, 1);
    assert_eq!(result.session.status, Status::InProgress);

    let result = submit(&db, &catalogs, id, "e1-energy", scale(4)).await;
    assert_eq!(result.session.questions_answered, 1);
    assert_eq!(result.next.question.unwrap().id, "e2-digestive-issues");

    let effective = effective_responses(&db, id).await.unwrap();
    assert_eq!(effective.responses.len(), 1);
    assert_eq!(effective.responses[0].question_id, "e1-energy");
    assert_eq!(effective.responses[0].value, scale(4));
    assert_eq!(effective.responses[0].source, Source::Manual);
}

#[test(tokio::test)]
async fn test_completion_seals_the_session() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), Some(Gender::Male))
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "e1-energy", scale(5)).await;
    submit(&db, &catalogs, id, "e2-digestive-issues", answer(false)).await;
    submit(&db, &catalogs, id, "e3-sleep-quality", scale(3)).await;
    let result = submit(&db, &catalogs, id, "d-bloating", answer(true)).await;

    assert_eq!(result.next.phase, Phase::Complete);
    assert!(result.next.completed);
    assert!(result.next.question.is_none());
    assert_eq!(result.session.status, Status::Completed);
    assert!(result.session.completed_at.is_some());

    // Sealed: the late answer is rejected and counters stay put.
    let rejected = submit_response(&db, &catalogs, None, id, "e1-energy", scale(1), Source::Manual).await;
    assert!(matches!(rejected, Err(EngineError::SealedSession { session_id }) if session_id == id));
    let session = load_session(&db, id).await.unwrap();
    assert_eq!(session.questions_answered, 4);
    assert_eq!(session.status, Status::Completed);

    let peeked = next_question(&db, &catalogs, None, id).await.unwrap();
    assert_eq!(peeked.phase, Phase::Complete);
    assert!(peeked.completed);
    assert!(peeked.question.is_none());
}

#[test(tokio::test)]
async fn test_full_interview_reaches_full_progress() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), Some(Gender::Female))
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "e1-energy", scale(5)).await;
    submit(&db, &catalogs, id, "e2-digestive-issues", answer(true)).await;
    submit(&db, &catalogs, id, "e3-sleep-quality", scale(3)).await;
    submit(
        &db,
        &catalogs,
        id,
        "f1-issue-frequency",
        AnswerValue::Frequency {
            value: Frequency::Daily,
        },
    )
    .await;
    submit(&db, &catalogs, id, "d-bloating", answer(true)).await;
    let result = submit(&db, &catalogs, id, "d-cycle-bloating", answer(false)).await;

    assert!(result.next.completed);
    let progress = session_progress(&db, &catalogs, id).await.unwrap();
    assert_eq!(progress.overall_percent, 100.0);
    assert!(progress.modules.iter().all(|module| module.percent == 100.0));
}

#[test(tokio::test)]
async fn test_hidden_follow_up_submit_is_flagged_not_dropped() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), Some(Gender::Male))
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "e1-energy", scale(5)).await;
    submit(&db, &catalogs, id, "e2-digestive-issues", answer(false)).await;

    // The follow-up is currently hidden by its trigger.
    let result = submit(
        &db,
        &catalogs,
        id,
        "f1-issue-frequency",
        AnswerValue::Frequency {
            value: Frequency::Weekly,
        },
    )
    .await;
    assert!(result.inconsistent);
    assert_eq!(result.session.questions_answered, 3);
    // Selection is unaffected: the next essential is still served.
    assert_eq!(result.next.phase, Phase::Essential);
    assert_eq!(result.next.question.unwrap().id, "e3-sleep-quality");

    // The record is kept for audit but counts toward no module.
    let effective = effective_responses(&db, id).await.unwrap();
    assert!(effective.responses.iter().any(|r| r.question_id == "f1-issue-frequency"));
    let progress = session_progress(&db, &catalogs, id).await.unwrap();
    assert_eq!(progress.modules[0].questions_in_module, 3);
    assert_eq!(progress.modules[0].questions_answered, 2);
}

#[test(tokio::test)]
async fn test_oracle_failure_falls_back_to_deterministic_order() {
    let db = connect().await;
    let catalogs = catalog_config(&[ESCALATION_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "escalation", Uuid::new_v4(), None)
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "d-gate", answer(true)).await;
    let result = submit_response(
        &db,
        &catalogs,
        Some(&FailingOracle),
        id,
        "d-intensity",
        scale(5),
        Source::Manual,
    )
    .await
    .unwrap();

    // Two supporting questions tie; the failure keeps the declared order.
    assert_eq!(result.next.phase, Phase::Module);
    assert_eq!(result.next.question.unwrap().id, "d-pain");
    assert_eq!(result.next.patterns.len(), 1);
    assert_eq!(result.next.patterns[0].severity, Severity::High);
    assert_eq!(result.session.questions_asked, 3);
}

#[test(tokio::test)]
async fn test_oracle_choice_is_respected() {
    let db = connect().await;
    let catalogs = catalog_config(&[ESCALATION_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "escalation", Uuid::new_v4(), None)
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "d-gate", answer(true)).await;
    let oracle = StubOracle(Some("d-diet".to_owned()));
    let result = submit_response(&db, &catalogs, Some(&oracle), id, "d-intensity", scale(5), Source::Manual)
        .await
        .unwrap();

    assert_eq!(result.next.question.unwrap().id, "d-diet");
}

#[test(tokio::test)]
async fn test_oracle_pick_outside_candidates_is_ignored() {
    let db = connect().await;
    let catalogs = catalog_config(&[ESCALATION_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "escalation", Uuid::new_v4(), None)
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "d-gate", answer(true)).await;
    // d-water is eligible but not among the tied candidates.
    let oracle = StubOracle(Some("d-water".to_owned()));
    let result = submit_response(&db, &catalogs, Some(&oracle), id, "d-intensity", scale(5), Source::Manual)
        .await
        .unwrap();

    assert_eq!(result.next.question.unwrap().id, "d-pain");
}

#[test(tokio::test)]
async fn test_peek_never_advances_the_session() {
    let db = connect().await;
    let catalogs = catalog_config(&[ESCALATION_CATALOG]);
    let (session, _) = start_session(&db, &catalogs, "escalation", Uuid::new_v4(), None)
        .await
        .unwrap();
    let id = session.session_id;

    submit(&db, &catalogs, id, "d-gate", answer(true)).await;
    submit(&db, &catalogs, id, "d-intensity", scale(5)).await;

    // Peeking may consult the oracle under the same ambiguity rule.
    let oracle = StubOracle(Some("d-diet".to_owned()));
    let peeked = next_question(&db, &catalogs, Some(&oracle), id).await.unwrap();
    assert_eq!(peeked.question.unwrap().id, "d-diet");
    // A null choice keeps the declared order.
    let oracle = StubOracle(None);
    let peeked = next_question(&db, &catalogs, Some(&oracle), id).await.unwrap();
    assert_eq!(peeked.question.unwrap().id, "d-pain");

    let session = load_session(&db, id).await.unwrap();
    assert_eq!(session.questions_asked, 3);
    assert_eq!(session.questions_answered, 2);
    assert_eq!(session.status, Status::InProgress);
}

#[test(tokio::test)]
async fn test_unknown_references_are_rejected_without_writes() {
    let db = connect().await;
    let catalogs = catalog_config(&[INTAKE_CATALOG]);

    let missing = start_session(&db, &catalogs, "unloaded", Uuid::new_v4(), None).await;
    assert!(matches!(missing, Err(EngineError::UnknownCatalog { catalog_id }) if catalog_id == "unloaded"));

    let (session, _) = start_session(&db, &catalogs, "intake", Uuid::new_v4(), None)
        .await
        .unwrap();
    let id = session.session_id;

    let unknown = submit_response(&db, &catalogs, None, id, "ghost", scale(1), Source::Manual).await;
    assert!(matches!(unknown, Err(EngineError::UnknownQuestion { question_id, .. }) if question_id == "ghost"));

    // Shape mismatch is rejected before anything is written.
    let invalid = submit_response(&db, &catalogs, None, id, "e1-energy", answer(true), Source::Manual).await;
    assert!(matches!(invalid, Err(EngineError::InvalidValue(_))));

    let session = load_session(&db, id).await.unwrap();
    assert_eq!(session.questions_answered, 0);
    assert_eq!(session.status, Status::Draft);
    let effective = effective_responses(&db, id).await.unwrap();
    assert!(effective.responses.is_empty());
}
