use intake_config::catalog::question::Question;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{pattern::Pattern, session::AssessmentSession};

/// # Selection Phase
///
/// Where the selector currently sits in the interview. Essential questions
/// are exhausted before any module deep-dive begins.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Essential,
    Module,
    Complete,
}

/// # Next Question
///
/// The selector's answer to "what should be asked now". When `completed`
/// is set there is nothing left to ask and `question` is absent.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NextQuestion {
    pub phase: Phase,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub patterns: Vec<Pattern>,
}

/// # Submit Result
///
/// Outcome of recording an answer: the updated session, the follow-up
/// question to ask, and whether the answer contradicted its own trigger.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitResult {
    pub session: AssessmentSession,
    pub next: NextQuestion,
    /// Set when the answered question is currently hidden by its trigger.
    pub inconsistent: bool,
}
