use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// # Module Progress
///
/// Completion of a single module, counted over the questions currently
/// eligible for the client. The denominator shrinks when conditional
/// questions are hidden, so percentages can move without new answers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ModuleProgress {
    pub module_id: String,
    pub title: String,
    pub questions_in_module: usize,
    pub questions_answered: usize,
    /// 0.0 to 100.0. A module with no eligible questions counts as done.
    pub percent: f64,
}

/// # Progress
///
/// Per-module and overall completion for a session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Progress {
    pub session_id: Uuid,
    pub modules: Vec<ModuleProgress>,
    pub overall_percent: f64,
}
