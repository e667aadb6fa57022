use async_trait::async_trait;
use indexmap::IndexMap;
use intake_config::catalog::module::Module;
use intake_config::catalog::question::{AnswerValue, Question};
use intake_model::pattern::Pattern;

use crate::oracle::error::OracleError;

pub mod error;
pub mod openai;

/// Adaptive tie-breaker consulted when the deterministic ranking leaves more
/// than one equally-ranked candidate. Implementations are treated as
/// unreliable; any failure falls back to the deterministic order.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Picks one of `candidates` given the answer history and the detected
    /// patterns, or `None` to keep the deterministic order.
    async fn select_next(
        &self,
        history: &IndexMap<String, AnswerValue>,
        patterns: &[Pattern],
        candidates: &[Question],
        module: &Module,
    ) -> Result<Option<String>, OracleError>;
}
