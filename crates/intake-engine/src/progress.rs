use indexmap::IndexMap;
use intake_config::catalog::Catalog;
use intake_config::catalog::question::{AnswerValue, Gender};
use intake_model::progress::{ModuleProgress, Progress};
use uuid::Uuid;

use crate::conditional;
use crate::selector;

/// Completion percentages against the questions currently eligible for this
/// client. Hidden conditional branches and demographically excluded questions
/// do not count, so the denominator moves when a branching answer changes.
#[must_use]
pub fn compute(
    catalog: &Catalog,
    gender: Option<Gender>,
    answers: &IndexMap<String, AnswerValue>,
    session_id: Uuid,
) -> Progress {
    let mut modules = Vec::with_capacity(catalog.modules.len());
    let mut total_eligible = 0usize;
    let mut total_answered = 0usize;

    for module in catalog.modules.values() {
        let mut eligible = 0usize;
        let mut answered = 0usize;
        for question in catalog.module_questions(&module.id) {
            if !selector::matches_demographics(question, gender) || !conditional::should_show(question, answers) {
                continue;
            }
            eligible += 1;
            if answers.contains_key(&question.id) {
                answered += 1;
            }
        }

        total_eligible += eligible;
        total_answered += answered;
        modules.push(ModuleProgress {
            module_id: module.id.clone(),
            title: module.title.clone(),
            questions_in_module: eligible,
            questions_answered: answered,
            percent: percent(answered, eligible),
        });
    }

    Progress {
        session_id,
        modules,
        overall_percent: percent(total_answered, total_eligible),
    }
}

fn percent(answered: usize, eligible: usize) -> f64 {
    if eligible == 0 {
        return 100.0;
    }
    answered as f64 / eligible as f64 * 100.0
}
