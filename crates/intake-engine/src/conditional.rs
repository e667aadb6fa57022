use indexmap::IndexMap;
use intake_config::catalog::question::{AnswerValue, Question};
use intake_config::catalog::trigger::TriggerAnswer;

/// Decides whether a question may currently be shown. Questions without a
/// trigger are always eligible; a follow-up stays hidden until its dependency
/// has an effective answer satisfying the rule.
#[must_use]
pub fn should_show(question: &Question, answers: &IndexMap<String, AnswerValue>) -> bool {
    match &question.trigger {
        None => true,
        Some(trigger) => answers
            .get(&trigger.depends_on)
            .is_some_and(|answer| satisfied_by(&trigger.show_if, answer)),
    }
}

/// Whether an effective answer satisfies a trigger condition. Comparison
/// semantics follow the dependency's response type; a mismatched answer shape
/// never matches.
#[must_use]
pub fn satisfied_by(condition: &TriggerAnswer, answer: &AnswerValue) -> bool {
    match (condition, answer) {
        (TriggerAnswer::Bool { value }, AnswerValue::Bool { value: answered }) => value == answered,
        (TriggerAnswer::Choice { value }, AnswerValue::Choice { value: answered }) => value == answered,
        (TriggerAnswer::AnySelected { values }, AnswerValue::MultiSelect { values: answered }) => {
            answered.iter().any(|selected| values.contains(selected))
        }
        (TriggerAnswer::Threshold { op, value }, AnswerValue::Scale { value: answered }) => {
            op.compare(f64::from(*answered), *value)
        }
        (TriggerAnswer::Threshold { op, value }, AnswerValue::Numeric { value: answered }) => {
            op.compare(*answered, *value)
        }
        _ => false,
    }
}
