use indexmap::IndexMap;
use intake_config::catalog::Catalog;
use intake_config::catalog::pattern::PatternRule;
use intake_config::catalog::question::AnswerValue;
use intake_model::pattern::{Pattern, Severity};

/// Scans the effective answers for symptom clusters. A rule only fires while
/// its gate is answered yes; the score blends the intensity and frequency
/// sources with the catalog's weights.
#[must_use]
pub fn detect_patterns(catalog: &Catalog, answers: &IndexMap<String, AnswerValue>) -> Vec<Pattern> {
    let mut detected: Vec<Pattern> = catalog
        .patterns
        .values()
        .filter(|rule| gate_open(rule, answers))
        .map(|rule| score_rule(catalog, rule, answers))
        .collect();

    // Most urgent first; full ties keep the catalog's declared rule order.
    detected.sort_by(|a, b| b.severity.cmp(&a.severity).then(b.weight.total_cmp(&a.weight)));
    detected
}

fn gate_open(rule: &PatternRule, answers: &IndexMap<String, AnswerValue>) -> bool {
    matches!(answers.get(&rule.gate), Some(AnswerValue::Bool { value: true }))
}

fn score_rule(catalog: &Catalog, rule: &PatternRule, answers: &IndexMap<String, AnswerValue>) -> Pattern {
    let intensity = rule
        .intensity
        .as_deref()
        .and_then(|question_id| answers.get(question_id))
        .and_then(|answer| match answer {
            AnswerValue::Scale { value } => Some(f64::from(*value)),
            _ => None,
        })
        .unwrap_or(0.0);
    let frequency = rule
        .frequency
        .as_deref()
        .and_then(|question_id| answers.get(question_id))
        .and_then(|answer| match answer {
            AnswerValue::Frequency { value } => Some(f64::from(value.bucket())),
            _ => None,
        })
        .unwrap_or(0.0);

    let weights = catalog.scoring.weights;
    let weight = intensity * weights.intensity + frequency * weights.frequency;
    let severity = Severity::classify(weight.round() as u8, &catalog.scoring.thresholds);

    Pattern {
        id: rule.id.clone(),
        name: rule.name.clone(),
        supporting_question_ids: rule.supporting_questions.clone(),
        weight,
        severity,
    }
}
