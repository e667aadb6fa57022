use indexmap::IndexMap;
use intake_config::catalog::Catalog;
use intake_config::catalog::question::{AnswerValue, Gender, Question};
use intake_model::pattern::{Pattern, Severity};
use intake_model::question::Phase;

use crate::conditional;
use crate::pattern::detect_patterns;

/// Outcome of one deterministic selection pass.
#[derive(Debug, Clone)]
pub struct Selection {
    pub phase: Phase,
    /// Deterministic pick; `None` once the interview is complete.
    pub question: Option<Question>,
    /// Equally-ranked alternatives including the pick itself. More than one
    /// entry marks the pick as ambiguous, the only case an oracle may decide.
    pub candidates: Vec<Question>,
    pub patterns: Vec<Pattern>,
}

impl Selection {
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Demographic gate: a gender-specific question is only offered when the
/// client's recorded gender matches.
#[must_use]
pub fn matches_demographics(question: &Question, gender: Option<Gender>) -> bool {
    match question.gender_specific {
        None => true,
        Some(required) => gender == Some(required),
    }
}

/// Unanswered, demographically eligible, and visible per conditional logic.
#[must_use]
pub fn is_eligible(question: &Question, gender: Option<Gender>, answers: &IndexMap<String, AnswerValue>) -> bool {
    !answers.contains_key(&question.id)
        && matches_demographics(question, gender)
        && conditional::should_show(question, answers)
}

/// One pass of the selection state machine. Unanswered essential questions
/// come first in declared order; afterwards modules are walked in canonical
/// order with escalating patterns pulling their supporting questions to the
/// front. The result is deterministic for a given catalog and answer set.
#[must_use]
pub fn select_next(catalog: &Catalog, gender: Option<Gender>, answers: &IndexMap<String, AnswerValue>) -> Selection {
    let patterns = detect_patterns(catalog, answers);

    if let Some(question) = catalog
        .essential_questions()
        .find(|question| is_eligible(question, gender, answers))
    {
        let phase = if answers.is_empty() {
            Phase::NotStarted
        } else {
            Phase::Essential
        };
        return Selection {
            phase,
            question: Some(question.clone()),
            candidates: vec![question.clone()],
            patterns,
        };
    }

    for module_id in catalog.modules.keys() {
        let pool: Vec<&Question> = catalog
            .module_questions(module_id)
            .filter(|question| is_eligible(question, gender, answers))
            .collect();
        if pool.is_empty() {
            continue;
        }

        let phase = if answers.is_empty() {
            Phase::NotStarted
        } else {
            Phase::Module
        };
        let candidates = escalated_candidates(&pool, &patterns);
        return Selection {
            phase,
            question: candidates.first().cloned(),
            candidates,
            patterns,
        };
    }

    Selection {
        phase: Phase::Complete,
        question: None,
        candidates: vec![],
        patterns,
    }
}

/// Pattern escalation within a module pool. Supporting questions of the most
/// urgent escalating severity with a hit in the pool rank equally at the
/// front, in declared order; without any hit the pool head stands alone.
fn escalated_candidates(pool: &[&Question], patterns: &[Pattern]) -> Vec<Question> {
    let escalating: Vec<&Pattern> = patterns
        .iter()
        .filter(|pattern| pattern.severity.is_escalating())
        .collect();
    // Patterns arrive most urgent first.
    let top_severity: Option<Severity> = escalating.iter().find_map(|pattern| {
        pool.iter()
            .any(|question| pattern.supporting_question_ids.contains(&question.id))
            .then_some(pattern.severity)
    });

    let Some(top_severity) = top_severity else {
        return pool.first().map(|question| vec![(*question).clone()]).unwrap_or_default();
    };

    pool.iter()
        .filter(|question| {
            escalating.iter().any(|pattern| {
                pattern.severity == top_severity && pattern.supporting_question_ids.contains(&question.id)
            })
        })
        .map(|question| (*question).clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_config::catalog::question::Frequency;
    use intake_config::catalog::v01::catalog::CatalogV01;

    const CATALOG: &str = "
id: test
title: Selector fixture
modules:
  - id: screening
    title: Screening
  - id: digestive
    title: Digestive system
questions:
  - id: energy
    module: screening
    prompt: Energy level?
    essential: true
    type: scale
    body:
      min: 0
      max: 5
  - id: appetite
    module: screening
    prompt: Appetite normal?
    essential: true
    type: yes-no
    body: {}
  - id: appetite-loss
    module: screening
    prompt: Since when is it reduced?
    trigger:
      depends-on: appetite
      show-if:
        type: bool
        value: false
    type: text
    body: {}
  - id: cycle-regular
    module: screening
    prompt: Is your cycle regular?
    gender-specific: female
    type: yes-no
    body: {}
  - id: digestive-gate
    module: digestive
    prompt: Digestive complaints?
    type: yes-no
    body: {}
  - id: digestive-intensity
    module: digestive
    prompt: How strong?
    type: scale
    body:
      min: 0
      max: 5
  - id: digestive-frequency
    module: digestive
    prompt: How often?
    type: frequency
    body: {}
  - id: digestive-pain
    module: digestive
    prompt: Where does it hurt?
    type: text
    body: {}
  - id: digestive-diet
    module: digestive
    prompt: Which foods make it worse?
    type: multi-select
    body:
      options:
        - dairy
        - gluten
        - sugar
patterns:
  - id: digestive
    name: Digestive cluster
    gate: digestive-gate
    intensity: digestive-intensity
    frequency: digestive-frequency
    supporting-questions:
      - digestive-pain
      - digestive-diet
";

    fn catalog() -> Catalog {
        let v01: CatalogV01 = serde_yml::from_str(CATALOG).unwrap();
        let catalog = Catalog::from(v01);
        catalog.validate().unwrap();
        catalog
    }

    fn answer(entries: &[(&str, AnswerValue)]) -> IndexMap<String, AnswerValue> {
        entries
            .iter()
            .map(|(id, value)| ((*id).to_owned(), value.clone()))
            .collect()
    }

    fn yes() -> AnswerValue {
        AnswerValue::Bool { value: true }
    }

    fn no() -> AnswerValue {
        AnswerValue::Bool { value: false }
    }

    fn picked(selection: &Selection) -> &str {
        selection.question.as_ref().map(|q| q.id.as_str()).unwrap()
    }

    #[test]
    fn test_fresh_session_starts_with_first_essential() {
        let selection = select_next(&catalog(), None, &IndexMap::new());
        assert_eq!(selection.phase, Phase::NotStarted);
        assert_eq!(picked(&selection), "energy");
        assert!(!selection.is_ambiguous());
    }

    #[test]
    fn test_essentials_run_in_declared_order() {
        let answers = answer(&[("energy", AnswerValue::Scale { value: 3 })]);
        let selection = select_next(&catalog(), None, &answers);
        assert_eq!(selection.phase, Phase::Essential);
        assert_eq!(picked(&selection), "appetite");
    }

    #[test]
    fn test_module_phase_follows_declared_order() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", yes()),
        ]);
        let selection = select_next(&catalog(), None, &answers);
        // The appetite follow-up is hidden and the cycle question is gendered,
        // so screening is exhausted.
        assert_eq!(selection.phase, Phase::Module);
        assert_eq!(picked(&selection), "digestive-gate");
    }

    #[test]
    fn test_negative_trigger_surfaces_follow_up() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", no()),
        ]);
        let selection = select_next(&catalog(), None, &answers);
        assert_eq!(selection.phase, Phase::Module);
        assert_eq!(picked(&selection), "appetite-loss");
    }

    #[test]
    fn test_gendered_question_requires_matching_client() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", yes()),
        ]);

        let selection = select_next(&catalog(), Some(Gender::Female), &answers);
        assert_eq!(picked(&selection), "cycle-regular");

        let selection = select_next(&catalog(), Some(Gender::Male), &answers);
        assert_eq!(picked(&selection), "digestive-gate");
    }

    #[test]
    fn test_escalating_pattern_pulls_supporting_questions_forward() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", yes()),
            ("digestive-gate", yes()),
            ("digestive-intensity", AnswerValue::Scale { value: 5 }),
        ]);

        let selection = select_next(&catalog(), None, &answers);
        // Weight 3.0 classifies as high; both supporting questions are pulled
        // ahead of digestive-frequency and rank equally.
        assert_eq!(picked(&selection), "digestive-pain");
        assert!(selection.is_ambiguous());
        let candidates: Vec<&str> = selection.candidates.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(candidates, vec!["digestive-pain", "digestive-diet"]);
    }

    #[test]
    fn test_low_severity_pattern_keeps_declared_order() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", yes()),
            ("digestive-gate", yes()),
            ("digestive-intensity", AnswerValue::Scale { value: 2 }),
        ]);

        let selection = select_next(&catalog(), None, &answers);
        assert_eq!(picked(&selection), "digestive-frequency");
        assert!(!selection.is_ambiguous());
    }

    #[test]
    fn test_single_remaining_supporting_question_is_unambiguous() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", yes()),
            ("digestive-gate", yes()),
            ("digestive-intensity", AnswerValue::Scale { value: 5 }),
            ("digestive-diet", AnswerValue::MultiSelect { values: vec!["dairy".to_owned()] }),
        ]);

        let selection = select_next(&catalog(), None, &answers);
        assert_eq!(picked(&selection), "digestive-pain");
        assert!(!selection.is_ambiguous());
    }

    #[test]
    fn test_exhausted_catalog_completes() {
        let answers = answer(&[
            ("energy", AnswerValue::Scale { value: 3 }),
            ("appetite", yes()),
            ("digestive-gate", no()),
            ("digestive-intensity", AnswerValue::Scale { value: 0 }),
            (
                "digestive-frequency",
                AnswerValue::Frequency {
                    value: Frequency::MonthlyOrLess,
                },
            ),
            ("digestive-pain", AnswerValue::Text { value: "-".to_owned() }),
            (
                "digestive-diet",
                AnswerValue::MultiSelect { values: vec![] },
            ),
        ]);

        let selection = select_next(&catalog(), None, &answers);
        assert_eq!(selection.phase, Phase::Complete);
        assert!(selection.question.is_none());
        assert!(selection.candidates.is_empty());
    }
}
