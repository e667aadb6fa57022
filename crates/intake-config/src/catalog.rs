use crate::catalog::error::CatalogError;
use crate::catalog::module::Module;
use crate::catalog::pattern::{PatternRule, ScoringConfig};
use crate::catalog::question::{Question, QuestionBody};
use crate::catalog::v01::catalog::CatalogV01;
use futures::StreamExt;
use indexmap::IndexMap;
use intake_utils::id_map::id_map;
use intake_utils::loader::{Filter, Loader, LoaderTrait};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use utoipa::ToSchema;

pub mod error;
pub mod module;
pub mod pattern;
pub mod question;
pub mod trigger;
pub mod v01;

#[derive(Deserialize, Debug, JsonSchema)]
#[serde(tag = "version")]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub enum VersionConfig {
    #[serde(rename = "0.1")]
    V01 { catalog: CatalogV01 },
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub catalog_id: String,
    pub title: String,
    #[serde(default)]
    #[serde(with = "id_map")]
    pub modules: IndexMap<String, Module>,
    #[serde(default)]
    #[serde(with = "id_map")]
    pub questions: IndexMap<String, Question>,
    #[serde(default)]
    #[serde(with = "id_map")]
    pub patterns: IndexMap<String, PatternRule>,
    pub scoring: ScoringConfig,
}

impl From<CatalogV01> for Catalog {
    fn from(v01: CatalogV01) -> Self {
        Self {
            catalog_id: v01.id,
            title: v01.title,
            modules: v01.modules,
            questions: v01.questions,
            patterns: v01.patterns,
            scoring: v01.scoring,
        }
    }
}

impl Catalog {
    #[must_use]
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.get(question_id)
    }

    /// Questions of one module, in declared order.
    pub fn module_questions<'a>(&'a self, module_id: &'a str) -> impl Iterator<Item = &'a Question> {
        self.questions.values().filter(move |q| q.module == module_id)
    }

    /// Essential questions across all modules, in declared order.
    pub fn essential_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.values().filter(|q| q.essential)
    }

    /// Referential integrity of the catalog: module references, conditional
    /// triggers and pattern sources must all resolve, and trigger chains must
    /// not loop.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for question in self.questions.values() {
            if !self.modules.contains_key(&question.module) {
                tracing::error!(
                    question_id = question.id,
                    module_id = question.module,
                    "question references unknown module"
                );
                return Err(CatalogError::UnknownModule {
                    question_id: question.id.clone(),
                    module_id: question.module.clone(),
                });
            }
            if let Some(trigger) = &question.trigger {
                if trigger.depends_on == question.id {
                    tracing::error!(question_id = question.id, "question depends on itself");
                    return Err(CatalogError::SelfTrigger {
                        question_id: question.id.clone(),
                    });
                }
                if !self.questions.contains_key(&trigger.depends_on) {
                    tracing::error!(
                        question_id = question.id,
                        depends_on = trigger.depends_on,
                        "conditional trigger references unknown question"
                    );
                    return Err(CatalogError::DanglingTrigger {
                        question_id: question.id.clone(),
                        depends_on: trigger.depends_on.clone(),
                    });
                }
            }
        }
        self.check_trigger_cycles()?;
        self.patterns.values().try_for_each(|p| self.check_pattern(p))
    }

    fn check_trigger_cycles(&self) -> Result<(), CatalogError> {
        for start in self.questions.values() {
            let mut seen = HashSet::new();
            let mut current = start;
            while let Some(trigger) = &current.trigger {
                if !seen.insert(current.id.as_str()) {
                    tracing::error!(question_id = current.id, "conditional trigger cycle");
                    return Err(CatalogError::TriggerCycle {
                        question_id: current.id.clone(),
                    });
                }
                // Dangling references are reported before cycles are checked.
                let Some(next) = self.questions.get(&trigger.depends_on) else {
                    break;
                };
                current = next;
            }
        }
        Ok(())
    }

    fn check_pattern(&self, pattern: &PatternRule) -> Result<(), CatalogError> {
        let gate = self.pattern_question(pattern, &pattern.gate)?;
        if !matches!(gate.body, QuestionBody::YesNo(_)) {
            tracing::error!(pattern_id = pattern.id, question_id = gate.id, "pattern gate is not yes-no");
            return Err(CatalogError::InvalidGateQuestion {
                pattern_id: pattern.id.clone(),
                question_id: gate.id.clone(),
            });
        }
        if let Some(intensity) = &pattern.intensity {
            let question = self.pattern_question(pattern, intensity)?;
            if !matches!(question.body, QuestionBody::Scale(_)) {
                tracing::error!(
                    pattern_id = pattern.id,
                    question_id = question.id,
                    "pattern intensity source is not a scale"
                );
                return Err(CatalogError::InvalidIntensityQuestion {
                    pattern_id: pattern.id.clone(),
                    question_id: question.id.clone(),
                });
            }
        }
        if let Some(frequency) = &pattern.frequency {
            let question = self.pattern_question(pattern, frequency)?;
            if !matches!(question.body, QuestionBody::Frequency(_)) {
                tracing::error!(
                    pattern_id = pattern.id,
                    question_id = question.id,
                    "pattern frequency source is not a frequency question"
                );
                return Err(CatalogError::InvalidFrequencyQuestion {
                    pattern_id: pattern.id.clone(),
                    question_id: question.id.clone(),
                });
            }
        }
        for question_id in &pattern.supporting_questions {
            self.pattern_question(pattern, question_id)?;
        }
        Ok(())
    }

    fn pattern_question(&self, pattern: &PatternRule, question_id: &str) -> Result<&Question, CatalogError> {
        self.questions.get(question_id).ok_or_else(|| {
            tracing::error!(pattern_id = pattern.id, question_id, "pattern references unknown question");
            CatalogError::UnknownPatternQuestion {
                pattern_id: pattern.id.clone(),
                question_id: question_id.to_owned(),
            }
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub catalogs: IndexMap<String, Catalog>,
}

impl CatalogConfig {
    #[must_use]
    pub fn get(&self, catalog_id: &str) -> Option<&Catalog> {
        self.catalogs.get(catalog_id)
    }

    #[must_use]
    pub fn catalogs(&self) -> &IndexMap<String, Catalog> {
        &self.catalogs
    }

    #[must_use]
    pub fn ids(&self) -> HashSet<&String> {
        self.catalogs.keys().collect()
    }
}

pub async fn load(loader: Loader) -> Result<CatalogConfig, CatalogError> {
    tracing::debug!("Loading catalogs");
    let mut res: IndexMap<String, Catalog> = IndexMap::new();
    let mut stream = loader.load_dir("", Filter::Yaml);
    while let Some(Ok(file)) = stream.next().await {
        let VersionConfig::V01 { catalog } = serde_yml::from_slice::<VersionConfig>(&file.content)?;
        let catalog: Catalog = catalog.into();
        catalog.validate()?;
        let catalog_id = catalog.catalog_id.clone();
        if res.insert(catalog_id.clone(), catalog).is_some() {
            return Err(CatalogError::DuplicateCatalog { catalog_id });
        }
    }
    tracing::debug!(?res, "loaded catalog configuration");
    Ok(CatalogConfig { catalogs: res })
}
