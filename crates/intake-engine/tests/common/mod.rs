use async_trait::async_trait;
use indexmap::IndexMap;
use intake_config::catalog::module::Module;
use intake_config::catalog::question::{AnswerValue, Question};
use intake_config::catalog::{Catalog, CatalogConfig, VersionConfig};
use intake_engine::oracle::Oracle;
use intake_engine::oracle::error::OracleError;
use intake_model::pattern::Pattern;
use sea_orm::{ConnectionTrait, DbConn, DbErr, Schema};

/// Two modules, three essentials, one affirmative follow-up and one
/// gender-gated question. Mirrors a trimmed-down production intake.
pub const INTAKE_CATALOG: &str = r#"
version: "0.1"
catalog:
  id: intake
  title: Baseline Intake
  modules:
    - id: screening
      title: General Screening
    - id: digestive
      title: Digestive Health
  questions:
    - id: e1-energy
      module: screening
      prompt: How would you rate your energy level?
      essential: true
      type: scale
      body:
        min: 1
        max: 5
    - id: e2-digestive-issues
      module: screening
      prompt: Do you experience digestive issues?
      essential: true
      type: yes-no
      body: {}
    - id: e3-sleep-quality
      module: screening
      prompt: How would you rate your sleep quality?
      essential: true
      type: scale
      body:
        min: 1
        max: 5
    - id: f1-issue-frequency
      module: screening
      prompt: How often do the digestive issues occur?
      trigger:
        depends-on: e2-digestive-issues
        show-if:
          type: bool
          value: true
      type: frequency
      body: {}
    - id: d-bloating
      module: digestive
      prompt: Do you feel bloated after meals?
      type: yes-no
      body: {}
    - id: d-cycle-bloating
      module: digestive
      prompt: Does the bloating track your menstrual cycle?
      gender-specific: female
      type: yes-no
      body: {}
"#;

/// One module with a pattern whose supporting questions tie once the
/// pattern escalates, forcing the ambiguity rule.
pub const ESCALATION_CATALOG: &str = r#"
version: "0.1"
catalog:
  id: escalation
  title: Escalation Intake
  modules:
    - id: digestive
      title: Digestive Health
  questions:
    - id: d-gate
      module: digestive
      prompt: Do you experience digestive discomfort?
      essential: true
      type: yes-no
      body: {}
    - id: d-intensity
      module: digestive
      prompt: How intense is the discomfort?
      essential: true
      type: scale
      body:
        min: 1
        max: 5
    - id: d-pain
      module: digestive
      prompt: Do you experience abdominal pain at night?
      type: yes-no
      body: {}
    - id: d-diet
      module: digestive
      prompt: Have you changed your diet recently?
      type: yes-no
      body: {}
    - id: d-water
      module: digestive
      prompt: How many liters of water do you drink per day?
      type: numeric
      body:
        min: 0
        max: 20
        unit: liters
  patterns:
    - id: digestive-distress
      name: Digestive Distress
      gate: d-gate
      intensity: d-intensity
      supporting-questions:
        - d-pain
        - d-diet
"#;

pub async fn setup_schema(db: &DbConn) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(intake_entity::client::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(intake_entity::session::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(intake_entity::response::Entity)))
        .await?;
    Ok(())
}

pub fn parse_catalog(yaml: &str) -> Catalog {
    let VersionConfig::V01 { catalog } = serde_yml::from_str::<VersionConfig>(yaml).unwrap();
    let catalog: Catalog = catalog.into();
    catalog.validate().unwrap();
    catalog
}

pub fn catalog_config(yamls: &[&str]) -> CatalogConfig {
    let catalogs = yamls
        .iter()
        .map(|yaml| {
            let catalog = parse_catalog(yaml);
            (catalog.catalog_id.clone(), catalog)
        })
        .collect();
    CatalogConfig { catalogs }
}

/// Deterministic stand-in returning a fixed choice.
pub struct StubOracle(pub Option<String>);

#[async_trait]
impl Oracle for StubOracle {
    async fn select_next(
        &self,
        _history: &IndexMap<String, AnswerValue>,
        _patterns: &[Pattern],
        _candidates: &[Question],
        _module: &Module,
    ) -> Result<Option<String>, OracleError> {
        Ok(self.0.clone())
    }
}

/// Stand-in for a dead endpoint.
pub struct FailingOracle;

#[async_trait]
impl Oracle for FailingOracle {
    async fn select_next(
        &self,
        _history: &IndexMap<String, AnswerValue>,
        _patterns: &[Pattern],
        _candidates: &[Question],
        _module: &Module,
    ) -> Result<Option<String>, OracleError> {
        Err(OracleError::Timeout)
    }
}
