use crate::catalog::module::Module;
use crate::catalog::pattern::{PatternRule, ScoringConfig};
use crate::catalog::question::Question;
use indexmap::IndexMap;
use intake_utils::id_map::id_map;
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CatalogV01 {
    /// # Unique identifier for the catalog
    /// Sessions record this ID and later submissions are validated against
    /// the same catalog version.
    pub id: String,
    /// # Title of the catalog
    /// A human-readable title for the catalog.
    pub title: String,
    #[serde(default)]
    #[serde(with = "id_map")]
    #[schemars(with = "Vec::<Module>")]
    /// # Modules in canonical order
    /// The module phase walks modules in the order declared here.
    pub modules: IndexMap<String, Module>,
    #[serde(default)]
    #[serde(with = "id_map")]
    #[schemars(with = "Vec::<Question>")]
    /// # Questions included in the catalog
    pub questions: IndexMap<String, Question>,
    #[serde(default)]
    #[serde(with = "id_map")]
    #[schemars(with = "Vec::<PatternRule>")]
    /// # Pattern rules
    /// Topic mappings scanned by the pattern matcher.
    pub patterns: IndexMap<String, PatternRule>,
    #[serde(default)]
    /// # Scoring constants
    /// Blend weights and severity thresholds used by the pattern matcher.
    pub scoring: ScoringConfig,
}
