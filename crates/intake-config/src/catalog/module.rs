use intake_utils::id_map::ItemId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Module {
    /// # Unique identifier for the module
    /// Questions reference this ID; the module phase walks modules in the
    /// order they are declared in the catalog.
    pub id: String,
    /// # Title of the module
    /// A human-readable title for the module.
    pub title: String,
    /// # Description of the module
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemId for Module {
    type IdType = String;

    fn id(&self) -> Self::IdType {
        self.id.clone()
    }
}
