use serde::Serialize;
use utoipa::ToSchema;

/// # Catalog Summary
///
/// Listing entry for a loaded question catalog.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogSummary {
    pub catalog_id: String,
    pub title: String,
    pub modules: usize,
    pub questions: usize,
}
