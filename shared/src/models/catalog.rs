//! Item catalog used to pick items when staging a batch

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item the user can pick from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: Uuid,
    pub full_text: String,
}

impl CatalogItem {
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_text: full_text.into(),
        }
    }
}

/// Case-insensitive substring search over the catalog
pub fn search_catalog<'a>(items: &'a [CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.full_text.to_lowercase().contains(&query))
        .collect()
}
