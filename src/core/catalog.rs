//! # Model Catalog
//!
//! The fixed, ordered list of models the user can pick from. Built once at
//! startup (builtin trio, or `[[models]]` entries from the config file) and
//! never mutated afterwards; the session borrows it read-only.

use serde::{Deserialize, Serialize};

/// Operating status shown next to a model in the picker.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Online,
    Offline,
    Loading,
}

impl ModelStatus {
    pub fn label(self) -> &'static str {
        match self {
            ModelStatus::Online => "online",
            ModelStatus::Offline => "offline",
            ModelStatus::Loading => "loading",
        }
    }
}

/// Behavioral category: does this model attach references to its replies?
///
/// This is the only per-model branch the session core makes. Replies from
/// `Grounded` models carry citations and open the sources panel; `Offline`
/// models never cite, and selecting one force-hides the panel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelCategory {
    Grounded,
    Offline,
}

impl ModelCategory {
    pub fn produces_references(self) -> bool {
        matches!(self, ModelCategory::Grounded)
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelCategory::Grounded => "grounded",
            ModelCategory::Offline => "offline",
        }
    }
}

/// One entry in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// Catalog id, unique (e.g. "search").
    pub id: String,
    /// Display name (e.g. "Search").
    pub name: String,
    /// Human-readable model label (e.g. "Qwen 2.5 7B").
    pub model_name: String,
    /// Underlying model identifier handed to the provider (e.g. "qwen2.5:7b").
    pub tag: String,
    /// Parameter-count label (e.g. "7B").
    pub params: String,
    /// Accent color as RGB. The TUI maps this to a terminal color.
    pub accent: (u8, u8, u8),
    pub status: ModelStatus,
    pub category: ModelCategory,
    /// One-paragraph blurb for the landing page.
    pub description: String,
}

/// Immutable ordered model list. Always non-empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    models: Vec<ModelSpec>,
}

impl Catalog {
    /// The builtin trio: two grounded models and one offline reasoner.
    pub fn builtin() -> Self {
        Catalog {
            models: vec![
                ModelSpec {
                    id: "entity".to_string(),
                    name: "Entity".to_string(),
                    model_name: "Qwen 2.5 1.5B".to_string(),
                    tag: "qwen2.5:1.5b".to_string(),
                    params: "1.5B".to_string(),
                    accent: (0x06, 0xb6, 0xd4),
                    status: ModelStatus::Online,
                    category: ModelCategory::Grounded,
                    description: "Optimized for entity recognition, classification, \
                                  and structured data extraction. References powered \
                                  by web search."
                        .to_string(),
                },
                ModelSpec {
                    id: "search".to_string(),
                    name: "Search".to_string(),
                    model_name: "Qwen 2.5 7B".to_string(),
                    tag: "qwen2.5:7b".to_string(),
                    params: "7B".to_string(),
                    accent: (0x0e, 0xa5, 0xe9),
                    status: ModelStatus::Online,
                    category: ModelCategory::Grounded,
                    description: "Designed for semantic search, document retrieval, \
                                  and contextual understanding. References powered \
                                  by web search."
                        .to_string(),
                },
                ModelSpec {
                    id: "local".to_string(),
                    name: "Local".to_string(),
                    model_name: "DeepSeek R1 8B".to_string(),
                    tag: "deepseek-r1:8b".to_string(),
                    params: "8B".to_string(),
                    accent: (0x14, 0xb8, 0xa6),
                    status: ModelStatus::Online,
                    category: ModelCategory::Offline,
                    description: "High-capacity reasoning for complex tasks, code \
                                  generation, and advanced inference. Fully offline."
                        .to_string(),
                },
            ],
        }
    }

    /// Build a catalog from explicit entries. Returns `None` when `models`
    /// is empty, since a session needs at least one selectable model.
    pub fn from_models(models: Vec<ModelSpec>) -> Option<Self> {
        if models.is_empty() {
            None
        } else {
            Some(Catalog { models })
        }
    }

    pub fn get(&self, id: &str) -> Option<&ModelSpec> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First entry, the default selection for a fresh session.
    pub fn first(&self) -> &ModelSpec {
        &self.models[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn to_vec(&self) -> Vec<ModelSpec> {
        self.models.clone()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.first().id, "entity");

        let search = catalog.get("search").unwrap();
        assert_eq!(search.tag, "qwen2.5:7b");
        assert!(search.category.produces_references());

        let local = catalog.get("local").unwrap();
        assert!(!local.category.produces_references());
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<&str> = catalog.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_get_unknown_id() {
        let catalog = Catalog::builtin();
        assert!(catalog.get("nonexistent").is_none());
        assert!(!catalog.contains("nonexistent"));
    }

    #[test]
    fn test_from_models_rejects_empty() {
        assert!(Catalog::from_models(Vec::new()).is_none());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ModelCategory::Grounded.label(), "grounded");
        assert_eq!(ModelCategory::Offline.label(), "offline");
        assert_eq!(ModelStatus::Online.label(), "online");
    }
}
