//! Catalog model and loading.
//!
//! The catalog is a JSON document `{"widgets": [...]}` read once at startup
//! and never mutated afterwards. Favorites are kept elsewhere, keyed by id.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixture compiled into the binary, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../data/widgets.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate widget id in catalog: {0}")]
    DuplicateId(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleOutput {
    pub file_name: String,
    pub file_type: String,
    pub url: String,
}

/// One marketplace item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0.0 to 5.0
    pub rating: f64,
    pub rating_count: u64,
    pub views: u64,
    /// Display order only; filtering treats these as a set.
    pub tags: Vec<String>,
    pub shop: Shop,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_outputs: Option<Vec<ExampleOutput>>,
}

#[derive(Deserialize)]
struct CatalogFile {
    widgets: Vec<Widget>,
}

/// Read-only, ordered widget collection. Catalog order is the "popular"
/// ranking, so it is kept exactly as loaded.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    widgets: Vec<Widget>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(widgets: Vec<Widget>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for widget in &widgets {
            if !seen.insert(widget.id.as_str()) {
                return Err(CatalogError::DuplicateId(widget.id.clone()));
            }
        }
        Ok(Self { widgets })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.widgets)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Every tag used in the catalog, once, in the order first seen.
    pub fn available_tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = Vec::new();
        for tag in self.widgets.iter().flat_map(|w| w.tags.iter()) {
            if seen.insert(tag.as_str()) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub fn total_views(&self) -> u64 {
        self.widgets.iter().map(|w| w.views).sum()
    }
}
