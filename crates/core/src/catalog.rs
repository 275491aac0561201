//! Project catalog model.
//!
//! The catalog is a static JSON document (`{ "projects": [ ... ] }`) loaded
//! once per page view. Field names follow the published document exactly,
//! including the kebab-case and capitalised keys.

use serde::{Deserialize, Serialize};

use crate::category::CategorySet;
use crate::error::CatalogResult;

/// Outbound link shown in the project popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    pub name: String,
    pub url: String,
}

impl ProjectLink {
    /// Store links get the primary button style.
    pub fn is_primary(&self) -> bool {
        self.name == "Steam"
    }
}

/// One portfolio project. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    pub description: String,
    #[serde(rename = "long-description")]
    pub long_description: String,
    pub banner: String,
    #[serde(rename = "carousel-images")]
    pub carousel_images: Vec<String>,
    pub category: CategorySet,
    pub date: String,
    pub role: String,
    #[serde(rename = "Technologies")]
    pub technologies: String,
    pub links: Vec<ProjectLink>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    projects: Vec<CatalogEntry>,
}

/// Ordered list of projects, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog document.
    ///
    /// Every entry field is required: a document with an incomplete entry is
    /// rejected as a whole instead of failing later inside the popup.
    pub fn from_json(body: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(body).inspect_err(|e| {
            tracing::debug!(line = e.line(), column = e.column(), "catalog document rejected");
        })?;
        Ok(Self::new(document.projects))
    }

    pub fn to_json(&self) -> CatalogResult<String> {
        let document = CatalogDocument {
            projects: self.entries.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    pub fn find_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.title == title)
    }

    /// Distinct category tags across the catalog, first-seen order.
    pub fn categories(&self) -> CategorySet {
        let joined = self
            .entries
            .iter()
            .map(|e| e.category.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        CategorySet::parse(&joined)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
