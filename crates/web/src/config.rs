//! Page configuration: catalog location, DOM contract points, effect tuning.
//!
//! Every field has a default matching the published page markup, so an
//! empty JSON object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use portfolio_core::Repulsion;

use crate::layout::{LayoutMode, LayoutOptions};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration document: {0}")]
    Parse(String),

    #[error("invalid configuration value: {0}")]
    Invalid(String),
}

/// Top-level configuration for the portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Catalog document location, relative to the page.
    pub catalog_url: String,
    pub grid: GridConfig,
    pub card: CardSelectors,
    pub filters: FilterSelectors,
    pub popup: PopupSelectors,
    pub header: HeaderConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            catalog_url: "projects.json".to_string(),
            grid: GridConfig::default(),
            card: CardSelectors::default(),
            filters: FilterSelectors::default(),
            popup: PopupSelectors::default(),
            header: HeaderConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_url.trim().is_empty() {
            return Err(ConfigError::Invalid("catalog_url must not be empty".into()));
        }
        if !(self.header.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "header.radius must be positive, got {}",
                self.header.radius
            )));
        }
        if !(self.header.max_offset >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "header.max_offset must not be negative, got {}",
                self.header.max_offset
            )));
        }
        Ok(())
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            item_selector: self.grid.item.clone(),
            layout_mode: self.grid.layout_mode,
            percent_position: self.grid.percent_position,
        }
    }
}

/// Card grid and its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub container: String,
    pub template: String,
    pub item: String,
    pub layout_mode: LayoutMode,
    pub percent_position: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            container: ".projects-grid".to_string(),
            template: "#project-card-template".to_string(),
            item: ".project-item".to_string(),
            layout_mode: LayoutMode::FitRows,
            percent_position: true,
        }
    }
}

/// Fields inside one card, relative to the card item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSelectors {
    pub image: String,
    pub title: String,
    pub description: String,
    pub learn_more: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            image: ".project-image".to_string(),
            title: ".project-title".to_string(),
            description: ".project-description".to_string(),
            learn_more: ".project-link".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelectors {
    /// Buttons carrying a `data-filter` attribute.
    pub buttons: String,
    /// Side panel hidden when "all" is selected.
    pub info_panel: String,
}

impl Default for FilterSelectors {
    fn default() -> Self {
        Self {
            buttons: ".filter-btn".to_string(),
            info_panel: "#project-info".to_string(),
        }
    }
}

/// Modal popup; everything but `modal` is looked up inside the modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupSelectors {
    pub modal: String,
    pub title: String,
    pub description: String,
    pub info: String,
    pub links: String,
    pub carousel: String,
    pub indicators: String,
    pub slides: String,
    pub prev: String,
    pub next: String,
}

impl Default for PopupSelectors {
    fn default() -> Self {
        Self {
            modal: "#projectPopup".to_string(),
            title: ".modal-title".to_string(),
            description: ".project-description".to_string(),
            info: ".project-info".to_string(),
            links: ".project-links".to_string(),
            carousel: "#popupCarousel".to_string(),
            indicators: ".carousel-indicators".to_string(),
            slides: ".carousel-inner".to_string(),
            prev: ".carousel-control-prev".to_string(),
            next: ".carousel-control-next".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub selector: String,
    /// Pointer influence radius in px.
    pub radius: f64,
    /// Largest letter displacement in px.
    pub max_offset: f64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        let repulsion = Repulsion::default();
        Self {
            selector: ".reactive-header".to_string(),
            radius: repulsion.radius,
            max_offset: repulsion.max_offset,
        }
    }
}

impl HeaderConfig {
    pub fn repulsion(&self) -> Repulsion {
        Repulsion::new(self.radius, self.max_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.catalog_url, "projects.json");
        assert_eq!(config.header.repulsion(), Repulsion::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            PageConfig::from_json(r#"{ "catalog_url": "data/work.json", "header": { "radius": 60 } }"#)
                .unwrap();
        assert_eq!(config.catalog_url, "data/work.json");
        assert_eq!(config.header.radius, 60.0);
        assert_eq!(config.header.max_offset, 15.0);
        assert_eq!(config.grid.container, ".projects-grid");
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = PageConfig::from_json(r#"{ "header": { "radius": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PageConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn layout_options_follow_grid_config() {
        let options = PageConfig::default().layout_options();
        assert_eq!(options.item_selector, ".project-item");
        assert_eq!(options.layout_mode, LayoutMode::FitRows);
        assert!(options.percent_position);
    }
}
