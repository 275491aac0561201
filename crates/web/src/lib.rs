//! Portfolio page interactivity.
//!
//! Controllers are written against [`dom::RenderTarget`] and the
//! collaborator traits in [`layout`], [`widgets`] and [`frame`]. The
//! browser build binds them to the real DOM, Isotope, Bootstrap and
//! `requestAnimationFrame`; [`memory`] provides native stand-ins for tests
//! and the `portfolio-preview` tool.

pub mod card;
pub mod catalog_store;
pub mod config;
pub mod dom;
pub mod filter;
pub mod frame;
pub mod header;
pub mod layout;
pub mod manager;
pub mod memory;
pub mod page;
pub mod popup;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use card::{CardRenderer, RenderedCard};
pub use catalog_store::{
    CatalogSource, CatalogStore, FetchedDocument, HttpCatalogSource, StaticCatalogSource,
};
#[cfg(not(target_arch = "wasm32"))]
pub use catalog_store::FileCatalogSource;
pub use config::{ConfigError, PageConfig};
pub use dom::{DomError, RenderTarget};
pub use filter::FilterController;
pub use header::{HeaderAnimator, ReactiveHeader};
pub use manager::{ErrorHook, ProjectsManager};
pub use page::{Collaborators, PortfolioPage};
pub use popup::PopupController;
