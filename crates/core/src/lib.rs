//! `portfolio-core` — domain foundation for the portfolio page.
//!
//! This crate contains **pure domain** logic (no DOM, no network): the project
//! catalog model, category and filter tags, description splitting and the
//! header repulsion math.

pub mod catalog;
pub mod category;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod repulsion;
pub mod text;

pub use catalog::{Catalog, CatalogEntry, ProjectLink};
pub use category::CategorySet;
pub use error::{CatalogError, CatalogResult};
pub use filter::FilterTag;
pub use geometry::{Offset, Point, Rect};
pub use repulsion::Repulsion;
pub use text::split_sentences;
