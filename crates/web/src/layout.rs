//! Grid layout/filter library seam (Isotope in the browser).

use serde::{Deserialize, Serialize};

use portfolio_core::FilterTag;

use crate::widgets::WidgetError;

/// Layout algorithm requested from the grid library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    FitRows,
    Masonry,
    Vertical,
}

/// Options passed when the grid library takes over a container.
///
/// Serialized with the library's own option names
/// (`itemSelector`, `layoutMode`, `percentPosition`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub item_selector: String,
    pub layout_mode: LayoutMode,
    pub percent_position: bool,
}

/// Factory side of the library: `new Isotope(root, options)`.
pub trait LayoutEngine<N> {
    fn mount(&self, root: &N, options: &LayoutOptions) -> Result<Box<dyn GridLayout>, WidgetError>;
}

/// A mounted grid: `iso.arrange({ filter })`.
pub trait GridLayout {
    /// Show only items matching `filter` and reflow.
    fn arrange(&self, filter: &FilterTag);
}
