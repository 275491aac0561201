//! Modal/carousel component library seam (Bootstrap in the browser).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The library (or one of its entry points) is not loaded on the page.
    #[error("UI library unavailable: {0}")]
    Unavailable(String),

    /// The library threw while being called.
    #[error("UI library call failed: {0}")]
    Call(String),
}

pub trait WidgetToolkit<N> {
    /// `Modal.getOrCreateInstance(modal).show()`.
    fn show_modal(&self, modal: &N) -> Result<(), WidgetError>;

    /// `new Carousel(carousel)` over `slides` slides.
    fn start_carousel(&self, carousel: &N, slides: usize) -> Result<(), WidgetError>;

    /// `Carousel.getInstance(carousel)?.dispose()`; returns whether an
    /// instance existed.
    fn dispose_carousel(&self, carousel: &N) -> Result<bool, WidgetError>;
}
