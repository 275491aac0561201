//! Render target abstraction over the page DOM.
//!
//! Controllers never touch a concrete DOM. They talk to a [`RenderTarget`],
//! which is implemented by the browser binding (`BrowserDom`, wasm32 only)
//! and by [`crate::memory::MemoryDom`] for tests and headless rendering.
//!
//! All operations are infallible from the caller's point of view: a binding
//! that hits a DOM exception logs it and carries on, the way a script
//! would keep running after a failed `setAttribute`.

use thiserror::Error;

use portfolio_core::Rect;
use portfolio_events::{EventKind, Subscription, UiEvent};

/// Handler invoked for every delivered event.
pub type EventHandler = Box<dyn FnMut(&UiEvent)>;

/// A required page element is absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("required element not found: {0}")]
    MissingElement(String),
}

pub trait RenderTarget {
    /// Handle to an element. Cheap to clone; equality is identity.
    type Node: Clone + PartialEq + core::fmt::Debug + 'static;

    /// First element in the document matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`.
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn query_all_in(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;

    fn matches(&self, node: &Self::Node, selector: &str) -> bool;

    /// Deep copies of a `<template>`'s top-level elements, in order and
    /// detached from the document. Empty for an empty template.
    fn instantiate_template(&self, template: &Self::Node) -> Vec<Self::Node>;

    /// Detached element; `None` (after logging) if the tag is rejected.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;

    /// Text content of the node and all its descendants.
    fn text(&self, node: &Self::Node) -> String;

    /// Replace all children with a single text node.
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Append a text node after the existing children.
    fn append_text(&self, parent: &Self::Node, text: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Inline style property, if set.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;

    /// Set an inline style property; an empty value removes it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    fn clear_children(&self, node: &Self::Node);

    /// Element children, in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn bounding_rect(&self, node: &Self::Node) -> Rect;

    /// Document title.
    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    fn listen(&self, node: &Self::Node, kind: EventKind, handler: EventHandler) -> Subscription;

    /// Like [`RenderTarget::query`], logging when nothing matches.
    fn find(&self, selector: &str) -> Option<Self::Node> {
        let node = self.query(selector);
        if node.is_none() {
            tracing::warn!(selector, "element not found");
        }
        node
    }

    /// Like [`RenderTarget::query_in`], logging when nothing matches.
    fn find_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node> {
        let node = self.query_in(scope, selector);
        if node.is_none() {
            tracing::warn!(selector, "element not found in scope");
        }
        node
    }

    /// Like [`RenderTarget::query`], failing when nothing matches.
    fn require(&self, selector: &str) -> Result<Self::Node, DomError> {
        self.query(selector)
            .ok_or_else(|| DomError::MissingElement(selector.to_string()))
    }
}
