//! Modal/carousel library stand-in.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use portfolio_events::{EventKind, UiEvent};

use crate::dom::RenderTarget;
use crate::memory::dom::{MemoryDom, NodeId};
use crate::widgets::{WidgetError, WidgetToolkit};

#[derive(Debug, Default)]
struct WidgetState {
    open: Vec<NodeId>,
    carousels: HashMap<NodeId, usize>,
    started: usize,
    disposed: usize,
}

/// Tracks modal visibility and live carousel instances.
///
/// Hiding a modal goes through [`MemoryWidgets::hide_modal`], which fires the
/// modal's hidden event the way the real library does once its fade-out ends.
#[derive(Debug, Clone)]
pub struct MemoryWidgets {
    dom: Rc<MemoryDom>,
    state: Rc<RefCell<WidgetState>>,
}

impl MemoryWidgets {
    pub fn new(dom: Rc<MemoryDom>) -> Self {
        Self {
            dom,
            state: Rc::default(),
        }
    }

    pub fn is_open(&self, modal: NodeId) -> bool {
        self.state.borrow().open.contains(&modal)
    }

    pub fn hide_modal(&self, modal: NodeId) {
        let was_open = {
            let mut state = self.state.borrow_mut();
            let before = state.open.len();
            state.open.retain(|m| *m != modal);
            state.open.len() != before
        };
        if was_open {
            self.dom.remove_class(&modal, "show");
            self.dom.dispatch(modal, UiEvent::new(EventKind::ModalHidden));
        }
    }

    /// Slide count of the live carousel on `carousel`, if any.
    pub fn carousel(&self, carousel: NodeId) -> Option<usize> {
        self.state.borrow().carousels.get(&carousel).copied()
    }

    pub fn live_carousels(&self) -> usize {
        self.state.borrow().carousels.len()
    }

    /// (started, disposed) carousel counts.
    pub fn carousel_lifecycle(&self) -> (usize, usize) {
        let state = self.state.borrow();
        (state.started, state.disposed)
    }
}

impl WidgetToolkit<NodeId> for MemoryWidgets {
    fn show_modal(&self, modal: &NodeId) -> Result<(), WidgetError> {
        let mut state = self.state.borrow_mut();
        if !state.open.contains(modal) {
            state.open.push(*modal);
        }
        self.dom.add_class(modal, "show");
        Ok(())
    }

    fn start_carousel(&self, carousel: &NodeId, slides: usize) -> Result<(), WidgetError> {
        let mut state = self.state.borrow_mut();
        if state.carousels.contains_key(carousel) {
            return Err(WidgetError::Call(
                "carousel already initialised on this element".to_string(),
            ));
        }
        state.carousels.insert(*carousel, slides);
        state.started += 1;
        Ok(())
    }

    fn dispose_carousel(&self, carousel: &NodeId) -> Result<bool, WidgetError> {
        let mut state = self.state.borrow_mut();
        let existed = state.carousels.remove(carousel).is_some();
        if existed {
            state.disposed += 1;
        }
        Ok(existed)
    }
}
