//! UI events delivered to page controllers.

use std::cell::Cell;

use portfolio_core::Point;

/// Kinds of DOM events the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerEnter,
    PointerMove,
    PointerLeave,
    /// The modal finished hiding (`hidden.bs.modal`).
    ModalHidden,
}

impl EventKind {
    /// DOM event type name.
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::PointerEnter => "mouseenter",
            EventKind::PointerMove => "mousemove",
            EventKind::PointerLeave => "mouseleave",
            EventKind::ModalHidden => "hidden.bs.modal",
        }
    }
}

/// A delivered event.
///
/// Handlers call [`UiEvent::prevent_default`]; the DOM binding forwards the
/// request to the native event once the handler returns.
#[derive(Debug, Clone)]
pub struct UiEvent {
    kind: EventKind,
    pointer: Option<Point>,
    default_prevented: Cell<bool>,
}

impl UiEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            pointer: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn pointer(kind: EventKind, at: Point) -> Self {
        Self {
            pointer: Some(at),
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Client coordinates for pointer events.
    pub fn position(&self) -> Option<Point> {
        self.pointer
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}
