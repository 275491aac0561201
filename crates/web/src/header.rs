//! Letter-repulsion effect on designated headers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use portfolio_core::{Offset, Point, Repulsion};
use portfolio_events::{EventKind, Subscription, SubscriptionSet, UiEvent};

use crate::dom::RenderTarget;
use crate::frame::FrameScheduler;

const LETTER_CLASS: &str = "letter";

/// One header whose text has been split into per-character spans.
///
/// At most one animation frame is pending per header; a newer pointer move
/// replaces it.
pub struct ReactiveHeader<D: RenderTarget> {
    dom: Rc<D>,
    frames: Rc<dyn FrameScheduler>,
    repulsion: Repulsion,
    node: D::Node,
    letters: Vec<D::Node>,
    hovering: Cell<bool>,
    pending: RefCell<Option<Subscription>>,
}

impl<D: RenderTarget + 'static> ReactiveHeader<D> {
    /// Replace `node`'s text with one `span.letter` per character.
    pub fn split(
        dom: Rc<D>,
        frames: Rc<dyn FrameScheduler>,
        repulsion: Repulsion,
        node: D::Node,
    ) -> Rc<Self> {
        let text = dom.text(&node);
        dom.clear_children(&node);

        let letters = text
            .chars()
            .filter_map(|c| {
                let span = dom.create_element("span")?;
                dom.add_class(&span, LETTER_CLASS);
                dom.set_text(&span, c.encode_utf8(&mut [0; 4]));
                dom.append_child(&node, &span);
                Some(span)
            })
            .collect();

        Rc::new(Self {
            dom,
            frames,
            repulsion,
            node,
            letters,
            hovering: Cell::new(false),
            pending: RefCell::new(None),
        })
    }

    pub fn node(&self) -> &D::Node {
        &self.node
    }

    pub fn letters(&self) -> &[D::Node] {
        &self.letters
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering.get()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Listen for pointer enter/move/leave on the header.
    pub fn attach(self: &Rc<Self>) -> SubscriptionSet {
        let mut subscriptions = SubscriptionSet::new();

        let header = Rc::downgrade(self);
        subscriptions.push(self.dom.listen(
            &self.node,
            EventKind::PointerEnter,
            Box::new(move |_: &UiEvent| {
                if let Some(header) = header.upgrade() {
                    header.pointer_enter();
                }
            }),
        ));

        let header = Rc::downgrade(self);
        subscriptions.push(self.dom.listen(
            &self.node,
            EventKind::PointerMove,
            Box::new(move |event: &UiEvent| {
                let (Some(header), Some(at)) = (header.upgrade(), event.position()) else {
                    return;
                };
                header.pointer_move(at);
            }),
        ));

        let header = Rc::downgrade(self);
        subscriptions.push(self.dom.listen(
            &self.node,
            EventKind::PointerLeave,
            Box::new(move |_: &UiEvent| {
                if let Some(header) = header.upgrade() {
                    header.pointer_leave();
                }
            }),
        ));

        subscriptions
    }

    pub fn pointer_enter(&self) {
        self.hovering.set(true);
    }

    /// Schedule a recomputation for `pointer`, replacing any pending one.
    /// Ignored while the pointer is outside the header.
    pub fn pointer_move(self: &Rc<Self>, pointer: Point) {
        if !self.hovering.get() {
            return;
        }
        self.cancel_pending();

        let header = Rc::downgrade(self);
        let request = self.frames.request_frame(Box::new(move || {
            if let Some(header) = header.upgrade() {
                header.pending.borrow_mut().take();
                header.apply(pointer);
            }
        }));
        *self.pending.borrow_mut() = Some(request);
    }

    pub fn pointer_leave(&self) {
        self.hovering.set(false);
        self.cancel_pending();
        self.reset();
    }

    /// Move every letter according to its distance from `pointer`.
    pub fn apply(&self, pointer: Point) {
        for letter in &self.letters {
            let center = self.dom.bounding_rect(letter).center();
            let offset = self.repulsion.displacement(pointer, center);
            self.dom.set_style(letter, "transform", &offset.to_transform());
        }
    }

    pub fn reset(&self) {
        let rest = Offset::ZERO.to_transform();
        for letter in &self.letters {
            self.dom.set_style(letter, "transform", &rest);
        }
    }

    pub fn cancel_pending(&self) {
        if let Some(request) = self.pending.borrow_mut().take() {
            request.dispose();
        }
    }
}

/// All reactive headers of the page.
pub struct HeaderAnimator<D: RenderTarget> {
    headers: Vec<Rc<ReactiveHeader<D>>>,
    subscriptions: SubscriptionSet,
}

impl<D: RenderTarget + 'static> HeaderAnimator<D> {
    /// Split and wire every header matching `selector`.
    pub fn attach(
        dom: Rc<D>,
        frames: Rc<dyn FrameScheduler>,
        repulsion: Repulsion,
        selector: &str,
    ) -> Self {
        let nodes = dom.query_all(selector);
        if nodes.is_empty() {
            tracing::debug!(selector, "no reactive headers on page");
        }

        let mut subscriptions = SubscriptionSet::new();
        let headers = nodes
            .into_iter()
            .map(|node| {
                let header = ReactiveHeader::split(dom.clone(), frames.clone(), repulsion, node);
                subscriptions.append(header.attach());
                header
            })
            .collect();

        Self {
            headers,
            subscriptions,
        }
    }

    pub fn headers(&self) -> &[Rc<ReactiveHeader<D>>] {
        &self.headers
    }

    /// Detach all listeners and cancel pending frames.
    pub fn teardown(&mut self) {
        self.subscriptions.dispose_all();
        for header in &self.headers {
            header.cancel_pending();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{ManualFrames, MemoryDom, NodeId};
    use portfolio_core::Rect;
    use portfolio_events::UiEvent;

    const LETTER_WIDTH: f64 = 20.0;

    /// "ABC" laid out left to right, letter centers at x = 10, 30, 50; y = 20.
    fn setup() -> (Rc<MemoryDom>, ManualFrames, HeaderAnimator<MemoryDom>) {
        let dom = Rc::new(MemoryDom::new());
        let h1 = dom.add(dom.root(), "h1", "reactive-header");
        dom.set_text(&h1, "ABC");

        let frames = ManualFrames::new();
        let animator = HeaderAnimator::attach(
            dom.clone(),
            Rc::new(frames.clone()),
            Repulsion::default(),
            ".reactive-header",
        );
        for (i, letter) in animator.headers()[0].letters().iter().enumerate() {
            dom.set_rect(*letter, Rect::new(i as f64 * LETTER_WIDTH, 0.0, LETTER_WIDTH, 40.0));
        }
        (dom, frames, animator)
    }

    fn header_node(animator: &HeaderAnimator<MemoryDom>) -> NodeId {
        *animator.headers()[0].node()
    }

    fn transforms(dom: &MemoryDom, animator: &HeaderAnimator<MemoryDom>) -> Vec<Option<String>> {
        animator.headers()[0]
            .letters()
            .iter()
            .map(|l| dom.style(l, "transform"))
            .collect()
    }

    fn move_to(dom: &MemoryDom, node: NodeId, x: f64, y: f64) {
        dom.dispatch(node, UiEvent::pointer(EventKind::PointerMove, Point::new(x, y)));
    }

    #[test]
    fn text_is_split_into_letter_spans() {
        let (dom, _, animator) = setup();
        let node = header_node(&animator);
        let spans = dom.query_all_in(&node, "span.letter");
        assert_eq!(spans.len(), 3);
        assert_eq!(dom.text(&spans[1]), "B");
        assert_eq!(dom.text(&node), "ABC");
    }

    #[test]
    fn moves_before_enter_are_ignored() {
        let (dom, frames, animator) = setup();
        move_to(&dom, header_node(&animator), 10.0, 20.0);
        assert_eq!(frames.requested(), 0);
        assert_eq!(transforms(&dom, &animator), vec![None, None, None]);
    }

    #[test]
    fn pointer_on_letter_center_lifts_it_by_max_offset() {
        let (dom, frames, animator) = setup();
        let node = header_node(&animator);
        dom.dispatch(node, UiEvent::new(EventKind::PointerEnter));
        move_to(&dom, node, 10.0, 20.0);
        assert_eq!(frames.run_frame(), 1);

        let t = transforms(&dom, &animator);
        assert_eq!(t[0].as_deref(), Some("translate(0px, -15px)"));
        // 20px away: pushed right by 15 * 80 / 100.
        assert_eq!(t[1].as_deref(), Some("translate(12px, 0px)"));
        assert!(!animator.headers()[0].has_pending_frame());
    }

    #[test]
    fn letters_out_of_range_rest() {
        let (dom, frames, animator) = setup();
        let node = header_node(&animator);
        dom.dispatch(node, UiEvent::new(EventKind::PointerEnter));
        move_to(&dom, node, 150.0, 20.0);
        frames.run_frame();

        // Letter at x = 50 is exactly 100px away.
        assert_eq!(transforms(&dom, &animator)[2].as_deref(), Some("translate(0, 0)"));
    }

    #[test]
    fn newer_move_supersedes_pending_frame() {
        let (dom, frames, animator) = setup();
        let node = header_node(&animator);
        dom.dispatch(node, UiEvent::new(EventKind::PointerEnter));
        move_to(&dom, node, 500.0, 500.0);
        move_to(&dom, node, 10.0, 20.0);

        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.requested(), 2);
        frames.run_frame();
        assert_eq!(transforms(&dom, &animator)[0].as_deref(), Some("translate(0px, -15px)"));
    }

    #[test]
    fn leave_resets_letters_and_cancels_frame() {
        let (dom, frames, animator) = setup();
        let node = header_node(&animator);
        dom.dispatch(node, UiEvent::new(EventKind::PointerEnter));
        move_to(&dom, node, 10.0, 20.0);
        frames.run_frame();
        move_to(&dom, node, 30.0, 20.0);

        dom.dispatch(node, UiEvent::new(EventKind::PointerLeave));
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.run_frame(), 0);
        let rest = Some("translate(0, 0)".to_string());
        assert_eq!(transforms(&dom, &animator), vec![rest.clone(), rest.clone(), rest.clone()]);

        move_to(&dom, node, 10.0, 20.0);
        assert_eq!(frames.pending(), 0);
        assert_eq!(transforms(&dom, &animator)[0], rest);
    }

    #[test]
    fn teardown_detaches_and_cancels() {
        let (dom, frames, mut animator) = setup();
        let node = header_node(&animator);
        dom.dispatch(node, UiEvent::new(EventKind::PointerEnter));
        move_to(&dom, node, 10.0, 20.0);

        animator.teardown();
        assert_eq!(frames.pending(), 0);
        assert_eq!(dom.listener_count(node, EventKind::PointerMove), 0);
    }
}
