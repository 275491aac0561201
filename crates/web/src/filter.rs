//! Filter buttons driving the grid layout.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::FilterTag;
use portfolio_events::{EventKind, SubscriptionSet, UiEvent};

use crate::config::FilterSelectors;
use crate::dom::RenderTarget;
use crate::layout::GridLayout;

const ACTIVE: &str = "active";
const HIDDEN: &str = "d-none";
const FILTER_ATTRIBUTE: &str = "data-filter";

/// Keeps exactly one filter button active and applies its filter.
pub struct FilterController<D: RenderTarget> {
    dom: Rc<D>,
    buttons: Vec<D::Node>,
    info_panel: Option<D::Node>,
    layout: Box<dyn GridLayout>,
    active: RefCell<FilterTag>,
}

impl<D: RenderTarget + 'static> FilterController<D> {
    pub fn new(dom: Rc<D>, selectors: &FilterSelectors, layout: Box<dyn GridLayout>) -> Rc<Self> {
        let buttons = dom.query_all(&selectors.buttons);
        if buttons.is_empty() {
            tracing::warn!(selector = %selectors.buttons, "no filter buttons on page");
        }
        let info_panel = dom.find(&selectors.info_panel);

        let controller = Rc::new(Self {
            dom,
            buttons,
            info_panel,
            layout,
            active: RefCell::new(FilterTag::All),
        });
        controller.normalize();
        controller
    }

    /// Make sure exactly one button starts out active: keep a lone active
    /// button, otherwise fall back to the `*` button, then the first one.
    fn normalize(&self) {
        let active: Vec<&D::Node> = self
            .buttons
            .iter()
            .filter(|b| self.dom.has_class(b, ACTIVE))
            .collect();

        let chosen = match active.as_slice() {
            [only] => Some((*only).clone()),
            _ => {
                let fallback = self
                    .buttons
                    .iter()
                    .find(|b| self.filter_of(b).is_all())
                    .or_else(|| self.buttons.first())
                    .cloned();
                for button in &self.buttons {
                    self.dom.remove_class(button, ACTIVE);
                }
                if let Some(button) = &fallback {
                    self.dom.add_class(button, ACTIVE);
                }
                fallback
            }
        };

        if let Some(button) = chosen {
            let filter = self.filter_of(&button);
            if !filter.is_all() {
                self.layout.arrange(&filter);
            }
            *self.active.borrow_mut() = filter;
        }
    }

    /// Wire a click handler on every button.
    pub fn attach(self: &Rc<Self>) -> SubscriptionSet {
        let mut subscriptions = SubscriptionSet::new();
        for button in &self.buttons {
            let controller = Rc::downgrade(self);
            let target = button.clone();
            subscriptions.push(self.dom.listen(
                button,
                EventKind::Click,
                Box::new(move |_: &UiEvent| {
                    if let Some(controller) = controller.upgrade() {
                        controller.on_filter_click(&target);
                    }
                }),
            ));
        }
        subscriptions
    }

    /// Activate `button` and apply its filter. A button without a
    /// `data-filter` attribute counts as `*`.
    pub fn on_filter_click(&self, button: &D::Node) -> FilterTag {
        for other in &self.buttons {
            self.dom.remove_class(other, ACTIVE);
        }
        self.dom.add_class(button, ACTIVE);

        let filter = self.filter_of(button);
        tracing::debug!(filter = %filter, "applying filter");
        self.layout.arrange(&filter);

        if filter.is_all() {
            if let Some(panel) = &self.info_panel {
                self.dom.add_class(panel, HIDDEN);
            }
        }

        *self.active.borrow_mut() = filter.clone();
        filter
    }

    pub fn active(&self) -> FilterTag {
        self.active.borrow().clone()
    }

    pub fn active_button(&self) -> Option<D::Node> {
        self.buttons
            .iter()
            .find(|b| self.dom.has_class(b, ACTIVE))
            .cloned()
    }

    pub fn buttons(&self) -> &[D::Node] {
        &self.buttons
    }

    fn filter_of(&self, button: &D::Node) -> FilterTag {
        self.dom
            .attribute(button, FILTER_ATTRIBUTE)
            .map(|raw| FilterTag::parse(&raw))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::layout::LayoutEngine;
    use crate::memory::{MemoryDom, MemoryLayoutEngine, NodeId, build_page};
    use portfolio_core::CategorySet;
    use portfolio_events::UiEvent;

    fn setup() -> (Rc<MemoryDom>, MemoryLayoutEngine, Vec<NodeId>, NodeId) {
        let dom = Rc::new(MemoryDom::new());
        let page = build_page(&dom, "Hi", &CategorySet::parse("web game"));
        let engine = MemoryLayoutEngine::new(dom.clone());
        (dom, engine, page.filter_buttons, page.info_panel)
    }

    fn controller(dom: &Rc<MemoryDom>, engine: &MemoryLayoutEngine) -> Rc<FilterController<MemoryDom>> {
        let config = PageConfig::default();
        let grid = dom.query(&config.grid.container).unwrap();
        let layout = engine.mount(&grid, &config.layout_options()).unwrap();
        FilterController::new(dom.clone(), &config.filters, layout)
    }

    fn active_count(dom: &MemoryDom, buttons: &[NodeId]) -> usize {
        buttons.iter().filter(|b| dom.has_class(b, ACTIVE)).count()
    }

    #[test]
    fn click_moves_active_class_to_clicked_button() {
        let (dom, engine, buttons, _) = setup();
        let filters = controller(&dom, &engine);
        let _wired = filters.attach();

        dom.dispatch(buttons[2], UiEvent::new(EventKind::Click));

        assert_eq!(active_count(&dom, &buttons), 1);
        assert_eq!(filters.active_button(), Some(buttons[2]));
        assert_eq!(filters.active(), FilterTag::parse(".game"));
        assert_eq!(engine.arrangements().last(), Some(&FilterTag::parse(".game")));
    }

    #[test]
    fn star_hides_the_info_panel() {
        let (dom, engine, buttons, info) = setup();
        let filters = controller(&dom, &engine);

        filters.on_filter_click(&buttons[1]);
        assert!(!dom.has_class(&info, HIDDEN));

        let applied = filters.on_filter_click(&buttons[0]);
        assert!(applied.is_all());
        assert!(dom.has_class(&info, HIDDEN));
        assert_eq!(engine.arrangements().last(), Some(&FilterTag::All));
    }

    #[test]
    fn button_without_filter_attribute_means_all() {
        let (dom, engine, buttons, _) = setup();
        let stray = dom.add(dom.parent(buttons[0]).unwrap(), "button", "btn filter-btn");
        let filters = controller(&dom, &engine);

        assert!(filters.on_filter_click(&stray).is_all());
    }

    #[test]
    fn several_active_buttons_collapse_to_star() {
        let (dom, engine, buttons, _) = setup();
        dom.add_class(&buttons[1], ACTIVE);
        dom.add_class(&buttons[2], ACTIVE);

        let filters = controller(&dom, &engine);
        assert_eq!(active_count(&dom, &buttons), 1);
        assert_eq!(filters.active_button(), Some(buttons[0]));
        assert!(filters.active().is_all());
    }

    #[test]
    fn no_active_button_activates_star() {
        let (dom, engine, buttons, _) = setup();
        dom.remove_class(&buttons[0], ACTIVE);

        let filters = controller(&dom, &engine);
        assert_eq!(filters.active_button(), Some(buttons[0]));
    }

    #[test]
    fn lone_active_category_button_is_applied() {
        let (dom, engine, buttons, _) = setup();
        dom.remove_class(&buttons[0], ACTIVE);
        dom.add_class(&buttons[1], ACTIVE);

        let filters = controller(&dom, &engine);
        assert_eq!(filters.active(), FilterTag::parse(".web"));
        assert_eq!(engine.arrangements().last(), Some(&FilterTag::parse(".web")));
    }

    #[test]
    fn dropped_subscriptions_detach_buttons() {
        let (dom, engine, buttons, _) = setup();
        let filters = controller(&dom, &engine);
        drop(filters.attach());

        dom.dispatch(buttons[1], UiEvent::new(EventKind::Click));
        assert_eq!(filters.active_button(), Some(buttons[0]));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_click_sequence_leaves_one_active_button(
                clicks in prop::collection::vec(0usize..3, 1..24),
                preset in prop::collection::vec(any::<bool>(), 3),
            ) {
                let (dom, engine, buttons, _) = setup();
                for (button, active) in buttons.iter().zip(&preset) {
                    if *active {
                        dom.add_class(button, ACTIVE);
                    } else {
                        dom.remove_class(button, ACTIVE);
                    }
                }
                let filters = controller(&dom, &engine);
                let _wired = filters.attach();
                prop_assert_eq!(active_count(&dom, &buttons), 1);

                for &index in &clicks {
                    dom.dispatch(buttons[index], UiEvent::new(EventKind::Click));
                    prop_assert_eq!(active_count(&dom, &buttons), 1);
                    prop_assert_eq!(filters.active_button(), Some(buttons[index]));
                }

                let last = buttons[*clicks.last().unwrap()];
                prop_assert_eq!(filters.active(), filters.filter_of(&last));
                let arrangements = engine.arrangements();
                prop_assert_eq!(arrangements.last(), Some(&filters.active()));
            }
        }
    }
}
