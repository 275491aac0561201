//! Project cards built from the page's card template.

use std::rc::Rc;

use portfolio_core::CatalogEntry;
use portfolio_events::{EventKind, Subscription, SubscriptionSet, UiEvent};

use crate::config::{CardSelectors, GridConfig};
use crate::dom::{DomError, RenderTarget};
use crate::popup::PopupController;

/// A card appended to the grid, plus its "learn more" click handler.
///
/// `node` is the filterable item carrying the category classes. With a
/// wrapped template it sits inside one of `roots`, which are what the grid
/// actually received.
#[derive(Debug)]
pub struct RenderedCard<N> {
    pub node: N,
    pub roots: Vec<N>,
    pub subscription: Subscription,
}

pub struct CardRenderer<D: RenderTarget> {
    dom: Rc<D>,
    grid: D::Node,
    template: D::Node,
    item: String,
    selectors: CardSelectors,
    popup: Rc<PopupController<D>>,
}

impl<D: RenderTarget + 'static> CardRenderer<D> {
    pub fn new(
        dom: Rc<D>,
        grid: &GridConfig,
        selectors: CardSelectors,
        popup: Rc<PopupController<D>>,
    ) -> Result<Self, DomError> {
        let grid_node = dom.require(&grid.container)?;
        let template = dom.require(&grid.template)?;
        Ok(Self {
            dom,
            grid: grid_node,
            template,
            item: grid.item.clone(),
            selectors,
            popup,
        })
    }

    pub fn grid(&self) -> &D::Node {
        &self.grid
    }

    /// Clone the template for `entry` and append it to the grid.
    ///
    /// Returns `None` (after logging) when the template is empty. Card
    /// fields missing from the template are skipped individually.
    pub fn render(&self, entry: Rc<CatalogEntry>) -> Option<RenderedCard<D::Node>> {
        let roots = self.dom.instantiate_template(&self.template);
        let Some(card) = self.item_of(&roots) else {
            tracing::warn!("card template has no element content");
            return None;
        };

        for tag in entry.category.iter() {
            self.dom.add_class(&card, tag);
        }

        if let Some(image) = self.dom.find_in(&card, &self.selectors.image) {
            self.dom.set_attribute(&image, "src", &entry.banner);
            self.dom.set_attribute(&image, "alt", &entry.title);
        }
        if let Some(title) = self.dom.find_in(&card, &self.selectors.title) {
            self.dom.set_text(&title, &entry.title);
        }
        if let Some(description) = self.dom.find_in(&card, &self.selectors.description) {
            self.dom.set_text(&description, &entry.description);
        }

        let subscription = match self.dom.find_in(&card, &self.selectors.learn_more) {
            Some(link) => {
                let popup = Rc::downgrade(&self.popup);
                self.dom.listen(
                    &link,
                    EventKind::Click,
                    Box::new(move |event: &UiEvent| {
                        event.prevent_default();
                        if let Some(popup) = popup.upgrade() {
                            popup.show(entry.clone());
                        }
                    }),
                )
            }
            None => Subscription::noop(),
        };

        for root in &roots {
            self.dom.append_child(&self.grid, root);
        }
        Some(RenderedCard {
            node: card,
            roots,
            subscription,
        })
    }

    /// The item container among the cloned roots: a root that is itself an
    /// item, else the first item nested in a root, else the first root.
    fn item_of(&self, roots: &[D::Node]) -> Option<D::Node> {
        if let Some(root) = roots.iter().find(|r| self.dom.matches(r, &self.item)) {
            return Some(root.clone());
        }
        if let Some(nested) = roots.iter().find_map(|r| self.dom.query_in(r, &self.item)) {
            return Some(nested);
        }
        let first = roots.first()?;
        tracing::warn!(item = %self.item, "card template has no item container");
        Some(first.clone())
    }

    /// Render every entry in order; returns the card nodes and the click
    /// subscriptions collected into one set.
    pub fn render_all<I>(&self, entries: I) -> (Vec<D::Node>, SubscriptionSet)
    where
        I: IntoIterator<Item = Rc<CatalogEntry>>,
    {
        let mut nodes = Vec::new();
        let mut subscriptions = SubscriptionSet::new();
        for entry in entries {
            if let Some(card) = self.render(entry) {
                nodes.push(card.node);
                subscriptions.push(card.subscription);
            }
        }
        tracing::debug!(cards = nodes.len(), "cards rendered");
        (nodes, subscriptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PageConfig, PopupSelectors};
    use crate::layout::LayoutEngine;
    use crate::memory::{MemoryDom, MemoryLayoutEngine, MemoryWidgets, build_page};
    use portfolio_core::FilterTag;
    use portfolio_core::CategorySet;
    use portfolio_events::UiEvent;

    fn entry(title: &str, category: &str) -> Rc<CatalogEntry> {
        Rc::new(CatalogEntry {
            title: title.into(),
            description: format!("{title} in short"),
            long_description: "Long. Story".into(),
            banner: format!("img/{title}.png"),
            carousel_images: vec![],
            category: CategorySet::parse(category),
            date: "2024".into(),
            role: "Lead".into(),
            technologies: "Rust".into(),
            links: vec![],
        })
    }

    fn renderer() -> (Rc<MemoryDom>, CardRenderer<MemoryDom>) {
        let dom = Rc::new(MemoryDom::with_title("Portfolio"));
        build_page(&dom, "Hi", &CategorySet::parse("web game"));
        let widgets = Rc::new(MemoryWidgets::new(dom.clone()));
        let popup = PopupController::new(dom.clone(), widgets, PopupSelectors::default()).unwrap();
        let config = PageConfig::default();
        let renderer = CardRenderer::new(dom.clone(), &config.grid, config.card, popup).unwrap();
        (dom, renderer)
    }

    #[test]
    fn card_carries_entry_fields_and_category_classes() {
        let (dom, renderer) = renderer();
        let card = renderer.render(entry("Orbit", "game web")).unwrap();

        assert!(dom.has_class(&card.node, "project-item"));
        assert!(dom.has_class(&card.node, "game"));
        assert!(dom.has_class(&card.node, "web"));

        let image = dom.query_in(&card.node, ".project-image").unwrap();
        assert_eq!(dom.attribute(&image, "src").as_deref(), Some("img/Orbit.png"));
        assert_eq!(dom.attribute(&image, "alt").as_deref(), Some("Orbit"));
        let title = dom.query_in(&card.node, ".project-title").unwrap();
        assert_eq!(dom.text(&title), "Orbit");
        let description = dom.query_in(&card.node, ".project-description").unwrap();
        assert_eq!(dom.text(&description), "Orbit in short");

        assert_eq!(dom.children(renderer.grid()), vec![card.node]);
    }

    #[test]
    fn render_all_keeps_source_order() {
        let (dom, renderer) = renderer();
        let (nodes, subscriptions) =
            renderer.render_all(["A", "B", "C"].map(|t| entry(t, "web")));

        assert_eq!(nodes.len(), 3);
        assert_eq!(subscriptions.len(), 3);
        let titles: Vec<String> = dom
            .query_all(".projects-grid .project-title")
            .iter()
            .map(|n| dom.text(n))
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn learn_more_opens_popup_and_prevents_navigation() {
        let (dom, renderer) = renderer();
        let card = renderer.render(entry("Orbit", "game")).unwrap();
        let link = dom.query_in(&card.node, ".project-link").unwrap();

        let event = dom.dispatch(link, UiEvent::new(EventKind::Click));
        assert!(event.default_prevented());
        assert_eq!(dom.title(), "Orbit | Portfolio");
    }

    #[test]
    fn disposed_card_click_does_nothing() {
        let (dom, renderer) = renderer();
        let card = renderer.render(entry("Orbit", "game")).unwrap();
        let link = dom.query_in(&card.node, ".project-link").unwrap();

        card.subscription.dispose();
        let event = dom.dispatch(link, UiEvent::new(EventKind::Click));
        assert!(!event.default_prevented());
        assert_eq!(dom.title(), "Portfolio");
    }

    #[test]
    fn wrapped_template_tags_the_nested_item() {
        let (dom, renderer) = renderer();
        let template = dom.query("#project-card-template").unwrap();
        dom.clear_children(&template);
        let column = dom.add(template, "div", "col-md-4");
        let item = dom.add(column, "div", "project-item");
        dom.add(item, "h5", "project-title");
        dom.add(template, "hr", "divider");

        let card = renderer.render(entry("Orbit", "web")).unwrap();

        assert!(dom.has_class(&card.node, "web"));
        assert!(dom.has_class(&card.node, "project-item"));
        assert!(!dom.has_class(&card.roots[0], "web"));
        assert_eq!(dom.children(renderer.grid()), card.roots);
        assert_eq!(card.roots.len(), 2);

        let engine = MemoryLayoutEngine::new(dom.clone());
        let options = PageConfig::default().layout_options();
        let layout = engine.mount(renderer.grid(), &options).unwrap();
        layout.arrange(&FilterTag::parse(".web"));
        assert_eq!(dom.style(&card.node, "display"), None);
        layout.arrange(&FilterTag::parse(".game"));
        assert_eq!(dom.style(&card.node, "display").as_deref(), Some("none"));
    }

    #[test]
    fn empty_template_renders_nothing() {
        let (dom, renderer) = renderer();
        let template = dom.query("#project-card-template").unwrap();
        dom.clear_children(&template);

        assert!(renderer.render(entry("Orbit", "web")).is_none());
        assert!(dom.children(renderer.grid()).is_empty());
    }
}
