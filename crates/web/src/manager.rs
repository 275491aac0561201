//! Page initialization: load the catalog, render cards, mount the grid,
//! wire the filters.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::{CatalogEntry, CatalogError, CatalogResult};
use portfolio_events::SubscriptionSet;

use crate::card::CardRenderer;
use crate::catalog_store::{CatalogSource, CatalogStore};
use crate::config::{FilterSelectors, PageConfig};
use crate::dom::{DomError, RenderTarget};
use crate::filter::FilterController;
use crate::layout::{LayoutEngine, LayoutOptions};
use crate::popup::PopupController;
use crate::widgets::WidgetToolkit;

/// Called once with the error that aborted [`ProjectsManager::init`].
pub type ErrorHook = Rc<dyn Fn(&CatalogError)>;

struct Loaded<D: RenderTarget> {
    entries: Vec<Rc<CatalogEntry>>,
    cards: Vec<D::Node>,
    card_subscriptions: SubscriptionSet,
    filters: Option<Rc<FilterController<D>>>,
    filter_subscriptions: SubscriptionSet,
}

pub struct ProjectsManager<D: RenderTarget, S> {
    dom: Rc<D>,
    store: CatalogStore<S>,
    layout: Rc<dyn LayoutEngine<D::Node>>,
    layout_options: LayoutOptions,
    filter_selectors: FilterSelectors,
    popup: Rc<PopupController<D>>,
    cards: CardRenderer<D>,
    loaded: RefCell<Option<Loaded<D>>>,
    error_hook: RefCell<ErrorHook>,
}

impl<D, S> ProjectsManager<D, S>
where
    D: RenderTarget + 'static,
    S: CatalogSource,
{
    /// Bind to the page. Fails if the grid, the card template or the
    /// modal is missing.
    pub fn new(
        dom: Rc<D>,
        config: &PageConfig,
        source: S,
        layout: Rc<dyn LayoutEngine<D::Node>>,
        widgets: Rc<dyn WidgetToolkit<D::Node>>,
    ) -> Result<Self, DomError> {
        let popup = PopupController::new(dom.clone(), widgets, config.popup.clone())?;
        let cards = CardRenderer::new(dom.clone(), &config.grid, config.card.clone(), popup.clone())?;

        Ok(Self {
            dom,
            store: CatalogStore::new(source, config.catalog_url.clone()),
            layout,
            layout_options: config.layout_options(),
            filter_selectors: config.filters.clone(),
            popup,
            cards,
            loaded: RefCell::new(None),
            error_hook: RefCell::new(Rc::new(|error: &CatalogError| {
                tracing::error!(error = %error, "projects manager error");
            })),
        })
    }

    /// Replace what happens with a load failure after it is logged.
    pub fn set_error_hook(&self, hook: impl Fn(&CatalogError) + 'static) {
        *self.error_hook.borrow_mut() = Rc::new(hook);
    }

    /// Load the catalog, render one card per entry, mount the grid layout
    /// and wire the filter buttons.
    ///
    /// A load failure renders nothing. A missing layout library leaves the
    /// cards in place without filtering. Calling `init` again after a
    /// successful run does nothing.
    pub async fn init(&self) -> CatalogResult<()> {
        if self.loaded.borrow().is_some() {
            tracing::warn!("projects already initialized");
            return Ok(());
        }

        let catalog = match self.store.load().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, location = %self.store.location(), "error initializing projects");
                let hook = self.error_hook.borrow().clone();
                hook(&e);
                return Err(e);
            }
        };

        let entries: Vec<Rc<CatalogEntry>> = catalog.into_entries().into_iter().map(Rc::new).collect();
        let (cards, card_subscriptions) = self.cards.render_all(entries.iter().cloned());

        let mut filter_subscriptions = SubscriptionSet::new();
        let filters = match self.layout.mount(self.cards.grid(), &self.layout_options) {
            Ok(grid) => {
                let filters = FilterController::new(self.dom.clone(), &self.filter_selectors, grid);
                filter_subscriptions.append(filters.attach());
                Some(filters)
            }
            Err(e) => {
                tracing::error!(error = %e, "grid layout unavailable; filters disabled");
                None
            }
        };

        *self.loaded.borrow_mut() = Some(Loaded {
            entries,
            cards,
            card_subscriptions,
            filters,
            filter_subscriptions,
        });
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.borrow().is_some()
    }

    pub fn entries(&self) -> Vec<Rc<CatalogEntry>> {
        self.loaded
            .borrow()
            .as_ref()
            .map(|l| l.entries.clone())
            .unwrap_or_default()
    }

    pub fn entry(&self, title: &str) -> Option<Rc<CatalogEntry>> {
        self.loaded
            .borrow()
            .as_ref()?
            .entries
            .iter()
            .find(|e| e.title == title)
            .cloned()
    }

    pub fn cards(&self) -> Vec<D::Node> {
        self.loaded
            .borrow()
            .as_ref()
            .map(|l| l.cards.clone())
            .unwrap_or_default()
    }

    pub fn filters(&self) -> Option<Rc<FilterController<D>>> {
        self.loaded.borrow().as_ref()?.filters.clone()
    }

    pub fn popup(&self) -> &Rc<PopupController<D>> {
        &self.popup
    }

    /// Detach every listener this manager installed.
    pub fn teardown(&self) {
        if let Some(mut loaded) = self.loaded.borrow_mut().take() {
            loaded.filter_subscriptions.dispose_all();
            loaded.card_subscriptions.dispose_all();
        }
        self.popup.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{FetchedDocument, StaticCatalogSource};
    use crate::layout::GridLayout;
    use crate::memory::{MemoryDom, MemoryLayoutEngine, MemoryWidgets, NodeId, build_page};
    use crate::widgets::WidgetError;
    use portfolio_core::CategorySet;
    use std::cell::Cell;

    const CATALOG: &str = r#"{ "projects": [
        { "title": "Orbit", "description": "Space game", "long-description": "A. B",
          "banner": "orbit.png", "carousel-images": ["1.png", "2.png"], "category": "game",
          "date": "2023", "role": "Solo", "Technologies": "Rust",
          "links": [ { "name": "Steam", "url": "https://store.example/orbit" } ] },
        { "title": "Shop", "description": "Storefront", "long-description": "C",
          "banner": "shop.png", "carousel-images": [], "category": "web",
          "date": "2024", "role": "Backend", "Technologies": "Axum",
          "links": [] }
    ] }"#;

    struct BrokenLayout;

    impl LayoutEngine<NodeId> for BrokenLayout {
        fn mount(
            &self,
            _root: &NodeId,
            _options: &LayoutOptions,
        ) -> Result<Box<dyn GridLayout>, WidgetError> {
            Err(WidgetError::Unavailable("Isotope".into()))
        }
    }

    struct Offline;

    #[async_trait::async_trait(?Send)]
    impl CatalogSource for Offline {
        async fn fetch(&self, _location: &str) -> CatalogResult<FetchedDocument> {
            Err(CatalogError::network("offline"))
        }
    }

    fn manager<S: CatalogSource>(
        source: S,
        layout: Option<Rc<dyn LayoutEngine<NodeId>>>,
    ) -> (Rc<MemoryDom>, ProjectsManager<MemoryDom, S>) {
        let dom = Rc::new(MemoryDom::with_title("Portfolio"));
        build_page(&dom, "Hi", &CategorySet::parse("game web"));
        let layout = match layout {
            Some(layout) => layout,
            None => Rc::new(MemoryLayoutEngine::new(dom.clone())) as Rc<dyn LayoutEngine<NodeId>>,
        };
        let widgets = Rc::new(MemoryWidgets::new(dom.clone()));
        let manager =
            ProjectsManager::new(dom.clone(), &PageConfig::default(), source, layout, widgets).unwrap();
        (dom, manager)
    }

    #[tokio::test]
    async fn init_renders_cards_and_wires_filters() {
        let (dom, manager) = manager(StaticCatalogSource::json(CATALOG), None);
        manager.init().await.unwrap();

        assert_eq!(manager.cards().len(), 2);
        assert_eq!(dom.query_all(".projects-grid .project-item").len(), 2);
        assert!(manager.filters().is_some());
        assert_eq!(manager.entry("Shop").unwrap().role, "Backend");
    }

    #[tokio::test]
    async fn failed_load_renders_nothing_and_calls_hook() {
        let source = StaticCatalogSource::new(FetchedDocument {
            status: 500,
            body: String::new(),
        });
        let (dom, manager) = manager(source, None);
        let seen = Rc::new(Cell::new(None));
        let s = seen.clone();
        manager.set_error_hook(move |e| s.set(e.status()));

        let err = manager.init().await.unwrap_err();
        assert_eq!(err, CatalogError::transport(500));
        assert_eq!(seen.get(), Some(500));
        assert!(dom.query(".projects-grid .project-item").is_none());
        assert!(manager.filters().is_none());
        assert!(!manager.is_loaded());
    }

    #[tokio::test]
    async fn network_failure_reaches_hook_unchanged() {
        let (dom, manager) = manager(Offline, None);
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        manager.set_error_hook(move |e| *s.borrow_mut() = Some(e.clone()));

        let err = manager.init().await.unwrap_err();
        assert_eq!(err, CatalogError::network("offline"));
        assert_eq!(*seen.borrow(), Some(CatalogError::network("offline")));
        assert!(dom.query(".projects-grid .project-item").is_none());
        assert!(!manager.is_loaded());
    }

    #[tokio::test]
    async fn missing_layout_library_keeps_cards_without_filters() {
        let broken: Rc<dyn LayoutEngine<NodeId>> = Rc::new(BrokenLayout);
        let (_, manager) = manager(StaticCatalogSource::json(CATALOG), Some(broken));
        manager.init().await.unwrap();

        assert_eq!(manager.cards().len(), 2);
        assert!(manager.filters().is_none());
    }

    #[tokio::test]
    async fn second_init_is_a_no_op() {
        let (dom, manager) = manager(StaticCatalogSource::json(CATALOG), None);
        manager.init().await.unwrap();
        manager.init().await.unwrap();
        assert_eq!(dom.query_all(".project-item").len(), 2);
    }

    #[test]
    fn missing_template_is_reported() {
        let dom = Rc::new(MemoryDom::new());
        dom.add(dom.root(), "div", "projects-grid");
        let modal = dom.add(dom.root(), "div", "modal");
        dom.set_attribute(&modal, "id", "projectPopup");

        let result = ProjectsManager::new(
            dom.clone(),
            &PageConfig::default(),
            StaticCatalogSource::json(CATALOG),
            Rc::new(MemoryLayoutEngine::new(dom.clone())),
            Rc::new(MemoryWidgets::new(dom.clone())),
        );
        assert_eq!(
            result.err(),
            Some(DomError::MissingElement("#project-card-template".into()))
        );
    }
}
