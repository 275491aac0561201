//! Project details modal.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::{CatalogEntry, ProjectLink, split_sentences};
use portfolio_events::{EventKind, Subscription, UiEvent};

use crate::config::PopupSelectors;
use crate::dom::{DomError, RenderTarget};
use crate::widgets::WidgetToolkit;

const PRIMARY_LINK_CLASS: &str = "btn btn-primary mb-2 w-100";
const SECONDARY_LINK_CLASS: &str = "btn btn-outline-secondary mb-2 w-100";

/// Fills and shows the project modal, and owns the document title while it
/// is open.
///
/// The title in effect before the first `show` is kept until the modal's
/// hidden event, so opening a second project without closing the first
/// still restores the page's own title.
pub struct PopupController<D: RenderTarget> {
    dom: Rc<D>,
    widgets: Rc<dyn WidgetToolkit<D::Node>>,
    modal: D::Node,
    carousel: Option<D::Node>,
    selectors: PopupSelectors,
    saved_title: RefCell<Option<String>>,
    current: RefCell<Option<Rc<CatalogEntry>>>,
    hidden: RefCell<Option<Subscription>>,
}

impl<D: RenderTarget + 'static> PopupController<D> {
    /// Bind to the modal and start listening for its hidden event.
    pub fn new(
        dom: Rc<D>,
        widgets: Rc<dyn WidgetToolkit<D::Node>>,
        selectors: PopupSelectors,
    ) -> Result<Rc<Self>, DomError> {
        let modal = dom.require(&selectors.modal)?;
        let carousel = dom.find_in(&modal, &selectors.carousel);

        Ok(Rc::new_cyclic(|weak: &std::rc::Weak<Self>| {
            let weak = weak.clone();
            let hidden = dom.listen(
                &modal,
                EventKind::ModalHidden,
                Box::new(move |_: &UiEvent| {
                    if let Some(popup) = weak.upgrade() {
                        popup.on_hidden();
                    }
                }),
            );
            Self {
                dom,
                widgets,
                modal,
                carousel,
                selectors,
                saved_title: RefCell::new(None),
                current: RefCell::new(None),
                hidden: RefCell::new(Some(hidden)),
            }
        }))
    }

    pub fn modal(&self) -> &D::Node {
        &self.modal
    }

    /// Entry shown most recently, until the modal is hidden.
    pub fn current(&self) -> Option<Rc<CatalogEntry>> {
        self.current.borrow().clone()
    }

    pub fn saved_title(&self) -> Option<String> {
        self.saved_title.borrow().clone()
    }

    pub fn show(&self, entry: Rc<CatalogEntry>) {
        tracing::debug!(title = %entry.title, "opening project popup");

        if let Some(title) = self.dom.find_in(&self.modal, &self.selectors.title) {
            self.dom.set_text(&title, &entry.title);
        }
        self.fill_description(&entry.long_description);
        self.fill_info(&entry);
        self.fill_links(&entry.links);
        self.rebuild_carousel(&entry.carousel_images);

        {
            let mut saved = self.saved_title.borrow_mut();
            let original = saved.get_or_insert_with(|| self.dom.title());
            let title = format!("{} | {}", entry.title, original);
            self.dom.set_title(&title);
        }
        *self.current.borrow_mut() = Some(entry);

        if let Err(e) = self.widgets.show_modal(&self.modal) {
            tracing::error!(error = %e, "failed to show project popup");
            // No hidden event will follow a modal that never opened.
            self.on_hidden();
        }
    }

    /// Modal finished hiding.
    pub fn on_hidden(&self) {
        if let Some(carousel) = &self.carousel {
            match self.widgets.dispose_carousel(carousel) {
                Ok(existed) => tracing::debug!(existed, "carousel disposed"),
                Err(e) => tracing::warn!(error = %e, "failed to dispose carousel"),
            }
        }
        if let Some(original) = self.saved_title.borrow_mut().take() {
            self.dom.set_title(&original);
        }
        self.current.borrow_mut().take();
    }

    /// Stop listening for the hidden event.
    pub fn teardown(&self) {
        if let Some(hidden) = self.hidden.borrow_mut().take() {
            hidden.dispose();
        }
    }

    fn fill_description(&self, long_description: &str) {
        let Some(container) = self.dom.find_in(&self.modal, &self.selectors.description) else {
            return;
        };
        self.dom.clear_children(&container);
        for sentence in split_sentences(long_description) {
            let Some(paragraph) = self.dom.create_element("p") else {
                continue;
            };
            self.dom.set_text(&paragraph, &sentence);
            self.dom.append_child(&container, &paragraph);
        }
    }

    fn fill_info(&self, entry: &CatalogEntry) {
        let Some(list) = self.dom.find_in(&self.modal, &self.selectors.info) else {
            return;
        };
        self.dom.clear_children(&list);
        let rows = [
            ("Date:", &entry.date),
            ("Role:", &entry.role),
            ("Technologies:", &entry.technologies),
        ];
        for (label, value) in rows {
            let (Some(item), Some(strong)) =
                (self.dom.create_element("li"), self.dom.create_element("strong"))
            else {
                continue;
            };
            self.dom.set_text(&strong, label);
            self.dom.append_child(&item, &strong);
            self.dom.append_text(&item, &format!(" {value}"));
            self.dom.append_child(&list, &item);
        }
    }

    fn fill_links(&self, links: &[ProjectLink]) {
        let Some(container) = self.dom.find_in(&self.modal, &self.selectors.links) else {
            return;
        };
        self.dom.clear_children(&container);
        for link in links {
            let Some(anchor) = self.dom.create_element("a") else {
                continue;
            };
            self.dom.set_attribute(&anchor, "href", &link.url);
            let class = if link.is_primary() {
                PRIMARY_LINK_CLASS
            } else {
                SECONDARY_LINK_CLASS
            };
            self.dom.set_attribute(&anchor, "class", class);
            self.dom.set_attribute(&anchor, "target", "_blank");
            self.dom.set_attribute(&anchor, "rel", "noopener noreferrer");
            self.dom.set_text(&anchor, &link.name);
            self.dom.append_child(&container, &anchor);
        }
    }

    fn rebuild_carousel(&self, images: &[String]) {
        let Some(carousel) = &self.carousel else {
            tracing::warn!(selector = %self.selectors.carousel, "popup has no carousel");
            return;
        };

        // Stale instance from the previous popup, if any.
        if let Err(e) = self.widgets.dispose_carousel(carousel) {
            tracing::warn!(error = %e, "failed to dispose stale carousel");
        }

        let indicators = self.dom.find_in(carousel, &self.selectors.indicators);
        let slides = self.dom.find_in(carousel, &self.selectors.slides);

        if let Some(indicators) = &indicators {
            self.dom.clear_children(indicators);
            for index in 0..images.len() {
                if let Some(button) = self.indicator(index) {
                    self.dom.append_child(indicators, &button);
                }
            }
        }
        if let Some(slides) = &slides {
            self.dom.clear_children(slides);
            for (index, src) in images.iter().enumerate() {
                if let Some(slide) = self.slide(index, src) {
                    self.dom.append_child(slides, &slide);
                }
            }
        }

        let navigable = images.len() > 1;
        let display = if navigable { "" } else { "none" };
        for selector in [&self.selectors.prev, &self.selectors.next] {
            if let Some(control) = self.dom.find_in(carousel, selector) {
                self.dom.set_style(&control, "display", display);
            }
        }
        if let Some(indicators) = &indicators {
            self.dom.set_style(indicators, "display", display);
        }

        if navigable {
            if let Err(e) = self.widgets.start_carousel(carousel, images.len()) {
                tracing::error!(error = %e, "failed to start carousel");
            }
        }
    }

    fn indicator(&self, index: usize) -> Option<D::Node> {
        let button = self.dom.create_element("button")?;
        self.dom.set_attribute(&button, "type", "button");
        self.dom
            .set_attribute(&button, "data-bs-target", &self.selectors.carousel);
        self.dom
            .set_attribute(&button, "data-bs-slide-to", &index.to_string());
        self.dom
            .set_attribute(&button, "aria-label", &format!("Slide {}", index + 1));
        if index == 0 {
            self.dom.add_class(&button, "active");
            self.dom.set_attribute(&button, "aria-current", "true");
        }
        Some(button)
    }

    fn slide(&self, index: usize, src: &str) -> Option<D::Node> {
        let slide = self.dom.create_element("div")?;
        self.dom.add_class(&slide, "carousel-item");
        if index == 0 {
            self.dom.add_class(&slide, "active");
        }
        let image = self.dom.create_element("img")?;
        self.dom.set_attribute(&image, "src", src);
        self.dom.set_attribute(&image, "class", "d-block w-100");
        self.dom.append_child(&slide, &image);
        Some(slide)
    }
}
