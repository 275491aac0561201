//! Default page markup, built in a [`MemoryDom`].

use portfolio_core::{CategorySet, FilterTag};

use crate::config::PageConfig;
use crate::dom::RenderTarget;
use crate::memory::dom::{MemoryDom, NodeId};

/// Handles to the landmarks of a scaffolded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    pub header: NodeId,
    pub filter_buttons: Vec<NodeId>,
    pub info_panel: NodeId,
    pub grid: NodeId,
    pub template: NodeId,
    pub modal: NodeId,
    pub carousel: NodeId,
}

/// Build the published page structure: reactive header, one filter button
/// per category (after the `*` button, which starts active), info panel,
/// card grid and template, and the project modal with its carousel.
///
/// Markup uses the default selectors of [`PageConfig`].
pub fn build_page(dom: &MemoryDom, heading: &str, categories: &CategorySet) -> Scaffold {
    let root = dom.root();

    let header = dom.add(root, "h1", "reactive-header");
    dom.set_text(&header, heading);

    let filters = dom.add(root, "div", "filter-container");
    let mut filter_buttons = Vec::with_capacity(categories.len() + 1);
    let all = dom.add(filters, "button", "btn filter-btn active");
    dom.set_attribute(&all, "data-filter", FilterTag::ALL);
    dom.set_text(&all, "All");
    filter_buttons.push(all);
    for category in categories.iter() {
        let button = dom.add(filters, "button", "btn filter-btn");
        dom.set_attribute(&button, "data-filter", &format!(".{category}"));
        dom.set_text(&button, category);
        filter_buttons.push(button);
    }

    let info_panel = dom.add(root, "div", "");
    dom.set_attribute(&info_panel, "id", "project-info");

    let grid = dom.add(root, "div", "projects-grid");

    let template = dom.add(root, "template", "");
    dom.set_attribute(&template, "id", "project-card-template");
    let item = dom.add(template, "div", "project-item");
    dom.add(item, "img", "project-image");
    dom.add(item, "h5", "project-title");
    dom.add(item, "p", "project-description");
    let learn_more = dom.add(item, "a", "project-link");
    dom.set_attribute(&learn_more, "href", "#");
    dom.set_text(&learn_more, "Learn more");

    let modal = dom.add(root, "div", "modal fade");
    dom.set_attribute(&modal, "id", "projectPopup");
    dom.add(modal, "h5", "modal-title");
    let carousel = dom.add(modal, "div", "carousel slide");
    dom.set_attribute(&carousel, "id", "popupCarousel");
    dom.add(carousel, "div", "carousel-indicators");
    dom.add(carousel, "div", "carousel-inner");
    dom.add(carousel, "button", "carousel-control-prev");
    dom.add(carousel, "button", "carousel-control-next");
    dom.add(modal, "div", "project-description");
    dom.add(modal, "ul", "project-info");
    dom.add(modal, "div", "project-links");

    Scaffold {
        header,
        filter_buttons,
        info_panel,
        grid,
        template,
        modal,
        carousel,
    }
}

/// Sanity check that `config`'s selectors resolve on a scaffolded page.
pub fn missing_landmarks(dom: &MemoryDom, config: &PageConfig) -> Vec<String> {
    let mut selectors = vec![
        config.grid.container.clone(),
        config.grid.template.clone(),
        config.filters.buttons.clone(),
        config.filters.info_panel.clone(),
        config.popup.modal.clone(),
        config.header.selector.clone(),
    ];
    selectors.retain(|selector| dom.query(selector).is_none());
    selectors
}
