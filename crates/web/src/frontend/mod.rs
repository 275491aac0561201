//! Browser entry point.

mod bindings;
mod browser;
mod frames;

pub use bindings::{BootstrapWidgets, IsotopeEngine};
pub use browser::BrowserDom;
pub use frames::AnimationFrames;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::catalog_store::HttpCatalogSource;
use crate::config::PageConfig;
use crate::page::{Collaborators, PortfolioPage};

/// Attribute on `<body>` holding a JSON [`PageConfig`] override.
const CONFIG_ATTRIBUTE: &str = "data-portfolio-config";

type Page = PortfolioPage<BrowserDom, HttpCatalogSource>;

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

/// WASM entry point; runs when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    portfolio_observability::init();

    let Some(dom) = BrowserDom::new() else {
        tracing::error!("no document; portfolio page not started");
        return;
    };

    if dom.document().ready_state() == "loading" {
        let document = dom.document().clone();
        let on_ready = Closure::once_into_js(move || boot(dom));
        if let Err(e) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            tracing::error!(error = ?e, "could not wait for DOMContentLoaded");
        }
    } else {
        boot(dom);
    }
}

/// Detach every listener installed by the page.
#[wasm_bindgen]
pub fn teardown() {
    if let Some(page) = PAGE.with(|slot| slot.borrow_mut().take()) {
        page.teardown();
    }
}

fn page_config(dom: &BrowserDom) -> PageConfig {
    let raw = dom
        .document()
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
    match raw {
        Some(raw) => PageConfig::from_json(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring page configuration");
            PageConfig::default()
        }),
        None => PageConfig::default(),
    }
}

fn boot(dom: BrowserDom) {
    let config = page_config(&dom);
    let source = match dom
        .document()
        .url()
        .ok()
        .and_then(|url| reqwest::Url::parse(&url).ok())
    {
        Some(base) => HttpCatalogSource::with_base(base),
        None => HttpCatalogSource::new(),
    };
    let collaborators = Collaborators {
        layout: Rc::new(IsotopeEngine),
        widgets: Rc::new(BootstrapWidgets),
        frames: Rc::new(AnimationFrames),
    };

    let page = match PortfolioPage::new(Rc::new(dom), config, source, collaborators) {
        Ok(page) => Rc::new(page),
        Err(e) => {
            tracing::error!(error = %e, "portfolio page not started");
            return;
        }
    };
    PAGE.with(|slot| *slot.borrow_mut() = Some(page.clone()));

    wasm_bindgen_futures::spawn_local(async move {
        if page.start().await.is_ok() {
            tracing::info!(cards = page.manager().cards().len(), "portfolio page ready");
        }
    });
}
