//! [`RenderTarget`] over the live document.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlTemplateElement, MouseEvent};

use portfolio_core::{Point, Rect};
use portfolio_events::{EventKind, Subscription, UiEvent};

use crate::dom::{EventHandler, RenderTarget};

/// The page's `document`. DOM exceptions are logged, never raised.
#[derive(Debug, Clone)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn collect(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn log_failure(op: &str, err: JsValue) {
    tracing::warn!(operation = op, error = ?err, "DOM call failed");
}

fn to_ui_event(kind: EventKind, event: &web_sys::Event) -> UiEvent {
    let pointer_kind = matches!(
        kind,
        EventKind::PointerEnter | EventKind::PointerMove | EventKind::PointerLeave
    );
    match event.dyn_ref::<MouseEvent>() {
        Some(mouse) if pointer_kind => UiEvent::pointer(
            kind,
            Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())),
        ),
        _ => UiEvent::new(kind),
    }
}

impl RenderTarget for BrowserDom {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .map_err(|e| log_failure("querySelector", e))
            .ok()
            .flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => collect(list),
            Err(e) => {
                log_failure("querySelectorAll", e);
                Vec::new()
            }
        }
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope
            .query_selector(selector)
            .map_err(|e| log_failure("querySelector", e))
            .ok()
            .flatten()
    }

    fn query_all_in(&self, scope: &Element, selector: &str) -> Vec<Element> {
        match scope.query_selector_all(selector) {
            Ok(list) => collect(list),
            Err(e) => {
                log_failure("querySelectorAll", e);
                Vec::new()
            }
        }
    }

    fn matches(&self, node: &Element, selector: &str) -> bool {
        node.matches(selector).unwrap_or(false)
    }

    fn instantiate_template(&self, template: &Element) -> Vec<Element> {
        let Some(template) = template.dyn_ref::<HtmlTemplateElement>() else {
            return Vec::new();
        };
        let mut copies = Vec::new();
        let mut next = template.content().first_element_child();
        while let Some(root) = next {
            match root.clone_node_with_deep(true) {
                Ok(copy) => copies.extend(copy.dyn_into::<Element>().ok()),
                Err(e) => log_failure("cloneNode", e),
            }
            next = root.next_element_sibling();
        }
        copies
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.document
            .create_element(tag)
            .map_err(|e| log_failure("createElement", e))
            .ok()
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn append_text(&self, parent: &Element, text: &str) {
        if let Err(e) = parent.append_with_str_1(text) {
            log_failure("append", e);
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log_failure("setAttribute", e);
        }
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            log_failure("classList.add", e);
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            log_failure("classList.remove", e);
        }
    }

    fn style(&self, node: &Element, property: &str) -> Option<String> {
        let value = node
            .dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            log_failure("style", e);
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            log_failure("appendChild", e);
        }
    }

    fn clear_children(&self, node: &Element) {
        node.set_text_content(None);
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn title(&self) -> String {
        self.document.title()
    }

    fn set_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn listen(&self, node: &Element, kind: EventKind, mut handler: EventHandler) -> Subscription {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let ui = to_ui_event(kind, &event);
            handler(&ui);
            if ui.default_prevented() {
                event.prevent_default();
            }
        });

        let name = kind.dom_name();
        if let Err(e) = node.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log_failure("addEventListener", e);
            return Subscription::noop();
        }

        let target = node.clone();
        Subscription::new(move || {
            if let Err(e) =
                target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log_failure("removeEventListener", e);
            }
        })
    }
}
