//! Isotope and Bootstrap, reached through their page globals.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use portfolio_core::FilterTag;

use crate::layout::{GridLayout, LayoutEngine, LayoutOptions};
use crate::widgets::{WidgetError, WidgetToolkit};

fn property(target: &JsValue, name: &str) -> Result<JsValue, WidgetError> {
    let value = Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| WidgetError::Unavailable(format!("{name}: {e:?}")))?;
    if value.is_undefined() || value.is_null() {
        return Err(WidgetError::Unavailable(name.to_string()));
    }
    Ok(value)
}

fn global(name: &str) -> Result<JsValue, WidgetError> {
    let window = web_sys::window().ok_or_else(|| WidgetError::Unavailable("window".into()))?;
    property(&window, name)
}

fn function(target: &JsValue, name: &str) -> Result<Function, WidgetError> {
    property(target, name)?
        .dyn_into::<Function>()
        .map_err(|_| WidgetError::Unavailable(format!("{name} is not callable")))
}

/// `target[method](...args)`.
fn invoke(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, WidgetError> {
    let f = function(target, method)?;
    Reflect::apply(&f, target, args).map_err(|e| WidgetError::Call(format!("{method}: {e:?}")))
}

/// `new Isotope(root, options)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsotopeEngine;

impl LayoutEngine<Element> for IsotopeEngine {
    fn mount(&self, root: &Element, options: &LayoutOptions) -> Result<Box<dyn GridLayout>, WidgetError> {
        let ctor = global("Isotope")?
            .dyn_into::<Function>()
            .map_err(|_| WidgetError::Unavailable("Isotope is not a constructor".into()))?;
        let options = serde_wasm_bindgen::to_value(options)
            .map_err(|e| WidgetError::Call(format!("layout options: {e}")))?;
        let instance = Reflect::construct(&ctor, &Array::of2(root, &options))
            .map_err(|e| WidgetError::Call(format!("Isotope: {e:?}")))?;
        Ok(Box::new(IsotopeGrid { instance }))
    }
}

struct IsotopeGrid {
    instance: JsValue,
}

impl GridLayout for IsotopeGrid {
    fn arrange(&self, filter: &FilterTag) {
        let options = Object::new();
        let value = match filter.selector() {
            Some(selector) => JsValue::from_str(&selector),
            None => JsValue::NULL,
        };
        let result = Reflect::set(&options, &JsValue::from_str("filter"), &value)
            .map_err(|e| WidgetError::Call(format!("{e:?}")))
            .and_then(|_| invoke(&self.instance, "arrange", &Array::of1(&options)));
        if let Err(e) = result {
            tracing::error!(error = %e, filter = %filter, "grid arrange failed");
        }
    }
}

/// `window.bootstrap` modal and carousel components.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapWidgets;

impl BootstrapWidgets {
    fn component(name: &str) -> Result<JsValue, WidgetError> {
        property(&global("bootstrap")?, name)
    }
}

impl WidgetToolkit<Element> for BootstrapWidgets {
    fn show_modal(&self, modal: &Element) -> Result<(), WidgetError> {
        let component = Self::component("Modal")?;
        let instance = invoke(&component, "getOrCreateInstance", &Array::of1(modal))?;
        invoke(&instance, "show", &Array::new())?;
        Ok(())
    }

    fn start_carousel(&self, carousel: &Element, slides: usize) -> Result<(), WidgetError> {
        let ctor = Self::component("Carousel")?
            .dyn_into::<Function>()
            .map_err(|_| WidgetError::Unavailable("Carousel is not a constructor".into()))?;
        Reflect::construct(&ctor, &Array::of1(carousel))
            .map_err(|e| WidgetError::Call(format!("Carousel: {e:?}")))?;
        tracing::debug!(slides, "carousel started");
        Ok(())
    }

    fn dispose_carousel(&self, carousel: &Element) -> Result<bool, WidgetError> {
        let component = Self::component("Carousel")?;
        let instance = invoke(&component, "getInstance", &Array::of1(carousel))?;
        if instance.is_null() || instance.is_undefined() {
            return Ok(false);
        }
        invoke(&instance, "dispose", &Array::new())?;
        Ok(true)
    }
}
