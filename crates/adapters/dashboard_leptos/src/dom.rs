//! Small helpers over `web-sys` for the server-rendered pages.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement, Window};

/// Failure while binding to the page.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("no browser window")]
    NoWindow,
    #[error("missing element {0}")]
    Missing(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoWindow)
}

/// Find `#id` and cast it to `T`.
pub fn require<T: JsCast>(document: &Document, id: &str) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| DomError::Missing(format!("#{id}")))
}

pub fn require_selector(document: &Document, selector: &str) -> Result<Element, DomError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| DomError::Missing(selector.to_string()))
}

/// Current value of an `<input>` or `<textarea>`, empty when absent.
pub fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_field_value(document: &Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        tracing::warn!(id, "form field not found");
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Attach `handler` to `event` for the lifetime of the page.
pub fn on(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), DomError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
