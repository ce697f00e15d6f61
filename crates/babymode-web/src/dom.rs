//! DOM lookups and style helpers

use babymode_core::Size;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::util::document;

pub const SCREEN_SELECTOR: &str = ".screen";
pub const CONTAINER_SELECTOR: &str = ".screen-container";
pub const INTERACTIVE_SELECTOR: &str = ".interactive-element";
pub const EXIT_INDICATOR_ID: &str = "parentExit";
pub const THEME_META_SELECTOR: &str = "meta[name=\"theme-color\"]";

/// Every `HtmlElement` matching `selector`, in document order
pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = doc.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

/// First `HtmlElement` matching `selector`
pub fn query(doc: &Document, selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(doc
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

/// Like [`query`] but missing elements are an error
pub fn require(doc: &Document, selector: &str) -> Result<HtmlElement, JsValue> {
    query(doc, selector)?.ok_or_else(|| JsValue::from_str(&format!("missing element {selector}")))
}

/// Set one inline style property
pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), JsValue> {
    el.style().set_property(property, value)
}

/// Set the same inline style on many elements, ignoring failures
pub fn set_style_all(elements: &[HtmlElement], property: &str, value: &str) {
    for el in elements {
        let _ = set_style(el, property, value);
    }
}

/// Add or remove a class on `<body>`
pub fn toggle_body_class(class: &str, on: bool) -> Result<(), JsValue> {
    let body = crate::util::body()?;
    body.class_list().toggle_with_force(class, on)?;
    Ok(())
}

/// Append a `<style>` element with `css` to `<head>`
pub fn inject_style(css: &str) -> Result<Element, JsValue> {
    let doc = document()?;
    let style = doc.create_element("style")?;
    style.set_text_content(Some(css));
    let head = doc
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    head.append_child(&style)?;
    Ok(style)
}

/// Bounding box size of `el`
pub fn element_size(el: &Element) -> Size {
    let rect = el.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}

/// `matchMedia(query).matches`, false when unsupported
pub fn media_matches(query: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .is_some_and(|mql| mql.matches())
}
