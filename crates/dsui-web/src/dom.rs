#![forbid(unsafe_code)]

//! [`WebDom`]: the live browser document behind the [`Dom`] trait.
//!
//! Nodes are `web_sys::Element` handles; equality is JavaScript identity.
//! Mutations follow the trait's best-effort contract: a call the browser
//! rejects is logged and otherwise ignored.

use dsui_dom::{Dom, DomError};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, Window};

/// Convert a thrown JavaScript value into a [`DomError`].
pub(crate) fn js_error(value: JsValue) -> DomError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"));
    DomError::Js(message)
}

fn absorb(op: &'static str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(op, error = %js_error(err), "browser rejected mutation");
    }
}

/// The current window's document.
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Bind to the global window. `None` outside a browsing context.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// The bound window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The bound document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn computed(&self, node: &Element, property: &str) -> Option<String> {
        let style = self.window.get_computed_style(node).ok().flatten()?;
        style.get_property_value(property).ok()
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn query_all(&self, root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
        let list = root
            .query_selector_all(selector)
            .map_err(|err| DomError::InvalidSelector {
                selector: selector.to_owned(),
                reason: js_error(err).to_string(),
            })?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn query(&self, root: &Element, selector: &str) -> Result<Option<Element>, DomError> {
        root.query_selector(selector)
            .map_err(|err| DomError::InvalidSelector {
                selector: selector.to_owned(),
                reason: js_error(err).to_string(),
            })
    }

    fn closest(&self, node: &Element, selector: &str) -> Result<Option<Element>, DomError> {
        node.closest(selector).map_err(|err| DomError::InvalidSelector {
            selector: selector.to_owned(),
            reason: js_error(err).to_string(),
        })
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        absorb("set_attribute", node.set_attribute(name, value));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        absorb(
            "set_class",
            node.class_list().toggle_with_force(class, on).map(drop),
        );
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node.as_ref();
        ancestor.contains(Some(node))
    }

    fn has_children(&self, node: &Element) -> bool {
        node.has_child_nodes()
    }

    fn clear_children(&mut self, node: &Element) {
        node.set_inner_html("");
    }

    fn is_rendered(&self, node: &Element) -> bool {
        // No layout boxes: detached, or `display: none` on it or an ancestor.
        if !node.is_connected() || node.get_client_rects().length() == 0 {
            return false;
        }
        // Computed visibility is already inherited.
        !matches!(
            self.computed(node, "visibility").as_deref(),
            Some("hidden" | "collapse")
        )
    }

    fn active_element(&self) -> Option<Element> {
        let active = self.document.active_element()?;
        let resting = self.body().as_ref() == Some(&active)
            || self.document.document_element().as_ref() == Some(&active);
        (!resting).then_some(active)
    }

    fn focus(&mut self, node: &Element) -> bool {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return false;
        };
        absorb("focus", el.focus());
        self.active_element().as_ref() == Some(node)
    }

    fn request_submit(&mut self, form: &Element) -> bool {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return false;
        };
        match form.request_submit() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %js_error(err), "requestSubmit failed, falling back to submit");
                match form.submit() {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(error = %js_error(err), "form submit failed");
                        false
                    }
                }
            }
        }
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn set_checked(&mut self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn set_indeterminate(&mut self, node: &Element, indeterminate: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_indeterminate(indeterminate);
        }
    }

    fn value(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.value(),
            None => node.get_attribute("value").unwrap_or_default(),
        }
    }

    fn set_value(&mut self, node: &Element, value: &str) {
        match node.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_value(value),
            None => absorb("set_value", node.set_attribute("value", value)),
        }
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_hidden(&mut self, node: &Element, hidden: bool) {
        if hidden {
            absorb("set_hidden", node.set_attribute("hidden", ""));
        } else {
            absorb("set_hidden", node.remove_attribute("hidden"));
        }
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        let body = self.body()?;
        let value = self.computed(&body, name)?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    }

    fn matches_media(&self, query: &str) -> bool {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .is_some_and(|list| list.matches())
    }

    fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn location_path(&self) -> String {
        let location = self.window.location();
        let path = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        format!("{path}{search}")
    }
}
