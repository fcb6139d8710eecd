#![forbid(unsafe_code)]

//! In-memory document.
//!
//! [`MemDom`] wraps a `scraper` document: markup is parsed by html5ever with
//! the same tree construction rules a browser applies (implicit `<tbody>`,
//! foster parenting, stray end tags), and queries run through `scraper`'s
//! CSS selector matcher. Removed nodes stay in the tree with no parent, so
//! stale [`NodeId`]s remain valid handles that simply report
//! `is_connected() == false`, just like a detached browser element.
//!
//! Form state (checked, indeterminate, current value), focus and the
//! environment knobs live in side tables keyed by [`NodeId`].
//!
//! # Rendering model
//!
//! - An element is hidden by layout if it, or any ancestor, has the `hidden`
//!   attribute, an inline `display: none`, or is an `<input type="hidden">`.
//! - `visibility` is inherited: the nearest inline declaration on the
//!   element or an ancestor wins; `hidden` and `collapse` hide.
//!
//! # Focus model
//!
//! Focus follows browser rules: links with `href`, enabled form controls
//! and anything with a `tabindex` attribute (including `-1`) accept focus
//! when connected and rendered. `focus()` on anything else is ignored.
//! A focused element that gets detached stops being the active element.

use ahash::{AHashMap, AHashSet};
use ego_tree::NodeRef;
use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

use crate::{Dom, DomError};

/// Handle to a node in a [`MemDom`].
pub use ego_tree::NodeId;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// In-memory document implementing [`Dom`].
#[derive(Debug, Clone)]
pub struct MemDom {
    html: Html,
    root: NodeId,
    body: NodeId,
    checked: AHashSet<NodeId>,
    indeterminate: AHashSet<NodeId>,
    values: AHashMap<NodeId, String>,
    active: Option<NodeId>,
    css_vars: AHashMap<String, String>,
    viewport_width: u32,
    origin: String,
    path: String,
    submissions: Vec<NodeId>,
}

impl Default for MemDom {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|err| DomError::selector(selector, err.to_string()))
}

fn build_element(tag: &str, attrs: &[(String, String)]) -> Element {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name.as_str())),
            value: StrTendril::from_slice(value),
        })
        .collect();
    Element::new(
        QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag)),
        attrs,
    )
}

impl MemDom {
    /// Create an empty `<html><head></head><body></body></html>` document.
    #[must_use]
    pub fn new() -> Self {
        let html = Html::parse_document("");
        let root = html.root_element();
        let body = root
            .children()
            .filter_map(ElementRef::wrap)
            .find(|e| e.value().name() == "body")
            .map_or(root.id(), |e| e.id());
        let root = root.id();
        Self {
            html,
            root,
            body,
            checked: AHashSet::new(),
            indeterminate: AHashSet::new(),
            values: AHashMap::new(),
            active: None,
            css_vars: AHashMap::new(),
            viewport_width: 1280,
            origin: "http://localhost".to_owned(),
            path: "/".to_owned(),
            submissions: Vec::new(),
        }
    }

    /// Create a document whose body holds the given markup.
    pub fn from_html(body_html: &str) -> Result<Self, DomError> {
        let mut dom = Self::new();
        let body = dom.body;
        dom.set_inner_html(body, body_html)?;
        Ok(dom)
    }

    // --- Tree edits ---

    /// Detach `node` from its parent.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(mut n) = self.html.tree.get_mut(node) {
            n.detach();
        }
    }

    /// Replace the children of `node` with parsed markup.
    ///
    /// This is what the replacement transport does to a swap target. The
    /// markup is parsed as a fragment in body context, as `innerHTML` is.
    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) -> Result<(), DomError> {
        if self.element(node).is_none() {
            return Err(DomError::NotAnElement);
        }
        let fragment = Html::parse_fragment(markup);
        self.clear_children(&node);
        self.graft(node, *fragment.root_element());
        Ok(())
    }

    /// Copy the children of `source` (from another tree) under `parent`.
    fn graft(&mut self, parent: NodeId, source: NodeRef<'_, Node>) {
        for child in source.children() {
            let Some(mut slot) = self.html.tree.get_mut(parent) else {
                return;
            };
            let id = slot.append(child.value().clone()).id();
            if child
                .value()
                .as_element()
                .is_some_and(|e| e.attr("checked").is_some())
            {
                self.checked.insert(id);
            }
            self.graft(id, child);
        }
    }

    /// Rewrite an element's attribute list.
    fn edit_attrs(&mut self, node: NodeId, edit: impl FnOnce(&mut Vec<(String, String)>)) {
        let Some(mut slot) = self.html.tree.get_mut(node) else {
            return;
        };
        let Node::Element(elem) = slot.value() else {
            return;
        };
        let mut attrs: Vec<(String, String)> = elem
            .attrs()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        edit(&mut attrs);
        let rebuilt = build_element(elem.name(), &attrs);
        *slot.value() = Node::Element(rebuilt);
    }

    // --- Environment knobs ---

    /// Set the viewport width used by `matches_media`.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// Define a CSS custom property (e.g. `--ds-primary`).
    pub fn set_css_variable(&mut self, name: &str, value: &str) {
        self.css_vars.insert(name.to_owned(), value.to_owned());
    }

    /// Set the current location.
    pub fn set_location(&mut self, origin: &str, path: &str) {
        origin.clone_into(&mut self.origin);
        path.clone_into(&mut self.path);
    }

    /// Drop focus back to the document.
    pub fn blur(&mut self) {
        self.active = None;
    }

    /// Forms submitted so far, in order.
    #[must_use]
    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }

    // --- Inspection ---

    /// The `<html>` element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body_id(&self) -> NodeId {
        self.body
    }

    /// Tag name of an element, `None` for other nodes.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::name)
    }

    /// Number of child nodes, text included.
    #[must_use]
    pub fn child_count(&self, node: NodeId) -> usize {
        self.html.tree.get(node).map_or(0, |n| n.children().count())
    }

    /// Whether the checkbox is in the indeterminate state.
    #[must_use]
    pub fn is_indeterminate(&self, node: NodeId) -> bool {
        self.indeterminate.contains(&node)
    }

    /// Whether the element carries the `hidden` attribute.
    #[must_use]
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.attr(node, "hidden").is_some()
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        self.html
            .tree
            .get(node)
            .map(|n| {
                n.descendants()
                    .filter_map(|d| d.value().as_text())
                    .map(|t| &**t)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First connected element matching `selector`, searching the whole
    /// document. Invalid selectors match nothing.
    #[must_use]
    pub fn select(&self, selector: &str) -> Option<NodeId> {
        self.select_all(selector).into_iter().next()
    }

    /// All connected elements matching `selector`, in document order.
    #[must_use]
    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        let document = self.html.tree.root().id();
        self.query_all(&document, selector).unwrap_or_default()
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.html.tree.get(node)?.value().as_element()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Some(self.html.tree.get(node)?.parent()?.id())
    }

    /// Elements below `root` in document order (pre-order, `root` excluded).
    fn elements_below(&self, root: NodeId) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .tree
            .get(root)
            .into_iter()
            .flat_map(|n| n.descendants().skip(1))
            .filter_map(ElementRef::wrap)
    }

    fn style_prop(&self, node: NodeId, prop: &str) -> Option<String> {
        let style = self.attr(node, "style")?;
        style.split(';').find_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            (key.trim().eq_ignore_ascii_case(prop)).then(|| value.trim().to_ascii_lowercase())
        })
    }

    fn hidden_by_layout(&self, node: NodeId) -> bool {
        self.attr(node, "hidden").is_some()
            || self.style_prop(node, "display").as_deref() == Some("none")
            || (self.tag(node) == Some("input") && self.attr(node, "type") == Some("hidden"))
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        matches!(
            self.tag(node),
            Some("button" | "input" | "select" | "textarea")
        ) && self.attr(node, "disabled").is_some()
    }

    fn accepts_focus(&self, node: NodeId) -> bool {
        if !self.is_connected(&node) || !self.is_rendered(&node) || self.is_disabled(node) {
            return false;
        }
        match self.tag(node) {
            Some("a") => self.attr(node, "href").is_some() || self.attr(node, "tabindex").is_some(),
            Some("button" | "input" | "select" | "textarea") => true,
            Some(_) => self.attr(node, "tabindex").is_some(),
            None => false,
        }
    }
}

impl Dom for MemDom {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let document = self.html.tree.root().id();
        self.elements_below(document)
            .find(|e| e.value().attr("id") == Some(id))
            .map(|e| e.id())
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn query_all(&self, root: &NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .elements_below(*root)
            .filter(|e| selector.matches(e))
            .map(|e| e.id())
            .collect())
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = parse_selector(selector)?;
        let Some(start) = self.html.tree.get(*node) else {
            return Ok(None);
        };
        Ok(std::iter::once(start)
            .chain(start.ancestors())
            .filter_map(ElementRef::wrap)
            .find(|e| selector.matches(e))
            .map(|e| e.id()))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name).map(str::to_owned)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.edit_attrs(*node, |attrs| match attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => value.clone_into(&mut slot.1),
            None => attrs.push((name.to_owned(), value.to_owned())),
        });
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.attr(*node, "class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    fn set_class(&mut self, node: &NodeId, class: &str, on: bool) {
        let current = self.attr(*node, "class").unwrap_or("");
        let mut classes: Vec<&str> = current
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect();
        if on {
            classes.push(class);
        }
        let joined = classes.join(" ");
        self.set_attribute(node, "class", &joined);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let document = self.html.tree.root().id();
        self.html
            .tree
            .get(*node)
            .is_some_and(|n| n.ancestors().any(|a| a.id() == document))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.html
            .tree
            .get(*node)
            .is_some_and(|n| n.id() == *ancestor || n.ancestors().any(|a| a.id() == *ancestor))
    }

    fn has_children(&self, node: &NodeId) -> bool {
        self.html.tree.get(*node).is_some_and(|n| n.has_children())
    }

    fn clear_children(&mut self, node: &NodeId) {
        let children: Vec<NodeId> = self
            .html
            .tree
            .get(*node)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default();
        for child in children {
            self.detach(child);
        }
    }

    fn is_rendered(&self, node: &NodeId) -> bool {
        if !self.is_connected(node) {
            return false;
        }
        let mut visibility: Option<String> = None;
        let mut current = Some(*node);
        while let Some(n) = current {
            if self.hidden_by_layout(n) {
                return false;
            }
            if visibility.is_none() {
                visibility = self.style_prop(n, "visibility");
            }
            current = self.parent(n);
        }
        !matches!(visibility.as_deref(), Some("hidden" | "collapse"))
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|n| self.is_connected(n))
    }

    fn focus(&mut self, node: &NodeId) -> bool {
        if self.accepts_focus(*node) {
            self.active = Some(*node);
            true
        } else {
            false
        }
    }

    fn request_submit(&mut self, form: &NodeId) -> bool {
        if self.tag(*form) == Some("form") && self.is_connected(form) {
            self.submissions.push(*form);
            true
        } else {
            false
        }
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.checked.contains(node)
    }

    fn set_checked(&mut self, node: &NodeId, checked: bool) {
        if checked {
            self.checked.insert(*node);
        } else {
            self.checked.remove(node);
        }
    }

    fn set_indeterminate(&mut self, node: &NodeId, indeterminate: bool) {
        if indeterminate {
            self.indeterminate.insert(*node);
        } else {
            self.indeterminate.remove(node);
        }
    }

    fn value(&self, node: &NodeId) -> String {
        match self.values.get(node) {
            Some(value) => value.clone(),
            None => self.attr(*node, "value").unwrap_or("").to_owned(),
        }
    }

    fn set_value(&mut self, node: &NodeId, value: &str) {
        self.values.insert(*node, value.to_owned());
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if self.element(*node).is_none() {
            return;
        }
        self.clear_children(node);
        if let Some(mut slot) = self.html.tree.get_mut(*node) {
            slot.append(Node::Text(Text {
                text: StrTendril::from_slice(text),
            }));
        }
    }

    fn set_hidden(&mut self, node: &NodeId, hidden: bool) {
        if hidden {
            self.set_attribute(node, "hidden", "");
        } else {
            self.edit_attrs(*node, |attrs| attrs.retain(|(k, _)| k != "hidden"));
        }
    }

    fn css_variable(&self, name: &str) -> Option<String> {
        self.css_vars
            .get(name)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn matches_media(&self, query: &str) -> bool {
        let query = query.trim().trim_start_matches('(').trim_end_matches(')');
        let Some((feature, value)) = query.split_once(':') else {
            return false;
        };
        let Ok(px) = value.trim().trim_end_matches("px").trim().parse::<u32>() else {
            return false;
        };
        match feature.trim() {
            "max-width" => self.viewport_width <= px,
            "min-width" => self.viewport_width >= px,
            _ => false,
        }
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn location_path(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_html_builds_body_children() {
        let dom = MemDom::from_html(r#"<div id="a"><span>hi</span></div><p id="b"></p>"#).unwrap();
        let a = dom.element_by_id("a").unwrap();
        assert_eq!(dom.tag(a), Some("div"));
        assert_eq!(dom.text_content(a), "hi");
        assert!(dom.element_by_id("b").is_some());
        assert!(dom.element_by_id("missing").is_none());
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let dom = MemDom::from_html(r#"<form id="f"><input name="x"><button id="go">Go</button></form>"#)
            .unwrap();
        let form = dom.element_by_id("f").unwrap();
        assert_eq!(dom.child_count(form), 2);
    }

    #[test]
    fn stray_end_tags_are_ignored() {
        let dom = MemDom::from_html(r#"<div id="a"></span><p id="b"></p></div>"#).unwrap();
        let a = dom.element_by_id("a").unwrap();
        assert_eq!(dom.child_count(a), 1);
    }

    #[test]
    fn query_all_is_document_order_and_excludes_root() {
        let dom = MemDom::from_html(
            r#"<div id="r" class="x"><b class="x" id="1"><i class="x" id="2"></i></b><b class="x" id="3"></b></div>"#,
        )
        .unwrap();
        let root = dom.element_by_id("r").unwrap();
        let found = dom.query_all(&root, ".x").unwrap();
        let ids: Vec<String> = found
            .iter()
            .map(|n| dom.attribute(n, "id").unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let dom = MemDom::new();
        let body = dom.body_id();
        assert!(matches!(
            dom.query_all(&body, "[oops"),
            Err(DomError::InvalidSelector { .. })
        ));
        assert!(dom.select("[oops").is_none());
    }

    #[test]
    fn closest_includes_self() {
        let dom =
            MemDom::from_html(r#"<div data-action="close-modal"><span id="s">x</span></div>"#).unwrap();
        let span = dom.element_by_id("s").unwrap();
        let found = dom.closest(&span, "[data-action='close-modal']").unwrap();
        assert_eq!(found.and_then(|n| dom.tag(n).map(str::to_owned)), Some("div".into()));
        assert_eq!(dom.closest(&span, "span").unwrap(), Some(span));
    }

    #[test]
    fn clear_children_detaches_subtree() {
        let mut dom = MemDom::from_html(r#"<div id="h"><button id="b">x</button></div>"#).unwrap();
        let host = dom.element_by_id("h").unwrap();
        let button = dom.element_by_id("b").unwrap();
        assert!(dom.is_connected(&button));
        dom.clear_children(&host);
        assert!(!dom.is_connected(&button));
        assert!(!dom.has_children(&host));
        assert!(dom.element_by_id("b").is_none());
    }

    #[test]
    fn rendering_respects_display_visibility_and_hidden() {
        let dom = MemDom::from_html(
            r#"
            <div style="visibility: hidden"><button id="v">x</button>
              <div style="visibility: visible"><button id="vv">x</button></div>
            </div>
            <div style="display:none"><button id="d">x</button></div>
            <button id="h" hidden>x</button>
            <input id="hi" type="hidden">
            <button id="ok">x</button>
            "#,
        )
        .unwrap();
        let rendered = |id: &str| dom.is_rendered(&dom.element_by_id(id).unwrap());
        assert!(!rendered("v"));
        assert!(rendered("vv"));
        assert!(!rendered("d"));
        assert!(!rendered("h"));
        assert!(!rendered("hi"));
        assert!(rendered("ok"));
    }

    #[test]
    fn focus_follows_browser_rules() {
        let mut dom = MemDom::from_html(
            r#"
            <button id="b">x</button>
            <button id="bd" disabled>x</button>
            <div id="plain">x</div>
            <div id="ti" tabindex="-1">x</div>
            <a id="nohref">x</a>
            "#,
        )
        .unwrap();
        let get = |dom: &MemDom, id: &str| dom.element_by_id(id).unwrap();

        let b = get(&dom, "b");
        assert!(dom.focus(&b));
        assert_eq!(dom.active_element(), Some(b));

        for id in ["bd", "plain", "nohref"] {
            let n = get(&dom, id);
            assert!(!dom.focus(&n), "{id} should not take focus");
            assert_eq!(dom.active_element(), Some(b));
        }

        let ti = get(&dom, "ti");
        assert!(dom.focus(&ti));
        assert_eq!(dom.active_element(), Some(ti));
    }

    #[test]
    fn detached_active_element_is_forgotten() {
        let mut dom = MemDom::from_html(r#"<div id="h"><button id="b">x</button></div>"#).unwrap();
        let host = dom.element_by_id("h").unwrap();
        let b = dom.element_by_id("b").unwrap();
        dom.focus(&b);
        dom.clear_children(&host);
        assert_eq!(dom.active_element(), None);
        assert!(!dom.focus(&b));
    }

    #[test]
    fn contains_walks_ancestors() {
        let dom = MemDom::from_html(r#"<div id="a"><p id="b"><i id="c"></i></p></div><p id="d"></p>"#)
            .unwrap();
        let get = |id: &str| dom.element_by_id(id).unwrap();
        assert!(dom.contains(&get("a"), &get("c")));
        assert!(dom.contains(&get("a"), &get("a")));
        assert!(!dom.contains(&get("c"), &get("a")));
        assert!(!dom.contains(&get("a"), &get("d")));
    }

    #[test]
    fn class_toggling() {
        let mut dom = MemDom::new();
        let body = dom.body_id();
        dom.set_class(&body, "ds-modal-open", true);
        dom.set_class(&body, "ds-modal-open", true);
        assert!(dom.has_class(&body, "ds-modal-open"));
        assert_eq!(dom.attribute(&body, "class").as_deref(), Some("ds-modal-open"));
        dom.set_class(&body, "ds-modal-open", false);
        assert!(!dom.has_class(&body, "ds-modal-open"));
    }

    #[test]
    fn form_controls() {
        let mut dom = MemDom::from_html(
            r#"<form id="f"><input id="c" type="checkbox" value="7" checked><input id="t" value="a"></form>"#,
        )
        .unwrap();
        let c = dom.element_by_id("c").unwrap();
        let t = dom.element_by_id("t").unwrap();
        assert!(dom.is_checked(&c));
        assert_eq!(dom.value(&c), "7");
        dom.set_value(&t, "b");
        assert_eq!(dom.value(&t), "b");
        dom.set_indeterminate(&c, true);
        assert!(dom.is_indeterminate(c));

        let f = dom.element_by_id("f").unwrap();
        assert!(dom.request_submit(&f));
        assert!(!dom.request_submit(&t));
        assert_eq!(dom.submissions(), &[f]);
    }

    #[test]
    fn text_and_hidden() {
        let mut dom = MemDom::from_html(r#"<span id="n">old</span>"#).unwrap();
        let n = dom.element_by_id("n").unwrap();
        dom.set_text(&n, "3");
        assert_eq!(dom.text_content(n), "3");
        dom.set_hidden(&n, true);
        assert!(dom.is_hidden(n));
        assert!(!dom.is_rendered(&n));
        dom.set_hidden(&n, false);
        assert!(!dom.is_hidden(n));
    }

    #[test]
    fn media_queries_use_viewport_width() {
        let mut dom = MemDom::new();
        assert!(!dom.matches_media("(max-width: 992px)"));
        dom.set_viewport_width(800);
        assert!(dom.matches_media("(max-width: 992px)"));
        assert!(!dom.matches_media("(min-width: 992px)"));
        assert!(!dom.matches_media("(orientation: portrait)"));
        assert!(!dom.matches_media("nonsense"));
    }

    #[test]
    fn css_variables_are_trimmed() {
        let mut dom = MemDom::new();
        dom.set_css_variable("--ds-primary", "  #1d4ed8 ");
        dom.set_css_variable("--ds-empty", "   ");
        assert_eq!(dom.css_variable("--ds-primary").as_deref(), Some("#1d4ed8"));
        assert_eq!(dom.css_variable("--ds-empty"), None);
        assert_eq!(dom.css_variable("--ds-missing"), None);
    }

    #[test]
    fn set_inner_html_replaces_content() {
        let mut dom = MemDom::from_html(r#"<div id="host"><p id="old"></p></div>"#).unwrap();
        let host = dom.element_by_id("host").unwrap();
        dom.set_inner_html(host, r#"<p id="new"></p>"#).unwrap();
        assert!(dom.element_by_id("old").is_none());
        assert!(dom.element_by_id("new").is_some());
        dom.set_inner_html(host, "").unwrap();
        assert!(!dom.has_children(&host));
    }

    #[test]
    fn sibling_combinators_and_attribute_operators() {
        let dom = MemDom::from_html(
            r#"<form id="a"></form><p></p><form id="b"></form>
               <a id="u" href="/users/7">u</a><a id="g" href="/groups">g</a>"#,
        )
        .unwrap();
        let ids = |sel: &str| -> Vec<String> {
            dom.select_all(sel)
                .iter()
                .filter_map(|n| dom.attribute(n, "id"))
                .collect()
        };
        assert_eq!(ids("form ~ form"), vec!["b"]);
        assert_eq!(ids("p + form"), vec!["b"]);
        assert_eq!(ids("[href^='/users']"), vec!["u"]);
        assert_eq!(ids("a:not([href$='7'])"), vec!["g"]);
    }

    #[test]
    fn tables_get_an_implicit_tbody() {
        let dom = MemDom::from_html(r#"<table id="t"><tr><td><input id="c"></td></tr></table>"#)
            .unwrap();
        let c = dom.element_by_id("c").unwrap();
        let body = dom.closest(&c, "tbody").unwrap();
        assert!(body.is_some());
        assert_eq!(dom.select("#t > tbody > tr > td > input"), Some(c));
    }

    #[test]
    fn markup_on_a_text_node_is_rejected() {
        let mut dom = MemDom::from_html("<p id=\"p\">text</p>").unwrap();
        let p = dom.element_by_id("p").unwrap();
        let text = dom.html.tree.get(p).and_then(|n| n.first_child()).unwrap().id();
        assert_eq!(dom.set_inner_html(text, "<b></b>"), Err(DomError::NotAnElement));
    }
}
