#![forbid(unsafe_code)]

//! Focus trap: the focusable set of the panel and Tab wrapping.
//!
//! # Invariants
//!
//! - The focusable set is derived, never stored: it is recomputed from the
//!   document on every open and on every trapped keystroke.
//! - Order is document order.
//! - Tab on the last member wraps to the first; Shift+Tab on the first wraps
//!   to the last. A set of one wraps onto itself, so focus stays put.
//!
//! # Failure Modes
//!
//! - Absent panel or empty set: [`TrapDecision::PassThrough`]. Focus may
//!   briefly leave the panel; no synthetic focusables are injected.

use dsui_dom::Dom;
use tracing::{trace, warn};

/// Interactive-element allowlist.
pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), \
    textarea:not([disabled]), input:not([disabled]), select:not([disabled]), \
    [tabindex]:not([tabindex='-1'])";

/// What a Tab press inside an open dialog should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrapDecision<N> {
    /// Let the browser move focus normally.
    PassThrough,
    /// Cancel the default move and focus `to` instead.
    Wrap {
        /// Element that receives focus.
        to: N,
        /// Whether this was Shift+Tab.
        backward: bool,
    },
}

impl<N> TrapDecision<N> {
    /// Whether the default focus move must be prevented.
    #[must_use]
    pub const fn is_wrap(&self) -> bool {
        matches!(self, Self::Wrap { .. })
    }
}

/// Rendered, enabled interactive descendants of `root`, in document order.
///
/// Returns an empty set when `root` is absent.
pub fn focusable_descendants<D: Dom>(dom: &D, root: Option<&D::Node>) -> Vec<D::Node> {
    let Some(root) = root else {
        return Vec::new();
    };
    match dom.query_all(root, FOCUSABLE_SELECTOR) {
        Ok(candidates) => candidates
            .into_iter()
            .filter(|node| dom.is_rendered(node))
            .collect(),
        Err(err) => {
            warn!(%err, "focusable query failed");
            Vec::new()
        }
    }
}

/// Decide how a Tab (or Shift+Tab when `backward`) press is handled.
pub fn trap_tab<D: Dom>(dom: &D, panel: Option<&D::Node>, backward: bool) -> TrapDecision<D::Node> {
    let set = focusable_descendants(dom, panel);
    let (Some(first), Some(last)) = (set.first(), set.last()) else {
        trace!("focus trap idle: empty focusable set");
        return TrapDecision::PassThrough;
    };

    let active = dom.active_element();
    let at = |node: &D::Node| active.as_ref() == Some(node);

    if backward && at(first) {
        TrapDecision::Wrap {
            to: last.clone(),
            backward,
        }
    } else if !backward && at(last) {
        TrapDecision::Wrap {
            to: first.clone(),
            backward,
        }
    } else {
        TrapDecision::PassThrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsui_dom::MemDom;
    use pretty_assertions::assert_eq;

    fn ids(dom: &MemDom, nodes: &[dsui_dom::NodeId]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| dom.attribute(n, "id").unwrap_or_default())
            .collect()
    }

    #[test]
    fn allowlist_and_filters() {
        let dom = MemDom::from_html(
            r#"<div id="p">
                <a id="link" href="/x">x</a>
                <a id="nolink">x</a>
                <button id="b1">x</button>
                <button id="b2" disabled>x</button>
                <input id="i1">
                <input id="i2" disabled>
                <input id="i3" type="hidden">
                <select id="s1"></select>
                <textarea id="t1"></textarea>
                <textarea id="t2" disabled></textarea>
                <div id="ti0" tabindex="0">x</div>
                <div id="tim" tabindex="-1">x</div>
                <span id="plain">x</span>
                <button id="hidden" style="display:none">x</button>
                <button id="invisible" style="visibility:hidden">x</button>
            </div>"#,
        )
        .unwrap();
        let p = dom.element_by_id("p");
        let set = focusable_descendants(&dom, p.as_ref());
        assert_eq!(ids(&dom, &set), vec!["link", "b1", "i1", "s1", "t1", "ti0"]);
    }

    #[test]
    fn absent_root_is_empty() {
        let dom = MemDom::new();
        assert!(focusable_descendants(&dom, None).is_empty());
    }

    #[test]
    fn tab_wraps_last_to_first_and_back() {
        let mut dom = MemDom::from_html(
            r#"<div id="p"><button id="a">a</button><button id="b">b</button><button id="c">c</button></div>"#,
        )
        .unwrap();
        let p = dom.element_by_id("p");
        let a = dom.element_by_id("a").unwrap();
        let b = dom.element_by_id("b").unwrap();
        let c = dom.element_by_id("c").unwrap();

        dom.focus(&c);
        assert_eq!(
            trap_tab(&dom, p.as_ref(), false),
            TrapDecision::Wrap {
                to: a,
                backward: false
            }
        );

        dom.focus(&a);
        assert_eq!(
            trap_tab(&dom, p.as_ref(), true),
            TrapDecision::Wrap {
                to: c,
                backward: true
            }
        );

        // Interior moves are left to the browser.
        dom.focus(&b);
        assert_eq!(trap_tab(&dom, p.as_ref(), false), TrapDecision::PassThrough);
        assert_eq!(trap_tab(&dom, p.as_ref(), true), TrapDecision::PassThrough);

        // Forward from the first and backward from the last pass through.
        dom.focus(&a);
        assert_eq!(trap_tab(&dom, p.as_ref(), false), TrapDecision::PassThrough);
        dom.focus(&c);
        assert_eq!(trap_tab(&dom, p.as_ref(), true), TrapDecision::PassThrough);
    }

    #[test]
    fn single_member_wraps_onto_itself() {
        let mut dom = MemDom::from_html(r#"<div id="p"><button id="ok">OK</button></div>"#).unwrap();
        let p = dom.element_by_id("p");
        let ok = dom.element_by_id("ok").unwrap();
        dom.focus(&ok);
        for backward in [false, true] {
            let decision = trap_tab(&dom, p.as_ref(), backward);
            assert_eq!(decision, TrapDecision::Wrap { to: ok, backward });
        }
    }

    #[test]
    fn empty_set_passes_through() {
        let mut dom = MemDom::from_html(r#"<div id="p" tabindex="-1"><p>text</p></div>"#).unwrap();
        let p = dom.element_by_id("p").unwrap();
        dom.focus(&p);
        let decision = trap_tab(&dom, Some(&p), false);
        assert!(!decision.is_wrap());
    }

    #[test]
    fn hidden_last_member_is_skipped() {
        let mut dom = MemDom::from_html(
            r#"<div id="p"><button id="a">a</button><button id="b">b</button><button id="gone" hidden>x</button></div>"#,
        )
        .unwrap();
        let p = dom.element_by_id("p");
        let a = dom.element_by_id("a").unwrap();
        let b = dom.element_by_id("b").unwrap();
        dom.focus(&b);
        assert_eq!(
            trap_tab(&dom, p.as_ref(), false),
            TrapDecision::Wrap {
                to: a,
                backward: false
            }
        );
    }
}
