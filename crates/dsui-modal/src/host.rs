#![forbid(unsafe_code)]

//! Host resolution: finding the host, the dialog inside it and its panel.
//!
//! Everything here is a pure query and is recomputed on every call; nothing
//! is cached, so a swap that replaces the host's content is observed
//! immediately.
//!
//! # Failure Modes
//!
//! - Missing host, dialog or panel: `None`.
//! - A configured selector that fails to parse: logged at `warn` and treated
//!   as "no match".

use dsui_dom::Dom;
use tracing::warn;

use crate::ModalConfig;

/// The host element, if present.
pub fn host<D: Dom>(dom: &D, cfg: &ModalConfig) -> Option<D::Node> {
    dom.element_by_id(&cfg.host_id)
}

/// Whether `node` is the host element.
pub fn is_host<D: Dom>(dom: &D, cfg: &ModalConfig, node: &D::Node) -> bool {
    host(dom, cfg).is_some_and(|h| h == *node)
}

/// The dialog root inside the host.
pub fn dialog<D: Dom>(dom: &D, cfg: &ModalConfig) -> Option<D::Node> {
    let host = host(dom, cfg)?;
    first_match(dom, &host, &cfg.dialog_selector())
}

/// The panel (focus-trap boundary) inside the dialog.
pub fn panel<D: Dom>(dom: &D, cfg: &ModalConfig) -> Option<D::Node> {
    let dialog = dialog(dom, cfg)?;
    first_match(dom, &dialog, &cfg.panel_selector())
}

/// First descendant of `root` matching `selector`, absorbing selector errors.
pub(crate) fn first_match<D: Dom>(dom: &D, root: &D::Node, selector: &str) -> Option<D::Node> {
    match dom.query(root, selector) {
        Ok(found) => found,
        Err(err) => {
            warn!(%err, selector, "selector query failed; treating as no match");
            None
        }
    }
}

/// `node` or its nearest ancestor matching `selector`, absorbing selector errors.
pub(crate) fn closest<D: Dom>(dom: &D, node: &D::Node, selector: &str) -> Option<D::Node> {
    match dom.closest(node, selector) {
        Ok(found) => found,
        Err(err) => {
            warn!(%err, selector, "closest lookup failed; treating as no match");
            None
        }
    }
}
