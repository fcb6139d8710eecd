#![forbid(unsafe_code)]

//! Replacement bridge: reacts to the transport swapping content into the
//! host.
//!
//! The server opens a dialog by rendering it into the host and closes one by
//! answering with an empty body. Both are observed here as swap events and
//! turned into lifecycle calls. Only swaps whose target is the host itself
//! count; swaps into other regions, even ones nested inside the dialog, are
//! ignored.
//!
//! A swap that leaves the host without a dialog while the body still
//! carries the open mark (a whitespace-only response, say) also tears down,
//! so the mark never outlives the dialog.

use dsui_dom::{Dom, SwapEvent};

use crate::ModalConfig;
use crate::host;
use crate::lifecycle::is_open;

/// Lifecycle call requested by a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    /// Run open initialization.
    OpenInit,
    /// Run close/teardown.
    Close,
}

/// A swap into `target` has completed.
pub fn on_after_swap<D: Dom>(dom: &D, cfg: &ModalConfig, target: &D::Node) -> Option<SwapAction> {
    if !host::is_host(dom, cfg, target) {
        return None;
    }
    if is_open(dom, cfg) {
        return Some(SwapAction::OpenInit);
    }
    let marked = dom
        .body()
        .is_some_and(|body| dom.has_class(&body, &cfg.open_class));
    marked.then_some(SwapAction::Close)
}

/// A swap is about to happen. Only a strictly empty payload into the host
/// closes; whitespace is content as far as the transport is concerned.
pub fn on_before_swap<D: Dom>(dom: &D, cfg: &ModalConfig, swap: &SwapEvent<D::Node>) -> Option<SwapAction> {
    (swap.empty_payload && host::is_host(dom, cfg, &swap.target)).then_some(SwapAction::Close)
}
