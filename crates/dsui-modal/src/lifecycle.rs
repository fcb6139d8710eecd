#![forbid(unsafe_code)]

//! Lifecycle controller: open initialization and close/teardown.
//!
//! Open/closed is never stored. [`is_open`] reads the document every time,
//! so whoever inserts or removes the dialog (a swap, a user close, a server
//! redirect) is observed without bookkeeping. The only state kept across
//! events is the element to hand focus back to.
//!
//! # Invariants
//!
//! - `is_open()` holds iff the host exists and contains a dialog.
//! - The body mark is present after `open_init` on an open dialog and absent
//!   after `close_modal`.
//! - `last_focused` never points inside the host: a re-init over an already
//!   open dialog keeps the element captured before the dialog first appeared.
//!
//! # Failure Modes
//!
//! - No operation fails. Missing host, dialog or panel short-circuits.
//! - A previously focused element that was removed, hidden or disabled in the
//!   meantime is silently skipped on restore.

use dsui_dom::Dom;
use tracing::{debug, trace};

use crate::ModalConfig;
use crate::focus::focusable_descendants;
use crate::host;

/// Whether a dialog is currently in the host.
pub fn is_open<D: Dom>(dom: &D, cfg: &ModalConfig) -> bool {
    host::dialog(dom, cfg).is_some()
}

/// What [`Lifecycle::close_modal`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseOutcome {
    /// A dialog was present and the host was cleared.
    pub removed: bool,
    /// Focus went back to the element captured at open.
    pub focus_restored: bool,
}

/// Open/close transitions plus the captured focus origin.
#[derive(Debug, Clone)]
pub struct Lifecycle<N> {
    last_focused: Option<N>,
}

impl<N> Default for Lifecycle<N> {
    fn default() -> Self {
        Self { last_focused: None }
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug> Lifecycle<N> {
    /// Create a lifecycle with nothing captured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element that will receive focus on close, if any.
    #[must_use]
    pub fn last_focused(&self) -> Option<&N> {
        self.last_focused.as_ref()
    }

    /// Prepare a dialog that just appeared in the host.
    ///
    /// Adds the body mark, captures the focus origin and moves focus into
    /// the panel: its first focusable element, or the panel itself when it
    /// has none. Does nothing when no dialog is present.
    ///
    /// Returns whether a dialog was initialized.
    pub fn open_init<D: Dom<Node = N>>(&mut self, dom: &mut D, cfg: &ModalConfig) -> bool {
        let Some(host) = host::host(dom, cfg) else {
            trace!(host_id = %cfg.host_id, "open_init: no host");
            return false;
        };
        if !is_open(dom, cfg) {
            trace!("open_init: host holds no dialog");
            return false;
        }

        if let Some(body) = dom.body() {
            dom.set_class(&body, &cfg.open_class, true);
        }

        self.capture(dom, &host);

        let panel = host::panel(dom, cfg);
        let landed = match &panel {
            Some(panel) => match focusable_descendants(dom, Some(panel)).first() {
                Some(first) => dom.focus(first),
                None => focus_panel(dom, panel),
            },
            None => false,
        };
        debug!(
            panel = panel.is_some(),
            focused = landed,
            captured = self.last_focused.is_some(),
            "modal opened"
        );
        true
    }

    /// Tear down the dialog and hand focus back.
    ///
    /// The host is cleared only when it holds a dialog; stray non-dialog
    /// content is left alone. The body mark removal and focus restore run
    /// regardless, so calling this while already closed is harmless.
    pub fn close_modal<D: Dom<Node = N>>(&mut self, dom: &mut D, cfg: &ModalConfig) -> CloseOutcome {
        let mut outcome = CloseOutcome::default();
        let Some(host) = host::host(dom, cfg) else {
            trace!(host_id = %cfg.host_id, "close_modal: no host");
            return outcome;
        };

        if is_open(dom, cfg) {
            dom.clear_children(&host);
            outcome.removed = true;
        } else if dom.has_children(&host) {
            trace!("close_modal: host holds non-dialog content, left in place");
        }

        if let Some(body) = dom.body() {
            dom.set_class(&body, &cfg.open_class, false);
        }

        if let Some(previous) = self.last_focused.take()
            && dom.is_connected(&previous)
        {
            outcome.focus_restored = dom.focus(&previous);
        }

        debug!(
            removed = outcome.removed,
            focus_restored = outcome.focus_restored,
            "modal closed"
        );
        outcome
    }

    fn capture<D: Dom<Node = N>>(&mut self, dom: &D, host: &N) {
        match dom.active_element() {
            // Re-init over a dialog that already holds focus.
            Some(active) if dom.contains(host, &active) => {}
            // Focus fell back to the document while the previous dialog was
            // replaced; the earlier origin is still the right target.
            None if self
                .last_focused
                .as_ref()
                .is_some_and(|prev| dom.is_connected(prev)) => {}
            active => self.last_focused = active,
        }
    }
}

fn focus_panel<D: Dom>(dom: &mut D, panel: &D::Node) -> bool {
    if dom.attribute(panel, "tabindex").is_none() {
        dom.set_attribute(panel, "tabindex", "-1");
    }
    dom.focus(panel)
}
