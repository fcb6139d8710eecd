#![forbid(unsafe_code)]

//! Dismissal router: maps clicks, keys and signals to lifecycle decisions.
//!
//! Routing is pure: every function here inspects the document and returns
//! a [`Dismissal`] for the manager to execute. Nothing is mutated.
//!
//! Click tie-break, checked in order on the target's ancestor chain:
//! close control, submit control, backdrop. The first marker found wins,
//! so a close button drawn inside the backdrop closes even when the
//! backdrop policy forbids it.

use dsui_dom::{Dom, KeyCode, KeyEvent};
use tracing::trace;

use crate::ModalConfig;
use crate::focus::{TrapDecision, trap_tab};
use crate::host;
use crate::lifecycle::is_open;

/// Why a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Explicit close control.
    Control,
    /// Click on the backdrop.
    Backdrop,
    /// Escape key.
    Escape,
    /// A close signal event.
    Signal,
    /// The server replaced the host content with nothing, or with content
    /// that holds no dialog.
    EmptySwap,
}

impl CloseReason {
    /// Stable name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Backdrop => "backdrop",
            Self::Escape => "escape",
            Self::Signal => "signal",
            Self::EmptySwap => "empty-swap",
        }
    }
}

/// A routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dismissal<N> {
    /// Close the dialog.
    Close(CloseReason),
    /// Submit this form natively. The dialog stays open.
    Submit {
        /// The resolved form.
        form: N,
    },
    /// Redirect focus to keep it in the panel.
    Wrap {
        /// Element that receives focus.
        to: N,
    },
}

/// Whether backdrop clicks and Escape may close the current dialog.
///
/// Only a dialog attribute value of exactly `"0"` forbids it. No dialog, no
/// attribute or any other value permits.
pub fn backdrop_allows_close<D: Dom>(dom: &D, cfg: &ModalConfig) -> bool {
    host::dialog(dom, cfg)
        .and_then(|dialog| dom.attribute(&dialog, &cfg.backdrop_close_attr))
        .is_none_or(|value| value != "0")
}

/// Route a click on `target`.
pub fn route_click<D: Dom>(dom: &D, cfg: &ModalConfig, target: &D::Node) -> Option<Dismissal<D::Node>> {
    if host::closest(dom, target, &cfg.action_selector(&cfg.close_action)).is_some() {
        return Some(Dismissal::Close(CloseReason::Control));
    }

    if let Some(control) = host::closest(dom, target, &cfg.action_selector(&cfg.submit_action)) {
        let selector = dom
            .attribute(&control, &cfg.form_selector_attr)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| cfg.form_selector.clone());
        let form = host::host(dom, cfg).and_then(|h| host::first_match(dom, &h, &selector));
        if form.is_none() {
            trace!(selector = %selector, "submit control: no form in host");
        }
        return form.map(|form| Dismissal::Submit { form });
    }

    if host::closest(dom, target, &cfg.backdrop_selector()).is_some() {
        if backdrop_allows_close(dom, cfg) {
            return Some(Dismissal::Close(CloseReason::Backdrop));
        }
        trace!("backdrop click ignored: dialog opts out");
    }
    None
}

/// Route a key press. Only acts while a dialog is open.
pub fn route_key<D: Dom>(dom: &D, cfg: &ModalConfig, key: &KeyEvent) -> Option<Dismissal<D::Node>> {
    if !is_open(dom, cfg) {
        return None;
    }
    match key.code {
        KeyCode::Escape => {
            if backdrop_allows_close(dom, cfg) {
                Some(Dismissal::Close(CloseReason::Escape))
            } else {
                trace!("escape ignored: dialog opts out");
                None
            }
        }
        KeyCode::Tab => {
            let panel = host::panel(dom, cfg);
            match trap_tab(dom, panel.as_ref(), key.shift()) {
                TrapDecision::Wrap { to, backward } => {
                    trace!(backward, "focus trap wrap");
                    Some(Dismissal::Wrap { to })
                }
                TrapDecision::PassThrough => None,
            }
        }
        _ => None,
    }
}

/// Route a named signal. Close signals close unconditionally.
pub fn route_signal<N>(cfg: &ModalConfig, name: &str) -> Option<Dismissal<N>> {
    cfg.is_signal(name)
        .then_some(Dismissal::Close(CloseReason::Signal))
}
