#![forbid(unsafe_code)]

//! The modal manager: one dispatcher in front of the lifecycle.
//!
//! The manager is the only component that mutates the host or the body
//! mark. Routers and the bridge decide; the manager executes. It keeps a
//! single piece of state, the focus origin, inside its [`Lifecycle`].
//!
//! # Example
//!
//! ```
//! use dsui_dom::{Dom, Event, KeyCode, KeyEvent, MemDom};
//! use dsui_modal::{CloseReason, ModalAction, ModalManager};
//!
//! let mut dom = MemDom::from_html(
//!     r#"<div id="modal-host"><div data-modal><div class="ds-modal__panel">
//!          <button id="ok">OK</button></div></div></div>"#,
//! ).unwrap();
//! let mut modal = ModalManager::default();
//! modal.install(&mut dom);
//! assert_eq!(dom.active_element(), dom.element_by_id("ok"));
//!
//! let esc = Event::Key(KeyEvent::new(KeyCode::Escape));
//! let action = modal.handle_event(&mut dom, &esc);
//! assert_eq!(action, Some(ModalAction::Closed(CloseReason::Escape)));
//! assert!(!modal.is_open(&dom));
//! ```

use dsui_dom::{Dom, Event};
use tracing::{debug, debug_span, trace};

use crate::ModalConfig;
use crate::bridge::{self, SwapAction};
use crate::dismiss::{self, CloseReason, Dismissal};
use crate::lifecycle::{self, CloseOutcome, Lifecycle};

/// What the manager did in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// A dialog was initialized (body mark set, focus moved in).
    Opened,
    /// Close/teardown ran.
    Closed(CloseReason),
    /// A Tab press was redirected to keep focus in the panel.
    FocusWrapped,
    /// A form in the host was asked to submit.
    FormSubmitted,
}

impl ModalAction {
    /// Whether the browser's default handling of the source event must be
    /// cancelled.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(
            self,
            Self::FocusWrapped | Self::Closed(CloseReason::Control | CloseReason::Escape)
        )
    }
}

/// Coordinates lifecycle, dismissal and swap handling for the single host.
#[derive(Debug, Clone)]
pub struct ModalManager<N> {
    config: ModalConfig,
    lifecycle: Lifecycle<N>,
}

impl<N> Default for ModalManager<N> {
    fn default() -> Self {
        Self {
            config: ModalConfig::default(),
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<N: Clone + PartialEq + std::fmt::Debug> ModalManager<N> {
    /// Create a manager with the given names.
    #[must_use]
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Element that will receive focus on close, if any.
    #[must_use]
    pub fn last_focused(&self) -> Option<&N> {
        self.lifecycle.last_focused()
    }

    /// Whether a dialog is currently in the host.
    pub fn is_open<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        lifecycle::is_open(dom, &self.config)
    }

    /// Startup pass: initialize a dialog the server rendered with the page.
    pub fn install<D: Dom<Node = N>>(&mut self, dom: &mut D) -> bool {
        let opened = self.lifecycle.open_init(dom, &self.config);
        debug!(opened, host_id = %self.config.host_id, "modal manager installed");
        opened
    }

    /// Initialize the dialog currently in the host.
    pub fn open_init<D: Dom<Node = N>>(&mut self, dom: &mut D) -> bool {
        self.lifecycle.open_init(dom, &self.config)
    }

    /// Close the current dialog, if any, and restore focus.
    pub fn close<D: Dom<Node = N>>(&mut self, dom: &mut D) -> CloseOutcome {
        self.lifecycle.close_modal(dom, &self.config)
    }

    /// Handle one event.
    ///
    /// Returns `None` when the event is not the manager's concern.
    pub fn handle_event<D: Dom<Node = N>>(&mut self, dom: &mut D, event: &Event<N>) -> Option<ModalAction> {
        let span = debug_span!("modal_event", kind = event.kind());
        let _guard = span.enter();

        let cfg = &self.config;
        match event {
            Event::Click { target } => {
                let decision = dismiss::route_click(dom, cfg, target)?;
                self.apply(dom, decision)
            }
            Event::Key(key) => {
                let decision = dismiss::route_key(dom, cfg, key)?;
                self.apply(dom, decision)
            }
            Event::Signal(name) => {
                let decision = dismiss::route_signal(cfg, name)?;
                self.apply(dom, decision)
            }
            Event::BeforeSwap(swap) => match bridge::on_before_swap(dom, cfg, swap)? {
                SwapAction::Close => Some(self.close_for(dom, CloseReason::EmptySwap)),
                SwapAction::OpenInit => None,
            },
            Event::AfterSwap { target } => match bridge::on_after_swap(dom, cfg, target)? {
                SwapAction::OpenInit => self.open_init(dom).then_some(ModalAction::Opened),
                SwapAction::Close => Some(self.close_for(dom, CloseReason::EmptySwap)),
            },
            Event::Change { .. } | Event::HistoryPush { .. } => None,
        }
    }

    fn apply<D: Dom<Node = N>>(&mut self, dom: &mut D, decision: Dismissal<N>) -> Option<ModalAction> {
        match decision {
            Dismissal::Close(reason) => Some(self.close_for(dom, reason)),
            Dismissal::Submit { form } => {
                let submitted = dom.request_submit(&form);
                trace!(submitted, "modal form submit requested");
                submitted.then_some(ModalAction::FormSubmitted)
            }
            Dismissal::Wrap { to } => {
                dom.focus(&to);
                Some(ModalAction::FocusWrapped)
            }
        }
    }

    fn close_for<D: Dom<Node = N>>(&mut self, dom: &mut D, reason: CloseReason) -> ModalAction {
        let outcome = self.close(dom);
        debug!(reason = reason.as_str(), removed = outcome.removed, "modal close handled");
        ModalAction::Closed(reason)
    }
}
