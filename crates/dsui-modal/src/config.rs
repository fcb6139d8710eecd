#![forbid(unsafe_code)]

//! Markup and signal contract of the modal manager.
//!
//! Every name the manager looks for in the document lives here. The
//! defaults are the names the server templates emit; embedders override
//! individual fields with the builder methods or, with the `serde` feature,
//! from JSON where missing fields keep their defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Names of the host, dialog markers, action markers and signal events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    /// `id` of the single host element.
    pub host_id: String,
    /// Attribute marking the dialog root.
    pub dialog_attr: String,
    /// Class marking the panel (focus-trap boundary).
    pub panel_class: String,
    /// Attribute marking the backdrop.
    pub backdrop_attr: String,
    /// Dialog attribute whose value `"0"` disables backdrop/Escape dismissal.
    pub backdrop_close_attr: String,
    /// Body class applied while a dialog is open (scroll lock).
    pub open_class: String,
    /// Attribute carrying action markers on controls.
    pub action_attr: String,
    /// Action value of explicit close controls.
    pub close_action: String,
    /// Action value of submit controls.
    pub submit_action: String,
    /// Attribute on a submit control overriding the form selector.
    pub form_selector_attr: String,
    /// Form selector used when the control carries no override.
    pub form_selector: String,
    /// Custom event names that unconditionally close the dialog.
    pub signal_events: Vec<String>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            host_id: "modal-host".into(),
            dialog_attr: "data-modal".into(),
            panel_class: "ds-modal__panel".into(),
            backdrop_attr: "data-modal-backdrop".into(),
            backdrop_close_attr: "data-backdrop-close".into(),
            open_class: "ds-modal-open".into(),
            action_attr: "data-action".into(),
            close_action: "close-modal".into(),
            submit_action: "submit-modal-form".into(),
            form_selector_attr: "data-form-selector".into(),
            form_selector: ".ds-modal-form".into(),
            signal_events: vec!["modalClose".into(), "crudModalClose".into()],
        }
    }
}

impl ModalConfig {
    /// Create a config with the default names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host element id.
    #[must_use]
    pub fn host_id(mut self, id: impl Into<String>) -> Self {
        self.host_id = id.into();
        self
    }

    /// Set the panel class.
    #[must_use]
    pub fn panel_class(mut self, class: impl Into<String>) -> Self {
        self.panel_class = class.into();
        self
    }

    /// Set the body class applied while open.
    #[must_use]
    pub fn open_class(mut self, class: impl Into<String>) -> Self {
        self.open_class = class.into();
        self
    }

    /// Set the default form selector for submit controls.
    #[must_use]
    pub fn form_selector(mut self, selector: impl Into<String>) -> Self {
        self.form_selector = selector.into();
        self
    }

    /// Replace the accepted signal event names.
    #[must_use]
    pub fn signal_events<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signal_events = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `name` is one of the close signals.
    #[must_use]
    pub fn is_signal(&self, name: &str) -> bool {
        self.signal_events.iter().any(|s| s == name)
    }

    pub(crate) fn dialog_selector(&self) -> String {
        format!("[{}]", self.dialog_attr)
    }

    pub(crate) fn panel_selector(&self) -> String {
        format!(".{}", self.panel_class)
    }

    pub(crate) fn backdrop_selector(&self) -> String {
        format!("[{}]", self.backdrop_attr)
    }

    pub(crate) fn action_selector(&self, action: &str) -> String {
        format!("[{}='{}']", self.action_attr, action)
    }
}
