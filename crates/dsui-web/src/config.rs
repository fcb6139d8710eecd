#![forbid(unsafe_code)]

//! Configuration accepted by [`install`](crate::install).
//!
//! The JSON handed to `install` is a [`KitConfig`] plus the names of the
//! replacement transport's events. Kit sections sit at the top level, so a
//! page that only renames its host writes `{"modal": {"host_id": "dlg"}}`.

use dsui_kit::KitConfig;
use serde::{Deserialize, Serialize};

/// Everything the browser binding needs to wire a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Component markers and class names.
    #[serde(flatten)]
    pub kit: KitConfig,
    /// Transport event names.
    pub events: TransportEvents,
}

/// Names of the events the replacement transport dispatches on the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportEvents {
    /// Fired before content is swapped into a target.
    pub before_swap: String,
    /// Fired after content was swapped into a target.
    pub after_swap: String,
    /// Fired after a new location was pushed into history.
    pub history_push: String,
}

impl Default for TransportEvents {
    fn default() -> Self {
        Self {
            before_swap: "htmx:beforeSwap".into(),
            after_swap: "htmx:afterSwap".into(),
            history_push: "htmx:pushedIntoHistory".into(),
        }
    }
}

impl WebConfig {
    /// Parse an optional JSON document. `None` and blank input yield the
    /// defaults.
    pub fn from_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => serde_json::from_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_config_is_default() {
        assert_eq!(WebConfig::from_json(None).unwrap(), WebConfig::default());
        assert_eq!(WebConfig::from_json(Some("  ")).unwrap(), WebConfig::default());
    }

    #[test]
    fn defaults_name_htmx_events() {
        let events = WebConfig::default().events;
        assert_eq!(events.before_swap, "htmx:beforeSwap");
        assert_eq!(events.after_swap, "htmx:afterSwap");
        assert_eq!(events.history_push, "htmx:pushedIntoHistory");
    }

    #[test]
    fn kit_sections_are_top_level() {
        let cfg = WebConfig::from_json(Some(
            r#"{"modal": {"host_id": "dialogs"}, "events": {"after_swap": "swap:done"}}"#,
        ))
        .unwrap();
        assert_eq!(cfg.kit.modal.host_id, "dialogs");
        assert_eq!(cfg.kit.modal.open_class, "ds-modal-open");
        assert_eq!(cfg.events.after_swap, "swap:done");
        assert_eq!(cfg.events.before_swap, "htmx:beforeSwap");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(WebConfig::from_json(Some("{modal:")).is_err());
    }
}
