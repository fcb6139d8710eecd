#![forbid(unsafe_code)]

//! Page markup contract for the kit components.
//!
//! [`KitConfig`] nests one section per component plus the modal manager's
//! [`ModalConfig`]. Every section deserializes with defaults, so a JSON
//! config only names what differs from the server templates:
//!
//! ```
//! use dsui_kit::KitConfig;
//!
//! let cfg: KitConfig =
//!     serde_json::from_str(r#"{"sidebar": {"storage_key": "app.nav"}}"#).unwrap();
//! assert_eq!(cfg.sidebar.storage_key, "app.nav");
//! assert_eq!(cfg.modal.host_id, "modal-host");
//! ```

use dsui_modal::ModalConfig;
use serde::{Deserialize, Serialize};

/// Configuration for every component on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitConfig {
    /// Modal host and dialog markers.
    pub modal: ModalConfig,
    /// Bulk-selection markers.
    pub selection: SelectionConfig,
    /// Sidebar classes and persistence.
    pub sidebar: SidebarConfig,
    /// Chart canvas markers.
    pub charts: ChartsConfig,
}

/// Bulk-selection markers on the CRUD list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// `id` of the swappable table container.
    pub table_id: String,
    /// Row checkbox marker.
    pub row_check_attr: String,
    /// Master checkbox marker.
    pub select_all_attr: String,
    /// Bulk action bar marker.
    pub bulk_attr: String,
    /// Selected-count text marker.
    pub count_attr: String,
    /// Hidden input receiving the comma-joined ids.
    pub ids_attr: String,
    /// Clear-selection control marker.
    pub clear_attr: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            table_id: "crud-table".into(),
            row_check_attr: "data-crud-row-check".into(),
            select_all_attr: "data-crud-select-all".into(),
            bulk_attr: "data-crud-bulk".into(),
            count_attr: "data-crud-selected-count".into(),
            ids_attr: "data-crud-selected-ids".into(),
            clear_attr: "data-crud-clear-selection".into(),
        }
    }
}

/// Sidebar classes, persistence key and breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Storage key of the collapse flag.
    pub storage_key: String,
    /// Body class for the collapsed desktop sidebar.
    pub collapsed_class: String,
    /// Body class for the open mobile overlay.
    pub open_class: String,
    /// Media query under which the toggle opens the overlay instead.
    pub mobile_query: String,
    /// `data-action` value of the toggle control.
    pub toggle_action: String,
    /// Selector of the sidebar container.
    pub sidebar_selector: String,
    /// Selector of navigation links inside the sidebar.
    pub nav_link_selector: String,
    /// Class marking the link of the current page.
    pub active_class: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            storage_key: "ds.sidebar.collapsed".into(),
            collapsed_class: "sidebar-collapsed".into(),
            open_class: "sidebar-open".into(),
            mobile_query: "(max-width: 992px)".into(),
            toggle_action: "toggle-sidebar".into(),
            sidebar_selector: ".app-sidebar".into(),
            nav_link_selector: ".app-sidebar .nav-link".into(),
            active_class: "is-active".into(),
        }
    }
}

/// Chart canvas markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Selector of canvases carrying a chart definition.
    pub canvas_selector: String,
    /// Attribute holding the JSON definition.
    pub config_attr: String,
    /// Prefix of the CSS custom properties colors resolve through.
    pub color_var_prefix: String,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            canvas_selector: "canvas[data-chart-def]".into(),
            config_attr: "data-config".into(),
            color_var_prefix: "--ds-".into(),
        }
    }
}

impl SelectionConfig {
    pub(crate) fn marker(attr: &str) -> String {
        format!("[{attr}]")
    }

    pub(crate) fn table_selector(&self) -> String {
        format!("#{}", self.table_id)
    }
}

impl SidebarConfig {
    pub(crate) fn toggle_selector(&self, action_attr: &str) -> String {
        format!("[{action_attr}='{}']", self.toggle_action)
    }

    pub(crate) fn link_selector(&self) -> String {
        format!("{} a", self.sidebar_selector)
    }
}
