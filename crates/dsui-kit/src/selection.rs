#![forbid(unsafe_code)]

//! Bulk selection on CRUD lists.
//!
//! Row checkboxes, a master checkbox, a counter, a hidden input with the
//! selected ids and a bulk action bar that shows only while something is
//! selected. All lookups are document-wide and delegated: the table can be
//! swapped out by pagination or filtering and the next event simply sees
//! the new rows.
//!
//! # Invariants
//!
//! - After every handled event the counter, the ids input and the bar's
//!   visibility agree with the checked rows.
//! - The master is checked iff every row is checked (and there is at least
//!   one row); it is indeterminate iff some but not all rows are checked.

use dsui_dom::{Dom, Event};
use tracing::{trace, warn};

use crate::config::SelectionConfig;

/// Bulk-selection controller.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    config: SelectionConfig,
}

impl Selection {
    /// Create a controller for the given markers.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// The active markers.
    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Values of the checked row checkboxes, in document order.
    pub fn selected_ids<D: Dom>(&self, dom: &D) -> Vec<String> {
        self.rows(dom)
            .iter()
            .filter(|row| dom.is_checked(row))
            .map(|row| dom.value(row))
            .collect()
    }

    /// Bring the counter, ids input and bulk bar in line with the rows.
    ///
    /// Returns the selected count, or `None` when the page has no bulk bar.
    pub fn sync_bulk_ui<D: Dom>(&self, dom: &mut D) -> Option<usize> {
        let bulk = self.first(dom, &self.config.bulk_attr)?;
        let ids = self.selected_ids(dom);

        if let Some(count) = self.first(dom, &self.config.count_attr) {
            dom.set_text(&count, &ids.len().to_string());
        }
        if let Some(input) = self.first(dom, &self.config.ids_attr) {
            dom.set_value(&input, &ids.join(","));
        }
        dom.set_hidden(&bulk, ids.is_empty());

        trace!(selected = ids.len(), "bulk bar synced");
        Some(ids.len())
    }

    /// React to an event. Returns whether the event was consumed.
    pub fn handle_event<D: Dom>(&self, dom: &mut D, event: &Event<D::Node>) -> bool {
        match event {
            Event::Change { target } => {
                if dom.attribute(target, &self.config.select_all_attr).is_some() {
                    let checked = dom.is_checked(target);
                    self.set_all(dom, checked);
                    true
                } else if dom.attribute(target, &self.config.row_check_attr).is_some() {
                    self.refresh_master(dom);
                    self.sync_bulk_ui(dom);
                    true
                } else {
                    false
                }
            }
            Event::Click { target } => {
                let clear = SelectionConfig::marker(&self.config.clear_attr);
                if self.closest(dom, target, &clear) {
                    self.clear(dom);
                    true
                } else {
                    false
                }
            }
            Event::AfterSwap { target } => {
                if self.closest(dom, target, &self.config.table_selector()) {
                    self.sync_bulk_ui(dom);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Uncheck every row and reset the master.
    pub fn clear<D: Dom>(&self, dom: &mut D) {
        for row in self.rows(dom) {
            dom.set_checked(&row, false);
        }
        if let Some(master) = self.first(dom, &self.config.select_all_attr) {
            dom.set_checked(&master, false);
            dom.set_indeterminate(&master, false);
        }
        self.sync_bulk_ui(dom);
    }

    fn set_all<D: Dom>(&self, dom: &mut D, checked: bool) {
        for row in self.rows(dom) {
            dom.set_checked(&row, checked);
        }
        self.sync_bulk_ui(dom);
    }

    fn refresh_master<D: Dom>(&self, dom: &mut D) {
        let Some(master) = self.first(dom, &self.config.select_all_attr) else {
            return;
        };
        let rows = self.rows(dom);
        let total = rows.len();
        let checked = rows.iter().filter(|row| dom.is_checked(row)).count();
        dom.set_indeterminate(&master, checked > 0 && checked < total);
        dom.set_checked(&master, total > 0 && checked == total);
    }

    fn rows<D: Dom>(&self, dom: &D) -> Vec<D::Node> {
        self.all(dom, &SelectionConfig::marker(&self.config.row_check_attr))
    }

    fn first<D: Dom>(&self, dom: &D, attr: &str) -> Option<D::Node> {
        self.all(dom, &SelectionConfig::marker(attr)).into_iter().next()
    }

    fn all<D: Dom>(&self, dom: &D, selector: &str) -> Vec<D::Node> {
        let Some(body) = dom.body() else {
            return Vec::new();
        };
        dom.query_all(&body, selector).unwrap_or_else(|err| {
            warn!(%err, selector, "selection query failed");
            Vec::new()
        })
    }

    fn closest<D: Dom>(&self, dom: &D, node: &D::Node, selector: &str) -> bool {
        match dom.closest(node, selector) {
            Ok(found) => found.is_some(),
            Err(err) => {
                warn!(%err, selector, "selection lookup failed");
                false
            }
        }
    }
}
