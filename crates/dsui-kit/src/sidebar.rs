#![forbid(unsafe_code)]

//! Sidebar: persistent collapse, mobile overlay and active-link marking.
//!
//! On wide viewports the toggle collapses the sidebar and the choice is
//! persisted. On narrow viewports the same toggle opens an overlay that
//! closes again when a link inside the sidebar is followed. After every
//! navigation the link matching the current location gets the active class.

use dsui_dom::{Dom, Event};
use tracing::{debug, warn};
use url::Url;

use crate::config::SidebarConfig;
use crate::storage::Storage;

/// Sidebar controller owning the preference store.
#[derive(Debug, Clone)]
pub struct Sidebar<S> {
    config: SidebarConfig,
    action_attr: String,
    storage: S,
}

impl<S: Storage> Sidebar<S> {
    /// Create a controller. `action_attr` is the attribute carrying action
    /// markers (shared with the modal's controls).
    pub fn new(config: SidebarConfig, action_attr: impl Into<String>, storage: S) -> Self {
        Self {
            config,
            action_attr: action_attr.into(),
            storage,
        }
    }

    /// The preference store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Startup pass: restore the persisted collapse and mark the active link.
    pub fn install<D: Dom>(&mut self, dom: &mut D) {
        if self.storage.get(&self.config.storage_key).as_deref() == Some("1") {
            self.set_collapsed(dom, true);
        }
        let current = dom.location_path();
        self.set_active_nav(dom, &current);
    }

    /// Whether the sidebar is collapsed.
    pub fn is_collapsed<D: Dom>(&self, dom: &D) -> bool {
        dom.body()
            .is_some_and(|body| dom.has_class(&body, &self.config.collapsed_class))
    }

    /// Collapse or expand and persist the choice.
    pub fn set_collapsed<D: Dom>(&mut self, dom: &mut D, collapsed: bool) {
        if let Some(body) = dom.body() {
            dom.set_class(&body, &self.config.collapsed_class, collapsed);
        }
        let flag = if collapsed { "1" } else { "0" };
        if let Err(err) = self.storage.set(&self.config.storage_key, flag) {
            warn!(%err, key = %self.config.storage_key, "sidebar state not persisted");
        }
    }

    /// Mark the nav link whose target equals `current`. Returns the number
    /// of links marked active.
    pub fn set_active_nav<D: Dom>(&self, dom: &mut D, current: &str) -> usize {
        let origin = dom.origin();
        let current = normalize_url(current, &origin);
        let Some(body) = dom.body() else {
            return 0;
        };
        let links = dom
            .query_all(&body, &self.config.nav_link_selector)
            .unwrap_or_else(|err| {
                warn!(%err, "nav link query failed");
                Vec::new()
            });

        let mut active = 0;
        for link in links {
            let href = dom.attribute(&link, "href").unwrap_or_default();
            let is_active = normalize_url(&href, &origin) == current;
            dom.set_class(&link, &self.config.active_class, is_active);
            active += usize::from(is_active);
        }
        debug!(current = %current, active, "active nav marked");
        active
    }

    /// React to an event. Returns whether the event was consumed.
    pub fn handle_event<D: Dom>(&mut self, dom: &mut D, event: &Event<D::Node>) -> bool {
        match event {
            Event::Click { target } => {
                let mut handled = false;
                let toggle = self.config.toggle_selector(&self.action_attr);
                if closest(dom, target, &toggle) {
                    self.toggle(dom);
                    handled = true;
                }
                if closest(dom, target, &self.config.link_selector()) {
                    if let Some(body) = dom.body() {
                        dom.set_class(&body, &self.config.open_class, false);
                    }
                    handled = true;
                }
                handled
            }
            Event::HistoryPush { path } => {
                self.set_active_nav(dom, path);
                true
            }
            Event::AfterSwap { .. } => {
                let current = dom.location_path();
                self.set_active_nav(dom, &current);
                true
            }
            _ => false,
        }
    }

    fn toggle<D: Dom>(&mut self, dom: &mut D) {
        if dom.matches_media(&self.config.mobile_query) {
            if let Some(body) = dom.body() {
                let open = dom.has_class(&body, &self.config.open_class);
                dom.set_class(&body, &self.config.open_class, !open);
            }
            return;
        }
        let collapsed = self.is_collapsed(dom);
        self.set_collapsed(dom, !collapsed);
    }
}

fn closest<D: Dom>(dom: &D, node: &D::Node, selector: &str) -> bool {
    match dom.closest(node, selector) {
        Ok(found) => found.is_some(),
        Err(err) => {
            warn!(%err, selector, "sidebar lookup failed");
            false
        }
    }
}

/// Canonical form of a link target for active-link comparison.
///
/// `raw` is resolved against `origin`; the result is the path with a
/// trailing slash plus the query string, so `/users`, `/users/` and
/// `http://host/users/` compare equal while `?tab=…` variants stay
/// distinct. Input that cannot be resolved is returned unchanged.
#[must_use]
pub fn normalize_url(raw: &str, origin: &str) -> String {
    let resolved = Url::parse(origin).and_then(|base| base.join(raw));
    let Ok(url) = resolved else {
        return raw.to_owned();
    };
    let mut out = url.path().to_owned();
    if !out.ends_with('/') {
        out.push('/');
    }
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        out.push('?');
        out.push_str(query);
    }
    out
}
