#![forbid(unsafe_code)]

//! The page shell: one dispatcher for every dsui responsibility.
//!
//! The browser binding registers its listeners once and feeds every event
//! through [`Shell::dispatch`]. Responsibilities see events in a fixed
//! order (modal, selection, sidebar, charts); each decides for itself
//! whether the event concerns it, exactly as independent delegated
//! listeners would.

use dsui_dom::{Dom, Event};
use dsui_modal::{ModalAction, ModalManager};
use tracing::debug_span;

use crate::KitConfig;
use crate::charts::{ChartPass, ChartRegistry, ChartRenderer};
use crate::selection::Selection;
use crate::sidebar::Sidebar;
use crate::storage::Storage;

/// What happened while dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// The modal manager's action, if any.
    pub modal: Option<ModalAction>,
    /// Selection state was touched.
    pub selection: bool,
    /// Sidebar state was touched.
    pub sidebar: bool,
    /// Charts were re-initialized.
    pub charts: Option<ChartPass>,
}

impl Dispatch {
    /// Whether the browser's default handling must be cancelled.
    #[must_use]
    pub fn prevent_default(&self) -> bool {
        self.modal.is_some_and(ModalAction::prevents_default)
    }
}

/// Every page-level responsibility behind a single event entry point.
pub struct Shell<D: Dom, S, R: ChartRenderer<D::Node>> {
    modal: ModalManager<D::Node>,
    selection: Selection,
    sidebar: Sidebar<S>,
    charts: ChartRegistry<D::Node, R>,
}

impl<D, S, R> std::fmt::Debug for Shell<D, S, R>
where
    D: Dom,
    S: std::fmt::Debug,
    R: ChartRenderer<D::Node>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("modal", &self.modal)
            .field("selection", &self.selection)
            .field("sidebar", &self.sidebar)
            .field("charts", &self.charts)
            .finish()
    }
}

impl<D, S, R> Shell<D, S, R>
where
    D: Dom,
    S: Storage,
    R: ChartRenderer<D::Node>,
{
    /// Assemble a shell from its configuration and platform services.
    pub fn new(config: KitConfig, storage: S, renderer: R) -> Self {
        let KitConfig {
            modal,
            selection,
            sidebar,
            charts,
        } = config;
        let action_attr = modal.action_attr.clone();
        Self {
            modal: ModalManager::new(modal),
            selection: Selection::new(selection),
            sidebar: Sidebar::new(sidebar, action_attr, storage),
            charts: ChartRegistry::new(charts, renderer),
        }
    }

    /// Startup passes, in page-load order.
    pub fn install(&mut self, dom: &mut D) {
        let _guard = debug_span!("shell_install").entered();
        self.sidebar.install(dom);
        if let Some(body) = dom.body() {
            self.charts.init_charts(dom, &body);
        }
        self.selection.sync_bulk_ui(dom);
        self.modal.install(dom);
    }

    /// Route one event through every responsibility.
    pub fn dispatch(&mut self, dom: &mut D, event: &Event<D::Node>) -> Dispatch {
        let modal = self.modal.handle_event(dom, event);
        let selection = self.selection.handle_event(dom, event);
        let sidebar = self.sidebar.handle_event(dom, event);
        let charts = match event {
            Event::AfterSwap { .. } => dom.body().map(|body| self.charts.init_charts(dom, &body)),
            _ => None,
        };
        Dispatch {
            modal,
            selection,
            sidebar,
            charts,
        }
    }

    /// The modal manager.
    pub fn modal(&self) -> &ModalManager<D::Node> {
        &self.modal
    }

    /// The modal manager, mutably (programmatic open/close).
    pub fn modal_mut(&mut self) -> &mut ModalManager<D::Node> {
        &mut self.modal
    }

    /// The selection controller.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The sidebar controller.
    pub fn sidebar(&self) -> &Sidebar<S> {
        &self.sidebar
    }

    /// The chart registry.
    pub fn charts(&self) -> &ChartRegistry<D::Node, R> {
        &self.charts
    }
}
