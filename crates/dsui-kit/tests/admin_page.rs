#![forbid(unsafe_code)]

//! A full admin page driven through [`Shell::dispatch`].

use dsui_dom::{Dom, DomError, Event, KeyCode, KeyEvent, MemDom, NodeId, SwapEvent};
use dsui_kit::{ChartRenderer, ChartSpec, KitConfig, MemStorage, Shell, Storage};
use dsui_modal::{CloseReason, ModalAction};
use pretty_assertions::assert_eq;

#[derive(Debug, Default)]
struct CountingCharts {
    live: usize,
}

impl ChartRenderer<NodeId> for CountingCharts {
    type Chart = ();

    fn create(&mut self, _canvas: &NodeId, _spec: &ChartSpec) -> Result<(), DomError> {
        self.live += 1;
        Ok(())
    }

    fn destroy(&mut self, _chart: ()) {
        self.live -= 1;
    }
}

const PAGE: &str = r#"
    <header><button data-action="toggle-sidebar" id="toggle">☰</button></header>
    <aside class="app-sidebar">
      <a class="nav-link" href="/dashboard/" id="nav-dash">Dashboard</a>
      <a class="nav-link" href="/members/" id="nav-members">Members</a>
    </aside>
    <main id="main">
      <canvas data-chart-def id="signups" data-config='{"labels":["Jan"],"datasets":[{"data":[4],"color":"primary"}]}'></canvas>
      <div data-crud-bulk hidden id="bulk">
        <span data-crud-selected-count id="count">0</span>
        <input type="hidden" data-crud-selected-ids id="ids">
        <button hx-get="/members/bulk-delete/" id="bulk-delete">Delete selected</button>
      </div>
      <div id="crud-table">
        <input type="checkbox" data-crud-select-all id="all">
        <input type="checkbox" data-crud-row-check value="11" id="r11">
        <input type="checkbox" data-crud-row-check value="12" id="r12">
      </div>
    </main>
    <div id="modal-host"></div>
"#;

const CONFIRM: &str = r#"
    <div data-modal data-backdrop-close="0">
      <div data-modal-backdrop id="backdrop"></div>
      <div class="ds-modal__panel">
        <form class="ds-modal-form" id="confirm-form"></form>
        <button data-action="close-modal" id="cancel">Cancel</button>
        <button data-action="submit-modal-form" id="confirm">Delete</button>
      </div>
    </div>
"#;

type PageShell = Shell<MemDom, MemStorage, CountingCharts>;

fn load(storage: MemStorage) -> (MemDom, PageShell) {
    let mut dom = MemDom::from_html(PAGE).unwrap();
    dom.set_location("http://admin.local", "/members/");
    dom.set_css_variable("--ds-primary", "#2563eb");
    let mut shell = Shell::new(KitConfig::default(), storage, CountingCharts::default());
    shell.install(&mut dom);
    (dom, shell)
}

fn id(dom: &MemDom, id: &str) -> NodeId {
    dom.element_by_id(id).unwrap()
}

fn swap(dom: &mut MemDom, shell: &mut PageShell, target: &str, html: &str) {
    let target = id(dom, target);
    shell.dispatch(
        dom,
        &Event::BeforeSwap(SwapEvent {
            target,
            empty_payload: html.is_empty(),
        }),
    );
    dom.set_inner_html(target, html).unwrap();
    shell.dispatch(dom, &Event::AfterSwap { target });
}

#[test]
fn install_runs_every_startup_pass() {
    let (dom, shell) = load(MemStorage::with([("ds.sidebar.collapsed", "1")]));
    assert!(dom.has_class(&dom.body_id(), "sidebar-collapsed"));
    assert!(dom.has_class(&id(&dom, "nav-members"), "is-active"));
    assert!(!dom.has_class(&id(&dom, "nav-dash"), "is-active"));
    assert_eq!(shell.charts().len(), 1);
    assert_eq!(shell.charts().renderer().live, 1);
    assert!(dom.is_hidden(id(&dom, "bulk")));
    assert!(!shell.modal().is_open(&dom));
}

#[test]
fn bulk_delete_round_trip() {
    let (mut dom, mut shell) = load(MemStorage::new());

    // Select both rows through the master checkbox.
    let all = id(&dom, "all");
    dom.set_checked(&all, true);
    let out = shell.dispatch(&mut dom, &Event::Change { target: all });
    assert!(out.selection);
    assert_eq!(dom.value(&id(&dom, "ids")), "11,12");
    assert!(!dom.is_hidden(id(&dom, "bulk")));

    // The bulk button loads a confirmation dialog.
    let trigger = id(&dom, "bulk-delete");
    dom.focus(&trigger);
    swap(&mut dom, &mut shell, "modal-host", CONFIRM);
    assert!(shell.modal().is_open(&dom));
    assert!(dom.has_class(&dom.body_id(), "ds-modal-open"));

    // The dialog opts out of backdrop and Escape dismissal.
    let backdrop = id(&dom, "backdrop");
    assert_eq!(shell.dispatch(&mut dom, &Event::click(backdrop)).modal, None);
    let esc = shell.dispatch(&mut dom, &Event::Key(KeyEvent::new(KeyCode::Escape)));
    assert!(!esc.prevent_default());
    assert!(shell.modal().is_open(&dom));

    // Confirm submits natively and leaves the dialog in place.
    let confirm = id(&dom, "confirm");
    let out = shell.dispatch(&mut dom, &Event::click(confirm));
    assert_eq!(out.modal, Some(ModalAction::FormSubmitted));
    assert!(!out.prevent_default());
    assert_eq!(dom.submissions(), &[id(&dom, "confirm-form")]);

    // Server: refreshed table, then an empty host and a close signal.
    swap(
        &mut dom,
        &mut shell,
        "crud-table",
        r#"<input type="checkbox" data-crud-select-all id="all">
           <input type="checkbox" data-crud-row-check value="13" id="r13">"#,
    );
    assert_eq!(dom.text_content(id(&dom, "count")), "0");
    assert!(dom.is_hidden(id(&dom, "bulk")));

    swap(&mut dom, &mut shell, "modal-host", "");
    let signal = shell.dispatch(&mut dom, &Event::signal("crudModalClose"));
    assert_eq!(signal.modal, Some(ModalAction::Closed(CloseReason::Signal)));

    assert!(!shell.modal().is_open(&dom));
    assert!(!dom.has_class(&dom.body_id(), "ds-modal-open"));
    // The trigger sits in the bulk bar, hidden again by the table refresh.
    assert_eq!(dom.active_element(), None);
}

#[test]
fn close_control_cancels_default() {
    let (mut dom, mut shell) = load(MemStorage::new());
    swap(&mut dom, &mut shell, "modal-host", CONFIRM);
    let cancel = id(&dom, "cancel");
    let out = shell.dispatch(&mut dom, &Event::click(cancel));
    assert_eq!(out.modal, Some(ModalAction::Closed(CloseReason::Control)));
    assert!(out.prevent_default());
}

#[test]
fn swaps_reinitialize_charts_without_leaking() {
    let (mut dom, mut shell) = load(MemStorage::new());
    swap(
        &mut dom,
        &mut shell,
        "main",
        r#"<canvas data-chart-def id="a"></canvas><canvas data-chart-def id="b"></canvas>"#,
    );
    assert_eq!(shell.charts().len(), 2);
    assert_eq!(shell.charts().renderer().live, 2);

    swap(&mut dom, &mut shell, "main", "<p>Empty</p>");
    assert_eq!(shell.charts().len(), 0);
    assert_eq!(shell.charts().renderer().live, 0);
}

#[test]
fn navigation_updates_active_link() {
    let (mut dom, mut shell) = load(MemStorage::new());
    dom.set_location("http://admin.local", "/dashboard/");
    let out = shell.dispatch(
        &mut dom,
        &Event::HistoryPush {
            path: "/dashboard".into(),
        },
    );
    assert!(out.sidebar);
    assert!(dom.has_class(&id(&dom, "nav-dash"), "is-active"));
    assert!(!dom.has_class(&id(&dom, "nav-members"), "is-active"));
}

#[test]
fn sidebar_toggle_persists() {
    let (mut dom, mut shell) = load(MemStorage::new());
    let toggle = id(&dom, "toggle");
    shell.dispatch(&mut dom, &Event::click(toggle));
    assert!(dom.has_class(&dom.body_id(), "sidebar-collapsed"));
    assert_eq!(
        shell.sidebar().storage().get("ds.sidebar.collapsed").as_deref(),
        Some("1")
    );
}
