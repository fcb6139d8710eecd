#![forbid(unsafe_code)]

//! Listener installation and the exported entry points.
//!
//! # Invariants
//!
//! - At most one [`Shell`] is live per thread; `install` replaces it and
//!   detaches the previous listeners first.
//! - Every browser event is converted to an [`Event`] and dispatched once.
//!   An event that arrives while a dispatch is already running (a
//!   synchronous event fired by one of our own mutations) is dropped.
//!
//! # Failure Modes
//!
//! - Malformed JSON config: `install` returns the parse error as a string.
//! - No document (worker context): `install` returns an error.

use std::cell::RefCell;

use dsui_dom::{Event, KeyCode, KeyEvent, Modifiers, SwapEvent};
use dsui_kit::{Dispatch, Shell};
use js_sys::Reflect;
use tracing::{debug, trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, KeyboardEvent};

use crate::charts::JsChartRenderer;
use crate::config::WebConfig;
use crate::dom::{WebDom, js_error};
use crate::storage::LocalStorage;

type WebShell = Shell<WebDom, LocalStorage, JsChartRenderer>;

struct Runtime {
    dom: WebDom,
    shell: WebShell,
}

struct Listener {
    target: EventTarget,
    name: String,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
}

fn dispatch(event: &Event<Element>) -> Option<Dispatch> {
    RUNTIME.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            trace!(kind = event.kind(), "re-entrant event dropped");
            return None;
        };
        let rt = slot.as_mut()?;
        Some(rt.shell.dispatch(&mut rt.dom, event))
    })
}

fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|cell| {
        cell.borrow_mut().push(Listener {
            target: target.clone(),
            name: name.to_owned(),
            closure,
        });
    });
    Ok(())
}

fn detach_all() {
    let listeners = LISTENERS.with(|cell| std::mem::take(&mut *cell.borrow_mut()));
    for listener in listeners {
        if let Err(err) = listener.target.remove_event_listener_with_callback(
            &listener.name,
            listener.closure.as_ref().unchecked_ref(),
        ) {
            warn!(event = %listener.name, error = %js_error(err), "failed to detach listener");
        }
    }
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn detail_field(event: &web_sys::Event, path: &[&str]) -> Option<JsValue> {
    let mut value = Reflect::get(event, &JsValue::from_str("detail")).ok()?;
    for key in path {
        if value.is_undefined() || value.is_null() {
            return None;
        }
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
    }
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn swap_target(event: &web_sys::Event) -> Option<Element> {
    detail_field(event, &["target"])
        .and_then(|v| v.dyn_into::<Element>().ok())
        .or_else(|| target_element(event))
}

fn key_event(event: &KeyboardEvent) -> KeyEvent {
    let mut modifiers = Modifiers::NONE;
    modifiers.set(Modifiers::SHIFT, event.shift_key());
    modifiers.set(Modifiers::ALT, event.alt_key());
    modifiers.set(Modifiers::CTRL, event.ctrl_key());
    modifiers.set(Modifiers::SUPER, event.meta_key());
    KeyEvent::new(KeyCode::from_key_name(&event.key())).with_modifiers(modifiers)
}

fn honor(event: &web_sys::Event, outcome: Option<Dispatch>) {
    if outcome.is_some_and(|d| d.prevent_default()) {
        event.prevent_default();
    }
}

fn attach(dom: &WebDom, config: &WebConfig) -> Result<(), JsValue> {
    let document: &EventTarget = dom.document().as_ref();
    let body: EventTarget = dom
        .document()
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .into();

    listen(document, "click", |ev| {
        if let Some(target) = target_element(&ev) {
            honor(&ev, dispatch(&Event::Click { target }));
        }
    })?;

    listen(document, "keydown", |ev| {
        if let Some(key) = ev.dyn_ref::<KeyboardEvent>() {
            honor(&ev, dispatch(&Event::Key(key_event(key))));
        }
    })?;

    listen(document, "change", |ev| {
        if let Some(target) = target_element(&ev) {
            dispatch(&Event::Change { target });
        }
    })?;

    for name in &config.kit.modal.signal_events {
        let signal = name.clone();
        listen(&body, name, move |_| {
            dispatch(&Event::Signal(signal.clone()));
        })?;
    }

    listen(&body, &config.events.before_swap, |ev| {
        let Some(target) = swap_target(&ev) else {
            return;
        };
        // A missing response text counts as empty, as does "".
        let empty_payload = detail_field(&ev, &["xhr", "responseText"])
            .and_then(|v| v.as_string())
            .is_none_or(|text| text.is_empty());
        dispatch(&Event::BeforeSwap(SwapEvent {
            target,
            empty_payload,
        }));
    })?;

    listen(&body, &config.events.after_swap, |ev| {
        if let Some(target) = swap_target(&ev) {
            dispatch(&Event::AfterSwap { target });
        }
    })?;

    listen(&body, &config.events.history_push, |ev| {
        if let Some(path) = detail_field(&ev, &["path"]).and_then(|v| v.as_string()) {
            dispatch(&Event::HistoryPush { path });
        }
    })?;

    Ok(())
}

/// Wire dsui onto the current page.
///
/// `config` is an optional JSON [`WebConfig`]. Runs the startup passes
/// (sidebar restore, active link, charts, bulk bar, server-rendered dialog)
/// and registers every listener. Calling it again reinstalls from scratch.
#[wasm_bindgen]
pub fn install(config: Option<String>) -> Result<(), JsValue> {
    let config = WebConfig::from_json(config.as_deref())
        .map_err(|err| JsValue::from_str(&format!("invalid dsui config: {err}")))?;
    let mut dom = WebDom::new().ok_or_else(|| JsValue::from_str("no browsing context"))?;

    uninstall();

    let storage = LocalStorage::new(dom.window());
    let renderer = JsChartRenderer::new(dom.window().clone());
    let mut shell = Shell::new(config.kit.clone(), storage, renderer);
    shell.install(&mut dom);
    attach(&dom, &config)?;

    RUNTIME.with(|cell| {
        cell.try_borrow_mut()
            .map(|mut slot| *slot = Some(Runtime { dom, shell }))
            .map_err(|_| JsValue::from_str("install called during dispatch"))
    })?;
    debug!("dsui installed");
    Ok(())
}

/// Detach every listener and drop the page state.
#[wasm_bindgen]
pub fn uninstall() {
    detach_all();
    RUNTIME.with(|cell| {
        if let Ok(mut slot) = cell.try_borrow_mut() {
            *slot = None;
        }
    });
}

/// Close the open dialog, if any. For page scripts that need to dismiss a
/// dialog without a server round trip.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() -> bool {
    RUNTIME.with(|cell| {
        let Ok(mut slot) = cell.try_borrow_mut() else {
            return false;
        };
        let Some(rt) = slot.as_mut() else {
            return false;
        };
        rt.shell.modal_mut().close(&mut rt.dom).removed
    })
}

/// Whether a dialog is currently open.
#[wasm_bindgen(js_name = isModalOpen)]
pub fn is_modal_open() -> bool {
    RUNTIME.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|rt| rt.shell.modal().is_open(&rt.dom)))
            .unwrap_or(false)
    })
}
