#![forbid(unsafe_code)]

//! Property tests for the focus trap and the derived open state.

use dsui_dom::{Dom, Event, KeyCode, KeyEvent, MemDom, Modifiers, NodeId, SwapEvent};
use dsui_modal::{ModalAction, ModalConfig, ModalManager};
use proptest::prelude::*;

fn dialog_with_buttons(count: usize) -> String {
    let buttons: String = (0..count)
        .map(|i| format!(r#"<button id="b{i}">{i}</button>"#))
        .collect();
    format!(r#"<div data-modal><div class="ds-modal__panel">{buttons}</div></div>"#)
}

fn open_page(count: usize) -> (MemDom, ModalManager<NodeId>) {
    let page = format!(r#"<div id="modal-host">{}</div>"#, dialog_with_buttons(count));
    let mut dom = MemDom::from_html(&page).unwrap();
    let mut modal = ModalManager::new(ModalConfig::default());
    modal.install(&mut dom);
    (dom, modal)
}

fn tab(backward: bool) -> Event<NodeId> {
    let mods = if backward {
        Modifiers::SHIFT
    } else {
        Modifiers::NONE
    };
    Event::Key(KeyEvent::new(KeyCode::Tab).with_modifiers(mods))
}

#[derive(Debug, Clone, Copy)]
enum Op {
    SwapDialog { locked: bool },
    SwapEmpty,
    SwapBlank,
    ClickClose,
    ClickBackdrop,
    Escape,
    Signal,
    Tab { backward: bool },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(|locked| Op::SwapDialog { locked }),
        Just(Op::SwapEmpty),
        Just(Op::SwapBlank),
        Just(Op::ClickClose),
        Just(Op::ClickBackdrop),
        Just(Op::Escape),
        Just(Op::Signal),
        any::<bool>().prop_map(|backward| Op::Tab { backward }),
    ]
}

const PAGE: &str = r#"<button id="outside">Outside</button><div id="modal-host"></div>"#;

fn dialog(locked: bool) -> String {
    let attr = if locked { r#"data-backdrop-close="0""# } else { "" };
    format!(
        r#"<div data-modal {attr}>
             <div data-modal-backdrop id="backdrop"></div>
             <div class="ds-modal__panel">
               <button data-action="close-modal" id="close">x</button>
               <input id="field">
             </div>
           </div>"#
    )
}

fn apply(dom: &mut MemDom, modal: &mut ModalManager<NodeId>, op: Op) -> Option<ModalAction> {
    let host = dom.element_by_id("modal-host").unwrap();
    let mut send = |dom: &mut MemDom, event: Event<NodeId>| modal.handle_event(dom, &event);
    match op {
        Op::SwapDialog { locked } => {
            let html = dialog(locked);
            send(
                dom,
                Event::BeforeSwap(SwapEvent {
                    target: host,
                    empty_payload: false,
                }),
            );
            dom.set_inner_html(host, &html).unwrap();
            send(dom, Event::AfterSwap { target: host })
        }
        Op::SwapEmpty => {
            let closed = send(
                dom,
                Event::BeforeSwap(SwapEvent {
                    target: host,
                    empty_payload: true,
                }),
            );
            dom.set_inner_html(host, "").unwrap();
            send(dom, Event::AfterSwap { target: host }).or(closed)
        }
        Op::SwapBlank => {
            send(
                dom,
                Event::BeforeSwap(SwapEvent {
                    target: host,
                    empty_payload: false,
                }),
            );
            dom.set_inner_html(host, "\n  ").unwrap();
            send(dom, Event::AfterSwap { target: host })
        }
        Op::ClickClose | Op::ClickBackdrop => {
            let id = if matches!(op, Op::ClickClose) { "close" } else { "backdrop" };
            match dom.element_by_id(id) {
                Some(target) => send(dom, Event::click(target)),
                None => None,
            }
        }
        Op::Escape => send(dom, Event::Key(KeyEvent::new(KeyCode::Escape))),
        Op::Signal => send(dom, Event::signal("crudModalClose")),
        Op::Tab { backward } => send(dom, tab(backward)),
    }
}

proptest! {
    #[test]
    fn tab_wraps_at_the_edges(count in 1usize..8, start in 0usize..8, backward in any::<bool>()) {
        let start = start % count;
        let (mut dom, mut modal) = open_page(count);
        let from = dom.element_by_id(&format!("b{start}")).unwrap();
        prop_assert!(dom.focus(&from));

        let action = modal.handle_event(&mut dom, &tab(backward));
        let at_edge = if backward { start == 0 } else { start == count - 1 };
        if at_edge {
            prop_assert_eq!(action, Some(ModalAction::FocusWrapped));
            let expected = if backward { count - 1 } else { 0 };
            prop_assert_eq!(dom.active_element(), dom.element_by_id(&format!("b{expected}")));
        } else {
            prop_assert_eq!(action, None);
            prop_assert_eq!(dom.active_element(), Some(from));
        }
    }

    #[test]
    fn focus_never_leaves_the_panel_when_wrapping(count in 1usize..8, presses in 1usize..20) {
        // Simulate the browser advancing focus on pass-through.
        let (mut dom, mut modal) = open_page(count);
        let mut index = 0usize;
        prop_assert_eq!(dom.active_element(), dom.element_by_id("b0"));
        for _ in 0..presses {
            match modal.handle_event(&mut dom, &tab(false)) {
                Some(ModalAction::FocusWrapped) => index = 0,
                _ => {
                    index += 1;
                    let next = dom.element_by_id(&format!("b{index}"));
                    prop_assert!(next.is_some(), "pass-through past the last member");
                    dom.focus(&next.unwrap());
                }
            }
            prop_assert_eq!(dom.active_element(), dom.element_by_id(&format!("b{index}")));
        }
    }

    #[test]
    fn open_state_tracks_the_document(ops in prop::collection::vec(op(), 1..40)) {
        let mut dom = MemDom::from_html(PAGE).unwrap();
        let outside = dom.element_by_id("outside").unwrap();
        dom.focus(&outside);
        let mut modal = ModalManager::new(ModalConfig::default());
        modal.install(&mut dom);
        let host = dom.element_by_id("modal-host").unwrap();

        for op in ops {
            let was_open = modal.is_open(&dom);
            let action = apply(&mut dom, &mut modal, op);

            let in_dom = dom.query(&host, "[data-modal]").unwrap().is_some();
            prop_assert_eq!(modal.is_open(&dom), in_dom);
            prop_assert_eq!(dom.has_class(&dom.body_id(), "ds-modal-open"), in_dom, "{:?}", op);

            if was_open && !in_dom {
                prop_assert!(matches!(action, Some(ModalAction::Closed(_))), "{:?} -> {:?}", op, action);
                prop_assert_eq!(dom.active_element(), Some(outside));
            }
        }
    }
}
