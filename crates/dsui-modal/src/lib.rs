#![forbid(unsafe_code)]

//! Modal dialogs for server-rendered admin pages.
//!
//! The server renders dialog markup into a single host element; this crate
//! makes that markup behave like a dialog. It initializes a dialog when it
//! appears (scroll lock, initial focus), keeps Tab focus inside the panel,
//! routes close controls, backdrop clicks, Escape and close signals to a
//! teardown that hands focus back, and bridges swap events from the
//! replacement transport into the same lifecycle.
//!
//! Open/closed is never stored: it is read from the document on demand.
//!
//! Start with [`ModalManager`]; the submodules expose the pure pieces it is
//! built from.

pub mod bridge;
pub mod config;
pub mod dismiss;
pub mod focus;
pub mod host;
pub mod lifecycle;
pub mod manager;

pub use bridge::SwapAction;
pub use config::ModalConfig;
pub use dismiss::{CloseReason, Dismissal, backdrop_allows_close};
pub use focus::{FOCUSABLE_SELECTOR, TrapDecision, focusable_descendants, trap_tab};
pub use lifecycle::{CloseOutcome, Lifecycle, is_open};
pub use manager::{ModalAction, ModalManager};
