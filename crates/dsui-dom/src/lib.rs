#![forbid(unsafe_code)]

//! Document abstraction for dsui.
//!
//! Every dsui component is written against the [`Dom`] trait rather than a
//! concrete browser binding. Two implementations exist:
//!
//! - [`MemDom`]: an in-memory document built on `scraper`, parsed with the
//!   browser's tree construction rules and queried with a real CSS selector
//!   matcher. Used by tests and by non-browser embedders.
//! - `WebDom` (in `dsui-web`): the live browser document via `web-sys`.
//!
//! Input and signal events arrive as [`Event`] values that have already been
//! materialized by the embedding layer; components never see raw browser
//! events.

pub mod dom;
pub mod error;
pub mod event;
pub mod mem;

pub use dom::Dom;
pub use error::DomError;
pub use event::{Event, KeyCode, KeyEvent, Modifiers, SwapEvent};
pub use mem::{MemDom, NodeId};
