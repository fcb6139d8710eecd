#![forbid(unsafe_code)]

//! Browser binding for dsui.
//!
//! Load the generated module and call `install()` once the document is
//! parsed:
//!
//! ```js
//! import init, { install } from "./dsui_web.js";
//! await init();
//! install(JSON.stringify({ sidebar: { storage_key: "admin.nav" } }));
//! ```
//!
//! Browser-only pieces compile for `wasm32` targets; [`WebConfig`] is
//! available everywhere so servers can render the JSON they hand to
//! `install`.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
pub mod charts;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use config::{TransportEvents, WebConfig};

#[cfg(target_arch = "wasm32")]
pub use binding::{close_modal, install, is_modal_open, uninstall};
#[cfg(target_arch = "wasm32")]
pub use charts::JsChartRenderer;
#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
