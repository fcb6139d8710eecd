#![forbid(unsafe_code)]

//! Page-level behaviour of dsui admin pages.
//!
//! - [`selection`]: bulk selection on CRUD lists.
//! - [`sidebar`]: collapse persistence, mobile overlay, active link.
//! - [`charts`]: chart re-initialization after swaps.
//! - [`shell`]: [`Shell`], which owns these plus the modal manager and
//!   routes every document event through them.

pub mod charts;
pub mod config;
pub mod selection;
pub mod shell;
pub mod sidebar;
pub mod storage;

pub use charts::{ChartDefinition, ChartPass, ChartRegistry, ChartRenderer, ChartSpec, NoCharts};
pub use config::{ChartsConfig, KitConfig, SelectionConfig, SidebarConfig};
pub use selection::Selection;
pub use shell::{Dispatch, Shell};
pub use sidebar::{Sidebar, normalize_url};
pub use storage::{MemStorage, Storage};
