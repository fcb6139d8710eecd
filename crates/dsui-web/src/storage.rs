#![forbid(unsafe_code)]

//! `localStorage` behind the kit's [`Storage`] trait.

use dsui_dom::DomError;
use dsui_kit::Storage;
use web_sys::Window;

use crate::dom::js_error;

/// The window's `localStorage`. Reads yield nothing and writes fail when
/// the browser denies access (private mode, sandboxed frames).
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        Self {
            inner: window.local_storage().ok().flatten(),
        }
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomError> {
        let store = self
            .inner
            .as_ref()
            .ok_or_else(|| DomError::Js("localStorage is unavailable".into()))?;
        store.set_item(key, value).map_err(js_error)
    }
}
