#![forbid(unsafe_code)]

//! Chart.js renderer.
//!
//! The page loads Chart.js as a global (`window.Chart`). Each [`ChartSpec`]
//! is serialized to JSON and parsed back on the JavaScript side, so the
//! object handed to the constructor is a plain Chart.js configuration.

use dsui_dom::DomError;
use dsui_kit::{ChartRenderer, ChartSpec};
use js_sys::{Array, Function, JSON, Reflect};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Window};

use crate::dom::js_error;

#[derive(Debug, Clone)]
pub struct JsChartRenderer {
    window: Window,
}

impl JsChartRenderer {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn constructor(&self) -> Option<Function> {
        Reflect::get(&self.window, &JsValue::from_str("Chart"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl ChartRenderer<Element> for JsChartRenderer {
    type Chart = JsValue;

    fn available(&self) -> bool {
        self.constructor().is_some()
    }

    fn create(&mut self, canvas: &Element, spec: &ChartSpec) -> Result<JsValue, DomError> {
        let ctor = self
            .constructor()
            .ok_or_else(|| DomError::Js("Chart is not loaded".into()))?;
        let json = serde_json::to_string(spec).map_err(|err| DomError::Js(err.to_string()))?;
        let config = JSON::parse(&json).map_err(js_error)?;
        Reflect::construct(&ctor, &Array::of2(canvas, &config)).map_err(js_error)
    }

    fn destroy(&mut self, chart: JsValue) {
        let Some(destroy) = Reflect::get(&chart, &JsValue::from_str("destroy"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
        else {
            return;
        };
        if let Err(err) = destroy.call0(&chart) {
            warn!(error = %js_error(err), "chart destroy failed");
        }
    }
}
