#![forbid(unsafe_code)]

//! Chart (re-)initialization for server-rendered canvases.
//!
//! Pages declare charts as `<canvas data-chart-def data-config='{…}'>`. On
//! every pass each declared canvas gets a fresh chart: a chart already bound
//! to that canvas is destroyed first, so swapping a dashboard fragment in
//! twice never stacks two charts on one canvas.
//!
//! The registry is a side table keyed by element identity. Entries whose
//! canvas has left the document are torn down on the next pass, which is
//! what a weak map does implicitly in a garbage-collected host.
//!
//! Rendering itself is behind [`ChartRenderer`]; the browser binding drives
//! the page's charting library, tests record calls.

use dsui_dom::{Dom, DomError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::config::ChartsConfig;

// ============================================================================
// Definitions (what the page declares)
// ============================================================================

/// Chart definition as written in `data-config`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartDefinition {
    /// Chart type; `line` when absent.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Category labels.
    pub labels: Vec<Value>,
    /// Data series.
    pub datasets: Vec<DatasetDefinition>,
}

/// One series in a [`ChartDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetDefinition {
    /// Legend label.
    pub label: Option<String>,
    /// Data points, passed through untouched.
    pub data: Value,
    /// Design-token color name (`primary`) or a raw CSS color.
    pub color: Option<String>,
    /// Area fill, passed through untouched.
    pub fill: Value,
}

// ============================================================================
// Resolved specs (what the renderer receives)
// ============================================================================

/// Renderer-ready chart configuration. Serializes to the charting
/// library's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Labels and series.
    pub data: ChartData,
    /// Fixed presentation options shared by every chart.
    pub options: Value,
}

/// Labels and series of a [`ChartSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Category labels.
    pub labels: Vec<Value>,
    /// Resolved series.
    pub datasets: Vec<DatasetSpec>,
}

/// A series with colors resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub border_width: u32,
    pub tension: f64,
    pub point_radius: u32,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub fill: Value,
}

fn default_options() -> Value {
    json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": {
                "display": true,
                "position": "bottom",
                "labels": { "usePointStyle": true }
            }
        },
        "scales": {
            "y": { "beginAtZero": true, "grid": { "color": "rgba(16, 24, 40, 0.06)" } },
            "x": { "grid": { "display": false } }
        }
    })
}

impl ChartDefinition {
    /// Parse a `data-config` value.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Resolve colors through `color` and attach the shared options.
    pub fn resolve(self, mut color: impl FnMut(&str) -> String) -> ChartSpec {
        let datasets = self
            .datasets
            .into_iter()
            .map(|ds| {
                let resolved = ds.color.as_deref().map(&mut color);
                DatasetSpec {
                    label: ds.label,
                    data: ds.data,
                    background_color: resolved.clone(),
                    border_color: resolved,
                    border_width: 2,
                    tension: 0.35,
                    point_radius: 3,
                    fill: ds.fill,
                }
            })
            .collect();
        ChartSpec {
            kind: self.kind.unwrap_or_else(|| "line".to_owned()),
            data: ChartData {
                labels: self.labels,
                datasets,
            },
            options: default_options(),
        }
    }
}

// ============================================================================
// Renderer seam and registry
// ============================================================================

/// Creates and destroys chart instances on canvases.
pub trait ChartRenderer<N> {
    /// Live chart handle.
    type Chart;

    /// Whether the charting library is present. Passes are skipped otherwise.
    fn available(&self) -> bool {
        true
    }

    /// Draw a chart on `canvas`.
    fn create(&mut self, canvas: &N, spec: &ChartSpec) -> Result<Self::Chart, DomError>;

    /// Release a chart.
    fn destroy(&mut self, chart: Self::Chart);
}

/// Result of one [`ChartRegistry::init_charts`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartPass {
    /// Charts created.
    pub created: usize,
    /// Charts destroyed (replaced or detached).
    pub destroyed: usize,
    /// Canvases skipped for an invalid definition or a renderer error.
    pub skipped: usize,
}

/// Side table of live charts keyed by canvas identity.
pub struct ChartRegistry<N, R: ChartRenderer<N>> {
    config: ChartsConfig,
    renderer: R,
    entries: Vec<(N, R::Chart)>,
}

impl<N, R> std::fmt::Debug for ChartRegistry<N, R>
where
    N: std::fmt::Debug,
    R: ChartRenderer<N>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartRegistry")
            .field("config", &self.config)
            .field("canvases", &self.entries.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<N: Clone + PartialEq, R: ChartRenderer<N>> ChartRegistry<N, R> {
    /// Create an empty registry.
    pub fn new(config: ChartsConfig, renderer: R) -> Self {
        Self {
            config,
            renderer,
            entries: Vec::new(),
        }
    }

    /// Number of live charts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no chart is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a chart is bound to `canvas`.
    pub fn contains(&self, canvas: &N) -> bool {
        self.entries.iter().any(|(n, _)| n == canvas)
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// (Re-)create charts for every declared canvas under `root`.
    pub fn init_charts<D: Dom<Node = N>>(&mut self, dom: &D, root: &N) -> ChartPass {
        let mut pass = ChartPass::default();
        pass.destroyed += self.sweep(dom);

        if !self.renderer.available() {
            debug!("chart library unavailable; skipping chart pass");
            return pass;
        }

        let canvases = dom
            .query_all(root, &self.config.canvas_selector)
            .unwrap_or_else(|err| {
                warn!(%err, "chart canvas query failed");
                Vec::new()
            });

        for canvas in canvases {
            if let Some(index) = self.entries.iter().position(|(n, _)| *n == canvas) {
                let (_, chart) = self.entries.swap_remove(index);
                self.renderer.destroy(chart);
                pass.destroyed += 1;
            }

            let raw = dom
                .attribute(&canvas, &self.config.config_attr)
                .unwrap_or_else(|| "{}".to_owned());
            let definition = match ChartDefinition::parse(&raw) {
                Ok(definition) => definition,
                Err(err) => {
                    warn!(%err, "invalid chart definition; canvas skipped");
                    pass.skipped += 1;
                    continue;
                }
            };

            let prefix = &self.config.color_var_prefix;
            let spec = definition.resolve(|name| {
                dom.css_variable(&format!("{prefix}{name}"))
                    .unwrap_or_else(|| name.to_owned())
            });

            match self.renderer.create(&canvas, &spec) {
                Ok(chart) => {
                    self.entries.push((canvas, chart));
                    pass.created += 1;
                }
                Err(err) => {
                    warn!(%err, "chart creation failed");
                    pass.skipped += 1;
                }
            }
        }

        debug!(
            created = pass.created,
            destroyed = pass.destroyed,
            skipped = pass.skipped,
            "chart pass"
        );
        pass
    }

    /// Destroy every chart whose canvas left the document.
    pub fn sweep<D: Dom<Node = N>>(&mut self, dom: &D) -> usize {
        let mut destroyed = 0;
        let mut index = 0;
        while index < self.entries.len() {
            if dom.is_connected(&self.entries[index].0) {
                index += 1;
            } else {
                let (_, chart) = self.entries.swap_remove(index);
                self.renderer.destroy(chart);
                destroyed += 1;
            }
        }
        destroyed
    }

    /// Destroy every chart.
    pub fn clear(&mut self) {
        for (_, chart) in self.entries.drain(..) {
            self.renderer.destroy(chart);
        }
    }
}

/// A renderer that draws nothing; for pages without charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCharts;

impl<N> ChartRenderer<N> for NoCharts {
    type Chart = ();

    fn available(&self) -> bool {
        false
    }

    fn create(&mut self, _canvas: &N, _spec: &ChartSpec) -> Result<(), DomError> {
        Ok(())
    }

    fn destroy(&mut self, _chart: ()) {}
}
