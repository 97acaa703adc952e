// File: crates/trainview-core/src/controller.rs
// Summary: Selection Controller: the currently chosen metric key and render
//          mode for one chart.

use crate::config::ChartConfig;
use crate::render::RenderMode;

/// Thin state holder behind the metric selector and static/animated toggle.
/// All sources are requested eagerly at startup, so changing a selection
/// only re-renders; it never fetches.
pub struct SelectionController {
    keys: Vec<String>,
    selected_key: String,
    mode: RenderMode,
}

impl SelectionController {
    /// Selection starts on the chart's first configured source. None for a
    /// chart with no sources.
    pub fn new(chart: &ChartConfig) -> Option<Self> {
        let keys: Vec<String> = chart.keys().map(str::to_string).collect();
        let selected_key = keys.first()?.clone();
        Some(Self { keys, selected_key, mode: RenderMode::Static })
    }

    pub fn selected_key(&self) -> &str {
        &self.selected_key
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Select a metric key. Returns true when the selection changed (the
    /// caller re-renders); unknown keys are rejected.
    pub fn select_key(&mut self, key: &str) -> bool {
        if key == self.selected_key || !self.keys.iter().any(|k| k == key) {
            return false;
        }
        self.selected_key = key.to_string();
        true
    }

    /// Switch render mode. Returns true when the mode changed.
    pub fn select_mode(&mut self, mode: RenderMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        true
    }
}
