// File: crates/trainview-core/src/config.rs
// Summary: Static per-chart configuration: source descriptors, column
//          selection, labels, sizing, and animation timings.

use std::path::Path;

use serde::Deserialize;

use crate::types::{HEIGHT, WIDTH};

/// How parsed columns map onto (x, y).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMap {
    /// Positional: the first column becomes x, the second y. Header names
    /// are ignored so renamed run-identifier columns still parse.
    FirstTwo,
    /// x from the named time column; y is the arithmetic mean of the named
    /// device columns for that row (the 4-GPU memory case).
    Mean { time: String, values: Vec<String> },
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap::FirstTwo
    }
}

/// Static configuration for one metric source, fixed at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct SourceDescriptor {
    /// Stable metric key, e.g. "train_loss" or "memBytes".
    pub key: String,
    /// User-facing label for legends and titles.
    pub label: String,
    /// File path or http(s) URL, resolved against the chart's base path.
    pub locator: String,
    /// CSS-style color name or hex string handed through to the surface.
    pub color: String,
    #[serde(default)]
    pub columns: ColumnMap,
}

impl SourceDescriptor {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        locator: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            locator: locator.into(),
            color: color.into(),
            columns: ColumnMap::FirstTwo,
        }
    }

    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    /// Locator joined to `base` unless it is already absolute or a URL.
    pub fn resolved_locator(&self, base: &str) -> String {
        if is_url(&self.locator) || Path::new(&self.locator).is_absolute() || base.is_empty() {
            return self.locator.clone();
        }
        if is_url(base) {
            format!("{}/{}", base.trim_end_matches('/'), self.locator)
        } else {
            Path::new(base).join(&self.locator).to_string_lossy().into_owned()
        }
    }
}

pub(crate) fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

fn default_width() -> i32 {
    WIDTH
}

fn default_height() -> i32 {
    HEIGHT
}

/// Configuration for one chart: its sources plus layout and playback timing.
#[derive(Clone, Debug, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    /// Animated playback per-frame duration, milliseconds.
    #[serde(default)]
    pub frame_ms: u32,
    /// Animated playback transition duration, milliseconds.
    #[serde(default)]
    pub transition_ms: u32,
    pub sources: Vec<SourceDescriptor>,
}

impl ChartConfig {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            width: WIDTH,
            height: HEIGHT,
            frame_ms: 100,
            transition_ms: 1000,
            sources: Vec::new(),
        }
    }

    pub fn with_timing(mut self, frame_ms: u32, transition_ms: u32) -> Self {
        self.frame_ms = frame_ms;
        self.transition_ms = transition_ms;
        self
    }

    pub fn with_source(mut self, source: SourceDescriptor) -> Self {
        self.sources.push(source);
        self
    }

    pub fn source(&self, key: &str) -> Option<&SourceDescriptor> {
        self.sources.iter().find(|s| s.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.key.as_str())
    }
}

/// Top-level dashboard configuration, loadable from TOML.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardConfig {
    /// Base path or URL every relative locator resolves against.
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

impl DashboardConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
