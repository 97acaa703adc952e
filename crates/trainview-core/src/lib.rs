// File: crates/trainview-core/src/lib.rs
// Summary: Core library entry point; exports the metric chart engine API.

pub mod config;
pub mod controller;
pub mod overlay;
pub mod render;
pub mod scale;
pub mod series;
pub mod source;
pub mod store;
pub mod types;

pub use config::{ChartConfig, ColumnMap, DashboardConfig, SourceDescriptor};
pub use controller::SelectionController;
pub use overlay::{FocusIndicator, InteractionOverlay};
pub use render::{
    ChartLayout, LineStyle, PlaybackTiming, RenderDriver, RenderFrame, RenderMode, SeriesView,
    Surface,
};
pub use scale::{LinearScale, ZoomTransform};
pub use series::Series;
pub use source::{load, LoadError};
pub use store::{SeriesStore, SourceState};
pub use types::{AxisDomain, Insets, Sample};
