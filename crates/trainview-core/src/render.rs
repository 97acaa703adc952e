// File: crates/trainview-core/src/render.rs
// Summary: Render Driver: turns selected series into drawable frames and
//          issues them to the Surface collaborator, statically or as a
//          prefix-growth animated playback.

use tracing::debug;

use crate::config::{ChartConfig, SourceDescriptor};
use crate::series::{self, Series};
use crate::types::{AxisDomain, Sample};

/// Proportional y padding applied around the data extent.
pub const Y_PAD: f64 = 0.05;

/// Stroke/marker styling handed through to the surface untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub width: f32,
    pub marker_size: f32,
    pub label: String,
}

impl LineStyle {
    pub fn for_source(descriptor: &SourceDescriptor) -> Self {
        Self {
            color: descriptor.color.clone(),
            width: 1.5,
            marker_size: 3.0,
            label: descriptor.label.clone(),
        }
    }
}

/// One drawable unit: the points of a single series plus its style.
#[derive(Clone, Debug)]
pub struct RenderFrame {
    pub points: Vec<Sample>,
    pub style: LineStyle,
}

/// Everything the surface needs besides the points themselves.
#[derive(Clone, Debug)]
pub struct ChartLayout {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: AxisDomain,
    pub y_range: AxisDomain,
    pub width: i32,
    pub height: i32,
    pub show_legend: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub frame_ms: u32,
    pub transition_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Static,
    Animated,
}

/// The drawing collaborator. Implementations replace whatever was shown
/// before; the driver never diffs against prior content.
pub trait Surface {
    /// Replace the displayed chart with these frames.
    fn draw(&mut self, frames: &[RenderFrame], layout: &ChartLayout);
    /// Play a sequence of ticks, strictly in order starting at tick 0;
    /// `ticks[k]` holds one frame per series with its first k+1 points.
    fn play(&mut self, ticks: Vec<Vec<RenderFrame>>, timing: PlaybackTiming, layout: &ChartLayout);
    /// Stop any in-flight playback. Called before every render so two
    /// playbacks never write to the same target.
    fn cancel_playback(&mut self) {}
}

/// A series paired with the style it draws in.
pub struct SeriesView<'a> {
    pub series: &'a Series,
    pub style: LineStyle,
}

impl<'a> SeriesView<'a> {
    pub fn new(series: &'a Series, style: LineStyle) -> Self {
        Self { series, style }
    }
}

/// Lock-step prefix-growth tick sequence: tick count is the longest series,
/// tick k holds each series' first k+1 points (shorter series stop growing
/// at their full length). The final tick equals the static frames.
pub fn prefix_ticks(views: &[SeriesView<'_>]) -> Vec<Vec<RenderFrame>> {
    let ticks = views.iter().map(|v| v.series.len()).max().unwrap_or(0);
    (0..ticks)
        .map(|k| {
            views
                .iter()
                .map(|v| RenderFrame {
                    points: v.series.prefix(k + 1).to_vec(),
                    style: v.style.clone(),
                })
                .collect()
        })
        .collect()
}

/// Full-series frames for a static draw.
pub fn full_frames(views: &[SeriesView<'_>]) -> Vec<RenderFrame> {
    views
        .iter()
        .map(|v| RenderFrame { points: v.series.samples().to_vec(), style: v.style.clone() })
        .collect()
}

/// Issues frames to a surface. Holds no series data itself; every call
/// fully replaces the prior drawn content.
pub struct RenderDriver<S: Surface> {
    surface: S,
}

impl<S: Surface> RenderDriver<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Draw the given series in the requested mode. A missing or empty
    /// series is a caller precondition, handled as a no-op rather than an
    /// error: the Series Store reports when data is present.
    pub fn render(&mut self, views: &[SeriesView<'_>], mode: RenderMode, chart: &ChartConfig) {
        if views.is_empty() || views.iter().any(|v| v.series.is_empty()) {
            debug!(title = %chart.title, "render skipped: series not ready");
            return;
        }

        // Domains come from the complete series exactly once, so an animated
        // window never jitters as points accumulate.
        let layout = layout_for(views, chart);

        self.surface.cancel_playback();
        match mode {
            RenderMode::Static => {
                let frames = full_frames(views);
                debug!(title = %chart.title, series = frames.len(), "static draw");
                self.surface.draw(&frames, &layout);
            }
            RenderMode::Animated => {
                let ticks = prefix_ticks(views);
                debug!(title = %chart.title, ticks = ticks.len(), "animated playback");
                // Start from an empty plot, then hand the whole sequence over.
                let empty: Vec<RenderFrame> = views
                    .iter()
                    .map(|v| RenderFrame { points: Vec::new(), style: v.style.clone() })
                    .collect();
                self.surface.draw(&empty, &layout);
                let timing = PlaybackTiming {
                    frame_ms: chart.frame_ms,
                    transition_ms: chart.transition_ms,
                };
                self.surface.play(ticks, timing, &layout);
            }
        }
    }
}

/// Axis ranges from the full extents of the displayed series: x is the
/// union as-is, y the union padded by 5% on each end.
fn layout_for(views: &[SeriesView<'_>], chart: &ChartConfig) -> ChartLayout {
    let all: Vec<&Series> = views.iter().map(|v| v.series).collect();
    let x_range = series::shared_x_domain(all.iter().copied())
        .unwrap_or(AxisDomain::new(0.0, 1.0));
    let y_range = series::shared_y_domain(all.iter().copied())
        .unwrap_or(AxisDomain::new(0.0, 1.0))
        .pad(Y_PAD);
    ChartLayout {
        title: chart.title.clone(),
        x_label: chart.x_label.clone(),
        y_label: chart.y_label.clone(),
        x_range,
        y_range,
        width: chart.width,
        height: chart.height,
        show_legend: views.len() > 1,
    }
}
