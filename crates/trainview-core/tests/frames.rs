// File: crates/trainview-core/tests/frames.rs
// Purpose: Render Driver frame construction and playback sequencing.

use trainview_core::render::{full_frames, prefix_ticks};
use trainview_core::{
    ChartConfig, ChartLayout, LineStyle, PlaybackTiming, RenderDriver, RenderFrame, RenderMode,
    Sample, Series, SeriesView, SourceDescriptor, Surface,
};

#[derive(Default)]
struct RecordingSurface {
    draws: Vec<(Vec<RenderFrame>, ChartLayout)>,
    plays: Vec<(Vec<Vec<RenderFrame>>, PlaybackTiming)>,
    cancels: usize,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, frames: &[RenderFrame], layout: &ChartLayout) {
        self.draws.push((frames.to_vec(), layout.clone()));
    }
    fn play(&mut self, ticks: Vec<Vec<RenderFrame>>, timing: PlaybackTiming, _layout: &ChartLayout) {
        self.plays.push((ticks, timing));
    }
    fn cancel_playback(&mut self) {
        self.cancels += 1;
    }
}

fn series(key: &str, n: usize) -> Series {
    Series::from_rows(key, (0..n).map(|i| Sample::new(i as f64, 1.0 / (i as f64 + 1.0))))
}

fn style(label: &str) -> LineStyle {
    LineStyle { color: "green".into(), width: 1.5, marker_size: 3.0, label: label.into() }
}

fn chart() -> ChartConfig {
    ChartConfig::new("Train vs Validation Loss", "Step", "Loss")
        .with_timing(100, 1000)
        .with_source(SourceDescriptor::new("train_loss", "Train Loss", "train.csv", "steelblue"))
}

#[test]
fn prefix_growth_is_strict() {
    let s = series("train_loss", 7);
    let views = vec![SeriesView::new(&s, style("Train Loss"))];

    let ticks = prefix_ticks(&views);
    assert_eq!(ticks.len(), 7);
    for (k, tick) in ticks.iter().enumerate() {
        assert_eq!(tick[0].points.len(), k + 1);
        assert_eq!(tick[0].points, s.samples()[..k + 1].to_vec());
    }
    // Final tick equals the full static frame.
    let full = full_frames(&views);
    assert_eq!(ticks.last().unwrap()[0].points, full[0].points);
}

#[test]
fn lock_step_across_unequal_series() {
    let a = series("train_loss", 5);
    let b = series("val_loss", 3);
    let views = vec![
        SeriesView::new(&a, style("Train Loss")),
        SeriesView::new(&b, style("Val Loss")),
    ];

    let ticks = prefix_ticks(&views);
    assert_eq!(ticks.len(), 5);
    // Frame i of A aligns with frame i of B; B stops growing at its length.
    assert_eq!(ticks[2][0].points.len(), 3);
    assert_eq!(ticks[2][1].points.len(), 3);
    assert_eq!(ticks[4][1].points.len(), 3);
}

#[test]
fn static_render_issues_one_full_draw() {
    let s = series("train_loss", 4);
    let views = vec![SeriesView::new(&s, style("Train Loss"))];

    let mut driver = RenderDriver::new(RecordingSurface::default());
    driver.render(&views, RenderMode::Static, &chart());

    let surface = driver.into_surface();
    assert_eq!(surface.draws.len(), 1);
    assert!(surface.plays.is_empty());
    assert_eq!(surface.draws[0].0[0].points.len(), 4);
    // Axis x range covers the full series extent.
    let layout = &surface.draws[0].1;
    assert_eq!(layout.x_range.min, 0.0);
    assert_eq!(layout.x_range.max, 3.0);
}

#[test]
fn animated_render_draws_empty_then_plays_in_order() {
    let s = series("train_loss", 6);
    let views = vec![SeriesView::new(&s, style("Train Loss"))];

    let mut driver = RenderDriver::new(RecordingSurface::default());
    driver.render(&views, RenderMode::Animated, &chart());

    let surface = driver.into_surface();
    // Initial draw with all series empty.
    assert_eq!(surface.draws.len(), 1);
    assert!(surface.draws[0].0[0].points.is_empty());

    let (ticks, timing) = &surface.plays[0];
    assert_eq!(ticks.len(), 6);
    for (k, tick) in ticks.iter().enumerate() {
        assert_eq!(tick[0].points.len(), k + 1);
    }
    assert_eq!(timing.frame_ms, 100);
    assert_eq!(timing.transition_ms, 1000);

    // Animated layout uses the complete-series domain, computed up front.
    assert_eq!(surface.draws[0].1.x_range.max, 5.0);
}

#[test]
fn every_render_supersedes_prior_playback() {
    let s = series("train_loss", 4);
    let views = vec![SeriesView::new(&s, style("Train Loss"))];

    let mut driver = RenderDriver::new(RecordingSurface::default());
    driver.render(&views, RenderMode::Animated, &chart());
    driver.render(&views, RenderMode::Static, &chart());

    let surface = driver.into_surface();
    // Playback cancelled before each of the two renders.
    assert_eq!(surface.cancels, 2);
    assert_eq!(surface.plays.len(), 1);
}

#[test]
fn render_before_data_is_a_noop() {
    let empty = Series::from_rows("val_loss", std::iter::empty());
    let views = vec![SeriesView::new(&empty, style("Val Loss"))];

    let mut driver = RenderDriver::new(RecordingSurface::default());
    driver.render(&views, RenderMode::Static, &chart());
    driver.render(&[], RenderMode::Animated, &chart());

    let surface = driver.into_surface();
    assert!(surface.draws.is_empty());
    assert!(surface.plays.is_empty());
    assert_eq!(surface.cancels, 0);
}

#[test]
fn multi_series_y_range_is_the_union() {
    let a = Series::from_rows("train_loss", [Sample::new(0.0, 1.0), Sample::new(1.0, 0.6)]);
    let b = Series::from_rows("val_loss", [Sample::new(0.0, 1.4), Sample::new(1.0, 0.8)]);
    let views = vec![
        SeriesView::new(&a, style("Train Loss")),
        SeriesView::new(&b, style("Val Loss")),
    ];

    let mut driver = RenderDriver::new(RecordingSurface::default());
    driver.render(&views, RenderMode::Static, &chart());

    let surface = driver.into_surface();
    let layout = &surface.draws[0].1;
    assert!((layout.y_range.min - 0.6 * 0.95).abs() < 1e-12);
    assert!((layout.y_range.max - 1.4 * 1.05).abs() < 1e-12);
    assert!(layout.show_legend);
}
