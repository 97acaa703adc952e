// File: crates/demo/src/main.rs
// Summary: Demo wires a training-run dashboard (loss, GPU metrics, LWRMSE
//          variables), eagerly loads every source, and drives static and
//          animated renders against a logging surface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use trainview_core::{
    ChartConfig, ChartLayout, ColumnMap, DashboardConfig, InteractionOverlay, Insets, LineStyle,
    PlaybackTiming, RenderDriver, RenderFrame, RenderMode, SelectionController, SeriesStore,
    SeriesView, SourceDescriptor, Surface, ZoomTransform,
};

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Surface that logs every draw/playback instead of rasterizing; a real
/// backend would slot in here unchanged.
#[derive(Default)]
struct ConsoleSurface {
    playing: bool,
}

impl Surface for ConsoleSurface {
    fn draw(&mut self, frames: &[RenderFrame], layout: &ChartLayout) {
        let points: usize = frames.iter().map(|f| f.points.len()).sum();
        let x = format!("[{:.2}, {:.2}]", layout.x_range.min, layout.x_range.max);
        let y = format!("[{:.4}, {:.4}]", layout.y_range.min, layout.y_range.max);
        info!(
            chart = %layout.title,
            series = frames.len(),
            points,
            x = %x,
            y = %y,
            "draw"
        );
    }

    fn play(&mut self, ticks: Vec<Vec<RenderFrame>>, timing: PlaybackTiming, layout: &ChartLayout) {
        self.playing = true;
        info!(
            chart = %layout.title,
            ticks = ticks.len(),
            frame_ms = timing.frame_ms,
            transition_ms = timing.transition_ms,
            "playback started"
        );
    }

    fn cancel_playback(&mut self) {
        if self.playing {
            info!("playback superseded");
            self.playing = false;
        }
    }
}

/// The original ALCF Lighthouse dashboard layout: loss, GPU system metrics,
/// and per-variable latitude-weighted RMSE curves.
fn dashboard(base_path: &str) -> DashboardConfig {
    let gpu_mean = |prefix: &str| ColumnMap::Mean {
        time: "Relative Time (Process)".to_string(),
        values: (0..4).map(|i| format!("system/gpu.{i}.{prefix}")).collect(),
    };

    DashboardConfig {
        base_path: base_path.to_string(),
        charts: vec![
            ChartConfig::new("Train vs Validation Loss", "Step", "Loss")
                .with_timing(100, 1000)
                .with_source(SourceDescriptor::new("train_loss", "Train Loss", "train_loss.csv", "steelblue"))
                .with_source(SourceDescriptor::new("val_loss", "Val Loss", "val_loss.csv", "green")),
            ChartConfig::new("GPU System Metrics", "Relative Time (s)", "Value")
                .with_timing(1, 0)
                .with_source(SourceDescriptor::new("util", "GPU Utilization (%)", "gpu_util_percent.csv", "orange"))
                .with_source(
                    SourceDescriptor::new("memPercent", "Memory Allocation (%)", "gpu_mem_alloc_percent.csv", "green")
                        .with_columns(gpu_mean("memoryAllocated")),
                )
                .with_source(
                    SourceDescriptor::new("memBytes", "Memory Allocation (Bytes)", "gpu_mem_alloc_bytes.csv", "steelblue")
                        .with_columns(gpu_mean("memoryAllocatedBytes")),
                ),
            ChartConfig::new("LWRMSE - Surface Variables", "Step", "LWRMSE (Lat. Weight. RMSE)")
                .with_timing(5, 100)
                .with_source(SourceDescriptor::new("2m_train_temp", "Train_2m_Temp", "2m_train_temp.csv", "steelblue"))
                .with_source(SourceDescriptor::new("2m_val_temp", "Val_2m_Temp", "2m_val_temp.csv", "green"))
                .with_source(SourceDescriptor::new("10m_u_train_wind", "Train_10mU_Wind", "10m_u_train_wind.csv", "steelblue"))
                .with_source(SourceDescriptor::new("10m_u_val_wind", "Val_10m_U_Wind", "10m_u_val_wind.csv", "green")),
        ],
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Either a TOML dashboard config or a data directory for the built-in one.
    let arg = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    let config = if arg.ends_with(".toml") {
        let text = std::fs::read_to_string(&arg).with_context(|| format!("reading config '{arg}'"))?;
        DashboardConfig::from_toml(&text).with_context(|| format!("parsing config '{arg}'"))?
    } else {
        dashboard(&arg)
    };

    for chart in &config.charts {
        run_chart(chart, &config.base_path);
    }
    Ok(())
}

/// Load everything a chart needs, then walk it through the render modes and
/// a short hover/zoom interaction.
fn run_chart(chart: &ChartConfig, base_path: &str) {
    let mut store = SeriesStore::new(base_path);
    // Eager requests for all configured sources: switching selection later
    // never fetches, only re-renders.
    for source in &chart.sources {
        store.request(source);
    }

    let Some(mut selection) = SelectionController::new(chart) else {
        warn!(chart = %chart.title, "no sources configured");
        return;
    };

    let keys: Vec<&str> = chart.keys().collect();
    if !store.pump_until_loaded(&keys, LOAD_TIMEOUT) {
        // A failed or stalled source degrades only this chart.
        warn!(chart = %chart.title, "some sources unavailable; skipping");
        return;
    }

    let mut driver = RenderDriver::new(ConsoleSurface::default());
    render_selected(&mut driver, &store, &selection, chart);

    if selection.select_mode(RenderMode::Animated) {
        render_selected(&mut driver, &store, &selection, chart);
    }

    // Hover + zoom over the already-loaded selected series.
    if let Some(series) = store.get(selection.selected_key()) {
        demo_interaction(series, chart);
    }

    // Walk the remaining metric choices in static mode.
    selection.select_mode(RenderMode::Static);
    let other_keys: Vec<String> = keys.iter().skip(1).map(|k| k.to_string()).collect();
    for key in other_keys {
        if selection.select_key(&key) {
            render_selected(&mut driver, &store, &selection, chart);
        }
    }
}

/// Renders the controller's current selection. Paired loss series always
/// draw together; other charts draw one metric at a time.
fn render_selected(
    driver: &mut RenderDriver<ConsoleSurface>,
    store: &SeriesStore,
    selection: &SelectionController,
    chart: &ChartConfig,
) {
    let keys = displayed_keys(selection.selected_key(), chart);
    let loaded: Vec<(Arc<trainview_core::Series>, LineStyle)> = keys
        .iter()
        .filter_map(|key| {
            let series = store.get(key)?;
            let style = LineStyle::for_source(chart.source(key)?);
            Some((series, style))
        })
        .collect();
    if loaded.len() != keys.len() {
        warn!(chart = %chart.title, "selected series not ready; skipping render");
        return;
    }

    let views: Vec<SeriesView<'_>> = loaded
        .iter()
        .map(|(series, style)| SeriesView::new(series, style.clone()))
        .collect();
    driver.render(&views, selection.mode(), chart);
}

/// Train/val loss share one chart and one y axis; everything else renders
/// its selected series alone.
fn displayed_keys(selected: &str, chart: &ChartConfig) -> Vec<String> {
    let paired = ["train_loss", "val_loss"];
    if paired.contains(&selected) && paired.iter().all(|k| chart.source(k).is_some()) {
        paired.iter().map(|k| k.to_string()).collect()
    } else {
        vec![selected.to_string()]
    }
}

fn demo_interaction(series: Arc<trainview_core::Series>, chart: &ChartConfig) {
    let Some(mut overlay) = InteractionOverlay::new(series, chart.width, chart.height, Insets::default())
    else {
        return;
    };

    let mid_px = (overlay.x_scale().range_px.0 + overlay.x_scale().range_px.1) / 2.0;
    if let Some(focus) = overlay.pointer_move(mid_px) {
        info!(chart = %chart.title, tooltip = %focus.tooltip, "hover");
    }

    overlay.zoom(ZoomTransform::new(2.0, -mid_px as f64 / 2.0, 0.0));
    let visible = overlay.x_scale().domain;
    let x = format!("[{:.2}, {:.2}]", visible.min, visible.max);
    info!(chart = %chart.title, x = %x, "zoomed");
    overlay.pointer_leave();
}
