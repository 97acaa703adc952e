// File: crates/trainview-core/src/overlay.rs
// Summary: Interaction Overlay: pointer hover with nearest-sample lookup and
//          bounded zoom/pan over already-loaded data.
// Notes:
// - Hover and zoom compose independently: zoom keeps any current hover, and
//   both reset only when the series is replaced by a new load.

use std::sync::Arc;

use crate::scale::{LinearScale, ZoomTransform};
use crate::series::Series;
use crate::types::{AxisDomain, Insets, Sample};

/// Decimal places used in hover tooltips.
const TOOLTIP_DECIMALS: usize = 2;

/// The vertical focus line plus tooltip for the hovered sample.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusIndicator {
    pub index: usize,
    pub sample: Sample,
    /// Pixel x of the focus line under the current (possibly zoomed) scale.
    pub px_x: f32,
    pub tooltip: String,
}

/// Pointer-driven hover and zoom state for one displayed series. All draw
/// requests derive from the single current transform held here; zoom and
/// pan rescale the existing data and never trigger a reload.
pub struct InteractionOverlay {
    series: Arc<Series>,
    width: i32,
    height: i32,
    insets: Insets,
    full_x: AxisDomain,
    full_y: AxisDomain,
    base_x: LinearScale,
    base_y: LinearScale,
    x_scale: LinearScale,
    y_scale: LinearScale,
    zoom: ZoomTransform,
    hover: Option<FocusIndicator>,
}

impl InteractionOverlay {
    /// None for an empty series: there is nothing to hover or zoom.
    pub fn new(series: Arc<Series>, width: i32, height: i32, insets: Insets) -> Option<Self> {
        let full_x = series.x_domain()?;
        let full_y = series.y_domain()?.pad(crate::render::Y_PAD);

        let base_x = LinearScale::new(
            full_x,
            (insets.left as f32, (width - insets.right as i32) as f32),
        );
        let base_y = LinearScale::new(
            full_y,
            ((height - insets.bottom as i32) as f32, insets.top as f32),
        );

        Some(Self {
            series,
            width,
            height,
            insets,
            full_x,
            full_y,
            base_x,
            base_y,
            x_scale: base_x,
            y_scale: base_y,
            zoom: ZoomTransform::IDENTITY,
            hover: None,
        })
    }

    /// Inverse-map the pointer through the current x scale and left-bisect
    /// the series: the sample at the insertion index is the nearest
    /// at-or-after match. Out-of-range probes are a no-op.
    pub fn pointer_move(&mut self, px_x: f32) -> Option<&FocusIndicator> {
        let probe = self.x_scale.from_px(px_x);
        let index = self.series.bisect_x(probe);
        let sample = self.series.get(index)?;
        self.hover = Some(FocusIndicator {
            index,
            sample,
            px_x: self.x_scale.to_px(sample.x),
            tooltip: format!(
                "x: {:.prec$}  y: {:.prec$}",
                sample.x,
                sample.y,
                prec = TOOLTIP_DECIMALS
            ),
        });
        self.hover.as_ref()
    }

    /// Clear the focus indicator and tooltip.
    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    pub fn hover(&self) -> Option<&FocusIndicator> {
        self.hover.as_ref()
    }

    pub fn is_hovering(&self) -> bool {
        self.hover.is_some()
    }

    /// Apply a zoom/pan transform: both axes rescale, hard-clamped to the
    /// full data extents. The hovered sample's focus line, if any, moves to
    /// its position under the new scale.
    pub fn zoom(&mut self, transform: ZoomTransform) {
        self.zoom = transform;
        self.x_scale = transform.rescale_x(&self.base_x, &self.full_x);
        self.y_scale = transform.rescale_y(&self.base_y, &self.full_y);
        if let Some(hover) = &mut self.hover {
            hover.px_x = self.x_scale.to_px(hover.sample.x);
        }
    }

    pub fn is_zoomed(&self) -> bool {
        !self.zoom.is_identity()
    }

    /// Replace the displayed series after a (re)load: zoom and hover reset,
    /// scales rebuild from the new data. None for an empty replacement.
    pub fn replace_series(self, series: Arc<Series>) -> Option<Self> {
        Self::new(series, self.width, self.height, self.insets)
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    pub fn series(&self) -> &Series {
        &self.series
    }
}
