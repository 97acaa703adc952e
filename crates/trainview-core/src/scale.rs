// File: crates/trainview-core/src/scale.rs
// Summary: Invertible linear scales and the bounded zoom transform.

use crate::types::AxisDomain;

/// Linear mapping from a data domain to a pixel range. The range may be
/// descending (y axes map their minimum to the bottom pixel).
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub domain: AxisDomain,
    pub range_px: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: AxisDomain, range_px: (f32, f32)) -> Self {
        let mut domain = domain;
        if domain.span().abs() < 1e-12 {
            domain.max = domain.min + 1.0;
        }
        Self { domain, range_px }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let frac = (v - self.domain.min) / self.domain.span();
        self.range_px.0 + frac as f32 * (self.range_px.1 - self.range_px.0)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let frac = ((px - self.range_px.0) / (self.range_px.1 - self.range_px.0)) as f64;
        self.domain.min + frac * self.domain.span()
    }
}

/// Scale-and-translate zoom: one scale factor `k` in [1, 10] composed with
/// per-axis pixel translations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    k: f64,
    x: f64,
    y: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { k: 1.0, x: 0.0, y: 0.0 };

    /// Scale factor is clamped to [1, 10] on construction.
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k: k.clamp(1.0, 10.0), x, y }
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The zoomed x scale, hard-clamped so the visible window stays inside
    /// `full`.
    pub fn rescale_x(&self, scale: &LinearScale, full: &AxisDomain) -> LinearScale {
        rescale(scale, full, self.k, self.x)
    }

    /// The zoomed y scale, hard-clamped to `full`.
    pub fn rescale_y(&self, scale: &LinearScale, full: &AxisDomain) -> LinearScale {
        rescale(scale, full, self.k, self.y)
    }
}

/// Inverse-map the transformed pixel range, then shift the visible window
/// back inside `full`. With k >= 1 the window never extends outside the
/// original full-domain extent.
fn rescale(scale: &LinearScale, full: &AxisDomain, k: f64, t: f64) -> LinearScale {
    let (r0, r1) = scale.range_px;
    let d0 = scale.from_px(((r0 as f64 - t) / k) as f32);
    let d1 = scale.from_px(((r1 as f64 - t) / k) as f32);
    let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };

    let span = (hi - lo).min(full.span());
    let lo = lo.clamp(full.min, full.max - span);
    let clamped = AxisDomain::new(lo, lo + span);

    // Preserve the original orientation of the pixel range.
    LinearScale::new(clamped, scale.range_px)
}
