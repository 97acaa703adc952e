// File: crates/trainview-core/src/types.rs
// Summary: Shared types (samples, axis domains, plot sizing).

/// Default plot width in pixels.
pub const WIDTH: i32 = 800;
/// Default plot height in pixels.
pub const HEIGHT: i32 = 500;

/// One measured point: x is a step index or elapsed time, y the metric value.
/// Both are finite after loading; rows that fail numeric coercion never
/// become samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Screen margins, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60, 80, 20, 60)
    }
}

/// Inclusive min/max bounds used to scale data into pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest domain covering both `self` and `other`.
    pub fn union(&self, other: &AxisDomain) -> AxisDomain {
        AxisDomain { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    /// Expand bounds by a proportional margin, multiplicative on each end:
    /// `[min * (1 - f), max * (1 + f)]`. The reference dashboard pads y by 5%.
    pub fn pad(&self, f: f64) -> AxisDomain {
        AxisDomain { min: self.min * (1.0 - f), max: self.max * (1.0 + f) }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &AxisDomain) -> bool {
        other.min >= self.min - 1e-9 && other.max <= self.max + 1e-9
    }

    pub fn clamp_value(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}
