// File: crates/trainview-core/src/series.rs
// Summary: Immutable metric series keyed by a stable metric key.
// Notes:
// - Construction is the single place the x-ordering invariant is enforced:
//   rows whose x does not strictly increase are dropped, not merged, so a
//   loaded Series always bisects cleanly.

use crate::types::{AxisDomain, Sample};

/// Ordered samples for one metric key. Immutable once built; a reload
/// replaces the whole value.
#[derive(Clone, Debug)]
pub struct Series {
    key: String,
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from rows in file order. Non-finite samples and rows
    /// whose x is not strictly greater than the previous retained x are
    /// discarded.
    pub fn from_rows(key: impl Into<String>, rows: impl IntoIterator<Item = Sample>) -> Self {
        let mut samples: Vec<Sample> = Vec::new();
        for s in rows {
            if !s.is_finite() {
                continue;
            }
            if let Some(last) = samples.last() {
                if s.x <= last.x {
                    continue;
                }
            }
            samples.push(s);
        }
        Self { key: key.into(), samples }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Sample> {
        self.samples.get(i).copied()
    }

    /// The first `n` samples (clamped to the series length). Frame *k* of an
    /// animated playback is `prefix(k + 1)`.
    pub fn prefix(&self, n: usize) -> &[Sample] {
        &self.samples[..n.min(self.samples.len())]
    }

    /// Insertion index of `probe` into the sorted x values (left bisection):
    /// the first index whose x is >= probe.
    pub fn bisect_x(&self, probe: f64) -> usize {
        self.samples.partition_point(|s| s.x < probe)
    }

    pub fn x_domain(&self) -> Option<AxisDomain> {
        extent(self.samples.iter().map(|s| s.x))
    }

    pub fn y_domain(&self) -> Option<AxisDomain> {
        extent(self.samples.iter().map(|s| s.y))
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<AxisDomain> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any = false;
    for v in values {
        min = min.min(v);
        max = max.max(v);
        any = true;
    }
    if any {
        Some(AxisDomain::new(min, max))
    } else {
        None
    }
}

/// Union of x extents across several series; `None` when every series is empty.
pub fn shared_x_domain<'a>(series: impl Iterator<Item = &'a Series>) -> Option<AxisDomain> {
    let mut acc: Option<AxisDomain> = None;
    for s in series {
        if let Some(d) = s.x_domain() {
            acc = Some(match acc {
                Some(a) => a.union(&d),
                None => d,
            });
        }
    }
    acc
}

/// Union of y extents across several series (train+val loss share one y axis).
pub fn shared_y_domain<'a>(series: impl Iterator<Item = &'a Series>) -> Option<AxisDomain> {
    let mut acc: Option<AxisDomain> = None;
    for s in series {
        if let Some(d) = s.y_domain() {
            acc = Some(match acc {
                Some(a) => a.union(&d),
                None => d,
            });
        }
    }
    acc
}
