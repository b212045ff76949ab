//! Concentric-ring histogram around the core point.

use serde::{Deserialize, Serialize};

use super::{EncodingMethod, FeatureError};
use crate::minutia::{Minutia, MinutiaKind, MinutiaeSet};

/// Upper bound on the number of rings in one histogram.
pub const MAX_RINGS: usize = 1 << 20;

/// Per-ring minutia counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingBucket {
    pub terminations: u32,
    pub bifurcations: u32,
}

impl RingBucket {
    /// Count for `kind`; `None` for kinds that are not histogrammed.
    pub fn get(&self, kind: MinutiaKind) -> Option<u32> {
        match kind {
            MinutiaKind::Termination => Some(self.terminations),
            MinutiaKind::Bifurcation => Some(self.bifurcations),
            MinutiaKind::Core => None,
        }
    }

    pub fn total(&self) -> u32 {
        self.terminations + self.bifurcations
    }

    fn increment(&mut self, kind: MinutiaKind) {
        match kind {
            MinutiaKind::Termination => self.terminations += 1,
            MinutiaKind::Bifurcation => self.bifurcations += 1,
            MinutiaKind::Core => {}
        }
    }
}

/// Ring index of a point at `distance` from the core.
///
/// Saturates at `usize::MAX` when `distance / bucket_size` does not fit.
pub fn ring_index(distance: f64, bucket_size: f64) -> usize {
    (distance / bucket_size).floor() as usize
}

/// Histogram of minutiae per ring of width `bucket_size`, ring 0 nearest to
/// `core`.
///
/// The ring count is set by the farthest point, so every point lands in a
/// valid ring. Points other than `core` that are themselves core points
/// stretch the ring range but are not counted.
///
/// Fails with [`FeatureError::ParameterOutOfRange`] when the farthest point
/// would need more than [`MAX_RINGS`] rings.
pub(crate) fn ring_histogram(
    minutiae: &MinutiaeSet,
    core_idx: usize,
    bucket_size: f64,
) -> Result<Vec<RingBucket>, FeatureError> {
    let core: &Minutia = &minutiae.as_slice()[core_idx];
    let distances: Vec<(MinutiaKind, f64)> = minutiae
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != core_idx)
        .map(|(_, m)| (m.kind, core.distance_to(m)))
        .collect();

    let max_dist = distances.iter().map(|&(_, d)| d).fold(0.0, f64::max);
    let n_rings = ring_index(max_dist, bucket_size)
        .checked_add(1)
        .filter(|&n| n <= MAX_RINGS)
        .ok_or(FeatureError::ParameterOutOfRange {
            method: EncodingMethod::Circular,
            parameter: "bucket_size",
        })?;

    let mut rings = vec![RingBucket::default(); n_rings];
    for (kind, d) in distances {
        rings[ring_index(d, bucket_size)].increment(kind);
    }
    Ok(rings)
}
