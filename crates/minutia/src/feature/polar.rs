//! Per-minutia polar descriptor relative to the core point.

use serde::{Deserialize, Serialize};

use crate::minutia::{Minutia, MinutiaKind, MinutiaeSet};

/// Position and direction of one minutia in core-centred polar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarFeature {
    pub kind: MinutiaKind,
    /// Euclidean distance to the core, in pixels.
    pub radius: f64,
    /// Direction from the core to the point in radians, `(-π, π]`,
    /// counter-clockwise from the +column axis with rows growing downward.
    pub bearing: f64,
    /// Local ridge angle; `None` (JSON `null`) when the minutia was detected
    /// without an orientation field.
    #[serde(default)]
    pub ridge_angle: Option<f64>,
}

impl PolarFeature {
    pub fn has_ridge_angle(&self) -> bool {
        self.ridge_angle.is_some()
    }
}

/// Polar features of every non-core minutia, in scan order.
pub(crate) fn polar_features(minutiae: &MinutiaeSet, core: &Minutia) -> Vec<PolarFeature> {
    minutiae
        .iter()
        .filter(|m| m.kind != MinutiaKind::Core)
        .map(|m| {
            // Rows grow downward, so "up" is a positive rise.
            let rise = f64::from(core.row) - f64::from(m.row);
            let run = f64::from(m.col) - f64::from(core.col);
            PolarFeature {
                kind: m.kind,
                radius: core.distance_to(m),
                bearing: rise.atan2(run),
                ridge_angle: m.angle,
            }
        })
        .collect()
}
