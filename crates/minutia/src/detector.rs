//! High-level detection API.
//!
//! [`MinutiaeDetector`] is the primary entry point for extracting minutiae
//! from a skeleton image. It wraps a [`DetectConfig`] and provides
//! convenience methods for the common scenarios (with/without orientation
//! field, with debug collection).

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::border::remove_border_minutiae;
use crate::crossing::{classify_crossing_number, Neighborhood};
use crate::debug_dump::{DebugCollectConfig, DebugCollector, DebugDump};
use crate::minutia::{Minutia, MinutiaeSet};
use crate::orientation::OrientationField;

/// Detection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Pixel value marking a ridge in the skeleton.
    pub ridge_value: u8,
    /// Drop minutiae whose ridge runs off the image edge.
    pub remove_invalid: bool,
    /// Half-size of the block passed to [`OrientationField::angle_at`].
    pub orientation_block_radius: u32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            ridge_value: 1,
            remove_invalid: true,
            orientation_block_radius: 3,
        }
    }
}

/// Per-block callback invoked for every scanned ridge pixel.
///
/// Observers see the sampled neighbourhood and its crossing number. They
/// cannot influence the detection result.
pub trait BlockObserver {
    fn observe(&mut self, row: u32, col: u32, block: &Neighborhood, crossing_number: u32);
}

/// Primary detection interface.
///
/// # Examples
///
/// ```
/// use image::{GrayImage, Luma};
/// use minutia::MinutiaeDetector;
///
/// let mut skeleton = GrayImage::new(16, 16);
/// for x in 4..10 {
///     skeleton.put_pixel(x, 8, Luma([1]));
/// }
/// let detector = MinutiaeDetector::new();
/// let keep_all = MinutiaeDetector::with_config(minutia::DetectConfig {
///     remove_invalid: false,
///     ..Default::default()
/// });
/// assert_eq!(keep_all.detect(&skeleton).len(), 2);
/// assert!(detector.detect(&skeleton).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinutiaeDetector {
    config: DetectConfig,
}

impl MinutiaeDetector {
    /// Create a detector with default configuration (ridge value 1, border
    /// rejection enabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: DetectConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut DetectConfig {
        &mut self.config
    }

    /// Detect minutiae without orientation angles.
    pub fn detect(&self, skeleton: &GrayImage) -> MinutiaeSet {
        detect_minutiae(skeleton, None, &self.config, None)
    }

    /// Detect minutiae and attach a local ridge angle to each.
    pub fn detect_with_orientation(
        &self,
        skeleton: &GrayImage,
        orientation: &dyn OrientationField,
    ) -> MinutiaeSet {
        detect_minutiae(skeleton, Some(orientation), &self.config, None)
    }

    /// Detect while reporting every scanned block to `observer`.
    pub fn detect_with_observer(
        &self,
        skeleton: &GrayImage,
        orientation: Option<&dyn OrientationField>,
        observer: &mut dyn BlockObserver,
    ) -> MinutiaeSet {
        detect_minutiae(skeleton, orientation, &self.config, Some(observer))
    }

    /// Detect with debug dump collection.
    pub fn detect_with_debug(
        &self,
        skeleton: &GrayImage,
        orientation: Option<&dyn OrientationField>,
        debug_cfg: &DebugCollectConfig,
    ) -> (MinutiaeSet, DebugDump) {
        let mut collector = DebugCollector::new(debug_cfg.clone());
        let minutiae = self.detect_with_observer(skeleton, orientation, &mut collector);
        let dump = collector.finish(skeleton, &self.config, &minutiae);
        (minutiae, dump)
    }
}

/// Crossing-number minutiae detection over all interior skeleton pixels.
///
/// Images narrower or shorter than 3 pixels have no interior and yield an
/// empty set.
pub fn detect_minutiae(
    skeleton: &GrayImage,
    orientation: Option<&dyn OrientationField>,
    config: &DetectConfig,
    mut observer: Option<&mut dyn BlockObserver>,
) -> MinutiaeSet {
    let (w, h) = skeleton.dimensions();
    if w < 3 || h < 3 {
        return MinutiaeSet::default();
    }

    let mut points = Vec::new();
    for row in 1..h - 1 {
        for col in 1..w - 1 {
            if skeleton.get_pixel(col, row)[0] != config.ridge_value {
                continue;
            }

            let block = Neighborhood::sample(skeleton, row, col, config.ridge_value);
            let crossing_number = block.crossing_number();
            if let Some(obs) = observer.as_mut() {
                obs.observe(row, col, &block, crossing_number);
            }

            let Some(kind) = classify_crossing_number(crossing_number) else {
                continue;
            };
            let angle =
                orientation.map(|field| field.angle_at(row, col, config.orientation_block_radius));
            tracing::trace!("{} at ({}, {}) cn={}", kind, row, col, crossing_number);
            points.push(Minutia {
                row,
                col,
                kind,
                angle,
            });
        }
    }

    let n_candidates = points.len();
    if config.remove_invalid {
        points = remove_border_minutiae(skeleton, points, config.ridge_value);
        tracing::debug!(
            "{} minutiae candidates, {} rejected at image border",
            n_candidates,
            n_candidates - points.len()
        );
    } else {
        tracing::debug!("{} minutiae candidates", n_candidates);
    }

    MinutiaeSet::from_scan(points)
}
