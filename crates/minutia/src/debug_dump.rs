//! Versioned debug dump schema for minutiae detection.
//!
//! The dump records the scanned 3×3 ridge blocks together with their
//! crossing numbers and classification. It is produced by a
//! [`BlockObserver`] and never affects the detection result.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::crossing::{classify_crossing_number, Neighborhood};
use crate::detector::{BlockObserver, DetectConfig};
use crate::minutia::{MinutiaKind, MinutiaeSet};

pub const DEBUG_SCHEMA_V1: &str = "minutia.debug.v1";

/// Controls what the debug collector keeps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugCollectConfig {
    /// Source image path, copied into the dump.
    pub image_path: Option<String>,
    /// Maximum number of block records to keep.
    pub max_blocks: usize,
    /// Also record blocks whose crossing number does not classify.
    pub store_non_minutiae: bool,
}

impl Default for DebugCollectConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            max_blocks: 2000,
            store_non_minutiae: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugDump {
    pub schema_version: String,
    pub image: ImageDebug,
    pub detect_config: DetectConfig,
    pub summary: ScanSummary,
    pub blocks: Vec<BlockRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDebug {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Ridge pixels whose neighbourhood was sampled.
    pub n_blocks_scanned: usize,
    /// Blocks classified as termination or bifurcation.
    pub n_candidates: usize,
    pub n_terminations: usize,
    pub n_bifurcations: usize,
    /// Candidates removed by border rejection.
    pub n_rejected_border: usize,
    /// Block records dropped because `max_blocks` was reached.
    pub n_blocks_dropped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub row: u32,
    pub col: u32,
    pub crossing_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MinutiaKind>,
    /// Block rows rendered as `#` (ridge) and `.` (background).
    pub pattern: [String; 3],
}

/// [`BlockObserver`] that accumulates a [`DebugDump`].
#[derive(Debug, Clone)]
pub struct DebugCollector {
    cfg: DebugCollectConfig,
    blocks: Vec<BlockRecord>,
    summary: ScanSummary,
}

impl DebugCollector {
    pub fn new(cfg: DebugCollectConfig) -> Self {
        Self {
            cfg,
            blocks: Vec::new(),
            summary: ScanSummary::default(),
        }
    }

    /// Close the scan and assemble the dump for `minutiae`, the detector's
    /// final output.
    pub fn finish(
        self,
        skeleton: &GrayImage,
        config: &DetectConfig,
        minutiae: &MinutiaeSet,
    ) -> DebugDump {
        let mut summary = self.summary;
        summary.n_rejected_border = summary.n_candidates.saturating_sub(minutiae.len());
        if summary.n_blocks_dropped > 0 {
            tracing::warn!(
                "debug dump truncated: {} block records dropped (max_blocks={})",
                summary.n_blocks_dropped,
                self.cfg.max_blocks
            );
        }

        DebugDump {
            schema_version: DEBUG_SCHEMA_V1.to_string(),
            image: ImageDebug {
                path: self.cfg.image_path,
                width: skeleton.width(),
                height: skeleton.height(),
            },
            detect_config: config.clone(),
            summary,
            blocks: self.blocks,
        }
    }
}

impl BlockObserver for DebugCollector {
    fn observe(&mut self, row: u32, col: u32, block: &Neighborhood, crossing_number: u32) {
        self.summary.n_blocks_scanned += 1;
        let kind = classify_crossing_number(crossing_number);
        match kind {
            Some(MinutiaKind::Termination) => self.summary.n_terminations += 1,
            Some(MinutiaKind::Bifurcation) => self.summary.n_bifurcations += 1,
            Some(MinutiaKind::Core) | None => {}
        }
        if kind.is_some() {
            self.summary.n_candidates += 1;
        } else if !self.cfg.store_non_minutiae {
            return;
        }

        if self.blocks.len() >= self.cfg.max_blocks {
            self.summary.n_blocks_dropped += 1;
            return;
        }
        self.blocks.push(BlockRecord {
            row,
            col,
            crossing_number,
            kind,
            pattern: block.render(),
        });
    }
}
