//! Ridge-orientation lookup used to attach an angle to each minutia.
//!
//! The detector never estimates orientation itself. It only queries an
//! [`OrientationField`] supplied by an earlier preprocessing stage.
//! [`OrientationMap`] is a ready-made field backed by a precomputed
//! per-pixel angle matrix.

use std::path::Path;

use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

/// Per-pixel ridge angle image, in radians.
pub type AngleImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Opaque ridge-orientation query.
pub trait OrientationField {
    /// Dominant ridge angle around `(row, col)`, aggregated over the square
    /// block of half-size `block_radius`.
    fn angle_at(&self, row: u32, col: u32, block_radius: u32) -> f64;
}

/// Errors raised while building an [`OrientationMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum OrientationError {
    /// Angle buffer length does not match `width * height`.
    SizeMismatch {
        /// Expected number of samples.
        expected: usize,
        /// Provided number of samples.
        actual: usize,
    },
}

impl std::fmt::Display for OrientationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "orientation size mismatch: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for OrientationError {}

/// On-disk JSON layout of an orientation map (row-major angles).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OrientationMapFile {
    width: u32,
    height: u32,
    angles: Vec<f32>,
}

/// Orientation field backed by a dense angle matrix.
///
/// Block lookups average in the doubled-angle domain so that directions
/// `θ` and `θ + π` reinforce instead of cancelling. The window is clamped to
/// the map bounds.
#[derive(Debug, Clone)]
pub struct OrientationMap {
    angles: AngleImage,
}

impl OrientationMap {
    pub fn new(angles: AngleImage) -> Self {
        Self { angles }
    }

    /// Build from a row-major angle buffer.
    pub fn from_angles(
        width: u32,
        height: u32,
        angles: Vec<f32>,
    ) -> Result<Self, OrientationError> {
        let expected = width as usize * height as usize;
        let actual = angles.len();
        if actual != expected {
            return Err(OrientationError::SizeMismatch { expected, actual });
        }
        ImageBuffer::from_raw(width, height, angles)
            .map(Self::new)
            .ok_or(OrientationError::SizeMismatch { expected, actual })
    }

    /// Load from a JSON file with `width`, `height` and row-major `angles`.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let file: OrientationMapFile = serde_json::from_str(&data)?;
        Ok(Self::from_angles(file.width, file.height, file.angles)?)
    }

    pub fn width(&self) -> u32 {
        self.angles.width()
    }

    pub fn height(&self) -> u32 {
        self.angles.height()
    }

    pub fn angles(&self) -> &AngleImage {
        &self.angles
    }
}

impl OrientationField for OrientationMap {
    fn angle_at(&self, row: u32, col: u32, block_radius: u32) -> f64 {
        let (w, h) = self.angles.dimensions();
        if w == 0 || h == 0 {
            return 0.0;
        }
        let (row, col) = (row.min(h - 1), col.min(w - 1));
        let y0 = row.saturating_sub(block_radius);
        let y1 = row.saturating_add(block_radius).min(h - 1);
        let x0 = col.saturating_sub(block_radius);
        let x1 = col.saturating_add(block_radius).min(w - 1);

        let (mut sum_cos, mut sum_sin) = (0.0f64, 0.0f64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let theta = f64::from(self.angles.get_pixel(x, y)[0]);
                sum_cos += (2.0 * theta).cos();
                sum_sin += (2.0 * theta).sin();
            }
        }

        if sum_cos.hypot(sum_sin) < 1e-9 {
            // Directions cancel out; fall back to the centre sample.
            return f64::from(self.angles.get_pixel(col, row)[0]);
        }
        0.5 * sum_sin.atan2(sum_cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn uniform_field_returns_its_angle() {
        let map = OrientationMap::from_angles(9, 9, vec![FRAC_PI_4 as f32; 81]).unwrap();
        assert_abs_diff_eq!(map.angle_at(4, 4, 3), FRAC_PI_4, epsilon = 1e-6);
        assert_abs_diff_eq!(map.angle_at(0, 8, 3), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn opposite_directions_do_not_cancel() {
        // 0.1 and 0.1 + π describe the same ridge direction.
        let mut angles = vec![0.1f32; 9];
        for a in angles.iter_mut().step_by(2) {
            *a = 0.1 + std::f32::consts::PI;
        }
        let map = OrientationMap::from_angles(3, 3, angles).unwrap();
        assert_abs_diff_eq!(map.angle_at(1, 1, 1), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn block_radius_limits_the_window() {
        let mut angles = vec![0.0f32; 25];
        angles[0] = 1.2;
        let map = OrientationMap::from_angles(5, 5, angles).unwrap();
        assert_abs_diff_eq!(map.angle_at(3, 3, 1), 0.0, epsilon = 1e-12);
        assert!(map.angle_at(1, 1, 1) > 0.0);
    }

    #[test]
    fn size_mismatch_is_reported() {
        let err = OrientationMap::from_angles(4, 4, vec![0.0; 15]).unwrap_err();
        assert_eq!(
            err,
            OrientationError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn loads_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orient.json");
        std::fs::write(&path, r#"{"width": 2, "height": 1, "angles": [0.25, 0.25]}"#).unwrap();

        let map = OrientationMap::from_json_file(&path).unwrap();
        assert_eq!((map.width(), map.height()), (2, 1));
        assert_abs_diff_eq!(map.angle_at(0, 1, 0), 0.25, epsilon = 1e-6);
    }
}
