//! Minutia records and the ordered set produced by the detector.

use serde::{Deserialize, Serialize};

/// Topological class of a minutia point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinutiaKind {
    /// Reference landmark supplied from outside the crossing-number detector.
    Core,
    /// Ridge splits in two (crossing number > 2).
    Bifurcation,
    /// Ridge ends (crossing number == 1).
    Termination,
}

impl std::fmt::Display for MinutiaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Core => "core",
            Self::Bifurcation => "bifurcation",
            Self::Termination => "termination",
        };
        f.write_str(name)
    }
}

/// A single minutia in skeleton pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minutia {
    /// Pixel row (image y).
    pub row: u32,
    /// Pixel column (image x).
    pub col: u32,
    /// Minutia class.
    pub kind: MinutiaKind,
    /// Local ridge direction in the orientation field's units, when a field
    /// was supplied to the detector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Minutia {
    pub fn new(row: u32, col: u32, kind: MinutiaKind) -> Self {
        Self {
            row,
            col,
            kind,
            angle: None,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Euclidean distance between two minutiae in pixels.
    pub fn distance_to(&self, other: &Minutia) -> f64 {
        let dr = f64::from(other.row) - f64::from(self.row);
        let dc = f64::from(other.col) - f64::from(self.col);
        dr.hypot(dc)
    }

    fn scan_key(&self) -> (u32, u32) {
        (self.row, self.col)
    }
}

/// Minutiae in row-major scan order.
///
/// Sets are never mutated in place; [`MinutiaeSet::with_core`] returns a new set.
/// Serialized as a plain JSON array; deserialization restores scan order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Minutia>", into = "Vec<Minutia>")]
pub struct MinutiaeSet {
    points: Vec<Minutia>,
}

impl MinutiaeSet {
    /// Build a set from arbitrary points, stably reordered into scan order.
    pub fn from_points(mut points: Vec<Minutia>) -> Self {
        points.sort_by_key(Minutia::scan_key);
        Self { points }
    }

    /// Wrap points that are already in scan order.
    pub(crate) fn from_scan(points: Vec<Minutia>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].scan_key() <= w[1].scan_key()));
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Minutia> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Minutia] {
        &self.points
    }

    /// Number of points of the given kind.
    pub fn count(&self, kind: MinutiaKind) -> usize {
        self.points.iter().filter(|m| m.kind == kind).count()
    }

    /// First core point in scan order.
    pub fn core(&self) -> Option<&Minutia> {
        self.points.iter().find(|m| m.kind == MinutiaKind::Core)
    }

    /// Return a copy of this set with an externally supplied core point
    /// inserted at its scan-order position.
    pub fn with_core(&self, row: u32, col: u32) -> Self {
        let core = Minutia::new(row, col, MinutiaKind::Core);
        let at = self
            .points
            .partition_point(|m| m.scan_key() <= core.scan_key());
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points[..at]);
        points.push(core);
        points.extend_from_slice(&self.points[at..]);
        Self { points }
    }
}

impl From<Vec<Minutia>> for MinutiaeSet {
    fn from(points: Vec<Minutia>) -> Self {
        Self::from_points(points)
    }
}

impl From<MinutiaeSet> for Vec<Minutia> {
    fn from(set: MinutiaeSet) -> Self {
        set.points
    }
}

impl<'a> IntoIterator for &'a MinutiaeSet {
    type Item = &'a Minutia;
    type IntoIter = std::slice::Iter<'a, Minutia>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
