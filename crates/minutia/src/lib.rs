//! Fingerprint minutiae extraction from ridge skeletons.
//!
//! The pipeline stages are:
//!
//! 1. **Crossing number** – classify every interior ridge pixel of a
//!    single-pixel-wide skeleton by counting ridge→background transitions
//!    around its 3×3 neighbourhood (1 = termination, >2 = bifurcation).
//! 2. **Orientation** – optionally attach a local ridge angle queried from a
//!    precomputed orientation field.
//! 3. **Border rejection** – drop points whose ridge runs off the image.
//! 4. **Feature encoding** – describe the minutiae relative to a core point,
//!    either per point in polar coordinates or as a concentric-ring
//!    histogram.
//!
//! Skeletonization, orientation estimation and matching are out of scope.
//!
//! # Public API
//! - [`MinutiaeDetector`] with [`DetectConfig`] for detection
//! - [`extract`] / [`encode`] for feature vectors
//! - [`OrientationField`] as the orientation collaborator seam and
//!   [`BlockObserver`] for per-block diagnostics

mod border;
mod crossing;
pub mod debug_dump;
mod detector;
mod feature;
mod minutia;
mod orientation;

#[cfg(test)]
mod test_utils;

pub use border::{has_ridge_in_all_directions, remove_border_minutiae};
pub use crossing::{classify_crossing_number, Neighborhood};
pub use debug_dump::{DebugCollectConfig, DebugCollector, DebugDump};
pub use detector::{detect_minutiae, BlockObserver, DetectConfig, MinutiaeDetector};
pub use feature::{
    encode, extract, ring_index, Encoding, EncodingMethod, FeatureError, FeatureVector,
    PolarFeature, RingBucket, MAX_RINGS,
};
pub use minutia::{Minutia, MinutiaKind, MinutiaeSet};
pub use orientation::{AngleImage, OrientationError, OrientationField, OrientationMap};
