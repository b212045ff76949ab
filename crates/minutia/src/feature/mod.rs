//! Feature-vector synthesis from a minutiae set relative to its core point.
//!
//! Two encodings are available:
//! - **polar**: one [`PolarFeature`] per non-core minutia (radius, bearing,
//!   ridge angle);
//! - **circular**: a [`RingBucket`] histogram over concentric rings of width
//!   `bucket_size` centred on the core.
//!
//! The core is the first core point in scan order. Preconditions are checked
//! in order: method tag, encoding parameters, core presence.

mod circular;
mod error;
mod polar;

pub use circular::{ring_index, RingBucket, MAX_RINGS};
pub use error::FeatureError;
pub use polar::PolarFeature;

use serde::{Deserialize, Serialize};

use crate::minutia::{Minutia, MinutiaKind, MinutiaeSet};

/// Feature encoding tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingMethod {
    Polar,
    Circular,
}

impl EncodingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polar => "polar",
            Self::Circular => "circular",
        }
    }
}

impl std::fmt::Display for EncodingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EncodingMethod {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polar" => Ok(Self::Polar),
            "circular" => Ok(Self::Circular),
            other => Err(FeatureError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Encoding together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Encoding {
    Polar,
    Circular {
        /// Ring width in pixels; must be finite and positive.
        bucket_size: f64,
    },
}

impl Encoding {
    /// Validate parameters for `method`.
    ///
    /// `bucket_size` is ignored by the polar encoding.
    pub fn new(method: EncodingMethod, bucket_size: Option<f64>) -> Result<Self, FeatureError> {
        match method {
            EncodingMethod::Polar => Ok(Self::Polar),
            EncodingMethod::Circular => {
                let bucket_size = checked_bucket_size(bucket_size)?;
                Ok(Self::Circular { bucket_size })
            }
        }
    }

    pub fn method(&self) -> EncodingMethod {
        match self {
            Self::Polar => EncodingMethod::Polar,
            Self::Circular { .. } => EncodingMethod::Circular,
        }
    }
}

fn checked_bucket_size(bucket_size: Option<f64>) -> Result<f64, FeatureError> {
    match bucket_size {
        Some(b) if b.is_finite() && b > 0.0 => Ok(b),
        _ => Err(FeatureError::MissingParameter {
            method: EncodingMethod::Circular,
            parameter: "bucket_size",
        }),
    }
}

/// Encoded feature vector, tagged with its encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "features", rename_all = "snake_case")]
pub enum FeatureVector {
    Polar(Vec<PolarFeature>),
    Circular(Vec<RingBucket>),
}

impl FeatureVector {
    pub fn method(&self) -> EncodingMethod {
        match self {
            Self::Polar(_) => EncodingMethod::Polar,
            Self::Circular(_) => EncodingMethod::Circular,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Polar(v) => v.len(),
            Self::Circular(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_polar(&self) -> Option<&[PolarFeature]> {
        match self {
            Self::Polar(v) => Some(v),
            Self::Circular(_) => None,
        }
    }

    pub fn as_rings(&self) -> Option<&[RingBucket]> {
        match self {
            Self::Circular(v) => Some(v),
            Self::Polar(_) => None,
        }
    }
}

/// Extract a feature vector by method tag (`"polar"` or `"circular"`).
///
/// Returns the vector together with the parsed method so callers can
/// dispatch on its shape.
pub fn extract(
    minutiae: &MinutiaeSet,
    method: &str,
    bucket_size: Option<f64>,
) -> Result<(FeatureVector, EncodingMethod), FeatureError> {
    let method: EncodingMethod = method.parse()?;
    let encoding = Encoding::new(method, bucket_size)?;
    let features = encode(minutiae, &encoding)?;
    Ok((features, method))
}

/// Encode `minutiae` with an explicit encoding.
pub fn encode(minutiae: &MinutiaeSet, encoding: &Encoding) -> Result<FeatureVector, FeatureError> {
    let method = encoding.method();
    if let Encoding::Circular { bucket_size } = *encoding {
        checked_bucket_size(Some(bucket_size))?;
    }
    let (core_idx, core) =
        reference_core(minutiae).ok_or(FeatureError::MissingCorePoint { method })?;

    let features = match *encoding {
        Encoding::Polar => FeatureVector::Polar(polar::polar_features(minutiae, core)),
        Encoding::Circular { bucket_size } => {
            FeatureVector::Circular(circular::ring_histogram(minutiae, core_idx, bucket_size)?)
        }
    };
    tracing::debug!(
        "{} encoding: {} entries from {} minutiae",
        method,
        features.len(),
        minutiae.len()
    );
    Ok(features)
}

/// First core point in scan order, with its index.
fn reference_core(minutiae: &MinutiaeSet) -> Option<(usize, &Minutia)> {
    let mut cores = minutiae
        .iter()
        .enumerate()
        .filter(|(_, m)| m.kind == MinutiaKind::Core);
    let (idx, core) = cores.next()?;
    let n_extra = cores.count();
    if n_extra > 0 {
        tracing::warn!(
            "{} extra core points ignored, using ({}, {})",
            n_extra,
            core.row,
            core.col
        );
    }
    Some((idx, core))
}
