use super::EncodingMethod;

/// Precondition failures of feature extraction.
///
/// All variants are caller errors: retrying with the same input fails the
/// same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// The minutiae set has no core point to encode against.
    MissingCorePoint {
        /// Encoding that was requested.
        method: EncodingMethod,
    },
    /// A parameter required by the encoding is absent or not positive.
    MissingParameter {
        /// Encoding that was requested.
        method: EncodingMethod,
        /// Name of the missing parameter.
        parameter: &'static str,
    },
    /// A parameter is valid on its own but yields an output too large to
    /// allocate for this input.
    ParameterOutOfRange {
        /// Encoding that was requested.
        method: EncodingMethod,
        /// Name of the offending parameter.
        parameter: &'static str,
    },
    /// The method tag names no known encoding.
    UnsupportedMethod(String),
}

impl std::fmt::Display for FeatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCorePoint { method } => {
                write!(f, "missing core point for {} method", method)
            }
            Self::MissingParameter { method, parameter } => {
                write!(
                    f,
                    "{} must be provided and positive for {} method",
                    parameter, method
                )
            }
            Self::ParameterOutOfRange { method, parameter } => {
                write!(
                    f,
                    "{} is too small for {} method: more than {} rings",
                    parameter,
                    method,
                    super::MAX_RINGS
                )
            }
            Self::UnsupportedMethod(tag) => write!(f, "{} is not supported", tag),
        }
    }
}

impl std::error::Error for FeatureError {}
