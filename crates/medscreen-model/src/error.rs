//! Error types for screening requests and predictions.

use thiserror::Error;

/// Errors surfaced while answering a screening request.
///
/// Model loading problems are reported separately by the registry; by the
/// time a request is evaluated the only model-related failure left is that
/// the required model never became available.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The model needed by this analysis was not loaded at startup.
    #[error("model `{key}` is not available")]
    ModelUnavailable {
        /// Registry key of the missing model.
        key: String,
    },

    /// A form value did not belong to the encoding domain for its field.
    #[error("field `{field}` has unsupported value `{value}` (expected one of: True, False, Unknown)")]
    InvalidEncoding {
        /// Field the value was supplied for.
        field: String,
        /// The offending raw value.
        value: String,
    },

    /// A symptom-based analysis was requested with no symptoms selected.
    #[error("no symptoms selected; choose at least one symptom")]
    EmptySelection,

    /// The model rejected the assembled feature vector.
    #[error("inference failed: {reason}")]
    Inference {
        /// Human-readable cause, typically a shape mismatch.
        reason: String,
    },
}

/// Convenience alias used throughout the screening crates.
pub type Result<T> = std::result::Result<T, ScreenError>;
