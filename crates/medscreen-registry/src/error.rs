#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON artifact {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("unknown model key in manifest: {key}")]
    UnknownModelKey { key: String },

    #[error("duplicate model key in manifest: {key}")]
    DuplicateModelKey { key: String },

    #[error("missing model key in manifest: {key}")]
    MissingModelKey { key: String },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: PathBuf, message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("missing model artifact: {path}")]
    MissingFile { path: PathBuf },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("unsupported schema `{schema}` in {path}")]
    UnsupportedSchema { path: PathBuf, schema: String },

    #[error("unsupported schema_version {version} in {path}")]
    UnsupportedSchemaVersion { path: PathBuf, version: u32 },

    #[error("unsupported model kind `{kind}` in {path}")]
    UnsupportedKind { path: PathBuf, kind: String },

    #[error("invalid artifact {path}: {message}")]
    InvalidArtifact { path: PathBuf, message: String },
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Runtime failure while applying a loaded model to a feature vector.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("feature count mismatch: model expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}

impl From<InferenceError> for medscreen_model::ScreenError {
    fn from(error: InferenceError) -> Self {
        medscreen_model::ScreenError::Inference {
            reason: error.to_string(),
        }
    }
}
