#![deny(unsafe_code)]

pub mod artifact;
pub mod bundle;
pub mod classifier;
pub mod error;
pub mod manifest;
pub mod vectorizer;

pub use crate::artifact::{load_classifier, load_vectorizer};
pub use crate::bundle::{
    AvailabilityEntry, AvailabilityReport, DEFAULT_MODELS_DIR, LoadFailure, ModelBundle,
    ModelKey, ModelSource, ModelSources, SharedModels,
};
pub use crate::classifier::{Classifier, LogisticModel, predicted_class_confidence};
pub use crate::error::{ArtifactError, InferenceError};
pub use crate::vectorizer::{CountVectorizer, Vectorizer};
