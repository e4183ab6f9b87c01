#![deny(unsafe_code)]

//! Loaded model bundle and its availability bookkeeping.
//!
//! Loading is deliberately forgiving: each artifact is loaded independently,
//! a failure is recorded instead of propagated, and the bundle is returned
//! with whatever subset of models came up. Request handling then reports a
//! missing model per analysis instead of refusing to start at all.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::artifact::{load_classifier, load_vectorizer};
use crate::classifier::Classifier;
use crate::error::ArtifactError;
use crate::manifest::load_manifest;
use crate::vectorizer::Vectorizer;

/// Conventional directory the artifacts live in.
pub const DEFAULT_MODELS_DIR: &str = "models";

const HEPATITIS_FILE: &str = "hepatitis_model.json";
const HIV_FILE: &str = "hiv_model.json";
const VECTORIZER_FILE: &str = "vectorizer.json";
const TB_FILE: &str = "tb_predictor_model.json";

/// Registry keys for the shipped artifacts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModelKey {
    Hepatitis,
    Hiv,
    /// Text vectorizer feeding the HIV classifier.
    #[serde(rename = "vectorizer")]
    HivVectorizer,
    Tb,
}

impl ModelKey {
    pub const ALL: [ModelKey; 4] = [
        ModelKey::Hepatitis,
        ModelKey::Hiv,
        ModelKey::HivVectorizer,
        ModelKey::Tb,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKey::Hepatitis => "hepatitis",
            ModelKey::Hiv => "hiv",
            ModelKey::HivVectorizer => "vectorizer",
            ModelKey::Tb => "tb",
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = ArtifactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hepatitis" => Ok(ModelKey::Hepatitis),
            "hiv" => Ok(ModelKey::Hiv),
            "vectorizer" => Ok(ModelKey::HivVectorizer),
            "tb" => Ok(ModelKey::Tb),
            other => Err(ArtifactError::UnknownModelKey {
                key: other.to_string(),
            }),
        }
    }
}

/// Where one artifact comes from, with an optional content pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    pub path: PathBuf,
    pub sha256: Option<String>,
}

impl ModelSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sha256: None,
        }
    }
}

/// Artifact locations for a full bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSources {
    pub hepatitis: ModelSource,
    pub hiv: ModelSource,
    pub vectorizer: ModelSource,
    pub tb: ModelSource,
}

impl ModelSources {
    /// Conventional file names under `dir`, with no content pins.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            hepatitis: ModelSource::new(dir.join(HEPATITIS_FILE)),
            hiv: ModelSource::new(dir.join(HIV_FILE)),
            vectorizer: ModelSource::new(dir.join(VECTORIZER_FILE)),
            tb: ModelSource::new(dir.join(TB_FILE)),
        }
    }

    /// Read a models manifest and resolve its entries relative to the
    /// manifest's directory, carrying any sha256 pins.
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be read, parsed, or validated. Missing
    /// or corrupt artifacts do not fail here; they surface as load failures.
    pub fn from_manifest(manifest_path: &Path) -> Result<Self, ArtifactError> {
        let manifest = load_manifest(manifest_path)?;
        let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        let mut sources = Self::from_dir(base);
        for entry in &manifest.models {
            // Validation guaranteed every key parses.
            let Ok(key) = entry.key.parse::<ModelKey>() else {
                continue;
            };
            let source = ModelSource {
                path: base.join(&entry.path),
                sha256: entry.sha256.clone(),
            };
            match key {
                ModelKey::Hepatitis => sources.hepatitis = source,
                ModelKey::Hiv => sources.hiv = source,
                ModelKey::HivVectorizer => sources.vectorizer = source,
                ModelKey::Tb => sources.tb = source,
            }
        }
        Ok(sources)
    }

    fn source(&self, key: ModelKey) -> &ModelSource {
        match key {
            ModelKey::Hepatitis => &self.hepatitis,
            ModelKey::Hiv => &self.hiv,
            ModelKey::HivVectorizer => &self.vectorizer,
            ModelKey::Tb => &self.tb,
        }
    }
}

impl Default for ModelSources {
    fn default() -> Self {
        Self::from_dir(Path::new(DEFAULT_MODELS_DIR))
    }
}

/// One model that failed to load, with the cause rendered for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub key: ModelKey,
    pub reason: String,
}

/// Availability of one registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityEntry {
    pub key: ModelKey,
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Serializable snapshot of what the bundle managed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityReport {
    pub entries: Vec<AvailabilityEntry>,
}

impl AvailabilityReport {
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.loaded).count()
    }

    #[must_use]
    pub fn is_fully_loaded(&self) -> bool {
        self.entries.iter().all(|e| e.loaded)
    }
}

/// Immutable set of loaded models plus the failures met while loading.
#[derive(Debug, Default)]
pub struct ModelBundle {
    pub hepatitis: Option<Box<dyn Classifier>>,
    pub hiv: Option<Box<dyn Classifier>>,
    pub hiv_vectorizer: Option<Box<dyn Vectorizer>>,
    pub tb: Option<Box<dyn Classifier>>,
    pub failures: Vec<LoadFailure>,
}

impl ModelBundle {
    /// Load every artifact named by `sources`.
    ///
    /// Never fails: each artifact loads independently and failures are
    /// recorded on the returned bundle.
    #[must_use]
    pub fn load(sources: &ModelSources) -> Self {
        let mut bundle = ModelBundle::default();
        match load_source_classifier(sources, ModelKey::Hepatitis) {
            Ok(model) => bundle.hepatitis = Some(Box::new(model)),
            Err(error) => bundle.record_failure(ModelKey::Hepatitis, &error),
        }
        match load_source_classifier(sources, ModelKey::Hiv) {
            Ok(model) => bundle.hiv = Some(Box::new(model)),
            Err(error) => bundle.record_failure(ModelKey::Hiv, &error),
        }
        let vectorizer_source = sources.source(ModelKey::HivVectorizer);
        match load_vectorizer(
            &vectorizer_source.path,
            vectorizer_source.sha256.as_deref(),
        ) {
            Ok(vectorizer) => bundle.hiv_vectorizer = Some(Box::new(vectorizer)),
            Err(error) => bundle.record_failure(ModelKey::HivVectorizer, &error),
        }
        match load_source_classifier(sources, ModelKey::Tb) {
            Ok(model) => bundle.tb = Some(Box::new(model)),
            Err(error) => bundle.record_failure(ModelKey::Tb, &error),
        }
        debug!(
            loaded = ModelKey::ALL.len() - bundle.failures.len(),
            failed = bundle.failures.len(),
            "model bundle loaded"
        );
        bundle
    }

    fn record_failure(&mut self, key: ModelKey, error: &ArtifactError) {
        warn!(model = %key, error = %error, "model failed to load");
        self.failures.push(LoadFailure {
            key,
            reason: error.to_string(),
        });
    }

    /// Classifier for `key`, when it loaded.
    ///
    /// Asking for [`ModelKey::HivVectorizer`] always returns `None`; the
    /// vectorizer is not a classifier.
    #[must_use]
    pub fn classifier(&self, key: ModelKey) -> Option<&dyn Classifier> {
        match key {
            ModelKey::Hepatitis => self.hepatitis.as_deref(),
            ModelKey::Hiv => self.hiv.as_deref(),
            ModelKey::HivVectorizer => None,
            ModelKey::Tb => self.tb.as_deref(),
        }
    }

    /// Text vectorizer for the HIV analysis, when it loaded.
    #[must_use]
    pub fn vectorizer(&self) -> Option<&dyn Vectorizer> {
        self.hiv_vectorizer.as_deref()
    }

    /// The HIV classifier and its vectorizer together.
    ///
    /// The HIV analysis needs both; one without the other is unusable.
    #[must_use]
    pub fn hiv_pair(&self) -> Option<(&dyn Classifier, &dyn Vectorizer)> {
        match (self.hiv.as_deref(), self.hiv_vectorizer.as_deref()) {
            (Some(model), Some(vectorizer)) => Some((model, vectorizer)),
            _ => None,
        }
    }

    /// Whether the artifact behind `key` loaded.
    #[must_use]
    pub fn is_loaded(&self, key: ModelKey) -> bool {
        match key {
            ModelKey::Hepatitis => self.hepatitis.is_some(),
            ModelKey::Hiv => self.hiv.is_some(),
            ModelKey::HivVectorizer => self.hiv_vectorizer.is_some(),
            ModelKey::Tb => self.tb.is_some(),
        }
    }

    /// Recorded failure for `key`, if it failed to load.
    #[must_use]
    pub fn failure(&self, key: ModelKey) -> Option<&LoadFailure> {
        self.failures.iter().find(|f| f.key == key)
    }

    /// Snapshot of per-key availability for reporting.
    #[must_use]
    pub fn availability(&self) -> AvailabilityReport {
        let entries = ModelKey::ALL
            .into_iter()
            .map(|key| AvailabilityEntry {
                key,
                loaded: self.is_loaded(key),
                reason: self.failure(key).map(|f| f.reason.clone()),
            })
            .collect();
        AvailabilityReport { entries }
    }
}

fn load_source_classifier(
    sources: &ModelSources,
    key: ModelKey,
) -> Result<crate::classifier::LogisticModel, ArtifactError> {
    let source = sources.source(key);
    load_classifier(&source.path, source.sha256.as_deref())
}

/// Process-wide bundle cache.
///
/// The first caller pays the load; later callers share the same immutable
/// bundle. Sources passed after initialization are ignored.
#[derive(Debug, Default)]
pub struct SharedModels {
    cell: OnceLock<ModelBundle>,
}

impl SharedModels {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The cached bundle, loading it from `sources` on first use.
    pub fn get_or_load(&self, sources: &ModelSources) -> &ModelBundle {
        self.cell.get_or_init(|| ModelBundle::load(sources))
    }

    /// The cached bundle, if something already loaded it.
    #[must_use]
    pub fn get(&self) -> Option<&ModelBundle> {
        self.cell.get()
    }
}
