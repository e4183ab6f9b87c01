#![deny(unsafe_code)]

//! Exported-parameter artifacts.
//!
//! Models are shipped as JSON documents holding the fitted parameters, not
//! as serialized runtime objects. Loading validates the document against the
//! schema below and rebuilds the corresponding in-memory model.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::classifier::LogisticModel;
use crate::error::ArtifactError;
use crate::vectorizer::CountVectorizer;

pub const CLASSIFIER_SCHEMA: &str = "medscreen.classifier";
pub const VECTORIZER_SCHEMA: &str = "medscreen.vectorizer";
pub const SCHEMA_VERSION: u32 = 1;

const LOGISTIC_KIND: &str = "logistic_regression";
const COUNT_KIND: &str = "count";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub schema: String,
    pub schema_version: u32,
    pub model: ClassifierParams,
    #[serde(default)]
    pub provenance: Option<Provenance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierParams {
    pub kind: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub classes: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub schema: String,
    pub schema_version: u32,
    pub vectorizer: VectorizerParams,
    #[serde(default)]
    pub provenance: Option<Provenance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerParams {
    pub kind: String,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    pub vocabulary: BTreeMap<String, usize>,
}

fn default_lowercase() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default)]
    pub trained_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Load and validate a classifier artifact.
pub fn load_classifier(
    path: &Path,
    sha256: Option<&str>,
) -> Result<LogisticModel, ArtifactError> {
    let bytes = read_verified(path, sha256)?;
    let artifact: ClassifierArtifact =
        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
    validate_classifier(path, &artifact)?;
    let ClassifierParams {
        feature_names,
        coefficients,
        intercept,
        classes,
        ..
    } = artifact.model;
    // Two classes guaranteed by validation.
    Ok(LogisticModel::new(
        feature_names,
        coefficients,
        intercept,
        [classes[0], classes[1]],
    ))
}

/// Load and validate a vectorizer artifact.
pub fn load_vectorizer(
    path: &Path,
    sha256: Option<&str>,
) -> Result<CountVectorizer, ArtifactError> {
    let bytes = read_verified(path, sha256)?;
    let artifact: VectorizerArtifact =
        serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
    validate_vectorizer(path, &artifact)?;
    let VectorizerParams {
        vocabulary,
        lowercase,
        ..
    } = artifact.vectorizer;
    Ok(CountVectorizer::new(vocabulary, lowercase))
}

fn read_verified(path: &Path, sha256: Option<&str>) -> Result<Vec<u8>, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ArtifactError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            ArtifactError::io(path, e)
        }
    })?;
    if let Some(expected) = sha256 {
        let expected = expected.to_ascii_lowercase();
        let actual = sha256_hex(&bytes);
        if actual != expected {
            return Err(ArtifactError::Sha256Mismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
    }
    Ok(bytes)
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn validate_classifier(path: &Path, artifact: &ClassifierArtifact) -> Result<(), ArtifactError> {
    validate_header(path, &artifact.schema, CLASSIFIER_SCHEMA, artifact.schema_version)?;
    let params = &artifact.model;
    if params.kind != LOGISTIC_KIND {
        return Err(ArtifactError::UnsupportedKind {
            path: path.to_path_buf(),
            kind: params.kind.clone(),
        });
    }
    if params.feature_names.is_empty() {
        return Err(ArtifactError::invalid(path, "feature_names must not be empty"));
    }
    let unique: BTreeSet<&str> = params.feature_names.iter().map(String::as_str).collect();
    if unique.len() != params.feature_names.len() {
        return Err(ArtifactError::invalid(path, "feature_names contains duplicates"));
    }
    if params.coefficients.len() != params.feature_names.len() {
        return Err(ArtifactError::invalid(
            path,
            format!(
                "coefficient count {} does not match feature count {}",
                params.coefficients.len(),
                params.feature_names.len()
            ),
        ));
    }
    if !params.coefficients.iter().all(|c| c.is_finite()) || !params.intercept.is_finite() {
        return Err(ArtifactError::invalid(path, "parameters must be finite"));
    }
    if params.classes.len() != 2 || params.classes[0] == params.classes[1] {
        return Err(ArtifactError::invalid(
            path,
            "classes must hold exactly two distinct labels",
        ));
    }
    validate_provenance(path, artifact.provenance.as_ref())?;
    Ok(())
}

fn validate_vectorizer(path: &Path, artifact: &VectorizerArtifact) -> Result<(), ArtifactError> {
    validate_header(path, &artifact.schema, VECTORIZER_SCHEMA, artifact.schema_version)?;
    let params = &artifact.vectorizer;
    if params.kind != COUNT_KIND {
        return Err(ArtifactError::UnsupportedKind {
            path: path.to_path_buf(),
            kind: params.kind.clone(),
        });
    }
    if params.vocabulary.is_empty() {
        return Err(ArtifactError::invalid(path, "vocabulary must not be empty"));
    }
    let columns: BTreeSet<usize> = params.vocabulary.values().copied().collect();
    let dense = columns.len() == params.vocabulary.len()
        && columns.iter().max() == Some(&(params.vocabulary.len() - 1));
    if !dense {
        return Err(ArtifactError::invalid(
            path,
            "vocabulary columns must be dense over 0..len",
        ));
    }
    if params.lowercase {
        for term in params.vocabulary.keys() {
            if *term != term.to_lowercase() {
                return Err(ArtifactError::invalid(
                    path,
                    format!("term `{term}` is unreachable: vectorizer lowercases its input"),
                ));
            }
        }
    }
    validate_provenance(path, artifact.provenance.as_ref())?;
    Ok(())
}

fn validate_header(
    path: &Path,
    schema: &str,
    expected: &str,
    version: u32,
) -> Result<(), ArtifactError> {
    if schema != expected {
        return Err(ArtifactError::UnsupportedSchema {
            path: path.to_path_buf(),
            schema: schema.to_string(),
        });
    }
    if version != SCHEMA_VERSION {
        return Err(ArtifactError::UnsupportedSchemaVersion {
            path: path.to_path_buf(),
            version,
        });
    }
    Ok(())
}

fn validate_provenance(path: &Path, provenance: Option<&Provenance>) -> Result<(), ArtifactError> {
    if let Some(provenance) = provenance
        && let Some(trained_at) = &provenance.trained_at
        && chrono::NaiveDate::parse_from_str(trained_at, "%Y-%m-%d").is_err()
    {
        return Err(ArtifactError::invalid(
            path,
            format!("trained_at `{trained_at}` is not a YYYY-MM-DD date"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier_artifact() -> ClassifierArtifact {
        ClassifierArtifact {
            schema: CLASSIFIER_SCHEMA.to_string(),
            schema_version: SCHEMA_VERSION,
            model: ClassifierParams {
                kind: LOGISTIC_KIND.to_string(),
                feature_names: vec!["fever".to_string(), "cough".to_string()],
                coefficients: vec![0.8, -0.2],
                intercept: 0.1,
                classes: vec![0, 1],
            },
            provenance: None,
        }
    }

    #[test]
    fn valid_classifier_artifact_passes() {
        let artifact = classifier_artifact();
        assert!(validate_classifier(Path::new("m.json"), &artifact).is_ok());
    }

    #[test]
    fn coefficient_shape_mismatch_is_rejected() {
        let mut artifact = classifier_artifact();
        artifact.model.coefficients.push(0.5);
        let err = validate_classifier(Path::new("m.json"), &artifact).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidArtifact { .. }));
    }

    #[test]
    fn wrong_schema_is_rejected() {
        let mut artifact = classifier_artifact();
        artifact.schema = "medscreen.vectorizer".to_string();
        let err = validate_classifier(Path::new("m.json"), &artifact).unwrap_err();
        assert!(matches!(err, ArtifactError::UnsupportedSchema { .. }));
    }

    #[test]
    fn future_schema_version_is_rejected() {
        let mut artifact = classifier_artifact();
        artifact.schema_version = 2;
        let err = validate_classifier(Path::new("m.json"), &artifact).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::UnsupportedSchemaVersion { version: 2, .. }
        ));
    }

    #[test]
    fn degenerate_classes_are_rejected() {
        let mut artifact = classifier_artifact();
        artifact.model.classes = vec![1, 1];
        assert!(validate_classifier(Path::new("m.json"), &artifact).is_err());
    }

    #[test]
    fn bad_trained_at_is_rejected() {
        let mut artifact = classifier_artifact();
        artifact.provenance = Some(Provenance {
            trained_at: Some("last tuesday".to_string()),
            source: None,
        });
        assert!(validate_classifier(Path::new("m.json"), &artifact).is_err());
    }

    #[test]
    fn sparse_vocabulary_columns_are_rejected() {
        let artifact = VectorizerArtifact {
            schema: VECTORIZER_SCHEMA.to_string(),
            schema_version: SCHEMA_VERSION,
            vectorizer: VectorizerParams {
                kind: COUNT_KIND.to_string(),
                lowercase: true,
                vocabulary: BTreeMap::from([
                    ("fever".to_string(), 0),
                    ("cough".to_string(), 2),
                ]),
            },
            provenance: None,
        };
        let err = validate_vectorizer(Path::new("v.json"), &artifact).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidArtifact { .. }));
    }

    #[test]
    fn uppercase_terms_with_lowercasing_are_rejected() {
        let artifact = VectorizerArtifact {
            schema: VECTORIZER_SCHEMA.to_string(),
            schema_version: SCHEMA_VERSION,
            vectorizer: VectorizerParams {
                kind: COUNT_KIND.to_string(),
                lowercase: true,
                vocabulary: BTreeMap::from([("Fever".to_string(), 0)]),
            },
            provenance: None,
        };
        assert!(validate_vectorizer(Path::new("v.json"), &artifact).is_err());
    }

    #[test]
    fn sha256_hex_matches_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
