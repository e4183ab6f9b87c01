#![deny(unsafe_code)]

//! TOML manifest pinning the model artifacts for one deployment.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::ModelKey;
use crate::error::ArtifactError;

pub const MANIFEST_SCHEMA: &str = "medscreen.models-manifest";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsManifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub models: Vec<ManifestModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestModel {
    pub key: String,
    pub path: String,
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn load_manifest(path: &Path) -> Result<ModelsManifest, ArtifactError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;
    let manifest: ModelsManifest = toml::from_str(&contents).map_err(|e| ArtifactError::Toml {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

pub fn validate_manifest(manifest: &ModelsManifest) -> Result<(), ArtifactError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(ArtifactError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(ArtifactError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut keys: BTreeSet<ModelKey> = BTreeSet::new();
    for model in &manifest.models {
        let key: ModelKey = model.key.parse()?;
        if !keys.insert(key) {
            return Err(ArtifactError::DuplicateModelKey {
                key: model.key.clone(),
            });
        }
        if let Some(sha) = &model.sha256 {
            validate_sha(sha, &model.path)?;
        }
        validate_path(&model.path)?;
    }

    for key in ModelKey::ALL {
        if !keys.contains(&key) {
            return Err(ArtifactError::MissingModelKey {
                key: key.as_str().to_string(),
            });
        }
    }

    Ok(())
}

fn validate_sha(sha: &str, path: &str) -> Result<(), ArtifactError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ArtifactError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), ArtifactError> {
    if path.contains('\\') {
        return Err(ArtifactError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(ArtifactError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    for c in p.components() {
        if matches!(c, Component::ParentDir) {
            return Err(ArtifactError::InvalidPath {
                path: PathBuf::from(path),
                message: "manifest path must not traverse out of the models directory".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_with_models(models: Vec<ManifestModel>) -> ModelsManifest {
        ModelsManifest {
            manifest: ManifestHeader {
                schema: MANIFEST_SCHEMA.to_string(),
                schema_version: MANIFEST_SCHEMA_VERSION,
            },
            notes: None,
            models,
        }
    }

    fn entry(key: &str, path: &str) -> ManifestModel {
        ManifestModel {
            key: key.to_string(),
            path: path.to_string(),
            sha256: None,
            notes: None,
        }
    }

    fn full_entries() -> Vec<ManifestModel> {
        vec![
            entry("hepatitis", "hepatitis_model.json"),
            entry("hiv", "hiv_model.json"),
            entry("vectorizer", "vectorizer.json"),
            entry("tb", "tb_predictor_model.json"),
        ]
    }

    #[test]
    fn complete_manifest_validates() {
        let manifest = manifest_with_models(full_entries());
        assert!(validate_manifest(&manifest).is_ok());
    }

    #[test]
    fn missing_key_is_rejected() {
        let mut models = full_entries();
        models.retain(|m| m.key != "tb");
        let err = validate_manifest(&manifest_with_models(models)).unwrap_err();
        assert!(matches!(err, ArtifactError::MissingModelKey { key } if key == "tb"));
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut models = full_entries();
        models.push(entry("hiv", "other.json"));
        let err = validate_manifest(&manifest_with_models(models)).unwrap_err();
        assert!(matches!(err, ArtifactError::DuplicateModelKey { .. }));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut models = full_entries();
        models.push(entry("malaria", "malaria.json"));
        let err = validate_manifest(&manifest_with_models(models)).unwrap_err();
        assert!(matches!(err, ArtifactError::UnknownModelKey { .. }));
    }

    #[test]
    fn traversing_path_is_rejected() {
        let mut models = full_entries();
        models[0].path = "../outside.json".to_string();
        let err = validate_manifest(&manifest_with_models(models)).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidPath { .. }));
    }

    #[test]
    fn short_sha_is_rejected() {
        let mut models = full_entries();
        models[0].sha256 = Some("abc123".to_string());
        let err = validate_manifest(&manifest_with_models(models)).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidSha256 { .. }));
    }

    #[test]
    fn manifest_parses_from_toml() {
        let text = r#"
            [manifest]
            schema = "medscreen.models-manifest"
            schema_version = 1

            [[models]]
            key = "hepatitis"
            path = "hepatitis_model.json"

            [[models]]
            key = "hiv"
            path = "hiv_model.json"

            [[models]]
            key = "vectorizer"
            path = "vectorizer.json"

            [[models]]
            key = "tb"
            path = "tb_predictor_model.json"
        "#;
        let manifest: ModelsManifest = toml::from_str(text).unwrap();
        assert!(validate_manifest(&manifest).is_ok());
        assert_eq!(manifest.models.len(), 4);
    }
}
