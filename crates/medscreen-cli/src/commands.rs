//! Command implementations behind the CLI surface.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use medscreen_core::screen;
use medscreen_model::{Prediction, ScreenError, ScreeningRequest};
use medscreen_registry::{DEFAULT_MODELS_DIR, ModelBundle, ModelSources, SharedModels};

use crate::cli::{ModelsArgs, ScreenArgs};
use crate::logging::redact_value;

/// Process-wide bundle: whichever command needs models first loads them,
/// later uses share the same immutable bundle.
static SHARED_MODELS: SharedModels = SharedModels::new();

/// Outcome of a `screen` run, kept apart for exit-code mapping.
#[derive(Debug)]
pub enum ScreenOutcome {
    /// The analysis ran and produced a prediction.
    Predicted(Prediction),
    /// The request was understood but could not be answered.
    Rejected(ScreenError),
    /// The request file was not a valid screening request.
    Malformed(String),
}

/// Resolve artifact sources from the shared model flags.
///
/// A manifest wins over a directory; with neither flag the conventional
/// `models/` directory is assumed.
///
/// # Errors
///
/// Fails when a manifest is named but cannot be read or validated.
pub fn resolve_sources(
    models_dir: Option<&Path>,
    manifest: Option<&Path>,
) -> Result<ModelSources> {
    if let Some(manifest) = manifest {
        return ModelSources::from_manifest(manifest)
            .with_context(|| format!("load models manifest {}", manifest.display()));
    }
    let dir = models_dir.unwrap_or_else(|| Path::new(DEFAULT_MODELS_DIR));
    Ok(ModelSources::from_dir(dir))
}

/// Load the bundle and report model availability.
///
/// # Errors
///
/// Fails only on manifest problems; individual artifact failures are part
/// of the returned bundle, not errors.
pub fn run_models(args: &ModelsArgs) -> Result<&'static ModelBundle> {
    let sources = resolve_sources(args.models_dir.as_deref(), args.manifest.as_deref())?;
    let bundle = SHARED_MODELS.get_or_load(&sources);
    if bundle.failures.is_empty() {
        info!("all model artifacts loaded");
    } else {
        warn!(
            failed = bundle.failures.len(),
            "some model artifacts failed to load"
        );
    }
    Ok(bundle)
}

/// Run one screening request read from a JSON file.
///
/// # Errors
///
/// Fails on manifest problems and unreadable request files. Requests that
/// parse but cannot be answered come back as [`ScreenOutcome::Rejected`];
/// unparseable request bodies as [`ScreenOutcome::Malformed`].
pub fn run_screen(args: &ScreenArgs) -> Result<ScreenOutcome> {
    let sources = resolve_sources(args.models_dir.as_deref(), args.manifest.as_deref())?;
    let contents = fs::read_to_string(&args.request)
        .with_context(|| format!("read request {}", args.request.display()))?;
    debug!(request = %redact_value(contents.trim()), "read screening request");

    let request: ScreeningRequest = match serde_json::from_str(&contents) {
        Ok(request) => request,
        Err(error) => return Ok(ScreenOutcome::Malformed(error.to_string())),
    };

    let bundle = SHARED_MODELS.get_or_load(&sources);
    let span = info_span!("screen", analysis = %request.disease());
    let _guard = span.enter();
    info!("running screening analysis");
    match screen(bundle, &request) {
        Ok(prediction) => Ok(ScreenOutcome::Predicted(prediction)),
        Err(error) => Ok(ScreenOutcome::Rejected(error)),
    }
}

/// Exit code for a request the engine rejected.
///
/// User-correctable problems exit 2; missing models and inference failures
/// exit 1.
#[must_use]
pub fn rejection_exit_code(error: &ScreenError) -> i32 {
    match error {
        ScreenError::EmptySelection | ScreenError::InvalidEncoding { .. } => 2,
        ScreenError::ModelUnavailable { .. } | ScreenError::Inference { .. } => 1,
    }
}
