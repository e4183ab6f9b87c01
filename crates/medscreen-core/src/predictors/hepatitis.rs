//! Hepatitis prognosis prediction.

use tracing::debug;

use medscreen_model::{Disease, HepatitisInput, Prediction, Result, ScreeningLabel};
use medscreen_registry::{ModelBundle, ModelKey};

use super::unavailable;

/// Classify a hepatitis intake form into a prognosis.
///
/// The outcome is label-only: the shipped artifact was never calibrated
/// for probabilities, so no confidence is attached.
///
/// # Errors
///
/// Returns [`ScreenError::ModelUnavailable`](medscreen_model::ScreenError)
/// when the hepatitis model did not load, and propagates inference failures.
pub fn predict(bundle: &ModelBundle, input: &HepatitisInput) -> Result<Prediction> {
    let model = bundle
        .classifier(ModelKey::Hepatitis)
        .ok_or_else(|| unavailable(ModelKey::Hepatitis))?;
    let features = input.feature_vector();
    let label = model.predict(&features)?;
    let outcome = if label == 1 {
        ScreeningLabel::FavorablePrognosis
    } else {
        ScreeningLabel::ConcerningPrognosis
    };
    debug!(label, outcome = %outcome, "hepatitis prognosis classified");
    Ok(Prediction::new(Disease::Hepatitis, outcome))
}
