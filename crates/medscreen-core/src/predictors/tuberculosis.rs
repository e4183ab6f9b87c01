//! Tuberculosis risk prediction.

use tracing::debug;

use medscreen_model::{Disease, Prediction, Result, ScreeningLabel, TbInput};
use medscreen_registry::{ModelBundle, ModelKey, predicted_class_confidence};

use super::unavailable;

/// Classify a symptom-flag form into a tuberculosis risk outcome.
///
/// Confidence semantics match the HIV predictor: the probability of the
/// predicted class, when the model reports one.
///
/// # Errors
///
/// Returns [`ScreenError::ModelUnavailable`](medscreen_model::ScreenError)
/// when the tuberculosis model did not load, and propagates inference
/// failures.
pub fn predict(bundle: &ModelBundle, input: &TbInput) -> Result<Prediction> {
    let model = bundle
        .classifier(ModelKey::Tb)
        .ok_or_else(|| unavailable(ModelKey::Tb))?;
    let features = input.feature_vector();
    let label = model.predict(&features)?;
    let outcome = if label == 1 {
        ScreeningLabel::HighTbRisk
    } else {
        ScreeningLabel::LowTbRisk
    };
    let confidence = predicted_class_confidence(model, &features, label)?;
    debug!(label, outcome = %outcome, "tuberculosis risk classified");
    let mut prediction = Prediction::new(Disease::Tuberculosis, outcome);
    if let Some(confidence) = confidence {
        prediction = prediction.with_confidence(confidence);
    }
    Ok(prediction)
}
