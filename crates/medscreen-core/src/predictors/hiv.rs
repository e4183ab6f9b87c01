//! HIV risk prediction over free-text symptom descriptions.

use tracing::debug;

use medscreen_model::{Disease, HivInput, Prediction, Result, ScreenError, ScreeningLabel};
use medscreen_registry::{ModelBundle, ModelKey, predicted_class_confidence};

use super::unavailable;

/// Classify a symptom selection into an HIV risk outcome.
///
/// The selected symptoms are joined into one comma-separated phrase, run
/// through the text vectorizer, and classified. The attached confidence is
/// the probability of the predicted class, when the model reports one.
///
/// # Errors
///
/// Returns [`ScreenError::ModelUnavailable`] naming whichever half of the
/// classifier/vectorizer pair is missing, and
/// [`ScreenError::EmptySelection`] when the pair is present but no symptoms
/// are selected. Availability is checked first, so a missing pair is
/// reported even when the selection is also empty.
pub fn predict(bundle: &ModelBundle, input: &HivInput) -> Result<Prediction> {
    let (model, vectorizer) = match (bundle.classifier(ModelKey::Hiv), bundle.vectorizer()) {
        (Some(model), Some(vectorizer)) => (model, vectorizer),
        (None, _) => return Err(unavailable(ModelKey::Hiv)),
        (_, None) => return Err(unavailable(ModelKey::HivVectorizer)),
    };
    if input.symptoms.is_empty() {
        return Err(ScreenError::EmptySelection);
    }
    let text = input.joined_symptoms();
    let features = vectorizer.transform(&text);
    let label = model.predict(&features)?;
    let outcome = if label == 1 {
        ScreeningLabel::HighRisk
    } else {
        ScreeningLabel::LowRisk
    };
    let confidence = predicted_class_confidence(model, &features, label)?;
    debug!(
        symptom_count = input.symptoms.len(),
        label,
        outcome = %outcome,
        "hiv risk classified"
    );
    let mut prediction = Prediction::new(Disease::Hiv, outcome);
    if let Some(confidence) = confidence {
        prediction = prediction.with_confidence(confidence);
    }
    Ok(prediction)
}
