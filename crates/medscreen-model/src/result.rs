//! Prediction outcomes returned to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::Disease;

/// Classification labels across all screening analyses.
///
/// Each classifier emits two of these; the display spellings are the exact
/// phrases shown to clinicians and must not drift between analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningLabel {
    /// Hepatitis outcome for class `1`.
    FavorablePrognosis,
    /// Hepatitis outcome for any other class.
    ConcerningPrognosis,
    /// HIV outcome for class `1`.
    HighRisk,
    /// HIV outcome for class `0`.
    LowRisk,
    /// Tuberculosis outcome for class `1`.
    HighTbRisk,
    /// Tuberculosis outcome for class `0`.
    LowTbRisk,
}

impl ScreeningLabel {
    /// Display phrase shown to clinicians.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScreeningLabel::FavorablePrognosis => "Favorable Prognosis",
            ScreeningLabel::ConcerningPrognosis => "Concerning Prognosis",
            ScreeningLabel::HighRisk => "High Risk",
            ScreeningLabel::LowRisk => "Low Risk",
            ScreeningLabel::HighTbRisk => "High TB Risk",
            ScreeningLabel::LowTbRisk => "Low TB Risk",
        }
    }

    /// True for outcomes that warrant clinical follow-up.
    #[must_use]
    pub fn is_concerning(self) -> bool {
        matches!(
            self,
            ScreeningLabel::ConcerningPrognosis
                | ScreeningLabel::HighRisk
                | ScreeningLabel::HighTbRisk
        )
    }
}

impl fmt::Display for ScreeningLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one screening analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Analysis that produced this outcome.
    pub disease: Disease,
    /// Classified outcome.
    pub label: ScreeningLabel,
    /// Probability of the predicted class, when the model reports one.
    ///
    /// Hepatitis predictions never carry a confidence; the trained artifact
    /// does not expose calibrated probabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Prediction {
    /// Build a prediction without a confidence estimate.
    #[must_use]
    pub fn new(disease: Disease, label: ScreeningLabel) -> Self {
        Self {
            disease,
            label,
            confidence: None,
        }
    }

    /// Attach the probability of the predicted class.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Confidence formatted as a percentage with two decimals, e.g. `87.23%`.
    #[must_use]
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.2}%", c * 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concerning_labels_cover_all_high_risk_outcomes() {
        assert!(ScreeningLabel::ConcerningPrognosis.is_concerning());
        assert!(ScreeningLabel::HighRisk.is_concerning());
        assert!(ScreeningLabel::HighTbRisk.is_concerning());
        assert!(!ScreeningLabel::FavorablePrognosis.is_concerning());
        assert!(!ScreeningLabel::LowRisk.is_concerning());
        assert!(!ScreeningLabel::LowTbRisk.is_concerning());
    }

    #[test]
    fn confidence_percent_rounds_to_two_decimals() {
        let prediction =
            Prediction::new(Disease::Hiv, ScreeningLabel::HighRisk).with_confidence(0.87234);
        assert_eq!(prediction.confidence_percent().as_deref(), Some("87.23%"));
    }

    #[test]
    fn absent_confidence_is_omitted_from_json() {
        let prediction = Prediction::new(Disease::Hepatitis, ScreeningLabel::FavorablePrognosis);
        let json = serde_json::to_string(&prediction).unwrap();
        assert!(!json.contains("confidence"));
        assert_eq!(prediction.confidence_percent(), None);
    }
}
