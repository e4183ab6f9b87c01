//! Core data model for the medical screening service.
//!
//! This crate defines the typed vocabulary shared by every other crate in
//! the workspace: categorical encodings, intake forms, feature vectors,
//! request envelopes, prediction outcomes, and the screening error type.
//! It is deliberately free of I/O and model-loading concerns.

pub mod encoding;
pub mod error;
pub mod features;
pub mod input;
pub mod request;
pub mod result;

pub use encoding::{BinaryFlag, Sex, TriState, sex_code, tri_state_code};
pub use error::{Result, ScreenError};
pub use features::FeatureVector;
pub use input::{
    HEPATITIS_FEATURE_NAMES, HIV_SYMPTOMS, HepatitisInput, HivInput, HivSymptom,
    TB_FEATURE_NAMES, TbInput,
};
pub use request::{Disease, ScreeningRequest};
pub use result::{Prediction, ScreeningLabel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_round_trips_through_json() {
        let prediction =
            Prediction::new(Disease::Tuberculosis, ScreeningLabel::HighTbRisk).with_confidence(0.91);
        let json = serde_json::to_string(&prediction).unwrap();
        let back: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prediction);
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = ScreeningRequest::Hiv(HivInput {
            symptoms: vec![HivSymptom::Fever, HivSymptom::LymphNodes],
        });
        let json = serde_json::to_string(&request).unwrap();
        let back: ScreeningRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn feature_name_tables_match_builder_output() {
        assert_eq!(HEPATITIS_FEATURE_NAMES.len(), 17);
        assert_eq!(TB_FEATURE_NAMES.len(), 8);
        assert_eq!(HIV_SYMPTOMS.len(), 10);
    }
}
