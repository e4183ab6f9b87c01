//! Integration tests for the request and prediction wire formats.

use medscreen_model::{
    BinaryFlag, Disease, HepatitisInput, HivInput, HivSymptom, Prediction, ScreeningLabel,
    ScreeningRequest, Sex, TbInput, TriState,
};

#[test]
fn hepatitis_request_parses_full_form() {
    let json = r#"{
        "analysis": "hepatitis",
        "age": 37.0,
        "sex": "male",
        "steroid": "False",
        "antivirals": "False",
        "fatigue": "True",
        "anorexia": "Unknown",
        "liver_big": "True",
        "spleen_palpable": "False",
        "spiders": "False",
        "ascites": "Unknown",
        "varices": "False",
        "histology": "True",
        "bilirubin": 0.9,
        "alk_phosphate": 95.0,
        "sgot": 28.0,
        "albumin": 4.0,
        "protime": 75.0
    }"#;
    let request: ScreeningRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.disease(), Disease::Hepatitis);
    let ScreeningRequest::Hepatitis(input) = request else {
        panic!("expected a hepatitis request");
    };
    assert_eq!(input.sex, Sex::Male);
    assert_eq!(input.anorexia, TriState::Unknown);
    assert_eq!(input.feature_vector().len(), 17);
}

#[test]
fn hepatitis_request_rejects_lowercase_tri_state() {
    let json = r#"{
        "analysis": "hepatitis",
        "age": 37.0,
        "sex": "male",
        "steroid": "false",
        "antivirals": "False",
        "fatigue": "True",
        "anorexia": "Unknown",
        "liver_big": "True",
        "spleen_palpable": "False",
        "spiders": "False",
        "ascites": "Unknown",
        "varices": "False",
        "histology": "True",
        "bilirubin": 0.9,
        "alk_phosphate": 95.0,
        "sgot": 28.0,
        "albumin": 4.0,
        "protime": 75.0
    }"#;
    assert!(serde_json::from_str::<ScreeningRequest>(json).is_err());
}

#[test]
fn hepatitis_request_rejects_unknown_histology() {
    // Histology is strictly binary; an "Unknown" answer must fail at parse
    // time instead of encoding as -1 in a column trained on 0/1.
    let json = r#"{
        "analysis": "hepatitis",
        "age": 37.0,
        "sex": "male",
        "steroid": "False",
        "antivirals": "False",
        "fatigue": "True",
        "anorexia": "Unknown",
        "liver_big": "True",
        "spleen_palpable": "False",
        "spiders": "False",
        "ascites": "Unknown",
        "varices": "False",
        "histology": "Unknown",
        "bilirubin": 0.9,
        "alk_phosphate": 95.0,
        "sgot": 28.0,
        "albumin": 4.0,
        "protime": 75.0
    }"#;
    assert!(serde_json::from_str::<ScreeningRequest>(json).is_err());
}

#[test]
fn hiv_request_rejects_unknown_symptom() {
    let json = r#"{"analysis": "hiv", "symptoms": ["Fever", "Brain Fog"]}"#;
    assert!(serde_json::from_str::<ScreeningRequest>(json).is_err());
}

#[test]
fn hiv_request_allows_empty_selection_at_parse_time() {
    // The empty-selection rule is enforced by the predictor, not the parser,
    // so a syntactically valid empty request must still deserialize.
    let json = r#"{"analysis": "hiv", "symptoms": []}"#;
    let request: ScreeningRequest = serde_json::from_str(json).unwrap();
    let ScreeningRequest::Hiv(input) = request else {
        panic!("expected an HIV request");
    };
    assert!(input.symptoms.is_empty());
}

#[test]
fn unknown_analysis_tag_is_rejected() {
    let json = r#"{"analysis": "influenza"}"#;
    assert!(serde_json::from_str::<ScreeningRequest>(json).is_err());
}

#[test]
fn requests_round_trip_for_all_analyses() {
    let requests = [
        ScreeningRequest::Hepatitis(HepatitisInput {
            age: 50.0,
            sex: Sex::Female,
            steroid: TriState::True,
            antivirals: TriState::False,
            fatigue: TriState::False,
            anorexia: TriState::False,
            liver_big: TriState::Unknown,
            spleen_palpable: TriState::Unknown,
            spiders: TriState::False,
            ascites: TriState::False,
            varices: TriState::False,
            histology: BinaryFlag::False,
            bilirubin: 1.4,
            alk_phosphate: 120.0,
            sgot: 60.0,
            albumin: 3.6,
            protime: 55.0,
        }),
        ScreeningRequest::Hiv(HivInput {
            symptoms: vec![HivSymptom::WeightLoss, HivSymptom::OpportunisticInfections],
        }),
        ScreeningRequest::Tuberculosis(TbInput {
            cough: true,
            night_sweats: true,
            ..TbInput::default()
        }),
    ];
    for request in requests {
        let json = serde_json::to_string(&request).unwrap();
        let back: ScreeningRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}

#[test]
fn prediction_json_shape_is_stable() {
    let prediction =
        Prediction::new(Disease::Hiv, ScreeningLabel::LowRisk).with_confidence(0.6412);
    let value: serde_json::Value = serde_json::to_value(&prediction).unwrap();
    assert_eq!(value["disease"], "hiv");
    assert_eq!(value["label"], "low_risk");
    assert_eq!(value["confidence"], 0.6412);
}
