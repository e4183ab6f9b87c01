//! Typed intake forms for the three screening analyses.
//!
//! Each input struct owns the mapping from clinical answers to the feature
//! layout its classifier was trained on. The field orders in the
//! `*_FEATURE_NAMES` tables are frozen; they must match the training
//! pipelines column for column.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding::{BinaryFlag, Sex, TriState};
use crate::error::ScreenError;
use crate::features::FeatureVector;

/// Column order of the hepatitis prognosis classifier.
pub const HEPATITIS_FEATURE_NAMES: [&str; 17] = [
    "age",
    "sex",
    "steroid",
    "antivirals",
    "fatigue",
    "anorexia",
    "liver_big",
    "spleen_palpable",
    "spiders",
    "ascites",
    "varices",
    "histology",
    "bilirubin",
    "alk_phosphate",
    "sgot",
    "albumin",
    "protime",
];

/// Intake form for the hepatitis prognosis analysis.
///
/// Laboratory values are passed through unscaled; the categorical findings
/// and sex are numerically encoded by [`HepatitisInput::feature_vector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HepatitisInput {
    /// Patient age in years.
    pub age: f64,
    /// Patient sex.
    pub sex: Sex,
    /// On steroid therapy.
    pub steroid: TriState,
    /// On antiviral therapy.
    pub antivirals: TriState,
    /// Reported fatigue.
    pub fatigue: TriState,
    /// Reported anorexia.
    pub anorexia: TriState,
    /// Enlarged liver on examination.
    pub liver_big: TriState,
    /// Palpable spleen on examination.
    pub spleen_palpable: TriState,
    /// Spider angiomata present.
    pub spiders: TriState,
    /// Ascites present.
    pub ascites: TriState,
    /// Esophageal varices present.
    pub varices: TriState,
    /// Histology performed. Strictly 0/1; this form offers no unknown
    /// answer.
    pub histology: BinaryFlag,
    /// Serum bilirubin (mg/dL).
    pub bilirubin: f64,
    /// Alkaline phosphatase (U/L).
    pub alk_phosphate: f64,
    /// Serum glutamic-oxaloacetic transaminase (U/L).
    pub sgot: f64,
    /// Serum albumin (g/dL).
    pub albumin: f64,
    /// Prothrombin time (seconds).
    pub protime: f64,
}

impl HepatitisInput {
    /// Assemble the 17-column feature vector in trained order.
    #[must_use]
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector::new(vec![
            self.age,
            self.sex.code(),
            self.steroid.code(),
            self.antivirals.code(),
            self.fatigue.code(),
            self.anorexia.code(),
            self.liver_big.code(),
            self.spleen_palpable.code(),
            self.spiders.code(),
            self.ascites.code(),
            self.varices.code(),
            self.histology.code(),
            self.bilirubin,
            self.alk_phosphate,
            self.sgot,
            self.albumin,
            self.protime,
        ])
    }
}

/// Symptom vocabulary of the HIV risk model.
///
/// The serialized spellings double as the phrases the text vectorizer was
/// fitted on, so renaming a variant here requires refitting that artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HivSymptom {
    /// Persistent or recurring fever.
    Fever,
    /// Drenching night sweats.
    #[serde(rename = "Night Sweats")]
    NightSweats,
    /// Unexplained fatigue.
    Fatigue,
    /// Unintentional weight loss.
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    /// Chronic diarrhea.
    Diarrhea,
    /// Unexplained skin lesions.
    #[serde(rename = "Skin Lesions")]
    SkinLesions,
    /// Oral candidiasis (thrush).
    #[serde(rename = "Oral Candidiasis")]
    OralCandidiasis,
    /// Swollen lymph nodes.
    #[serde(rename = "Lymph Nodes")]
    LymphNodes,
    /// Neurological symptoms.
    #[serde(rename = "Neuro Symptoms")]
    NeuroSymptoms,
    /// History of opportunistic infections.
    #[serde(rename = "Opportunistic Infections")]
    OpportunisticInfections,
}

/// All HIV symptoms in form display order.
pub const HIV_SYMPTOMS: [HivSymptom; 10] = [
    HivSymptom::Fever,
    HivSymptom::NightSweats,
    HivSymptom::Fatigue,
    HivSymptom::WeightLoss,
    HivSymptom::Diarrhea,
    HivSymptom::SkinLesions,
    HivSymptom::OralCandidiasis,
    HivSymptom::LymphNodes,
    HivSymptom::NeuroSymptoms,
    HivSymptom::OpportunisticInfections,
];

impl HivSymptom {
    /// Display spelling, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HivSymptom::Fever => "Fever",
            HivSymptom::NightSweats => "Night Sweats",
            HivSymptom::Fatigue => "Fatigue",
            HivSymptom::WeightLoss => "Weight Loss",
            HivSymptom::Diarrhea => "Diarrhea",
            HivSymptom::SkinLesions => "Skin Lesions",
            HivSymptom::OralCandidiasis => "Oral Candidiasis",
            HivSymptom::LymphNodes => "Lymph Nodes",
            HivSymptom::NeuroSymptoms => "Neuro Symptoms",
            HivSymptom::OpportunisticInfections => "Opportunistic Infections",
        }
    }
}

impl fmt::Display for HivSymptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HivSymptom {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HIV_SYMPTOMS
            .iter()
            .copied()
            .find(|symptom| symptom.as_str() == s)
            .ok_or_else(|| ScreenError::InvalidEncoding {
                field: "symptom".to_string(),
                value: s.to_string(),
            })
    }
}

/// Intake form for the HIV risk analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HivInput {
    /// Symptoms the patient reports, in selection order.
    pub symptoms: Vec<HivSymptom>,
}

impl HivInput {
    /// Join the selected symptoms into the comma-separated phrase the text
    /// vectorizer was fitted on. Selection order is preserved.
    #[must_use]
    pub fn joined_symptoms(&self) -> String {
        let names: Vec<&str> = self.symptoms.iter().map(|s| s.as_str()).collect();
        names.join(", ")
    }
}

/// Column order of the tuberculosis risk classifier.
pub const TB_FEATURE_NAMES: [&str; 8] = [
    "fever",
    "cough",
    "night_sweats",
    "weight_loss",
    "chest_pain",
    "hemoptysis",
    "fatigue",
    "lymphadenopathy",
];

/// Intake form for the tuberculosis risk analysis.
///
/// Every flag is a plain present/absent checkbox; omitted fields
/// deserialize as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TbInput {
    /// Fever lasting more than two weeks.
    pub fever: bool,
    /// Persistent cough.
    pub cough: bool,
    /// Night sweats.
    pub night_sweats: bool,
    /// Unintentional weight loss.
    pub weight_loss: bool,
    /// Chest pain.
    pub chest_pain: bool,
    /// Coughing up blood.
    pub hemoptysis: bool,
    /// Unexplained fatigue.
    pub fatigue: bool,
    /// Swollen lymph nodes.
    pub lymphadenopathy: bool,
}

impl TbInput {
    /// Assemble the 8-column binary feature vector in trained order.
    #[must_use]
    pub fn feature_vector(&self) -> FeatureVector {
        [
            self.fever,
            self.cough,
            self.night_sweats,
            self.weight_loss,
            self.chest_pain,
            self.hemoptysis,
            self.fatigue,
            self.lymphadenopathy,
        ]
        .iter()
        .map(|&flag| if flag { 1.0 } else { 0.0 })
        .collect()
    }
}
