//! Screening request envelope shared by the CLI and the dispatch layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;
use crate::input::{HepatitisInput, HivInput, TbInput};

/// The screening analyses this service offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disease {
    Hepatitis,
    Hiv,
    Tuberculosis,
}

impl Disease {
    /// Stable machine identifier, identical to the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Disease::Hepatitis => "hepatitis",
            Disease::Hiv => "hiv",
            Disease::Tuberculosis => "tuberculosis",
        }
    }

    /// Human-readable name for summaries and tables.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Disease::Hepatitis => "Hepatitis",
            Disease::Hiv => "HIV",
            Disease::Tuberculosis => "Tuberculosis",
        }
    }

    /// All analyses in presentation order.
    #[must_use]
    pub fn all() -> [Disease; 3] {
        [Disease::Hepatitis, Disease::Hiv, Disease::Tuberculosis]
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Disease {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hepatitis" => Ok(Disease::Hepatitis),
            "hiv" => Ok(Disease::Hiv),
            "tuberculosis" | "tb" => Ok(Disease::Tuberculosis),
            other => Err(ScreenError::InvalidEncoding {
                field: "analysis".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// One screening request: which analysis to run and its intake form.
///
/// Serialized with an `analysis` tag next to the form fields, so a hepatitis
/// request reads as `{"analysis": "hepatitis", "age": 44.0, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "analysis", rename_all = "lowercase")]
pub enum ScreeningRequest {
    Hepatitis(HepatitisInput),
    Hiv(HivInput),
    Tuberculosis(TbInput),
}

impl ScreeningRequest {
    /// Analysis this request asks for.
    #[must_use]
    pub fn disease(&self) -> Disease {
        match self {
            ScreeningRequest::Hepatitis(_) => Disease::Hepatitis,
            ScreeningRequest::Hiv(_) => Disease::Hiv,
            ScreeningRequest::Tuberculosis(_) => Disease::Tuberculosis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HivSymptom;

    #[test]
    fn disease_parses_aliases_case_insensitively() {
        assert_eq!("hepatitis".parse::<Disease>().unwrap(), Disease::Hepatitis);
        assert_eq!("HIV".parse::<Disease>().unwrap(), Disease::Hiv);
        assert_eq!("TB".parse::<Disease>().unwrap(), Disease::Tuberculosis);
        assert!("malaria".parse::<Disease>().is_err());
    }

    #[test]
    fn request_tag_selects_the_analysis() {
        let json = r#"{"analysis": "hiv", "symptoms": ["Fever", "Night Sweats"]}"#;
        let request: ScreeningRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.disease(), Disease::Hiv);
        match request {
            ScreeningRequest::Hiv(input) => {
                assert_eq!(
                    input.symptoms,
                    vec![HivSymptom::Fever, HivSymptom::NightSweats]
                );
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn tuberculosis_request_accepts_sparse_flags() {
        let json = r#"{"analysis": "tuberculosis", "cough": true, "hemoptysis": true}"#;
        let request: ScreeningRequest = serde_json::from_str(json).unwrap();
        match request {
            ScreeningRequest::Tuberculosis(input) => {
                assert!(input.cough);
                assert!(input.hemoptysis);
                assert!(!input.fever);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
