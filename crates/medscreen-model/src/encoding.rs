//! Categorical encodings shared by the screening feature builders.
//!
//! The classifiers were trained on numerically encoded form answers, so the
//! mappings here are part of each model's contract: changing a code silently
//! invalidates every trained artifact.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;

/// Three-valued answer to a clinical yes/no question.
///
/// Serialized with the capitalized spellings the intake forms produce
/// (`"True"`, `"False"`, `"Unknown"`); any other spelling is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    /// The finding is absent. Encoded as `0`.
    False,
    /// The finding is present. Encoded as `1`.
    True,
    /// The answer was not recorded. Encoded as `-1`.
    Unknown,
}

impl TriState {
    /// Numeric code the classifiers were trained against.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            TriState::False => 0.0,
            TriState::True => 1.0,
            TriState::Unknown => -1.0,
        }
    }

    /// Canonical form spelling of this answer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TriState::False => "False",
            TriState::True => "True",
            TriState::Unknown => "Unknown",
        }
    }

    /// Parse a raw form value, naming `field` in the error on failure.
    ///
    /// Matching is exact: lowercase or abbreviated spellings are rejected so
    /// that an upstream form change cannot silently shift an answer to a
    /// different code.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidEncoding`] when `value` is not one of
    /// `"True"`, `"False"`, or `"Unknown"`.
    pub fn from_form_value(field: &str, value: &str) -> Result<Self, ScreenError> {
        match value {
            "False" => Ok(TriState::False),
            "True" => Ok(TriState::True),
            "Unknown" => Ok(TriState::Unknown),
            other => Err(ScreenError::InvalidEncoding {
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-valued answer to a clinical yes/no question.
///
/// Shares the capitalized `"True"`/`"False"` spellings with [`TriState`] but
/// has no unknown arm: fields typed with this enum were trained strictly on
/// the 0/1 codes, and `"Unknown"` fails to parse instead of encoding as
/// `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryFlag {
    /// The finding is absent. Encoded as `0`.
    False,
    /// The finding is present. Encoded as `1`.
    True,
}

impl BinaryFlag {
    /// Numeric code the classifiers were trained against.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            BinaryFlag::False => 0.0,
            BinaryFlag::True => 1.0,
        }
    }

    /// Canonical form spelling of this answer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryFlag::False => "False",
            BinaryFlag::True => "True",
        }
    }

    /// Parse a raw form value, naming `field` in the error on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidEncoding`] when `value` is not exactly
    /// `"True"` or `"False"`; `"Unknown"` is outside this domain.
    pub fn from_form_value(field: &str, value: &str) -> Result<Self, ScreenError> {
        match value {
            "False" => Ok(BinaryFlag::False),
            "True" => Ok(BinaryFlag::True),
            other => Err(ScreenError::InvalidEncoding {
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BinaryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patient sex as encoded for the hepatitis classifier.
///
/// The training pipeline folded every non-`"male"` answer into the female
/// code, and the deserializer preserves that rule rather than rejecting
/// unexpected spellings. See [`Sex::from_form_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Sex {
    /// Encoded as `0`.
    Male,
    /// Encoded as `1`.
    Female,
}

impl Sex {
    /// Numeric code the hepatitis classifier was trained against.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            Sex::Male => 0.0,
            Sex::Female => 1.0,
        }
    }

    /// Canonical form spelling of this answer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Map a raw form value onto the trained encoding.
    ///
    /// Exactly `"male"` maps to [`Sex::Male`]; every other string, including
    /// `"Male"` and the empty string, maps to [`Sex::Female`]. This mirrors
    /// the encoding the classifier saw during training, so the permissive
    /// fallback is deliberate and load-bearing.
    #[must_use]
    pub fn from_form_value(value: &str) -> Self {
        if value == "male" { Sex::Male } else { Sex::Female }
    }
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        Sex::from_form_value(&value)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a raw tri-state form value, naming `field` in any error.
///
/// # Errors
///
/// Returns [`ScreenError::InvalidEncoding`] for values outside the
/// tri-state domain.
pub fn tri_state_code(field: &str, value: &str) -> Result<f64, ScreenError> {
    TriState::from_form_value(field, value).map(TriState::code)
}

/// Encode a raw sex form value. Total over all strings.
#[must_use]
pub fn sex_code(value: &str) -> f64 {
    Sex::from_form_value(value).code()
}
