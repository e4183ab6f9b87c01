//! Per-disease prediction logic.
//!
//! Each predictor follows the same shape: check input preconditions, fetch
//! its model from the [`ModelBundle`](medscreen_registry::ModelBundle),
//! assemble the feature vector, classify, and map the raw label onto the
//! clinical outcome phrase. Predictors never load models themselves and
//! never mutate the bundle; an unavailable model turns into a
//! [`ScreenError::ModelUnavailable`](medscreen_model::ScreenError) for that
//! one request.

pub mod hepatitis;
pub mod hiv;
pub mod tuberculosis;

use medscreen_model::ScreenError;
use medscreen_registry::ModelKey;

pub(crate) fn unavailable(key: ModelKey) -> ScreenError {
    ScreenError::ModelUnavailable {
        key: key.as_str().to_string(),
    }
}
