//! Request dispatch across the per-disease predictors.

use tracing::debug;

use medscreen_model::{Prediction, Result, ScreeningRequest};
use medscreen_registry::ModelBundle;

use crate::predictors;

/// Answer one screening request against an already-loaded bundle.
///
/// Dispatches on the request's analysis tag; every failure stays local to
/// this request and leaves the bundle untouched.
///
/// # Errors
///
/// Propagates the chosen predictor's validation, availability, and
/// inference errors.
pub fn screen(bundle: &ModelBundle, request: &ScreeningRequest) -> Result<Prediction> {
    debug!(analysis = %request.disease(), "dispatching screening request");
    match request {
        ScreeningRequest::Hepatitis(input) => predictors::hepatitis::predict(bundle, input),
        ScreeningRequest::Hiv(input) => predictors::hiv::predict(bundle, input),
        ScreeningRequest::Tuberculosis(input) => predictors::tuberculosis::predict(bundle, input),
    }
}
