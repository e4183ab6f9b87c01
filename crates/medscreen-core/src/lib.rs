//! Screening engine: predictors and request dispatch.
//!
//! This crate turns typed intake forms into predictions using the models a
//! [`ModelBundle`](medscreen_registry::ModelBundle) managed to load. It owns
//! the per-disease label mapping and the request-level error contract;
//! artifact loading lives in `medscreen-registry` and the shared data types
//! in `medscreen-model`.

pub mod predictors;
pub mod screen;

pub use screen::screen;
