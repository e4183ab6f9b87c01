//! CLI library components for the medical screening assistant.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
