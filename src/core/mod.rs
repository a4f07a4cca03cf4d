//! Core types: errors, configuration, shared path utilities.

pub mod config;
pub mod errors;
pub mod paths;
