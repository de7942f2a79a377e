//! Shared module - Common types and utilities
//!
//! Types the front end hands to the analysis and small helpers used by
//! more than one feature.

pub mod constants;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
