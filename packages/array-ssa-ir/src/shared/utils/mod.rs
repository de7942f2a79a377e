//! Shared utilities

pub mod naming;

pub use naming::{augment_statement, versioned_name};
