//! Common test utilities for array-ssa-ir
//!
//! CFG fixtures for the shapes the analysis has to handle and
//! domain-specific assertions over its output.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
