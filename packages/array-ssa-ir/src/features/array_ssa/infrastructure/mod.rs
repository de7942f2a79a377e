//! Array SSA infrastructure
//!
//! - `statement_processor`: per-statement versioning and node creation
//! - `phi_merge`: merging predecessor tables (phi and false-phi rules)
//! - `array_ssa_builder` + `linear_pass` + `loop_worklist`: the traversal
//! - `analyzer`: `ArraySsaAnalyzer` implementation

pub mod analyzer;
pub mod array_ssa_builder;
pub mod errors;
mod linear_pass;
mod loop_worklist;
mod phi_merge;
mod state;
mod statement_processor;

pub use analyzer::{analyze_procedure, DefaultArraySsaAnalyzer};
pub use array_ssa_builder::ArraySsaBuilder;
pub use errors::{ArraySSAError, ArraySSAResult};
