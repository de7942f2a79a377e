//! Features module - vertical slices of the analysis
//!
//! - `array_ssa`: version tables, the linear pass and the loop worklist
//! - `def_use`: the def-use graph the traversal populates

pub mod array_ssa;
pub mod def_use;
