pub mod batch;
pub mod build_array_ssa;

pub use batch::{analyze_procedures, ProcedureOutcome};
pub use build_array_ssa::BuildArraySsaUseCase;
