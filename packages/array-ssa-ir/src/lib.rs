/*
 * Array SSA IR - Array versioning and def-use graph construction
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Front-end facing models (BlockId, Statement, ProcedureCfg)
 * - features/    : Vertical slices (array_ssa → def_use)
 * - config/      : Analysis configuration (YAML v1)
 *
 * One procedure at a time: a depth-first linear pass versions every array
 * write, a loop worklist synthesises phi versions at merges, and every
 * (def, use) pair that shares an index (or reaches through a phi) becomes an
 * edge of the def-use graph.
 */

#![allow(clippy::upper_case_acronyms)] // SSA naming
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{AnalysisConfig, ConfigError, ConfigResult, Validatable};
pub use errors::{AnalysisError, AnalysisResult};
pub use features::array_ssa::application::{
    analyze_procedures, BuildArraySsaUseCase, ProcedureOutcome,
};
pub use features::array_ssa::domain::{
    ArraySsaOutput, ArraySsaStats, ArrayVariableTable, ArrayVersion, Diagnostic, DiagnosticKind,
    DownwardExposedVersionMap, FalsePhi, FlowEdge, FlowGraph, VersionHistory, VersionOrigin,
    VersionRecord, VersionSignature,
};
pub use features::array_ssa::infrastructure::{
    analyze_procedure, ArraySSAError, ArraySSAResult, ArraySsaBuilder, DefaultArraySsaAnalyzer,
};
pub use features::array_ssa::ports::{ArraySsaAnalyzer, CfgProvider};
pub use features::def_use::domain::{Edge, EdgeKey, EdgeReason, Node, NodeKey, NodeKind};
pub use features::def_use::infrastructure::{DefUseGraph, DefUseGraphDto, DefUseStats};
pub use shared::models::{
    ArrayAccess, ArrayIndex, BasicBlock, BlockId, LoopHeadExit, ProcedureCfg,
    ProcedureCfgBuilder, Statement, StmtId, StmtKind,
};
