//! Shared models
//!
//! Value types produced by the front end: block and statement identities,
//! the closed statement classification, and the in-memory CFG.

pub mod cfg;
pub mod ids;
pub mod statement;

pub use cfg::{BasicBlock, ProcedureCfg, ProcedureCfgBuilder};
pub use ids::{BlockId, StmtId};
pub use statement::{ArrayAccess, ArrayIndex, LoopHeadExit, Statement, StmtKind};
