//! Def-use graph edges

use super::node::{Node, NodeKey};
use crate::shared::models::{ArrayIndex, StmtId};
use serde::Serialize;

/// Statement identity of an edge endpoint
///
/// Phi defs have no source statement and are identified by their
/// synthesised text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementRef {
    Stmt(StmtId),
    Synthetic(String),
}

impl StatementRef {
    pub fn of(node: &Node) -> Self {
        match node.statement_id {
            Some(id) => Self::Stmt(id),
            None => Self::Synthetic(node.statement.clone()),
        }
    }
}

/// Identity of an edge: the def statement and the use statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    pub def: StatementRef,
    #[serde(rename = "use")]
    pub use_: StatementRef,
}

impl EdgeKey {
    pub fn between(def: &Node, use_: &Node) -> Self {
        Self {
            def: StatementRef::of(def),
            use_: StatementRef::of(use_),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeReason {
    /// Def and use index the array with the same expression
    IndexMatch,
    /// Def is a phi; it reaches every use of its version
    PhiReach,
}

/// Edge weight in the def-use graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub key: EdgeKey,
    pub reason: EdgeReason,
}

/// A (def, use) pair that shares a version but not an index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEdge {
    pub def: NodeKey,
    #[serde(rename = "use")]
    pub use_: NodeKey,
    pub def_index: ArrayIndex,
    pub use_index: ArrayIndex,
    pub use_statement: Option<StmtId>,
}
