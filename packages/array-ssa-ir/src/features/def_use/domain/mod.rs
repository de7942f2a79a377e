//! Def-use domain models

pub mod edge;
pub mod node;

pub use crate::features::array_ssa::domain::VersionSignature;
pub use edge::{Edge, EdgeKey, EdgeReason, RejectedEdge, StatementRef};
pub use node::{Node, NodeKey, NodeKind};
