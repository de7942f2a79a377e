//! Diagnostics accumulated during analysis
//!
//! Recoverable failures (dangling uses) and loop-local aborts do not stop
//! the procedure; they are recorded here and returned with the output.

use crate::features::array_ssa::infrastructure::errors::ArraySSAError;
use crate::shared::models::{BlockId, StmtId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    DanglingUse,
    LoopWorklistReentry,
    WorklistLimitExceeded,
    /// A merge block none of whose predecessors became ready
    UnreachableMerge,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub block: Option<BlockId>,
    pub statement: Option<StmtId>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        block: Option<BlockId>,
        statement: Option<StmtId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            block,
            statement,
            message: message.into(),
        }
    }

    pub fn from_error(err: &ArraySSAError) -> Self {
        let (kind, block, statement) = match err {
            ArraySSAError::DanglingUse {
                block, statement, ..
            } => (DiagnosticKind::DanglingUse, Some(*block), *statement),
            ArraySSAError::LoopWorklistReentry { block, .. } => {
                (DiagnosticKind::LoopWorklistReentry, Some(*block), None)
            }
            ArraySSAError::WorklistLimitExceeded { header, .. } => {
                (DiagnosticKind::WorklistLimitExceeded, Some(*header), None)
            }
            ArraySSAError::UnknownArray { block, .. }
            | ArraySSAError::BlockNotProcessed { block }
            | ArraySSAError::BlockNotFound { block } => (DiagnosticKind::Other, Some(*block), None),
            ArraySSAError::InvalidCfg { .. } => (DiagnosticKind::Other, None, None),
        };
        Self::new(kind, block, statement, err.to_string())
    }
}

/// A merge where only some predecessors carried a version of `base`
///
/// No phi is synthesised and `base` is absent from the merged table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FalsePhi {
    pub block: BlockId,
    pub base: String,
    /// Predecessors that did carry a version
    pub contributors: Vec<BlockId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dangling_use() {
        let err = ArraySSAError::DanglingUse {
            base: "a".to_string(),
            version: "1".to_string(),
            statement: Some(StmtId(4)),
            block: BlockId(2),
        };
        let diag = Diagnostic::from_error(&err);
        assert_eq!(diag.kind, DiagnosticKind::DanglingUse);
        assert_eq!(diag.block, Some(BlockId(2)));
        assert_eq!(diag.statement, Some(StmtId(4)));
        assert!(diag.message.contains("'a'"));
    }

    #[test]
    fn test_from_loop_abort() {
        let err = ArraySSAError::WorklistLimitExceeded {
            header: BlockId(1),
            limit: 10,
        };
        let diag = Diagnostic::from_error(&err);
        assert_eq!(diag.kind, DiagnosticKind::WorklistLimitExceeded);
        assert_eq!(diag.block, Some(BlockId(1)));
    }
}
