/*
 * Array SSA Error Types
 *
 * Propagation policy:
 * - UnknownArray, BlockNotProcessed, BlockNotFound, InvalidCfg abort the procedure
 * - LoopWorklistReentry, WorklistLimitExceeded abort the enclosing loop only
 * - DanglingUse is recorded and analysis continues
 */

use crate::shared::models::{BlockId, StmtId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArraySSAError {
    /// Increment of an array that has no binding in the live table
    #[error("Unknown array '{base}' in block {block}: no prior version to increment")]
    UnknownArray { base: String, block: BlockId },

    /// Exposed table requested for a block that was never snapshotted
    #[error("Block {block} has not been processed; its exposed versions are unavailable")]
    BlockNotProcessed { block: BlockId },

    /// Use whose version has no matching def node
    #[error("Dangling use of '{base}' at version {version} in block {block}: no matching definition")]
    DanglingUse {
        base: String,
        /// Rendered version signature, `none` when the array is unbound
        version: String,
        statement: Option<StmtId>,
        block: BlockId,
    },

    /// Loop worklist reached a block that was already processed
    #[error("Block {block} re-entered by the worklist of loop {header}")]
    LoopWorklistReentry { header: BlockId, block: BlockId },

    #[error("Worklist of loop {header} exceeded {limit} iterations")]
    WorklistLimitExceeded { header: BlockId, limit: usize },

    #[error("Block not found: {block}")]
    BlockNotFound { block: BlockId },

    #[error("Invalid CFG: {reason}")]
    InvalidCfg { reason: String },
}

impl ArraySSAError {
    pub fn invalid_cfg(reason: impl Into<String>) -> Self {
        Self::InvalidCfg {
            reason: reason.into(),
        }
    }

    /// True when the error aborts the whole procedure
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::DanglingUse { .. }
                | Self::LoopWorklistReentry { .. }
                | Self::WorklistLimitExceeded { .. }
        )
    }

    /// True when the error aborts only the loop worklist that raised it
    pub fn is_loop_local(&self) -> bool {
        matches!(
            self,
            Self::LoopWorklistReentry { .. } | Self::WorklistLimitExceeded { .. }
        )
    }
}

pub type ArraySSAResult<T> = Result<T, ArraySSAError>;
