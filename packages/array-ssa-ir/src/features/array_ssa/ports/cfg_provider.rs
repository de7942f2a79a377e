//! CFG provider port
//!
//! The front end's view of one procedure. Implementations answer structural
//! queries only; all versioning state lives in the analysis.

use crate::shared::models::{BlockId, LoopHeadExit, Statement, StmtId};

pub trait CfgProvider {
    fn procedure_id(&self) -> &str;

    fn entry(&self) -> BlockId;

    fn block_ids(&self) -> Vec<BlockId>;

    fn contains_block(&self, block: BlockId) -> bool;

    /// Statements of `block` in execution order; empty for unknown blocks
    fn statements(&self, block: BlockId) -> &[Statement];

    fn predecessors(&self, block: BlockId) -> &[BlockId];

    fn successors(&self, block: BlockId) -> &[BlockId];

    /// (header head statement, exit head statement) pairs
    fn loop_head_exits(&self) -> &[LoopHeadExit];

    /// First statement of `block`, the block's identity in loop metadata
    fn head_statement(&self, block: BlockId) -> Option<StmtId> {
        self.statements(block).first().map(|s| s.id)
    }

    fn is_loop_header(&self, block: BlockId) -> bool {
        self.head_statement(block)
            .is_some_and(|head| self.loop_head_exits().iter().any(|p| p.header == head))
    }

    /// Head statements of the exit targets of the loop headed by `header`
    fn loop_exits_of(&self, header: BlockId) -> Vec<StmtId> {
        let Some(head) = self.head_statement(header) else {
            return Vec::new();
        };
        self.loop_head_exits()
            .iter()
            .filter(|p| p.header == head)
            .map(|p| p.exit)
            .collect()
    }

    /// True when `header → target` leaves the loop headed by `header`
    fn is_loop_exit_edge(&self, header: BlockId, target: BlockId) -> bool {
        match (self.head_statement(header), self.head_statement(target)) {
            (Some(h), Some(t)) => self
                .loop_head_exits()
                .iter()
                .any(|p| p.header == h && p.exit == t),
            _ => false,
        }
    }
}
