//! Linear pass
//!
//! Iterative depth-first traversal from the entry block. Each successor gets
//! its own fork of the exposed table of the block it is reached from.
//!
//! - A merge block waits in `pending` until every predecessor has a snapshot.
//! - A loop header merges over the predecessors that are ready (the forward
//!   ones), then hands its loop to the worklist; the pass resumes at the
//!   loop's exit edges.
//! - Merges still pending when the stack drains (some predecessor is never
//!   reached) are merged over their ready predecessors.

use super::array_ssa_builder::ArraySsaBuilder;
use crate::features::array_ssa::domain::{ArrayVariableTable, Diagnostic, DiagnosticKind};
use crate::features::array_ssa::infrastructure::errors::ArraySSAResult;
use crate::features::array_ssa::ports::CfgProvider;
use crate::shared::models::BlockId;
use tracing::{debug, info, warn};

type Frame = (BlockId, ArrayVariableTable);

impl<C: CfgProvider + ?Sized> ArraySsaBuilder<'_, C> {
    pub(super) fn run_linear_pass(&mut self) -> ArraySSAResult<()> {
        let cfg = self.cfg;
        let mut stack: Vec<Frame> = vec![(cfg.entry(), ArrayVariableTable::new())];

        loop {
            while let Some((block, incoming)) = stack.pop() {
                self.visit(block, incoming, &mut stack)?;
            }

            let Some(block) = self.next_resolvable_pending() else {
                break;
            };
            self.pending.remove(&block);
            let ready = self.state.exposed.ready_of(cfg.predecessors(block));
            debug!(
                block = %block,
                ready = ready.len(),
                predecessors = cfg.predecessors(block).len(),
                "merging over ready predecessors only"
            );
            let line = self.merge_line(block);
            let table = self.state.merge_predecessors(block, line, &ready)?;
            self.enter_block(block, table, &mut stack)?;
        }

        for block in std::mem::take(&mut self.pending) {
            if self.is_claimed(block) {
                continue;
            }
            warn!(block = %block, "merge block has no processed predecessor");
            self.state.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnreachableMerge,
                Some(block),
                None,
                format!("merge block {} has no processed predecessor", block),
            ));
        }
        Ok(())
    }

    fn visit(
        &mut self,
        block: BlockId,
        incoming: ArrayVariableTable,
        stack: &mut Vec<Frame>,
    ) -> ArraySSAResult<()> {
        if self.is_claimed(block) {
            return Ok(());
        }

        let cfg = self.cfg;
        let preds = cfg.predecessors(block);
        let line = self.merge_line(block);

        let table = if preds.len() < 2 {
            incoming
        } else if cfg.is_loop_header(block) {
            let ready = self.state.exposed.ready_of(preds);
            if ready.len() < 2 {
                incoming
            } else {
                self.state.merge_predecessors(block, line, &ready)?
            }
        } else if self.state.exposed.all_ready(preds) {
            self.pending.remove(&block);
            self.state.merge_predecessors(block, line, preds)?
        } else {
            if self.pending.insert(block) {
                debug!(block = %block, "merge deferred until all predecessors are processed");
            }
            return Ok(());
        };

        self.enter_block(block, table, stack)
    }

    fn enter_block(
        &mut self,
        block: BlockId,
        mut table: ArrayVariableTable,
        stack: &mut Vec<Frame>,
    ) -> ArraySSAResult<()> {
        let cfg = self.cfg;
        self.linear_seen.insert(block);
        self.state
            .process_block(block, cfg.statements(block), &mut table)?;
        self.state.exposed.snapshot(block, &table);

        let frontier: Vec<(BlockId, BlockId)> = if cfg.is_loop_header(block) {
            info!(header = %block, "loop head found, starting worklist");
            self.run_loop_worklist(block)?
        } else {
            cfg.successors(block).iter().map(|&s| (block, s)).collect()
        };

        // Reverse so the first successor is visited first.
        for &(from, succ) in frontier.iter().rev() {
            if self.is_claimed(succ) {
                self.state.flow.add(from, succ, cfg.is_loop_header(succ));
                continue;
            }
            self.state.flow.add(from, succ, false);
            let table = self.state.exposed.get(from)?.fork();
            stack.push((succ, table));
        }
        Ok(())
    }

    fn next_resolvable_pending(&self) -> Option<BlockId> {
        self.pending.iter().copied().find(|&block| {
            !self.is_claimed(block)
                && !self
                    .state
                    .exposed
                    .ready_of(self.cfg.predecessors(block))
                    .is_empty()
        })
    }
}
