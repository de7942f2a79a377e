//! Loop worklist
//!
//! Started by the linear pass at a loop header, after the header's own
//! statements have been processed and snapshotted:
//! 1. Header successors that stay inside the loop are pushed to the front of
//!    the worklist (exit edges are set aside for the linear pass).
//! 2. Blocks are popped from the front. A merge whose predecessors are not
//!    all ready goes back to the end of the queue.
//! 3. A nested loop header merges over its ready predecessors and runs its
//!    own worklist; its exit edges stand in for its successors.
//! 4. Successors are appended once; edges back to the header mark the block
//!    as a latch, exit edges join the frontier.
//! 5. When the queue drains, the header's exposed table is rebound to the
//!    last latch snapshot so exits see the loop body's final versions.
//!
//! Re-entry and the iteration cap abort this loop only.

use super::array_ssa_builder::ArraySsaBuilder;
use crate::features::array_ssa::domain::{ArrayVariableTable, Diagnostic};
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::features::array_ssa::ports::CfgProvider;
use crate::shared::models::BlockId;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, debug_span, warn};

/// Edge leaving the loop: (block inside the loop, exit target)
pub(super) type ExitEdge = (BlockId, BlockId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LoopStep {
    /// `latch` is the block whose edge returns to the header, if any
    Processed { latch: Option<BlockId> },
    Deferred,
}

#[derive(Debug, Default)]
pub(super) struct Worklist {
    queue: VecDeque<BlockId>,
    queued: HashSet<BlockId>,
    exits: Vec<ExitEdge>,
}

impl Worklist {
    fn push_front(&mut self, block: BlockId) {
        if self.queued.insert(block) {
            self.queue.push_front(block);
        }
    }

    fn push_back(&mut self, block: BlockId) {
        if self.queued.insert(block) {
            self.queue.push_back(block);
        }
    }

    fn requeue(&mut self, block: BlockId) {
        self.queue.push_back(block);
    }

    fn pop(&mut self) -> Option<BlockId> {
        self.queue.pop_front()
    }

    fn done(&mut self, block: BlockId) {
        self.queued.remove(&block);
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<C: CfgProvider + ?Sized> ArraySsaBuilder<'_, C> {
    /// Process the loop headed by `header`; returns the loop's exit edges
    pub(super) fn run_loop_worklist(&mut self, header: BlockId) -> ArraySSAResult<Vec<ExitEdge>> {
        let span = debug_span!("loop_worklist", header = %header);
        let _guard = span.enter();

        let cfg = self.cfg;
        let limit = self.config.worklist_max_iterations;
        let mut worklist = Worklist::default();
        let mut last_latch: Option<BlockId> = None;

        for &succ in cfg.successors(header) {
            if cfg.is_loop_exit_edge(header, succ) {
                worklist.exits.push((header, succ));
            } else if succ == header {
                self.state.flow.add(header, succ, true);
            } else if self.is_claimed(succ) {
                self.state.flow.add(header, succ, cfg.is_loop_header(succ));
            } else {
                self.state.flow.add(header, succ, false);
                worklist.push_front(succ);
            }
        }

        let mut iterations = 0usize;
        let mut stalled = 0usize;

        while let Some(block) = worklist.pop() {
            iterations += 1;
            if iterations > limit {
                self.abort_loop(ArraySSAError::WorklistLimitExceeded { header, limit });
                break;
            }

            match self.process_loop_block(header, block, &mut worklist) {
                Ok(LoopStep::Processed { latch }) => {
                    stalled = 0;
                    if latch.is_some() {
                        last_latch = latch;
                    }
                }
                Ok(LoopStep::Deferred) => {
                    stalled += 1;
                    // A full pass over the queue without progress: nothing
                    // left in this loop can make the merge ready.
                    if stalled >= worklist.len() {
                        let missing = cfg
                            .predecessors(block)
                            .iter()
                            .copied()
                            .find(|&p| !self.state.exposed.contains(p))
                            .unwrap_or(block);
                        return Err(ArraySSAError::BlockNotProcessed { block: missing });
                    }
                }
                Err(err) if err.is_loop_local() => {
                    self.abort_loop(err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if let Some(latch) = last_latch {
            let table = self.state.exposed.get(latch)?.fork();
            debug!(latch = %latch, "header rebound to latch snapshot");
            self.state.exposed.snapshot(header, &table);
        }

        Ok(worklist.exits)
    }

    pub(super) fn process_loop_block(
        &mut self,
        header: BlockId,
        block: BlockId,
        worklist: &mut Worklist,
    ) -> ArraySSAResult<LoopStep> {
        if self.is_claimed(block) {
            return Err(ArraySSAError::LoopWorklistReentry { header, block });
        }

        let cfg = self.cfg;
        let preds = cfg.predecessors(block);
        let line = self.merge_line(block);

        let mut table = match preds {
            [] => ArrayVariableTable::new(),
            [pred] if cfg.is_loop_exit_edge(header, *pred) => {
                warn!(
                    block = %block,
                    pred = %pred,
                    "sole predecessor is a loop exit target, starting from an empty table"
                );
                ArrayVariableTable::new()
            }
            [pred] => self.state.exposed.get(*pred)?.fork(),
            _ if cfg.is_loop_header(block) => {
                let ready = self.state.exposed.ready_of(preds);
                if ready.is_empty() {
                    return Err(ArraySSAError::BlockNotProcessed { block: preds[0] });
                }
                self.state.merge_predecessors(block, line, &ready)?
            }
            _ if self.state.exposed.all_ready(preds) => {
                self.state.merge_predecessors(block, line, preds)?
            }
            _ => {
                debug!(block = %block, "merge not ready, requeued");
                worklist.requeue(block);
                return Ok(LoopStep::Deferred);
            }
        };

        worklist.done(block);
        self.loop_seen.insert(block);
        self.pending.remove(&block);
        self.state
            .process_block(block, cfg.statements(block), &mut table)?;
        self.state.exposed.snapshot(block, &table);

        let frontier: Vec<ExitEdge> = if block != header && cfg.is_loop_header(block) {
            debug!(inner = %block, "nested loop head, running its worklist");
            self.run_loop_worklist(block)?
        } else {
            cfg.successors(block).iter().map(|&s| (block, s)).collect()
        };

        let mut latch = None;
        for (from, succ) in frontier {
            if succ == header {
                self.state.flow.add(from, succ, true);
                latch = Some(from);
            } else if cfg.is_loop_exit_edge(header, succ) {
                worklist.exits.push((from, succ));
            } else if self.is_claimed(succ) {
                self.state.flow.add(from, succ, cfg.is_loop_header(succ));
            } else {
                self.state.flow.add(from, succ, false);
                worklist.push_back(succ);
            }
        }

        Ok(LoopStep::Processed { latch })
    }

    fn abort_loop(&mut self, err: ArraySSAError) {
        warn!(error = %err, "loop worklist aborted");
        self.state.diagnostics.push(Diagnostic::from_error(&err));
    }
}
