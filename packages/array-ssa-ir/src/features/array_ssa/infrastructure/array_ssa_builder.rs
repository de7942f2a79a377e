/*
 * Array SSA Builder
 *
 * Drives the analysis of one procedure:
 * 1. Linear pass: depth-first over the CFG from the entry, forking the live
 *    table at every branch (linear_pass.rs)
 * 2. Loop worklist: started at each loop header the linear pass reaches,
 *    runs to completion before the linear pass resumes at the loop exits
 *    (loop_worklist.rs)
 *
 * Each block is processed exactly once, by whichever pass claims it first.
 */

use super::state::AnalysisState;
use crate::config::AnalysisConfig;
use crate::features::array_ssa::domain::ArraySsaOutput;
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::features::array_ssa::ports::CfgProvider;
use crate::shared::models::BlockId;
use std::collections::{BTreeSet, HashSet};
use tracing::{info, info_span};

pub struct ArraySsaBuilder<'a, C: CfgProvider + ?Sized> {
    pub(super) cfg: &'a C,
    pub(super) config: &'a AnalysisConfig,
    pub(super) state: AnalysisState,
    /// Blocks processed by the linear pass
    pub(super) linear_seen: HashSet<BlockId>,
    /// Blocks processed by any loop worklist
    pub(super) loop_seen: HashSet<BlockId>,
    /// Merge blocks waiting for predecessor snapshots
    pub(super) pending: BTreeSet<BlockId>,
}

impl<'a, C: CfgProvider + ?Sized> ArraySsaBuilder<'a, C> {
    pub fn new(cfg: &'a C, config: &'a AnalysisConfig) -> Self {
        Self {
            cfg,
            config,
            state: AnalysisState::new(config),
            linear_seen: HashSet::new(),
            loop_seen: HashSet::new(),
            pending: BTreeSet::new(),
        }
    }

    /// Run both passes and return the finished graph and tables
    pub fn build(mut self) -> ArraySSAResult<ArraySsaOutput> {
        let cfg = self.cfg;
        let span = info_span!("array_ssa", procedure = %cfg.procedure_id());
        let _guard = span.enter();

        let entry = cfg.entry();
        if !cfg.contains_block(entry) {
            return Err(ArraySSAError::BlockNotFound { block: entry });
        }

        self.run_linear_pass()?;

        let output = self.state.into_output(cfg.procedure_id());
        let stats = output.stats();
        info!(
            nodes = stats.graph.node_count,
            edges = stats.graph.edge_count,
            phis = stats.graph.phi_nodes,
            false_phis = stats.false_phis,
            diagnostics = stats.diagnostics,
            "array SSA built"
        );
        Ok(output)
    }

    /// True once either pass has processed `block`
    pub(super) fn is_claimed(&self, block: BlockId) -> bool {
        self.linear_seen.contains(&block) || self.loop_seen.contains(&block)
    }

    /// Line attributed to phis synthesised at `block`
    pub(super) fn merge_line(&self, block: BlockId) -> u32 {
        self.cfg.statements(block).first().map_or(0, |s| s.line)
    }
}
