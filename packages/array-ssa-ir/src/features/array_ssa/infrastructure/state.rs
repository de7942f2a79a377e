//! Accumulators shared by the linear pass and the loop worklist

use crate::config::AnalysisConfig;
use crate::features::array_ssa::domain::{
    ArraySsaOutput, Diagnostic, DownwardExposedVersionMap, FalsePhi, FlowGraph, VersionHistory,
};
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::features::def_use::infrastructure::DefUseGraph;
use crate::shared::models::StmtId;
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug)]
pub(crate) struct AnalysisState {
    pub(crate) graph: DefUseGraph,
    pub(crate) exposed: DownwardExposedVersionMap,
    pub(crate) history: VersionHistory,
    pub(crate) new_array_statements: BTreeSet<StmtId>,
    pub(crate) flow: FlowGraph,
    pub(crate) false_phis: Vec<FalsePhi>,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) strict_dangling_uses: bool,
    pub(crate) prune_trivial_phis: bool,
}

impl AnalysisState {
    pub(crate) fn new(config: &AnalysisConfig) -> Self {
        Self {
            graph: DefUseGraph::with_rejections(config.record_rejected_edges),
            exposed: DownwardExposedVersionMap::new(),
            history: VersionHistory::new(),
            new_array_statements: BTreeSet::new(),
            flow: FlowGraph::new(config.record_flow_graph),
            false_phis: Vec::new(),
            diagnostics: Vec::new(),
            strict_dangling_uses: config.strict_dangling_uses,
            prune_trivial_phis: config.prune_trivial_phis,
        }
    }

    /// Record a recoverable failure, or hand it back when it must be fatal
    pub(crate) fn recover(&mut self, err: ArraySSAError) -> ArraySSAResult<()> {
        if matches!(err, ArraySSAError::DanglingUse { .. }) && self.strict_dangling_uses {
            return Err(err);
        }
        warn!(error = %err, "recoverable analysis failure");
        self.diagnostics.push(Diagnostic::from_error(&err));
        Ok(())
    }

    pub(crate) fn into_output(self, procedure_id: &str) -> ArraySsaOutput {
        ArraySsaOutput {
            procedure_id: procedure_id.to_string(),
            graph: self.graph,
            exposed: self.exposed,
            history: self.history,
            new_array_statements: self.new_array_statements,
            flow_graph: self.flow,
            false_phis: self.false_phis,
            diagnostics: self.diagnostics,
        }
    }
}
