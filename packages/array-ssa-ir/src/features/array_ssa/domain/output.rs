//! Result of analysing one procedure

use super::diagnostic::{Diagnostic, FalsePhi};
use super::exposed_map::DownwardExposedVersionMap;
use super::flow_graph::FlowGraph;
use super::variable_table::ArrayVariableTable;
use super::version_history::VersionHistory;
use crate::errors::AnalysisResult;
use crate::features::def_use::infrastructure::{DefUseGraph, DefUseStats};
use crate::shared::models::{BlockId, StmtId};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct ArraySsaOutput {
    pub procedure_id: String,
    pub graph: DefUseGraph,
    /// Table live at the end of every processed block
    pub exposed: DownwardExposedVersionMap,
    pub history: VersionHistory,
    /// Statements that create a new array
    pub new_array_statements: BTreeSet<StmtId>,
    pub flow_graph: FlowGraph,
    pub false_phis: Vec<FalsePhi>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArraySsaStats {
    pub graph: DefUseStats,
    pub arrays: usize,
    pub versions: usize,
    pub new_arrays: usize,
    pub false_phis: usize,
    pub diagnostics: usize,
    pub flow_edges: usize,
    pub back_edges: usize,
}

impl ArraySsaOutput {
    pub fn exposed_at(&self, block: BlockId) -> Option<&ArrayVariableTable> {
        self.exposed.try_get(block)
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn stats(&self) -> ArraySsaStats {
        ArraySsaStats {
            graph: self.graph.stats(),
            arrays: self.history.len(),
            versions: self.history.total_versions(),
            new_arrays: self.new_array_statements.len(),
            false_phis: self.false_phis.len(),
            diagnostics: self.diagnostics.len(),
            flow_edges: self.flow_graph.len(),
            back_edges: self.flow_graph.back_edges().count(),
        }
    }

    pub fn to_json(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
