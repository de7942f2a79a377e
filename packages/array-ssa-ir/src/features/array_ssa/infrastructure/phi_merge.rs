//! Merging predecessor tables
//!
//! For every base name seen in any predecessor:
//! - carried by every predecessor → phi over the predecessor versions
//! - carried by only some → false phi, the name is absent afterwards
//!
//! With trivial-phi pruning on, a merge whose inputs are all the same
//! version reuses that version.

use super::state::AnalysisState;
use crate::features::array_ssa::domain::{
    ArrayVariableTable, ArrayVersion, FalsePhi, VersionOrigin, VersionRecord,
};
use crate::features::array_ssa::infrastructure::errors::ArraySSAResult;
use crate::features::def_use::domain::Node;
use crate::shared::models::BlockId;
use std::collections::BTreeSet;
use tracing::{debug, info};

impl AnalysisState {
    /// Live table at the start of `block`, built from the exposed tables of
    /// `preds`
    ///
    /// Fails with `BlockNotProcessed` if any predecessor has no snapshot. A
    /// single predecessor is copied unchanged.
    pub(crate) fn merge_predecessors(
        &mut self,
        block: BlockId,
        line: u32,
        preds: &[BlockId],
    ) -> ArraySSAResult<ArrayVariableTable> {
        let tables = preds
            .iter()
            .map(|&p| self.exposed.get(p).map(ArrayVariableTable::fork))
            .collect::<ArraySSAResult<Vec<_>>>()?;

        if tables.len() < 2 {
            return Ok(tables.into_iter().next().unwrap_or_default());
        }

        let names: BTreeSet<&str> = tables.iter().flat_map(|t| t.names()).collect();
        let mut merged = ArrayVariableTable::new();

        for name in names {
            let inputs: Vec<ArrayVersion> = tables
                .iter()
                .filter_map(|t| t.get(name).cloned())
                .collect();

            if inputs.len() < tables.len() {
                let contributors: Vec<BlockId> = preds
                    .iter()
                    .zip(&tables)
                    .filter(|(_, t)| t.contains(name))
                    .map(|(p, _)| *p)
                    .collect();
                info!(
                    block = %block,
                    array = name,
                    carried_by = contributors.len(),
                    predecessors = tables.len(),
                    "false phi: array not carried by every predecessor"
                );
                self.false_phis.push(FalsePhi {
                    block,
                    base: name.to_string(),
                    contributors,
                });
                continue;
            }

            if self.prune_trivial_phis && ArrayVersion::is_trivial_merge(&inputs) {
                let read = inputs.iter().any(ArrayVersion::is_read);
                if let Some(first) = inputs.into_iter().next() {
                    debug!(block = %block, array = name, "trivial merge, reusing input version");
                    merged.insert(name, if read { first.mark_read() } else { first });
                }
                continue;
            }

            let Some(phi) = ArrayVersion::make_phi(inputs, block, line) else {
                continue;
            };
            debug!(
                block = %block,
                array = name,
                version = phi.version(),
                "phi synthesised"
            );
            self.history
                .record(name, VersionRecord::new(phi.clone(), VersionOrigin::Phi, None));
            self.graph.add_def(Node::phi(name, phi.clone(), block));
            merged.insert(name, phi);
        }

        Ok(merged)
    }
}
