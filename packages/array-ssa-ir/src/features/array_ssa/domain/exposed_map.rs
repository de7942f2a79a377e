//! Downward-exposed version map
//!
//! The table that is live at the end of each processed block. Successors
//! read their incoming table from here; a merge reads one table per
//! predecessor.

use super::variable_table::ArrayVariableTable;
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::shared::models::BlockId;
use ahash::AHashMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct DownwardExposedVersionMap {
    snapshots: AHashMap<BlockId, ArrayVariableTable>,
}

impl DownwardExposedVersionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `table` as the exposed state of `block`
    ///
    /// A later snapshot of the same block replaces the earlier one.
    pub fn snapshot(&mut self, block: BlockId, table: &ArrayVariableTable) {
        self.snapshots.insert(block, table.fork());
    }

    /// Exposed table of `block`; `BlockNotProcessed` if none was recorded
    pub fn get(&self, block: BlockId) -> ArraySSAResult<&ArrayVariableTable> {
        self.snapshots
            .get(&block)
            .ok_or(ArraySSAError::BlockNotProcessed { block })
    }

    pub fn try_get(&self, block: BlockId) -> Option<&ArrayVariableTable> {
        self.snapshots.get(&block)
    }

    pub fn contains(&self, block: BlockId) -> bool {
        self.snapshots.contains_key(&block)
    }

    /// True when every block in `blocks` has a snapshot
    pub fn all_ready(&self, blocks: &[BlockId]) -> bool {
        blocks.iter().all(|b| self.snapshots.contains_key(b))
    }

    /// The subset of `blocks` that has a snapshot, order preserved
    pub fn ready_of(&self, blocks: &[BlockId]) -> Vec<BlockId> {
        blocks
            .iter()
            .copied()
            .filter(|b| self.snapshots.contains_key(b))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshots ordered by block id
    pub fn sorted(&self) -> BTreeMap<BlockId, &ArrayVariableTable> {
        self.snapshots.iter().map(|(k, v)| (*k, v)).collect()
    }
}

impl Serialize for DownwardExposedVersionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}
