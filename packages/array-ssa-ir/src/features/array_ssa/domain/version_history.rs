//! Per-array version chains
//!
//! Every version the traversal produces is appended to the chain of its base
//! name, in production order. Downstream consumers (constraint generation)
//! walk these chains instead of re-deriving versions from the graph.

use super::array_version::ArrayVersion;
use crate::shared::models::{BlockId, StmtId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionOrigin {
    Create,
    Write,
    Phi,
    Rename,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub version: ArrayVersion,
    pub origin: VersionOrigin,
    pub block: BlockId,
    /// `None` for phi versions
    pub statement: Option<StmtId>,
    pub line: u32,
}

impl VersionRecord {
    pub fn new(version: ArrayVersion, origin: VersionOrigin, statement: Option<StmtId>) -> Self {
        Self {
            block: version.producing_block(),
            line: version.line(),
            version,
            origin,
            statement,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct VersionHistory {
    chains: BTreeMap<String, Vec<VersionRecord>>,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, base: &str, record: VersionRecord) {
        self.chains.entry(base.to_string()).or_default().push(record);
    }

    /// Start the chain of `to` as a copy of the chain of `from`, followed by
    /// `record`
    pub fn alias(&mut self, from: &str, to: &str, record: VersionRecord) {
        let mut chain = self.chains.get(from).cloned().unwrap_or_default();
        chain.push(record);
        self.chains.insert(to.to_string(), chain);
    }

    pub fn chain(&self, base: &str) -> &[VersionRecord] {
        self.chains.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn total_versions(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }
}
