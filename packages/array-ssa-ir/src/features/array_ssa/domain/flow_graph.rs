//! Block-level flow graph recorded during traversal
//!
//! Consumed by the rendering collaborator; edges returning to a loop header
//! are flagged as back edges.

use crate::shared::models::BlockId;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FlowEdge {
    pub from: BlockId,
    pub to: BlockId,
    pub back_edge: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowGraph {
    #[serde(skip)]
    enabled: bool,
    edges: BTreeSet<FlowEdge>,
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FlowGraph {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            edges: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, from: BlockId, to: BlockId, back_edge: bool) {
        if self.enabled {
            self.edges.insert(FlowEdge { from, to, back_edge });
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    pub fn back_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter().filter(|e| e.back_edge)
    }

    pub fn contains(&self, from: BlockId, to: BlockId) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
