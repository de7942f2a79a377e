/*
 * Def-Use Graph
 *
 * Array def and use nodes joined by def→use edges:
 * - petgraph arena, nodes are never removed
 * - NodeKey index lists every node inserted under a key; lookups pick the
 *   one whose version has the same origin, newest first
 * - EdgeKey index collapses duplicate (def statement, use statement) pairs
 *
 * Edges hold arena indices, so renaming a def re-keys the index without
 * touching any edge.
 */

use crate::features::array_ssa::domain::ArrayVersion;
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::features::def_use::domain::{
    Edge, EdgeKey, EdgeReason, Node, NodeKey, NodeKind, RejectedEdge,
};
use crate::shared::models::Statement;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Serialisable edge: endpoints are positions in `DefUseGraphDto::nodes`
#[derive(Debug, Clone, Serialize)]
pub struct EdgeDto {
    pub def: usize,
    #[serde(rename = "use")]
    pub use_: usize,
    pub key: EdgeKey,
    pub reason: EdgeReason,
}

/// Serializable DTO for DefUseGraph
#[derive(Debug, Clone, Serialize)]
pub struct DefUseGraphDto {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeDto>,
    pub rejected: Vec<RejectedEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DefUseStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub def_nodes: usize,
    pub use_nodes: usize,
    pub phi_nodes: usize,
    pub index_match_edges: usize,
    pub phi_edges: usize,
    pub rejected_pairs: usize,
}

#[derive(Debug, Clone)]
pub struct DefUseGraph {
    /// petgraph directed graph, def → use
    graph: DiGraph<Node, Edge>,
    /// Node key to every NodeIndex inserted under it, oldest first
    node_map: HashMap<NodeKey, Vec<NodeIndex>>,
    edge_map: HashMap<EdgeKey, EdgeIndex>,
    rejected: Vec<RejectedEdge>,
    record_rejected: bool,
}

impl Default for DefUseGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for DefUseGraph {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_dto().serialize(serializer)
    }
}

impl DefUseGraph {
    pub fn new() -> Self {
        Self::with_rejections(true)
    }

    /// Graph that keeps (or drops) the record of rejected pairs
    pub fn with_rejections(record_rejected: bool) -> Self {
        DefUseGraph {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            edge_map: HashMap::new(),
            rejected: Vec::new(),
            record_rejected,
        }
    }

    /// Insert a def node
    ///
    /// Two defs can share a key when separate branches of a loop body write
    /// the same version number; both stay reachable and a use links to the
    /// one its version came from.
    pub fn add_def(&mut self, node: Node) -> NodeIndex {
        debug_assert_eq!(node.kind, NodeKind::Def);
        let key = node.key();
        let idx = self.graph.add_node(node);
        let slot = self.node_map.entry(key.clone()).or_default();
        if !slot.is_empty() {
            debug!(key = %key, defs = slot.len() + 1, "def key shared by several nodes");
        }
        slot.push(idx);
        idx
    }

    /// Node under `key` whose version has the same origin as `version`
    ///
    /// Falls back to the newest node under the key when none matches.
    fn resolve(&self, key: &NodeKey, version: &ArrayVersion) -> Option<NodeIndex> {
        let candidates = self.node_map.get(key)?;
        candidates
            .iter()
            .rev()
            .find(|&&idx| self.graph[idx].version.same_origin(version))
            .or_else(|| candidates.last())
            .copied()
    }

    /// Insert a use node and link it to the def with the same version
    ///
    /// Returns the edge when one was added (or already existed), `None` when
    /// the pair was rejected for differing indices. A missing def is a
    /// `DanglingUse`; the use node is kept either way.
    pub fn add_use(&mut self, node: Node) -> ArraySSAResult<Option<EdgeIndex>> {
        debug_assert_eq!(node.kind, NodeKind::Use);
        let key = node.key();
        let def_key = key.opposite();
        let version = node.version.clone();
        let use_idx = self.graph.add_node(node);
        self.node_map.entry(key.clone()).or_default().push(use_idx);

        let Some(def_idx) = self.resolve(&def_key, &version) else {
            let node = &self.graph[use_idx];
            return Err(ArraySSAError::DanglingUse {
                base: key.base,
                version: key.signature.to_string(),
                statement: node.statement_id,
                block: node.block_id,
            });
        };

        Ok(self.link(def_idx, use_idx))
    }

    /// Add a def→use edge between two keyed nodes
    ///
    /// The edge exists iff both nodes exist and the def is a phi or indexes
    /// the array with the same expression as the use. The newest use under
    /// `use_` is linked to the def its version came from.
    pub fn add_edge(&mut self, def: &NodeKey, use_: &NodeKey) -> Option<EdgeIndex> {
        let use_idx = *self.node_map.get(use_)?.last()?;
        let def_idx = self.resolve(def, &self.graph[use_idx].version)?;
        if self.graph[def_idx].kind != NodeKind::Def || self.graph[use_idx].kind != NodeKind::Use {
            return None;
        }
        self.link(def_idx, use_idx)
    }

    fn link(&mut self, def_idx: NodeIndex, use_idx: NodeIndex) -> Option<EdgeIndex> {
        let def = &self.graph[def_idx];
        let use_ = &self.graph[use_idx];

        let reason = if def.is_phi() {
            EdgeReason::PhiReach
        } else if def.index == use_.index {
            EdgeReason::IndexMatch
        } else {
            debug!(
                def = %def.key(),
                def_index = def.index.as_str(),
                use_index = use_.index.as_str(),
                "index mismatch, no edge"
            );
            if self.record_rejected {
                self.rejected.push(RejectedEdge {
                    def: def.key(),
                    use_: use_.key(),
                    def_index: def.index.clone(),
                    use_index: use_.index.clone(),
                    use_statement: use_.statement_id,
                });
            }
            return None;
        };

        let key = EdgeKey::between(def, use_);
        if let Some(&existing) = self.edge_map.get(&key) {
            return Some(existing);
        }
        let idx = self.graph.add_edge(
            def_idx,
            use_idx,
            Edge {
                key: key.clone(),
                reason,
            },
        );
        self.edge_map.insert(key, idx);
        Some(idx)
    }

    /// Re-key the def of `old_base`@`old_version` as `new_base`@`new_version`
    /// produced by `stmt`
    ///
    /// The node keeps its arena slot, so edges already attached to it stay
    /// attached. Returns false (and changes nothing) when no such def exists.
    pub fn rename_def(
        &mut self,
        old_base: &str,
        old_version: &ArrayVersion,
        new_base: &str,
        new_version: ArrayVersion,
        stmt: &Statement,
    ) -> bool {
        let old_key = NodeKey::def(old_base, old_version.signature());
        let Some(idx) = self.resolve(&old_key, old_version) else {
            return false;
        };
        if let Some(slot) = self.node_map.get_mut(&old_key) {
            slot.retain(|&i| i != idx);
            if slot.is_empty() {
                self.node_map.remove(&old_key);
            }
        }
        let node = &mut self.graph[idx];
        node.rebind(stmt, new_base, new_version);
        let new_key = node.key();
        debug!(from = %old_key, to = %new_key, "def renamed");
        self.node_map.entry(new_key).or_default().push(idx);
        true
    }

    /// Newest node under `key`
    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        let &idx = self.node_map.get(key)?.last()?;
        Some(&self.graph[idx])
    }

    /// Every node under `key`, oldest first
    pub fn nodes_with_key(&self, key: &NodeKey) -> Vec<&Node> {
        self.node_map
            .get(key)
            .map(|slot| slot.iter().map(|&idx| &self.graph[idx]).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.node_map.get(key).is_some_and(|slot| !slot.is_empty())
    }

    /// Every node in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// (def, use, edge) triples in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node, &Edge)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_edge(&self, def: &NodeKey, use_: &NodeKey) -> bool {
        let (Some(defs), Some(uses)) = (self.node_map.get(def), self.node_map.get(use_)) else {
            return false;
        };
        defs.iter()
            .any(|&d| uses.iter().any(|&u| self.graph.find_edge(d, u).is_some()))
    }

    pub fn rejected(&self) -> &[RejectedEdge] {
        &self.rejected
    }

    /// Defs with an edge into any use keyed `use_`
    pub fn defs_reaching(&self, use_: &NodeKey) -> Vec<&Node> {
        self.neighbors(use_, Direction::Incoming)
    }

    /// Uses reached by any def keyed `def`
    pub fn uses_of(&self, def: &NodeKey) -> Vec<&Node> {
        self.neighbors(def, Direction::Outgoing)
    }

    fn neighbors(&self, key: &NodeKey, direction: Direction) -> Vec<&Node> {
        let Some(slot) = self.node_map.get(key) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        slot.iter()
            .flat_map(|&idx| self.graph.neighbors_directed(idx, direction))
            .filter(|&n| seen.insert(n))
            .map(|n| &self.graph[n])
            .collect()
    }

    /// Defs reaching `use_`, expanding phi defs into the defs of their inputs
    ///
    /// BFS over every use keyed `use_`; each def appears once.
    pub fn reaching_defs_transitive(&self, use_: &NodeKey) -> Vec<&Node> {
        let Some(starts) = self.node_map.get(use_) else {
            return Vec::new();
        };

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = starts
            .iter()
            .flat_map(|&start| self.graph.neighbors_directed(start, Direction::Incoming))
            .collect();
        let mut result = Vec::new();

        while let Some(idx) = queue.pop_front() {
            if !visited.insert(idx) {
                continue;
            }
            let node = &self.graph[idx];
            result.push(node);
            for input in node.version.inputs() {
                let key = NodeKey::def(node.base_name.clone(), input.signature());
                if let Some(input_idx) = self.resolve(&key, input) {
                    queue.push_back(input_idx);
                }
            }
        }
        result
    }

    /// Every node (def or use) of `base`, in insertion order
    pub fn nodes_for_base(&self, base: &str) -> Vec<&Node> {
        self.graph
            .node_weights()
            .filter(|n| n.base_name == base)
            .collect()
    }

    pub fn stats(&self) -> DefUseStats {
        let mut stats = DefUseStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            rejected_pairs: self.rejected.len(),
            ..DefUseStats::default()
        };

        for node in self.graph.node_weights() {
            match node.kind {
                NodeKind::Def => stats.def_nodes += 1,
                NodeKind::Use => stats.use_nodes += 1,
            }
            if node.is_phi() && node.is_def() {
                stats.phi_nodes += 1;
            }
        }
        for edge in self.graph.edge_weights() {
            match edge.reason {
                EdgeReason::IndexMatch => stats.index_match_edges += 1,
                EdgeReason::PhiReach => stats.phi_edges += 1,
            }
        }
        stats
    }

    pub fn to_dto(&self) -> DefUseGraphDto {
        DefUseGraphDto {
            nodes: self.graph.node_weights().cloned().collect(),
            edges: self
                .graph
                .edge_references()
                .map(|e| EdgeDto {
                    def: e.source().index(),
                    use_: e.target().index(),
                    key: e.weight().key.clone(),
                    reason: e.weight().reason,
                })
                .collect(),
            rejected: self.rejected.clone(),
        }
    }
}
