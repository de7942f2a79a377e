//! Custom assertions over analysis output

use array_ssa_ir::{ArraySsaOutput, BlockId, EdgeReason, NodeKind};

/// Assert that the analysis recorded no diagnostics
pub fn assert_no_diagnostics(output: &ArraySsaOutput) {
    assert!(
        output.diagnostics.is_empty(),
        "Expected no diagnostics, got: {:?}",
        output.diagnostics
    );
}

/// Version of `base` live at the end of `block`
pub fn exposed_version(output: &ArraySsaOutput, block: u32, base: &str) -> Option<u32> {
    output
        .exposed_at(BlockId(block))
        .and_then(|t| t.get(base))
        .map(|v| v.version())
}

/// Assert every edge joins a def and a use of the same version and respects
/// the index-or-phi rule
pub fn assert_edges_well_formed(output: &ArraySsaOutput) {
    for (def, use_, edge) in output.graph.edges() {
        assert_eq!(def.kind, NodeKind::Def, "edge source must be a def: {:?}", def);
        assert_eq!(use_.kind, NodeKind::Use, "edge target must be a use: {:?}", use_);
        assert_eq!(def.base_name, use_.base_name);
        assert_eq!(def.version.signature(), use_.version.signature());
        match edge.reason {
            EdgeReason::PhiReach => assert!(def.is_phi()),
            EdgeReason::IndexMatch => assert_eq!(def.index, use_.index),
        }
    }
}

/// Assert every phi has at least two inputs and is numbered one past the
/// largest input
pub fn assert_phis_well_formed(output: &ArraySsaOutput) {
    for node in output.graph.nodes().filter(|n| n.is_phi()) {
        let inputs = node.version.inputs();
        assert!(inputs.len() >= 2, "phi with {} inputs", inputs.len());
        let max = inputs.iter().map(|v| v.version()).max().unwrap_or(0);
        assert_eq!(node.version.version(), max + 1);
    }
}

/// Assert every use is linked to the def its version came from
///
/// An index-match edge must join a def and a use of the same version, and a
/// use with a def of its own version that could reach it (a phi, or a write
/// through the same index) must have an edge from one of those defs.
pub fn assert_uses_linked_by_origin(output: &ArraySsaOutput) {
    let graph = &output.graph;
    for (def, use_, edge) in graph.edges() {
        if edge.reason == EdgeReason::IndexMatch {
            assert!(
                def.version.same_origin(&use_.version),
                "index-match edge joins different versions: {:?} -> {:?}",
                def,
                use_
            );
        }
    }

    for use_ in graph.nodes().filter(|n| n.kind == NodeKind::Use) {
        let linkable: Vec<_> = graph
            .nodes()
            .filter(|d| d.kind == NodeKind::Def && d.base_name == use_.base_name)
            .filter(|d| d.version.same_origin(&use_.version))
            .filter(|d| d.is_phi() || d.index == use_.index)
            .collect();
        if linkable.is_empty() {
            continue;
        }
        let linked = graph.edges().any(|(d, u, _)| {
            std::ptr::eq(u, use_) && linkable.iter().any(|&l| std::ptr::eq(d, l))
        });
        assert!(
            linked,
            "use at {:?} has a def of its version but no edge from it",
            use_.statement_id
        );
    }
}
