//! Per-statement versioning
//!
//! Applies one statement to the live table and records the def or use node
//! it produces. Shared by the linear pass and the loop worklist.

use super::state::AnalysisState;
use crate::features::array_ssa::domain::{ArrayVariableTable, VersionOrigin, VersionRecord};
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::features::def_use::domain::Node;
use crate::shared::models::{ArrayAccess, BlockId, Statement, StmtKind};
use tracing::{debug, warn};

impl AnalysisState {
    pub(crate) fn process_block(
        &mut self,
        block: BlockId,
        statements: &[Statement],
        table: &mut ArrayVariableTable,
    ) -> ArraySSAResult<()> {
        for stmt in statements {
            self.process_statement(block, stmt, table)?;
        }
        Ok(())
    }

    pub(crate) fn process_statement(
        &mut self,
        block: BlockId,
        stmt: &Statement,
        table: &mut ArrayVariableTable,
    ) -> ArraySSAResult<()> {
        match &stmt.kind {
            StmtKind::Write { access } => self.on_write(block, stmt, access, table),
            StmtKind::Read { access } => self.on_read(block, stmt, access, table),
            StmtKind::Create { base } => {
                self.on_create(block, stmt, base, table);
                Ok(())
            }
            StmtKind::Rename { from, to } => self.on_rename(block, stmt, from, to, table),
            StmtKind::Other => Ok(()),
        }
    }

    fn on_write(
        &mut self,
        block: BlockId,
        stmt: &Statement,
        access: &ArrayAccess,
        table: &mut ArrayVariableTable,
    ) -> ArraySSAResult<()> {
        let version = if table.contains(&access.base) {
            table.increment(&access.base, block, stmt.id, stmt.line)?
        } else {
            debug!(array = %access.base, stmt = %stmt.id, "write to untracked array starts its chain");
            table.bind_written(&access.base, block, stmt.id, stmt.line)
        };
        self.history.record(
            &access.base,
            VersionRecord::new(version.clone(), VersionOrigin::Write, Some(stmt.id)),
        );
        self.graph.add_def(Node::def(
            stmt,
            &access.base,
            version,
            access.index.clone(),
            block,
        ));
        Ok(())
    }

    fn on_read(
        &mut self,
        block: BlockId,
        stmt: &Statement,
        access: &ArrayAccess,
        table: &mut ArrayVariableTable,
    ) -> ArraySSAResult<()> {
        let Some(version) = table.mark_read(&access.base) else {
            return self.recover(ArraySSAError::DanglingUse {
                base: access.base.clone(),
                version: "none".to_string(),
                statement: Some(stmt.id),
                block,
            });
        };

        let node = Node::use_(stmt, &access.base, version, access.index.clone(), block);
        match self.graph.add_use(node) {
            Ok(_) => Ok(()),
            Err(err) => self.recover(err),
        }
    }

    fn on_create(
        &mut self,
        block: BlockId,
        stmt: &Statement,
        base: &str,
        table: &mut ArrayVariableTable,
    ) {
        let version = table.create(base, block, stmt.id, stmt.line);
        self.history.record(
            base,
            VersionRecord::new(version.clone(), VersionOrigin::Create, Some(stmt.id)),
        );
        self.new_array_statements.insert(stmt.id);
        self.graph.add_def(Node::base_def(stmt, base, version, block));
    }

    fn on_rename(
        &mut self,
        block: BlockId,
        stmt: &Statement,
        from: &str,
        to: &str,
        table: &mut ArrayVariableTable,
    ) -> ArraySSAResult<()> {
        let Some(old) = table.get(from).cloned() else {
            debug!(from, to, stmt = %stmt.id, "rename source is not a tracked array");
            return Ok(());
        };
        let moved = table.rename(from, to, block)?;

        if !self.graph.rename_def(from, &old, to, moved.clone(), stmt) {
            warn!(from, to, stmt = %stmt.id, "renamed array has no def node, inserting a base def");
            self.graph
                .add_def(Node::base_def(stmt, to, moved.clone(), block));
        }
        self.history.alias(
            from,
            to,
            VersionRecord::new(moved, VersionOrigin::Rename, Some(stmt.id)),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::features::array_ssa::domain::{DiagnosticKind, VersionSignature};
    use crate::features::def_use::domain::NodeKey;
    use crate::shared::models::StmtId;

    fn run(statements: &[Statement], config: &AnalysisConfig) -> (AnalysisState, ArrayVariableTable) {
        let mut state = AnalysisState::new(config);
        let mut table = ArrayVariableTable::new();
        state
            .process_block(BlockId(0), statements, &mut table)
            .unwrap();
        (state, table)
    }

    #[test]
    fn test_create_write_read() {
        let (state, table) = run(
            &[
                Statement::create(0, 1, "a", "a = new int[10]"),
                Statement::write(1, 2, "a", "i", "a[i] = 1"),
                Statement::read(2, 3, "a", "i", "x = a[i]"),
            ],
            &AnalysisConfig::default(),
        );

        assert_eq!(table.get("a").unwrap().version(), 1);
        assert!(table.get("a").unwrap().is_read());
        assert_eq!(state.graph.node_count(), 3);
        assert_eq!(state.graph.edge_count(), 1);
        assert!(state.new_array_statements.contains(&StmtId(0)));
        assert_eq!(state.history.chain("a").len(), 2);
        assert!(state.diagnostics.is_empty());
    }

    #[test]
    fn test_read_of_unbound_array_is_recorded() {
        let (state, _) = run(
            &[Statement::read(0, 1, "a", "i", "x = a[i]")],
            &AnalysisConfig::default(),
        );
        assert_eq!(state.graph.node_count(), 0);
        assert_eq!(state.diagnostics.len(), 1);
        assert_eq!(state.diagnostics[0].kind, DiagnosticKind::DanglingUse);
    }

    #[test]
    fn test_strict_dangling_use_is_fatal() {
        let config = AnalysisConfig::default().strict_dangling_uses(true);
        let mut state = AnalysisState::new(&config);
        let mut table = ArrayVariableTable::new();
        let err = state
            .process_block(
                BlockId(0),
                &[Statement::read(0, 1, "a", "i", "x = a[i]")],
                &mut table,
            )
            .unwrap_err();
        assert!(matches!(err, ArraySSAError::DanglingUse { .. }));
    }

    #[test]
    fn test_write_to_parameter_array() {
        let (state, table) = run(
            &[Statement::write(0, 1, "p", "0", "p[0] = 1")],
            &AnalysisConfig::default(),
        );
        assert_eq!(table.get("p").unwrap().version(), 0);
        assert!(state
            .graph
            .contains(&NodeKey::def("p", VersionSignature::Single(0))));
    }

    #[test]
    fn test_later_writes_increment_binding() {
        let (state, table) = run(
            &[
                Statement::write(0, 1, "p", "0", "p[0] = 1"),
                Statement::write(1, 2, "p", "1", "p[1] = 2"),
                Statement::write(2, 3, "p", "0", "p[0] = 3"),
            ],
            &AnalysisConfig::default(),
        );
        let current = table.get("p").unwrap();
        assert_eq!(current.version(), 2);
        assert_eq!(current.producing_stmt(), Some(StmtId(2)));
        assert_eq!(state.history.chain("p").len(), 3);
    }

    #[test]
    fn test_rename_moves_def_node() {
        let (state, table) = run(
            &[
                Statement::create(0, 1, "a", "a = new int[10]"),
                Statement::write(1, 2, "a", "i", "a[i] = 1"),
                Statement::rename(2, 3, "a", "b", "b = a"),
                Statement::read(3, 4, "b", "i", "x = b[i]"),
            ],
            &AnalysisConfig::default(),
        );

        assert!(!table.contains("a"));
        assert_eq!(table.get("b").unwrap().version(), 1);
        assert!(!state
            .graph
            .contains(&NodeKey::def("a", VersionSignature::Single(1))));
        assert!(state.graph.has_edge(
            &NodeKey::def("b", VersionSignature::Single(1)),
            &NodeKey::use_("b", VersionSignature::Single(1)),
        ));
        assert_eq!(state.history.chain("b").len(), 3);
    }

    #[test]
    fn test_rename_of_untracked_is_ignored() {
        let (state, table) = run(
            &[Statement::rename(0, 1, "x", "y", "y = x")],
            &AnalysisConfig::default(),
        );
        assert!(table.is_empty());
        assert_eq!(state.graph.node_count(), 0);
    }
}
