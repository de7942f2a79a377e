//! Array variable table
//!
//! Maps each live array base name to its current version. Tables are plain
//! values: every CFG fork works on its own copy (`fork`), so a write in one
//! branch is never visible in a sibling branch.

use super::array_version::{ArrayVersion, SingleVersion};
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::shared::models::{BlockId, StmtId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArrayVariableTable {
    vars: BTreeMap<String, ArrayVersion>,
}

impl ArrayVariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent copy for a CFG successor
    pub fn fork(&self) -> Self {
        self.clone()
    }

    pub fn get(&self, base: &str) -> Option<&ArrayVersion> {
        self.vars.get(base)
    }

    pub fn contains(&self, base: &str) -> bool {
        self.vars.contains_key(base)
    }

    /// Bind `base` to `version`, returning the previous binding
    pub fn insert(&mut self, base: impl Into<String>, version: ArrayVersion) -> Option<ArrayVersion> {
        self.vars.insert(base.into(), version)
    }

    pub fn remove(&mut self, base: &str) -> Option<ArrayVersion> {
        self.vars.remove(base)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Base names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArrayVersion)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Bind `base` to a fresh version 0, discarding any prior binding
    pub fn create(&mut self, base: &str, block: BlockId, stmt: StmtId, line: u32) -> ArrayVersion {
        let version = ArrayVersion::new_single(block, stmt, line);
        self.vars.insert(base.to_string(), version.clone());
        version
    }

    /// Replace the binding of `base` with its next version
    ///
    /// Fails with `UnknownArray` when `base` has no binding.
    pub fn increment(
        &mut self,
        base: &str,
        block: BlockId,
        stmt: StmtId,
        line: u32,
    ) -> ArraySSAResult<ArrayVersion> {
        let current = self
            .vars
            .get_mut(base)
            .ok_or_else(|| ArraySSAError::UnknownArray {
                base: base.to_string(),
                block,
            })?;
        let next = current.increment(block, stmt, line);
        *current = next.clone();
        Ok(next)
    }

    /// Bind an array the table has never seen (a parameter or field) to a
    /// written version 0
    ///
    /// Writes to a bound array go through `increment`.
    pub fn bind_written(
        &mut self,
        base: &str,
        block: BlockId,
        stmt: StmtId,
        line: u32,
    ) -> ArrayVersion {
        let version = ArrayVersion::Single(SingleVersion {
            written: true,
            ..SingleVersion::initial(block, stmt, line)
        });
        self.vars.insert(base.to_string(), version.clone());
        version
    }

    /// Latch the read flag on the binding of `base` and return the latched
    /// version; `None` when `base` is unbound.
    pub fn mark_read(&mut self, base: &str) -> Option<ArrayVersion> {
        let current = self.vars.get_mut(base)?;
        let latched = current.mark_read();
        *current = latched.clone();
        Some(latched)
    }

    /// Move the binding of `from` to `to`, keeping the version value
    ///
    /// Returns the moved version. `from` no longer appears in the table.
    pub fn rename(
        &mut self,
        from: &str,
        to: &str,
        block: BlockId,
    ) -> ArraySSAResult<ArrayVersion> {
        let version = self
            .vars
            .remove(from)
            .ok_or_else(|| ArraySSAError::UnknownArray {
                base: from.to_string(),
                block,
            })?;
        self.vars.insert(to.to_string(), version.clone());
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_increment() {
        let mut table = ArrayVariableTable::new();
        let v0 = table.create("a", BlockId(0), StmtId(0), 1);
        assert_eq!(v0.version(), 0);

        let v1 = table.increment("a", BlockId(0), StmtId(1), 2).unwrap();
        assert_eq!(v1.version(), 1);
        assert_eq!(table.get("a"), Some(&v1));
    }

    #[test]
    fn test_increment_unknown_array() {
        let mut table = ArrayVariableTable::new();
        let err = table.increment("a", BlockId(2), StmtId(0), 1).unwrap_err();
        assert_eq!(
            err,
            ArraySSAError::UnknownArray {
                base: "a".to_string(),
                block: BlockId(2)
            }
        );
    }

    #[test]
    fn test_bind_written_starts_at_zero() {
        let mut table = ArrayVariableTable::new();
        let v = table.bind_written("param", BlockId(0), StmtId(3), 1);
        assert_eq!(v.version(), 0);
        assert!(v.is_written());

        let v = table.increment("param", BlockId(0), StmtId(4), 2).unwrap();
        assert_eq!(v.version(), 1);
    }

    #[test]
    fn test_create_resets_version() {
        let mut table = ArrayVariableTable::new();
        table.create("a", BlockId(0), StmtId(0), 1);
        table.increment("a", BlockId(0), StmtId(1), 2).unwrap();
        let fresh = table.create("a", BlockId(0), StmtId(2), 3);
        assert_eq!(fresh.version(), 0);
    }

    #[test]
    fn test_fork_is_independent() {
        let mut parent = ArrayVariableTable::new();
        parent.create("a", BlockId(0), StmtId(0), 1);

        let mut left = parent.fork();
        let right = parent.fork();
        left.increment("a", BlockId(1), StmtId(1), 2).unwrap();

        assert_eq!(left.get("a").map(ArrayVersion::version), Some(1));
        assert_eq!(right.get("a").map(ArrayVersion::version), Some(0));
        assert_eq!(parent.get("a").map(ArrayVersion::version), Some(0));
    }

    #[test]
    fn test_mark_read() {
        let mut table = ArrayVariableTable::new();
        assert!(table.mark_read("a").is_none());

        table.create("a", BlockId(0), StmtId(0), 1);
        let read = table.mark_read("a").unwrap();
        assert!(read.is_read());
        assert!(table.get("a").unwrap().is_read());
        assert_eq!(read.version(), 0);
    }

    #[test]
    fn test_rename_moves_binding() {
        let mut table = ArrayVariableTable::new();
        table.create("a", BlockId(0), StmtId(0), 1);
        let v1 = table.increment("a", BlockId(0), StmtId(1), 2).unwrap();

        let moved = table.rename("a", "b", BlockId(0)).unwrap();
        assert_eq!(moved, v1);
        assert!(!table.contains("a"));
        assert_eq!(table.get("b"), Some(&v1));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_rename_unknown() {
        let mut table = ArrayVariableTable::new();
        assert!(matches!(
            table.rename("a", "b", BlockId(0)),
            Err(ArraySSAError::UnknownArray { .. })
        ));
    }
}
