//! Array versions
//!
//! A version is an immutable value. "Changing" a version (marking it read,
//! incrementing it) always produces a new value; tables hold the current
//! value for each base name.

use crate::shared::constants::naming::{PHI_FUNCTION, VERSION_SEPARATOR};
use crate::shared::models::{BlockId, StmtId};
use crate::shared::utils::versioned_name;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Version produced by one statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SingleVersion {
    pub version: u32,
    pub producing_block: BlockId,
    pub producing_stmt: StmtId,
    pub line: u32,
    /// One-way latch: set when produced by a write
    pub written: bool,
    /// One-way latch: set once the version has been read
    pub read: bool,
}

/// Version synthesised where control flow merges
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhiVersion {
    pub version: u32,
    /// Always at least two inputs, in predecessor order
    pub inputs: Arc<[ArrayVersion]>,
    pub producing_block: BlockId,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArrayVersion {
    Single(SingleVersion),
    Phi(PhiVersion),
}

/// Version component of a node key
///
/// Single versions contribute their number; phi versions contribute the
/// ordered list of their input numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum VersionSignature {
    Single(u32),
    Phi(Vec<u32>),
}

impl fmt::Display for VersionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(v) => write!(f, "{}", v),
            Self::Phi(inputs) => {
                for (i, v) in inputs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(VERSION_SEPARATOR)?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
        }
    }
}

impl SingleVersion {
    /// Version 0 with both latches clear
    pub fn initial(block: BlockId, stmt: StmtId, line: u32) -> Self {
        Self {
            version: 0,
            producing_block: block,
            producing_stmt: stmt,
            line,
            written: false,
            read: false,
        }
    }
}

impl ArrayVersion {
    /// Fresh version 0, neither written nor read
    pub fn new_single(block: BlockId, stmt: StmtId, line: u32) -> Self {
        Self::Single(SingleVersion::initial(block, stmt, line))
    }

    /// Next version after `self`, produced by a write at `stmt`
    ///
    /// The result is a written Single version numbered `self.version() + 1`,
    /// whatever kind `self` is.
    pub fn increment(&self, block: BlockId, stmt: StmtId, line: u32) -> Self {
        Self::Single(SingleVersion {
            version: self.version() + 1,
            producing_block: block,
            producing_stmt: stmt,
            line,
            written: true,
            read: false,
        })
    }

    /// Phi over `inputs`, numbered one past the largest input
    ///
    /// Returns `None` for fewer than two inputs: a merge with a single
    /// contributor is a copy, not a phi.
    pub fn make_phi(inputs: Vec<ArrayVersion>, block: BlockId, line: u32) -> Option<Self> {
        if inputs.len() < 2 {
            return None;
        }
        let version = inputs.iter().map(ArrayVersion::version).max()? + 1;
        Some(Self::Phi(PhiVersion {
            version,
            inputs: inputs.into(),
            producing_block: block,
            line,
        }))
    }

    pub fn version(&self) -> u32 {
        match self {
            Self::Single(s) => s.version,
            Self::Phi(p) => p.version,
        }
    }

    pub fn is_phi(&self) -> bool {
        matches!(self, Self::Phi(_))
    }

    pub fn producing_block(&self) -> BlockId {
        match self {
            Self::Single(s) => s.producing_block,
            Self::Phi(p) => p.producing_block,
        }
    }

    /// Statement that produced this version; phi versions have none
    pub fn producing_stmt(&self) -> Option<StmtId> {
        match self {
            Self::Single(s) => Some(s.producing_stmt),
            Self::Phi(_) => None,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Self::Single(s) => s.line,
            Self::Phi(p) => p.line,
        }
    }

    pub fn inputs(&self) -> &[ArrayVersion] {
        match self {
            Self::Single(_) => &[],
            Self::Phi(p) => &p.inputs,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Single(s) if s.written)
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Self::Single(s) if s.read)
    }

    /// Copy of this version with the read latch set
    ///
    /// Phi versions carry no latches and are returned unchanged.
    pub fn mark_read(&self) -> Self {
        match self {
            Self::Single(s) => Self::Single(SingleVersion {
                read: true,
                ..s.clone()
            }),
            Self::Phi(_) => self.clone(),
        }
    }

    pub fn signature(&self) -> VersionSignature {
        match self {
            Self::Single(s) => VersionSignature::Single(s.version),
            Self::Phi(p) => VersionSignature::Phi(p.inputs.iter().map(|i| i.version()).collect()),
        }
    }

    /// Name used in augmented statements (`a_3`)
    pub fn versioned_name(&self, base: &str) -> String {
        versioned_name(base, self.version())
    }

    /// Synthesised phi statement: `a_3 = phi(a_1, a);`
    ///
    /// Inputs at version 0 print as the bare base name. `None` for Single
    /// versions.
    pub fn phi_statement(&self, base: &str) -> Option<String> {
        let Self::Phi(phi) = self else {
            return None;
        };
        let args: Vec<String> = phi
            .inputs
            .iter()
            .map(|input| match input.version() {
                0 => base.to_string(),
                v => versioned_name(base, v),
            })
            .collect();
        Some(format!(
            "{} = {}({});",
            versioned_name(base, phi.version),
            PHI_FUNCTION,
            args.join(", ")
        ))
    }

    /// True when `self` and `other` are the same version of an array,
    /// whatever their read/write latches say
    ///
    /// Single versions are identified by number and producing statement;
    /// phi versions by number, merge block and inputs.
    pub fn same_origin(&self, other: &ArrayVersion) -> bool {
        match (self, other) {
            (Self::Single(a), Self::Single(b)) => {
                a.version == b.version
                    && a.producing_block == b.producing_block
                    && a.producing_stmt == b.producing_stmt
            }
            (Self::Phi(a), Self::Phi(b)) => {
                a.version == b.version
                    && a.producing_block == b.producing_block
                    && a.inputs.len() == b.inputs.len()
                    && a.inputs.iter().zip(b.inputs.iter()).all(|(x, y)| x.same_origin(y))
            }
            _ => false,
        }
    }

    /// True when every input of a merge is the same version
    pub fn is_trivial_merge(inputs: &[ArrayVersion]) -> bool {
        match inputs.split_first() {
            Some((first, rest)) => rest.iter().all(|v| v.same_origin(first)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(version: u32, block: u32, stmt: u32) -> ArrayVersion {
        ArrayVersion::Single(SingleVersion {
            version,
            producing_block: BlockId(block),
            producing_stmt: StmtId(stmt),
            line: 0,
            written: version > 0,
            read: false,
        })
    }

    #[test]
    fn test_new_single_is_version_zero() {
        let v = ArrayVersion::new_single(BlockId(0), StmtId(1), 4);
        assert_eq!(v.version(), 0);
        assert!(!v.is_written());
        assert!(!v.is_read());
        assert_eq!(v.producing_stmt(), Some(StmtId(1)));
    }

    #[test]
    fn test_increment_sets_written() {
        let v0 = ArrayVersion::new_single(BlockId(0), StmtId(0), 1);
        let v1 = v0.increment(BlockId(2), StmtId(5), 7);
        assert_eq!(v1.version(), 1);
        assert!(v1.is_written());
        assert_eq!(v1.producing_block(), BlockId(2));
        assert_eq!(v0.version(), 0, "increment never mutates its input");
    }

    #[test]
    fn test_increment_of_phi() {
        let phi = ArrayVersion::make_phi(vec![single(1, 1, 1), single(2, 2, 2)], BlockId(3), 9)
            .unwrap();
        let next = phi.increment(BlockId(3), StmtId(8), 10);
        assert_eq!(next.version(), 4);
        assert!(!next.is_phi());
    }

    #[test]
    fn test_make_phi_version_is_max_plus_one() {
        let phi = ArrayVersion::make_phi(vec![single(1, 1, 1), single(1, 2, 2)], BlockId(3), 0)
            .unwrap();
        assert_eq!(phi.version(), 2);
        assert_eq!(phi.signature(), VersionSignature::Phi(vec![1, 1]));
        assert_eq!(phi.inputs().len(), 2);

        let phi = ArrayVersion::make_phi(
            vec![single(4, 1, 1), single(0, 2, 2), single(2, 3, 3)],
            BlockId(4),
            0,
        )
        .unwrap();
        assert_eq!(phi.version(), 5);
    }

    #[test]
    fn test_make_phi_requires_two_inputs() {
        assert!(ArrayVersion::make_phi(vec![single(1, 1, 1)], BlockId(0), 0).is_none());
        assert!(ArrayVersion::make_phi(vec![], BlockId(0), 0).is_none());
    }

    #[test]
    fn test_mark_read_latches() {
        let v = single(3, 0, 0).mark_read();
        assert!(v.is_read());
        assert!(v.is_written());
        assert_eq!(v.version(), 3);
        assert!(v.mark_read().is_read());
    }

    #[test]
    fn test_signature_display() {
        assert_eq!(VersionSignature::Single(3).to_string(), "3");
        assert_eq!(VersionSignature::Phi(vec![1, 2]).to_string(), "1_2");
    }

    #[test]
    fn test_phi_statement_text() {
        let phi = ArrayVersion::make_phi(vec![single(1, 1, 1), single(0, 2, 2)], BlockId(3), 0)
            .unwrap();
        assert_eq!(phi.phi_statement("a").unwrap(), "a_2 = phi(a_1, a);");
        assert!(single(1, 0, 0).phi_statement("a").is_none());
    }

    #[test]
    fn test_trivial_merge() {
        let v = single(1, 1, 1);
        assert!(ArrayVersion::is_trivial_merge(&[v.clone(), v.clone()]));
        assert!(!ArrayVersion::is_trivial_merge(&[v, single(1, 2, 2)]));
    }

    #[test]
    fn test_same_origin_ignores_latches() {
        let v = single(1, 1, 1);
        assert!(v.same_origin(&v.clone().mark_read()));
        assert!(!v.same_origin(&single(1, 2, 2)));
        assert!(ArrayVersion::is_trivial_merge(&[v.clone(), v.mark_read()]));

        let phi = ArrayVersion::make_phi(vec![single(1, 1, 1), single(0, 2, 2)], BlockId(3), 0)
            .unwrap();
        assert!(phi.same_origin(&phi.clone().mark_read()));
        assert!(!phi.same_origin(&single(2, 3, 0)));
    }
}
