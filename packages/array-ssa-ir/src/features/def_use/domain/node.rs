//! Def-use graph nodes
//!
//! A node is one array definition or one array use. Its key is
//! (base, version signature, kind); a use looks up its def through the key
//! with the opposite kind.

use crate::features::array_ssa::domain::{ArrayVersion, VersionSignature};
use crate::shared::constants::naming::{DEF_SUFFIX, USE_SUFFIX, VERSION_SEPARATOR};
use crate::shared::models::{ArrayIndex, BlockId, Statement, StmtId};
use crate::shared::utils::augment_statement;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Def,
    Use,
}

impl NodeKind {
    pub fn opposite(self) -> Self {
        match self {
            Self::Def => Self::Use,
            Self::Use => Self::Def,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeKey {
    pub base: String,
    pub signature: VersionSignature,
    pub kind: NodeKind,
}

impl NodeKey {
    pub fn new(base: impl Into<String>, signature: VersionSignature, kind: NodeKind) -> Self {
        Self {
            base: base.into(),
            signature,
            kind,
        }
    }

    pub fn def(base: impl Into<String>, signature: VersionSignature) -> Self {
        Self::new(base, signature, NodeKind::Def)
    }

    pub fn use_(base: impl Into<String>, signature: VersionSignature) -> Self {
        Self::new(base, signature, NodeKind::Use)
    }

    /// Same base and signature, other kind
    pub fn opposite(&self) -> Self {
        Self {
            base: self.base.clone(),
            signature: self.signature.clone(),
            kind: self.kind.opposite(),
        }
    }
}

/// `a_1_DEF`, `a_1_2_USE`
impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.kind {
            NodeKind::Def => DEF_SUFFIX,
            NodeKind::Use => USE_SUFFIX,
        };
        write!(
            f,
            "{base}{sep}{sig}{sep}{suffix}",
            base = self.base,
            sep = VERSION_SEPARATOR,
            sig = self.signature,
            suffix = suffix
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub base_name: String,
    pub version: ArrayVersion,
    pub index: ArrayIndex,
    pub block_id: BlockId,
    /// `None` for synthesised phi defs
    pub statement_id: Option<StmtId>,
    /// Original statement text, or the synthesised phi statement
    pub statement: String,
    /// Statement text with the base rewritten to its versioned name
    pub augmented: String,
    pub line: u32,
    /// Def of a whole array (creation or rename) rather than an element
    pub base_def: bool,
}

impl Node {
    /// Def of `base[index]` produced by `stmt`
    pub fn def(
        stmt: &Statement,
        base: &str,
        version: ArrayVersion,
        index: ArrayIndex,
        block: BlockId,
    ) -> Self {
        Self::from_statement(NodeKind::Def, stmt, base, version, index, block)
    }

    /// Use of `base[index]` at `stmt`
    pub fn use_(
        stmt: &Statement,
        base: &str,
        version: ArrayVersion,
        index: ArrayIndex,
        block: BlockId,
    ) -> Self {
        Self::from_statement(NodeKind::Use, stmt, base, version, index, block)
    }

    /// Def of a whole array: creation or the target of a rename
    pub fn base_def(stmt: &Statement, base: &str, version: ArrayVersion, block: BlockId) -> Self {
        let mut node = Self::def(stmt, base, version, ArrayIndex::NoIndex, block);
        node.base_def = true;
        node
    }

    /// Def carrying a phi version; its statement is the synthesised phi text
    pub fn phi(base: &str, version: ArrayVersion, block: BlockId) -> Self {
        let text = version.phi_statement(base).unwrap_or_default();
        Self {
            kind: NodeKind::Def,
            base_name: base.to_string(),
            index: ArrayIndex::NoIndex,
            block_id: block,
            statement_id: None,
            augmented: text.clone(),
            statement: text,
            line: version.line(),
            base_def: false,
            version,
        }
    }

    fn from_statement(
        kind: NodeKind,
        stmt: &Statement,
        base: &str,
        version: ArrayVersion,
        index: ArrayIndex,
        block: BlockId,
    ) -> Self {
        Self {
            kind,
            base_name: base.to_string(),
            augmented: augment_statement(&stmt.text, base, &version.versioned_name(base)),
            index,
            block_id: block,
            statement_id: Some(stmt.id),
            statement: stmt.text.clone(),
            line: stmt.line,
            base_def: false,
            version,
        }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey::new(self.base_name.clone(), self.version.signature(), self.kind)
    }

    pub fn is_phi(&self) -> bool {
        self.version.is_phi()
    }

    pub fn is_def(&self) -> bool {
        self.kind == NodeKind::Def
    }

    /// Re-point this def at a renamed base produced by `stmt`
    ///
    /// The index is kept; statement identity and text move to `stmt`.
    pub fn rebind(&mut self, stmt: &Statement, base: &str, version: ArrayVersion) {
        self.augmented = augment_statement(&stmt.text, base, &version.versioned_name(base));
        self.base_name = base.to_string();
        self.statement_id = Some(stmt.id);
        self.statement = stmt.text.clone();
        self.line = stmt.line;
        self.version = version;
    }
}
