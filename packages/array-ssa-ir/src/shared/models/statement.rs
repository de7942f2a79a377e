//! Statement classification
//!
//! The front end reduces every statement to one of a closed set of kinds.
//! Statements are in three-address form: at most one array access each.

use super::ids::StmtId;
use crate::shared::constants::naming::NEW_ARRAY_INDEX;
use serde::{Deserialize, Serialize};

/// Index expression of an array access
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayIndex {
    /// Textual index expression (`i`, `i + 1`, `0`)
    Expr(String),
    /// Array defined as a whole (creation, rename)
    NoIndex,
}

impl ArrayIndex {
    pub fn expr(text: impl Into<String>) -> Self {
        Self::Expr(text.into())
    }

    /// Text used for comparison and display; `NoIndex` renders as the
    /// new-array sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Expr(text) => text,
            Self::NoIndex => NEW_ARRAY_INDEX,
        }
    }

    pub fn is_expr(&self) -> bool {
        matches!(self, Self::Expr(_))
    }
}

/// One indexed access `base[index]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrayAccess {
    pub base: String,
    pub index: ArrayIndex,
}

impl ArrayAccess {
    pub fn new(base: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            index: ArrayIndex::expr(index),
        }
    }
}

/// Closed classification of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtKind {
    /// `base[index] = ...`
    Write { access: ArrayAccess },
    /// `... = base[index]`
    Read { access: ArrayAccess },
    /// `base = new T[n]`
    Create { base: String },
    /// `to = from` where both sides are arrays
    Rename { from: String, to: String },
    /// Anything that does not touch an array
    Other,
}

impl StmtKind {
    /// Array base this statement affects, if any
    pub fn array_base(&self) -> Option<&str> {
        match self {
            Self::Write { access } | Self::Read { access } => Some(&access.base),
            Self::Create { base } => Some(base),
            Self::Rename { to, .. } => Some(to),
            Self::Other => None,
        }
    }
}

/// A statement of the procedure body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: StmtId,
    /// Source line (0 when unknown)
    #[serde(default)]
    pub line: u32,
    pub text: String,
    pub kind: StmtKind,
}

impl Statement {
    pub fn new(id: impl Into<StmtId>, line: u32, text: impl Into<String>, kind: StmtKind) -> Self {
        Self {
            id: id.into(),
            line,
            text: text.into(),
            kind,
        }
    }

    pub fn write(
        id: impl Into<StmtId>,
        line: u32,
        base: &str,
        index: &str,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            line,
            text,
            StmtKind::Write {
                access: ArrayAccess::new(base, index),
            },
        )
    }

    pub fn read(
        id: impl Into<StmtId>,
        line: u32,
        base: &str,
        index: &str,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            line,
            text,
            StmtKind::Read {
                access: ArrayAccess::new(base, index),
            },
        )
    }

    pub fn create(id: impl Into<StmtId>, line: u32, base: &str, text: impl Into<String>) -> Self {
        Self::new(id, line, text, StmtKind::Create { base: base.to_string() })
    }

    pub fn rename(
        id: impl Into<StmtId>,
        line: u32,
        from: &str,
        to: &str,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            line,
            text,
            StmtKind::Rename {
                from: from.to_string(),
                to: to.to_string(),
            },
        )
    }

    pub fn other(id: impl Into<StmtId>, line: u32, text: impl Into<String>) -> Self {
        Self::new(id, line, text, StmtKind::Other)
    }
}

/// Loop metadata: a loop header's head statement paired with the head
/// statement of one of its exit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoopHeadExit {
    pub header: StmtId,
    pub exit: StmtId,
}

impl LoopHeadExit {
    pub fn new(header: StmtId, exit: StmtId) -> Self {
        Self { header, exit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_index_renders_sentinel() {
        assert_eq!(ArrayIndex::NoIndex.as_str(), "NEW_ARRAY");
        assert_eq!(ArrayIndex::expr("i + 1").as_str(), "i + 1");
        assert!(!ArrayIndex::NoIndex.is_expr());
    }

    #[test]
    fn test_array_base() {
        let write = Statement::write(0, 1, "a", "i", "a[i] = 1");
        assert_eq!(write.kind.array_base(), Some("a"));

        let rename = Statement::rename(1, 2, "a", "b", "b = a");
        assert_eq!(rename.kind.array_base(), Some("b"));

        assert_eq!(Statement::other(2, 3, "i = 0").kind.array_base(), None);
    }

    #[test]
    fn test_kind_json_shape() {
        let stmt = Statement::read(4, 10, "a", "j", "x = a[j]");
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"]["kind"], "read");
        assert_eq!(json["kind"]["access"]["base"], "a");
        assert_eq!(json["kind"]["access"]["index"]["expr"], "j");
    }
}
