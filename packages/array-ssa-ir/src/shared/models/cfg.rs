//! In-memory procedure CFG
//!
//! `ProcedureCfg` is the reference implementation of `CfgProvider`. Front ends
//! either implement the trait over their own IR or assemble one of these
//! through `ProcedureCfgBuilder` (or `ProcedureCfg::from_json`).

use super::ids::{BlockId, StmtId};
use super::statement::{LoopHeadExit, Statement};
use crate::errors::AnalysisResult;
use crate::features::array_ssa::infrastructure::errors::{ArraySSAError, ArraySSAResult};
use crate::features::array_ssa::ports::CfgProvider;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Basic block: statements in execution order plus its CFG neighbours
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicBlock {
    pub id: BlockId,
    pub statements: Vec<Statement>,
    pub successors: Vec<BlockId>,
    pub predecessors: Vec<BlockId>,
}

/// CFG of a single procedure
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureCfg {
    procedure_id: String,
    entry: BlockId,
    blocks: Vec<BasicBlock>,
    loop_head_exits: Vec<LoopHeadExit>,
    #[serde(skip)]
    index: AHashMap<BlockId, usize>,
}

impl ProcedureCfg {
    pub fn builder(procedure_id: impl Into<String>) -> ProcedureCfgBuilder {
        ProcedureCfgBuilder::new(procedure_id)
    }

    /// Parse the JSON interchange form
    ///
    /// ```json
    /// { "procedure_id": "f", "entry": 0,
    ///   "blocks": [{ "id": 0, "statements": [...], "successors": [1] }],
    ///   "loop_head_exits": [{ "header": 3, "exit": 9 }] }
    /// ```
    ///
    /// Predecessors are derived from successor lists; the input never
    /// carries them.
    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        let dto: ProcedureCfgDto = serde_json::from_str(json)?;

        let mut builder = ProcedureCfgBuilder::new(dto.procedure_id);
        if let Some(entry) = dto.entry {
            builder = builder.entry(entry);
        }
        for block in dto.blocks {
            for succ in &block.successors {
                builder = builder.edge(block.id, *succ);
            }
            builder = builder.block(block.id, block.statements);
        }
        for pair in dto.loop_head_exits {
            builder = builder.loop_head_exit(pair);
        }

        Ok(builder.build()?)
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.index.get(&id).map(|&i| &self.blocks[i])
    }

    pub fn statement_count(&self) -> usize {
        self.blocks.iter().map(|b| b.statements.len()).sum()
    }
}

impl CfgProvider for ProcedureCfg {
    fn procedure_id(&self) -> &str {
        &self.procedure_id
    }

    fn entry(&self) -> BlockId {
        self.entry
    }

    fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id).collect()
    }

    fn contains_block(&self, block: BlockId) -> bool {
        self.index.contains_key(&block)
    }

    fn statements(&self, block: BlockId) -> &[Statement] {
        self.block(block)
            .map(|b| b.statements.as_slice())
            .unwrap_or(&[])
    }

    fn predecessors(&self, block: BlockId) -> &[BlockId] {
        self.block(block)
            .map(|b| b.predecessors.as_slice())
            .unwrap_or(&[])
    }

    fn successors(&self, block: BlockId) -> &[BlockId] {
        self.block(block)
            .map(|b| b.successors.as_slice())
            .unwrap_or(&[])
    }

    fn loop_head_exits(&self) -> &[LoopHeadExit] {
        &self.loop_head_exits
    }
}

#[derive(Debug, Deserialize)]
struct ProcedureCfgDto {
    procedure_id: String,
    #[serde(default)]
    entry: Option<BlockId>,
    blocks: Vec<BlockDto>,
    #[serde(default)]
    loop_head_exits: Vec<LoopHeadExit>,
}

#[derive(Debug, Deserialize)]
struct BlockDto {
    id: BlockId,
    #[serde(default)]
    statements: Vec<Statement>,
    #[serde(default)]
    successors: Vec<BlockId>,
}

#[derive(Debug, Clone, Copy)]
enum LoopDecl {
    Statements(LoopHeadExit),
    Blocks { header: BlockId, exit: BlockId },
}

/// Builder for `ProcedureCfg`
///
/// # Example
/// ```rust,ignore
/// let cfg = ProcedureCfg::builder("sum")
///     .block(0, vec![Statement::create(0, 1, "a", "a = new int[n]")])
///     .block(1, vec![Statement::other(1, 2, "if i >= n goto B3")])
///     .edge(0, 1)
///     .loop_exit(1, 3)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct ProcedureCfgBuilder {
    procedure_id: String,
    entry: Option<BlockId>,
    blocks: Vec<(BlockId, Vec<Statement>)>,
    edges: Vec<(BlockId, BlockId)>,
    loops: Vec<LoopDecl>,
}

impl ProcedureCfgBuilder {
    pub fn new(procedure_id: impl Into<String>) -> Self {
        Self {
            procedure_id: procedure_id.into(),
            entry: None,
            blocks: Vec::new(),
            edges: Vec::new(),
            loops: Vec::new(),
        }
    }

    /// Entry block; defaults to the first block added
    pub fn entry(mut self, id: impl Into<BlockId>) -> Self {
        self.entry = Some(id.into());
        self
    }

    pub fn block(mut self, id: impl Into<BlockId>, statements: Vec<Statement>) -> Self {
        self.blocks.push((id.into(), statements));
        self
    }

    /// Control-flow edge; successor and predecessor order follow insertion
    /// order
    pub fn edge(mut self, from: impl Into<BlockId>, to: impl Into<BlockId>) -> Self {
        self.edges.push((from.into(), to.into()));
        self
    }

    pub fn loop_head_exit(mut self, pair: LoopHeadExit) -> Self {
        self.loops.push(LoopDecl::Statements(pair));
        self
    }

    /// Declare `exit` as an exit target of the loop headed by `header`
    ///
    /// Resolved to head statements at build time, so both blocks need at
    /// least one statement.
    pub fn loop_exit(mut self, header: impl Into<BlockId>, exit: impl Into<BlockId>) -> Self {
        self.loops.push(LoopDecl::Blocks {
            header: header.into(),
            exit: exit.into(),
        });
        self
    }

    pub fn build(self) -> ArraySSAResult<ProcedureCfg> {
        if self.blocks.is_empty() {
            return Err(ArraySSAError::invalid_cfg(format!(
                "procedure '{}' has no blocks",
                self.procedure_id
            )));
        }

        let mut index = AHashMap::with_capacity(self.blocks.len());
        let mut seen_stmts: AHashSet<StmtId> = AHashSet::new();
        let mut blocks = Vec::with_capacity(self.blocks.len());

        for (id, statements) in self.blocks {
            if index.insert(id, blocks.len()).is_some() {
                return Err(ArraySSAError::invalid_cfg(format!("duplicate block {}", id)));
            }
            for stmt in &statements {
                if !seen_stmts.insert(stmt.id) {
                    return Err(ArraySSAError::invalid_cfg(format!(
                        "duplicate statement id {}",
                        stmt.id
                    )));
                }
            }
            blocks.push(BasicBlock {
                id,
                statements,
                successors: Vec::new(),
                predecessors: Vec::new(),
            });
        }

        let entry = self.entry.unwrap_or(blocks[0].id);
        if !index.contains_key(&entry) {
            return Err(ArraySSAError::BlockNotFound { block: entry });
        }

        for (from, to) in self.edges {
            let (Some(&from_idx), Some(&to_idx)) = (index.get(&from), index.get(&to)) else {
                return Err(ArraySSAError::invalid_cfg(format!(
                    "edge {} -> {} names an unknown block",
                    from, to
                )));
            };
            if blocks[from_idx].successors.contains(&to) {
                continue;
            }
            blocks[from_idx].successors.push(to);
            blocks[to_idx].predecessors.push(from);
        }

        let head_of = |block: BlockId| -> ArraySSAResult<StmtId> {
            index
                .get(&block)
                .and_then(|&i| blocks[i].statements.first())
                .map(|s| s.id)
                .ok_or_else(|| {
                    ArraySSAError::invalid_cfg(format!(
                        "loop block {} is unknown or has no head statement",
                        block
                    ))
                })
        };

        let mut loop_head_exits = Vec::with_capacity(self.loops.len());
        for decl in self.loops {
            let pair = match decl {
                LoopDecl::Statements(pair) => pair,
                LoopDecl::Blocks { header, exit } => {
                    LoopHeadExit::new(head_of(header)?, head_of(exit)?)
                }
            };
            if !loop_head_exits.contains(&pair) {
                loop_head_exits.push(pair);
            }
        }

        Ok(ProcedureCfg {
            procedure_id: self.procedure_id,
            entry,
            blocks,
            loop_head_exits,
            index,
        })
    }
}
