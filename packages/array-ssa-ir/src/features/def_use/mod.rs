//! Def-use feature
//!
//! - `domain`: nodes, keys, edges
//! - `infrastructure`: the petgraph-backed `DefUseGraph`

pub mod domain;
pub mod infrastructure;
