//! Def-use graph infrastructure

pub mod graph;

pub use graph::{DefUseGraph, DefUseGraphDto, DefUseStats, EdgeDto};
