//! Array SSA feature
//!
//! Hexagonal layout:
//! - `domain`: immutable versions, per-block tables, analysis output
//! - `ports`: `CfgProvider` (front end) and `ArraySsaAnalyzer`
//! - `infrastructure`: statement processing, linear pass, loop worklist
//! - `application`: use case and batch analysis

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
