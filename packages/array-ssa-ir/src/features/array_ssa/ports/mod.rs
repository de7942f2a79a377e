//! Ports (trait seams) of the array SSA feature

pub mod analyzer;
pub mod cfg_provider;

pub use analyzer::ArraySsaAnalyzer;
pub use cfg_provider::CfgProvider;
