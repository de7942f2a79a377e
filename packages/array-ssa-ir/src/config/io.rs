//! Configuration I/O schema

use super::analysis_config::AnalysisConfig;
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,
}

impl ConfigExportV1 {
    /// Top-level keys accepted by the schema
    pub const FIELDS: &'static [&'static str] = &["version", "analysis"];
}
