//! Analysis configuration
//!
//! # Example
//! ```rust,ignore
//! let config = AnalysisConfig::default()
//!     .worklist_max_iterations(10_000)
//!     .prune_trivial_phis(true);
//! config.validate()?;
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use super::validation::Validatable;
use crate::shared::constants::{schema, worklist};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Cap on worklist pops for a single loop; exceeding it aborts that loop
    pub worklist_max_iterations: usize,
    /// Promote dangling uses from diagnostics to fatal errors
    pub strict_dangling_uses: bool,
    /// Reuse the input of a merge whose inputs are all the same version
    pub prune_trivial_phis: bool,
    pub record_flow_graph: bool,
    pub record_rejected_edges: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            worklist_max_iterations: worklist::DEFAULT_MAX_ITERATIONS,
            strict_dangling_uses: false,
            prune_trivial_phis: false,
            record_flow_graph: true,
            record_rejected_edges: true,
        }
    }
}

impl AnalysisConfig {
    /// Field names accepted in the `analysis` section
    pub const FIELDS: &'static [&'static str] = &[
        "worklist_max_iterations",
        "strict_dangling_uses",
        "prune_trivial_phis",
        "record_flow_graph",
        "record_rejected_edges",
    ];

    pub fn worklist_max_iterations(mut self, limit: usize) -> Self {
        self.worklist_max_iterations = limit;
        self
    }

    pub fn strict_dangling_uses(mut self, strict: bool) -> Self {
        self.strict_dangling_uses = strict;
        self
    }

    pub fn prune_trivial_phis(mut self, prune: bool) -> Self {
        self.prune_trivial_phis = prune;
        self
    }

    pub fn record_flow_graph(mut self, record: bool) -> Self {
        self.record_flow_graph = record;
        self
    }

    pub fn record_rejected_edges(mut self, record: bool) -> Self {
        self.record_rejected_edges = record;
        self
    }

    /// Load and validate a YAML v1 file
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML v1 text
    ///
    /// ```yaml
    /// version: 1
    /// analysis:
    ///   worklist_max_iterations: 5000
    ///   prune_trivial_phis: true
    /// ```
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;

        let version = value.get("version").ok_or(ConfigError::MissingVersion)?;
        let found = version.as_u64().ok_or(ConfigError::MissingVersion)?;
        let found = u32::try_from(found).unwrap_or(u32::MAX);
        if !schema::SUPPORTED_VERSIONS.contains(&found) {
            return Err(ConfigError::UnsupportedVersion {
                found,
                supported: schema::SUPPORTED_VERSIONS.to_vec(),
            });
        }

        check_keys(&value, "root", ConfigExportV1::FIELDS)?;
        if let Some(section) = value.get("analysis") {
            check_keys(section, "analysis", Self::FIELDS)?;
        }

        let export: ConfigExportV1 = serde_yaml::from_value(value)?;
        export.analysis.unwrap_or_default().validated()
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            analysis: Some(self.clone()),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}

fn check_keys(value: &serde_yaml::Value, section: &str, valid: &[&str]) -> ConfigResult<()> {
    let Some(mapping) = value.as_mapping() else {
        return Ok(());
    };
    for key in mapping.keys() {
        if let Some(name) = key.as_str() {
            if !valid.contains(&name) {
                return Err(ConfigError::unknown_field(name, section, valid));
            }
        }
    }
    Ok(())
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !(worklist::MIN_MAX_ITERATIONS..=worklist::MAX_MAX_ITERATIONS)
            .contains(&self.worklist_max_iterations)
        {
            return Err(ConfigError::range_with_hint(
                "worklist_max_iterations",
                self.worklist_max_iterations,
                worklist::MIN_MAX_ITERATIONS,
                worklist::MAX_MAX_ITERATIONS,
                "The loop worklist needs at least one iteration; very large caps hide non-terminating loops",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalysisConfig"
    }
}
