//! Default `ArraySsaAnalyzer`

use super::array_ssa_builder::ArraySsaBuilder;
use super::errors::ArraySSAResult;
use crate::config::AnalysisConfig;
use crate::features::array_ssa::domain::ArraySsaOutput;
use crate::features::array_ssa::ports::{ArraySsaAnalyzer, CfgProvider};

/// Analyze one procedure with `config`
pub fn analyze_procedure<C: CfgProvider + ?Sized>(
    cfg: &C,
    config: &AnalysisConfig,
) -> ArraySSAResult<ArraySsaOutput> {
    ArraySsaBuilder::new(cfg, config).build()
}

#[derive(Debug, Clone, Default)]
pub struct DefaultArraySsaAnalyzer {
    config: AnalysisConfig,
}

impl DefaultArraySsaAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl ArraySsaAnalyzer for DefaultArraySsaAnalyzer {
    fn analyze(&self, cfg: &dyn CfgProvider) -> ArraySSAResult<ArraySsaOutput> {
        analyze_procedure(cfg, &self.config)
    }
}
