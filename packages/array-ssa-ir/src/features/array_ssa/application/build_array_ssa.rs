use crate::features::array_ssa::domain::ArraySsaOutput;
use crate::features::array_ssa::infrastructure::errors::ArraySSAResult;
use crate::features::array_ssa::ports::{ArraySsaAnalyzer, CfgProvider};

pub struct BuildArraySsaUseCase<A: ArraySsaAnalyzer> {
    analyzer: A,
}

impl<A: ArraySsaAnalyzer> BuildArraySsaUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, cfg: &dyn CfgProvider) -> ArraySSAResult<ArraySsaOutput> {
        self.analyzer.analyze(cfg)
    }
}
