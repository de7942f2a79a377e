use crate::features::array_ssa::domain::ArraySsaOutput;
use crate::features::array_ssa::infrastructure::errors::ArraySSAResult;
use crate::features::array_ssa::ports::CfgProvider;

/// Analysis of a single procedure
pub trait ArraySsaAnalyzer: Send + Sync {
    fn analyze(&self, cfg: &dyn CfgProvider) -> ArraySSAResult<ArraySsaOutput>;
}
