//! Batch analysis of independent procedures
//!
//! Procedures share nothing, so they run in parallel on the rayon pool. A
//! fatal error fails only its own procedure.

use crate::config::{AnalysisConfig, Validatable};
use crate::errors::AnalysisResult;
use crate::features::array_ssa::domain::ArraySsaOutput;
use crate::features::array_ssa::infrastructure::analyze_procedure;
use crate::features::array_ssa::infrastructure::errors::ArraySSAError;
use crate::features::array_ssa::ports::CfgProvider;
use rayon::prelude::*;
use tracing::{error, info};

#[derive(Debug)]
pub struct ProcedureOutcome {
    pub procedure_id: String,
    pub result: Result<ArraySsaOutput, ArraySSAError>,
}

impl ProcedureOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Analyze every procedure in `cfgs`, results in input order
///
/// Fails up front only when `config` is invalid.
pub fn analyze_procedures<C>(
    cfgs: &[C],
    config: &AnalysisConfig,
) -> AnalysisResult<Vec<ProcedureOutcome>>
where
    C: CfgProvider + Sync,
{
    config.validate()?;

    let outcomes: Vec<ProcedureOutcome> = cfgs
        .par_iter()
        .map(|cfg| {
            let result = analyze_procedure(cfg, config);
            if let Err(err) = &result {
                error!(procedure = cfg.procedure_id(), error = %err, "procedure analysis failed");
            }
            ProcedureOutcome {
                procedure_id: cfg.procedure_id().to_string(),
                result,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        procedures = outcomes.len(),
        failed, "batch array SSA analysis finished"
    );
    Ok(outcomes)
}
