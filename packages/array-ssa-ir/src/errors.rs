//! Error types for array-ssa-ir
//!
//! Unified error for the crate's outer surface: batch analysis, JSON input
//! and output, configuration loading.

use crate::config::ConfigError;
use crate::features::array_ssa::infrastructure::errors::ArraySSAError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] ArraySSAError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// True for analysis errors that abort a procedure, and for every
    /// non-analysis error
    pub fn is_fatal(&self) -> bool {
        match self {
            AnalysisError::Analysis(err) => err.is_fatal(),
            _ => true,
        }
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::BlockId;

    #[test]
    fn test_from_analysis_error() {
        let err: AnalysisError = ArraySSAError::BlockNotFound { block: BlockId(1) }.into();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "Analysis error: Block not found: B1");
    }

    #[test]
    fn test_from_config_error() {
        let err: AnalysisError = ConfigError::MissingVersion.into();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
