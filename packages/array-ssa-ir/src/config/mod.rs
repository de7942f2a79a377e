//! Analysis configuration
//!
//! - `AnalysisConfig`: knobs with defaults and fluent setters
//! - `Validatable`: range checks before an analysis starts
//! - YAML schema v1 loading and export

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod validation;

pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigExportV1;
pub use validation::Validatable;
