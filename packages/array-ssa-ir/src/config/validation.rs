//! Configuration validation

use super::error::ConfigResult;
use tracing::warn;

/// Configuration that can check its own ranges before an analysis starts
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    /// Name used when reporting a rejected configuration
    fn config_name(&self) -> &'static str {
        "Config"
    }

    /// Consume `self`, returning it only if it validates
    fn validated(self) -> ConfigResult<Self>
    where
        Self: Sized,
    {
        if let Err(err) = self.validate() {
            warn!(config = self.config_name(), error = %err, "configuration rejected");
            return Err(err);
        }
        Ok(self)
    }
}
