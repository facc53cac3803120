//! Primary/fallback handler chain.

use esc_common::alert::handler::{AlertError, AlertHandler};
use esc_common::alert::types::Alert;
use tracing::warn;

/// Tries `primary`; if it fails, logs the failure and tries `fallback`.
///
/// Only the fallback's error is returned.
pub struct FallbackChain {
    primary: Box<dyn AlertHandler>,
    fallback: Box<dyn AlertHandler>,
}

impl FallbackChain {
    /// Create a chain.
    pub fn new(primary: Box<dyn AlertHandler>, fallback: Box<dyn AlertHandler>) -> Self {
        Self { primary, fallback }
    }
}

impl AlertHandler for FallbackChain {
    fn name(&self) -> &'static str {
        "fallback_chain"
    }

    fn handle_alert(&self, alert: &Alert) -> Result<(), AlertError> {
        match self.primary.handle_alert(alert) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(
                    "{} {} alert via {} failed: {e}; falling back to {}",
                    alert.channel,
                    alert.severity,
                    self.primary.name(),
                    self.fallback.name()
                );
                self.fallback.handle_alert(alert)
            }
        }
    }
}
