//! Alert handler trait and error types.

use crate::alert::types::{Alert, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Error types for alert handlers.
#[derive(Debug, Clone, Error)]
pub enum AlertError {
    /// No sound asset configured for this severity.
    #[error("No sound configured for {0} alerts")]
    NoSound(Severity),

    /// Sound asset does not exist.
    #[error("Sound asset not found: {0:?}")]
    AssetMissing(PathBuf),

    /// The external player could not be started.
    #[error("Failed to start sound player '{player}': {reason}")]
    Spawn {
        /// Player command.
        player: String,
        /// OS error text.
        reason: String,
    },

    /// The external player exited unsuccessfully.
    #[error("Sound player '{player}' failed with {status}")]
    PlayerFailed {
        /// Player command.
        player: String,
        /// Exit status text.
        status: String,
    },

    /// Console tone could not be emitted.
    #[error("Unable to play system beep: {0}")]
    Tone(String),
}

/// Handler that renders an alert (sound, tone, ...).
///
/// Handlers run on the dispatcher's worker thread, never on the monitor
/// loop, so they may block for the duration of the alert.
pub trait AlertHandler: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Handle an alert.
    fn handle_alert(&self, alert: &Alert) -> Result<(), AlertError>;
}
