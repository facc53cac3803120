//! Startup error type.
//!
//! Once the loop is running nothing is fatal: sensor failures become absent
//! samples and alert failures stay inside the dispatcher. These errors can
//! only come out of building the monitor.

use esc_common::config::ConfigError;
use esc_common::sensor::source::SampleError;
use thiserror::Error;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The temperature source could not be created.
    #[error(transparent)]
    Source(#[from] SampleError),

    /// The alert worker could not be started.
    #[error("Failed to start alert dispatcher: {0}")]
    Dispatcher(#[source] std::io::Error),

    /// The shutdown signal handler could not be installed.
    #[error("Failed to install signal handler: {0}")]
    Signal(String),
}
