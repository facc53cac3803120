//! Temperature source trait and error types.
//!
//! This module defines:
//! - `TemperatureSource` trait - Interface for pluggable sensor backends
//! - `SampleError` enum - Why a reading could not be produced
//! - `SourceFactory` type alias - Factory function type

use crate::config::SamplerConfig;
use crate::sensor::types::Channel;
use thiserror::Error;

/// Error types for sensor reads.
///
/// None of these are fatal to the monitor loop: the sampler coerces every
/// failed read into an absent sample.
#[derive(Debug, Clone, Error)]
pub enum SampleError {
    /// The backend has no value for this channel this tick.
    #[error("{0}: no reading available")]
    Unavailable(Channel),

    /// I/O failure while reaching the backend.
    #[error("Sensor I/O error: {0}")]
    Io(String),

    /// The backend produced data that could not be interpreted.
    #[error("Sensor data parse error: {0}")]
    Parse(String),

    /// Source not found in the registry.
    #[error("Temperature source not found: {0}")]
    SourceNotFound(String),

    /// Source construction failed.
    #[error("Temperature source initialization failed: {0}")]
    InitFailed(String),
}

/// Factory function type for creating source instances from config.
pub type SourceFactory = fn(&SamplerConfig) -> Result<Box<dyn TemperatureSource>, SampleError>;

/// Trait defining the interface for temperature backends.
///
/// # Lifecycle
///
/// 1. `refresh()` - Called once per tick, before any channel is read
/// 2. `read_temperature()` - Called once per channel per tick
///
/// Reads are expected to be fast and synchronous. A backend that has to
/// cross a slow boundary should bound the wait inside `refresh()` and
/// report `Unavailable` rather than stall the loop.
pub trait TemperatureSource: Send {
    /// Returns the source's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Prepare a consistent snapshot for the coming tick.
    ///
    /// Default implementation does nothing.
    fn refresh(&mut self) -> Result<(), SampleError> {
        Ok(())
    }

    /// Read the raw temperature of one channel [°C].
    ///
    /// The value is not range-checked here; the sampler does that.
    fn read_temperature(&mut self, channel: Channel) -> Result<f64, SampleError>;
}
