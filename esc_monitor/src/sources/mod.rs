//! Built-in temperature sources.
//!
//! - [`simulation`] - Deterministic thermal profile for development and testing
//! - [`telemetry`] - JSON telemetry snapshot file written by the host
//!
//! # Adding New Sources
//!
//! 1. Create a new submodule under `sources/`
//! 2. Implement `TemperatureSource` from `esc_common::sensor::source`
//! 3. Register its factory in [`register_builtin_sources`]

pub mod simulation;
pub mod telemetry;

use crate::source_registry::SourceRegistry;

pub use simulation::SimulationSource;
pub use telemetry::TelemetryFileSource;

/// Register all built-in sources.
pub fn register_builtin_sources(registry: &mut SourceRegistry) {
    registry.register(simulation::SOURCE_NAME, simulation::create_source);
    registry.register(telemetry::SOURCE_NAME, telemetry::create_source);
}
