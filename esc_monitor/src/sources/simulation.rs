//! Simulation source.
//!
//! Produces a deterministic per-channel thermal profile so the monitor can
//! be exercised without hardware:
//!
//! ```text
//! T(ch, tick) = ambient + amplitude · sin(2π · tick / period + (ch - 1) · π/4)
//! ```
//!
//! With the defaults (30 ± 12 °C over 120 ticks) every channel crosses both
//! alarm thresholds and their clear points once per minute, out of phase
//! with its neighbours.

use esc_common::config::{SamplerConfig, SimulationConfig};
use esc_common::sensor::source::{SampleError, TemperatureSource};
use esc_common::sensor::types::Channel;
use std::f64::consts::{FRAC_PI_4, TAU};
use tracing::debug;

/// Registry name.
pub const SOURCE_NAME: &str = "simulation";

/// Deterministic thermal profile source.
#[derive(Debug, Clone)]
pub struct SimulationSource {
    config: SimulationConfig,
    tick: u64,
}

impl SimulationSource {
    /// Create a source at tick 0.
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, tick: 0 }
    }

    /// Ticks simulated so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Profile value of `channel` at `tick`.
    pub fn temperature_at(&self, channel: Channel, tick: u64) -> f64 {
        let period = f64::from(self.config.period_ticks.max(1));
        let phase = f64::from(channel.index() - 1) * FRAC_PI_4;
        let angle = TAU * (tick as f64 / period) + phase;
        self.config.ambient + self.config.amplitude * angle.sin()
    }
}

impl TemperatureSource for SimulationSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn refresh(&mut self) -> Result<(), SampleError> {
        self.tick += 1;
        Ok(())
    }

    fn read_temperature(&mut self, channel: Channel) -> Result<f64, SampleError> {
        if channel.index() == self.config.dropout_channel {
            return Err(SampleError::Unavailable(channel));
        }
        Ok(self.temperature_at(channel, self.tick))
    }
}

/// Factory for the source registry.
pub fn create_source(config: &SamplerConfig) -> Result<Box<dyn TemperatureSource>, SampleError> {
    debug!(
        "Simulation source: ambient={} amplitude={} period={} ticks",
        config.simulation.ambient, config.simulation.amplitude, config.simulation.period_ticks
    );
    Ok(Box::new(SimulationSource::new(config.simulation.clone())))
}
