//! Telemetry snapshot file source.
//!
//! The host telemetry bridge periodically writes a JSON snapshot of the
//! vehicle state. Two layouts are in circulation and both may be present:
//!
//! ```json
//! { "esc1_temp": 36.2, "esc": [ { "temp": 36.2 }, { "temp": "35.9" } ] }
//! ```
//!
//! For each channel the flat `esc<i>_temp` key is tried first, then
//! `esc[i-1].temp`. Numbers and numeric strings are accepted; the first
//! candidate inside the plausible band wins.

use esc_common::config::SamplerConfig;
use esc_common::sensor::source::{SampleError, TemperatureSource};
use esc_common::sensor::types::{Channel, PlausibleRange};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Registry name.
pub const SOURCE_NAME: &str = "telemetry";

/// Source reading a JSON telemetry snapshot once per tick.
#[derive(Debug)]
pub struct TelemetryFileSource {
    path: PathBuf,
    band: PlausibleRange,
    snapshot: Option<Value>,
}

impl TelemetryFileSource {
    /// Create a source over `path`, skipping candidates outside `band`.
    pub fn new(path: impl Into<PathBuf>, band: PlausibleRange) -> Self {
        Self {
            path: path.into(),
            band,
            snapshot: None,
        }
    }

    /// Snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_snapshot(&self) -> Result<Value, SampleError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SampleError::Io(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| SampleError::Parse(format!("{}: {e}", self.path.display())))
    }
}

/// Candidate values for a channel, in priority order.
fn candidates(snapshot: &Value, channel: Channel) -> [Option<&Value>; 2] {
    let flat = snapshot.get(format!("esc{}_temp", channel.index()));
    let listed = snapshot
        .get("esc")
        .and_then(Value::as_array)
        .and_then(|escs| escs.get(channel.slot()))
        .and_then(|esc| esc.get("temp"));
    [flat, listed]
}

fn as_temperature(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl TemperatureSource for TelemetryFileSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn refresh(&mut self) -> Result<(), SampleError> {
        match self.load_snapshot() {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                Ok(())
            }
            Err(e) => {
                self.snapshot = None;
                Err(e)
            }
        }
    }

    fn read_temperature(&mut self, channel: Channel) -> Result<f64, SampleError> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(SampleError::Unavailable(channel))?;

        candidates(snapshot, channel)
            .into_iter()
            .flatten()
            .filter_map(as_temperature)
            .find(|&t| self.band.contains(t))
            .ok_or(SampleError::Unavailable(channel))
    }
}

/// Factory for the source registry.
pub fn create_source(config: &SamplerConfig) -> Result<Box<dyn TemperatureSource>, SampleError> {
    debug!("Telemetry source reading {}", config.telemetry_path.display());
    Ok(Box::new(TelemetryFileSource::new(
        config.telemetry_path.clone(),
        config.band(),
    )))
}
