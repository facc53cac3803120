//! Prelude module for common re-exports.
//!
//! ```rust
//! use esc_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    AlertProfile, AlertsConfig, ConfigError, ConfigLoader, LogLevel, MonitorConfig,
    SamplerConfig, ThresholdConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{DEFAULT_CHANNEL_COUNT, MAX_CHANNELS, SERVICE_NAME};

// ─── Sensor boundary ────────────────────────────────────────────────
pub use crate::sensor::source::{SampleError, SourceFactory, TemperatureSource};
pub use crate::sensor::types::{Channel, PlausibleRange, Sample};

// ─── Alert boundary ─────────────────────────────────────────────────
pub use crate::alert::handler::{AlertError, AlertHandler};
pub use crate::alert::types::{Alert, Severity};
