//! Configuration loading traits and types.
//!
//! This module provides the monitor's TOML configuration and a standardized
//! way to load it. Every section and field is optional; omitted values fall
//! back to the defaults in [`crate::consts`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use esc_common::config::{ConfigError, MonitorConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = MonitorConfig::from_file(Path::new("monitor.toml"))?;
//!     println!("Monitoring {} channels", config.channels.count);
//!     Ok(())
//! }
//! ```

use crate::alert::types::Severity;
use crate::consts::{
    DEFAULT_ALERT_QUEUE_DEPTH, DEFAULT_CHANNEL_COUNT, DEFAULT_CRITICAL_THRESHOLD,
    DEFAULT_HIGH_THRESHOLD, DEFAULT_HYSTERESIS, DEFAULT_MAX_PLAUSIBLE, DEFAULT_MIN_PLAUSIBLE,
    DEFAULT_REPORT_CHUNK_SIZE, DEFAULT_REPORT_INTERVAL_S, DEFAULT_SOUND_PLAYER,
    DEFAULT_TICK_INTERVAL_S, MAX_CHANNELS, SERVICE_NAME,
};
use crate::sensor::types::PlausibleRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Any serde-deserializable struct can be loaded.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

/// Common fields shared by every service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    pub log_level: LogLevel,
    /// Instance identifier used in logs.
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: SERVICE_NAME.to_string(),
        }
    }
}

/// Channel set configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    /// Number of ESC channels, addressed `1..=count`.
    pub count: u16,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_CHANNEL_COUNT,
        }
    }
}

/// Alarm thresholds [°C].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    /// HIGH alarm raises at or above this value.
    pub high: f64,
    /// CRITICAL alarm raises at or above this value. Must exceed `high`.
    pub critical: f64,
    /// An active alarm clears at or below `threshold - hysteresis`.
    pub hysteresis: f64,
}

impl ThresholdConfig {
    /// Value at or below which an active HIGH alarm clears.
    #[inline]
    pub fn high_clear(&self) -> f64 {
        self.high - self.hysteresis
    }

    /// Value at or below which an active CRITICAL alarm clears.
    #[inline]
    pub fn critical_clear(&self) -> f64 {
        self.critical - self.hysteresis
    }

    /// Raise threshold for a severity.
    #[inline]
    pub fn raise_at(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high,
            Severity::Critical => self.critical,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            critical: DEFAULT_CRITICAL_THRESHOLD,
            hysteresis: DEFAULT_HYSTERESIS,
        }
    }
}

/// Loop timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Target period of one tick in seconds.
    pub tick_interval_s: f64,
}

impl TimingConfig {
    /// Tick period as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_interval_s)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_s: DEFAULT_TICK_INTERVAL_S,
        }
    }
}

/// Periodic status report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Minimum seconds between two reports.
    pub interval_s: f64,
    /// Channel entries per report line.
    pub chunk_size: usize,
}

impl ReportConfig {
    /// Report interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_s)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            interval_s: DEFAULT_REPORT_INTERVAL_S,
            chunk_size: DEFAULT_REPORT_CHUNK_SIZE,
        }
    }
}

/// Parameters of the built-in simulation source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Mean temperature [°C].
    pub ambient: f64,
    /// Peak deviation from `ambient` [°C].
    pub amplitude: f64,
    /// Ticks per full thermal cycle.
    pub period_ticks: u32,
    /// Channel that never reports (0 = none).
    pub dropout_channel: u16,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ambient: 30.0,
            amplitude: 12.0,
            period_ticks: 120,
            dropout_channel: 0,
        }
    }
}

/// Sampler configuration: which source to use and what values to trust.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    /// Registered source name ("simulation" or "telemetry").
    pub source: String,
    /// Lowest plausible reading [°C].
    pub min_plausible: f64,
    /// Highest plausible reading [°C].
    pub max_plausible: f64,
    /// JSON snapshot read by the telemetry source.
    pub telemetry_path: PathBuf,
    /// Simulation source parameters.
    pub simulation: SimulationConfig,
}

impl SamplerConfig {
    /// Plausible band as a `PlausibleRange`.
    pub fn band(&self) -> PlausibleRange {
        PlausibleRange::new(self.min_plausible, self.max_plausible)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            source: "simulation".to_string(),
            min_plausible: DEFAULT_MIN_PLAUSIBLE,
            max_plausible: DEFAULT_MAX_PLAUSIBLE,
            telemetry_path: PathBuf::from("telemetry.json"),
            simulation: SimulationConfig::default(),
        }
    }
}

/// How one severity is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertProfile {
    /// Sound asset played by the primary handler. `None` goes straight to the tone.
    pub sound: Option<PathBuf>,

    /// Nominal tone pitch [Hz]. The console bell cannot be pitched, so
    /// `ToneBeeper` only logs it.
    pub tone_hz: u32,

    /// Fallback tone duration [ms].
    pub tone_ms: u64,
}

impl AlertProfile {
    /// Built-in profile of a severity.
    pub fn default_for(severity: Severity) -> Self {
        match severity {
            Severity::High => Self {
                sound: Some(PathBuf::from("sounds/esc_high.wav")),
                tone_hz: 1100,
                tone_ms: 700,
            },
            Severity::Critical => Self {
                sound: Some(PathBuf::from("sounds/esc_critical.wav")),
                tone_hz: 1600,
                tone_ms: 1000,
            },
        }
    }

    /// Fallback tone duration as a `Duration`.
    pub fn tone_duration(&self) -> Duration {
        Duration::from_millis(self.tone_ms)
    }
}

/// `[alerts.high]` / `[alerts.critical]` as written in the file.
///
/// Omitted keys keep the severity's built-in value. `sound = ""` disables
/// the sound for that severity.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlertProfileFile {
    sound: Option<PathBuf>,
    tone_hz: Option<u32>,
    tone_ms: Option<u64>,
}

impl AlertProfileFile {
    fn merge_over(self, base: AlertProfile) -> AlertProfile {
        let sound = match self.sound {
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => Some(path),
            None => base.sound,
        };
        AlertProfile {
            sound,
            tone_hz: self.tone_hz.unwrap_or(base.tone_hz),
            tone_ms: self.tone_ms.unwrap_or(base.tone_ms),
        }
    }
}

/// `[alerts]` as written in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct AlertsFile {
    player: Option<String>,
    queue_depth: Option<usize>,
    high: AlertProfileFile,
    critical: AlertProfileFile,
}

impl From<AlertsFile> for AlertsConfig {
    fn from(file: AlertsFile) -> Self {
        let defaults = Self::default();
        Self {
            player: file.player.unwrap_or(defaults.player),
            queue_depth: file.queue_depth.unwrap_or(defaults.queue_depth),
            high: file.high.merge_over(defaults.high),
            critical: file.critical.merge_over(defaults.critical),
        }
    }
}

/// Alert output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "AlertsFile")]
pub struct AlertsConfig {
    /// External command that plays a sound file given as its only argument.
    pub player: String,
    /// Capacity of the dispatch queue; alerts beyond it are dropped.
    pub queue_depth: usize,
    /// HIGH severity profile.
    pub high: AlertProfile,
    /// CRITICAL severity profile.
    pub critical: AlertProfile,
}

impl AlertsConfig {
    /// Profile for a severity.
    pub fn profile(&self, severity: Severity) -> &AlertProfile {
        match severity {
            Severity::High => &self.high,
            Severity::Critical => &self.critical,
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            player: DEFAULT_SOUND_PLAYER.to_string(),
            queue_depth: DEFAULT_ALERT_QUEUE_DEPTH,
            high: AlertProfile::default_for(Severity::High),
            critical: AlertProfile::default_for(Severity::Critical),
        }
    }
}

/// Complete monitor configuration, loaded once at startup.
///
/// # TOML Example
///
/// ```toml
/// [channels]
/// count = 4
///
/// [thresholds]
/// high = 60.0
/// critical = 75.0
/// hysteresis = 5.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Logging and identity.
    pub shared: SharedConfig,
    /// Channel set.
    pub channels: ChannelConfig,
    /// Alarm thresholds.
    pub thresholds: ThresholdConfig,
    /// Loop timing.
    pub timing: TimingConfig,
    /// Status report.
    pub report: ReportConfig,
    /// Sensor source.
    pub sampler: SamplerConfig,
    /// Alert output.
    pub alerts: AlertsConfig,
}

impl MonitorConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shared.service_name.is_empty() {
            return invalid("shared.service_name cannot be empty");
        }

        if self.channels.count == 0 {
            return invalid("channels.count must be at least 1");
        }
        if self.channels.count > MAX_CHANNELS {
            return invalid(format!(
                "channels.count {} exceeds maximum {}",
                self.channels.count, MAX_CHANNELS
            ));
        }

        let t = &self.thresholds;
        if !(t.high.is_finite() && t.critical.is_finite() && t.hysteresis.is_finite()) {
            return invalid("thresholds must be finite numbers");
        }
        if t.critical <= t.high {
            return invalid(format!(
                "thresholds.critical ({}) must be greater than thresholds.high ({})",
                t.critical, t.high
            ));
        }
        if t.hysteresis <= 0.0 {
            return invalid("thresholds.hysteresis must be positive");
        }

        if !is_positive_seconds(self.timing.tick_interval_s) {
            return invalid("timing.tick_interval_s must be a positive number of seconds");
        }
        if !is_positive_seconds(self.report.interval_s) {
            return invalid("report.interval_s must be a positive number of seconds");
        }
        if self.report.chunk_size == 0 {
            return invalid("report.chunk_size must be at least 1");
        }

        let s = &self.sampler;
        if !(s.min_plausible.is_finite() && s.max_plausible.is_finite())
            || s.min_plausible >= s.max_plausible
        {
            return invalid("sampler.min_plausible must be below sampler.max_plausible");
        }
        if s.simulation.period_ticks == 0 {
            return invalid("sampler.simulation.period_ticks must be at least 1");
        }

        if self.alerts.queue_depth == 0 {
            return invalid("alerts.queue_depth must be at least 1");
        }
        if self.alerts.player.is_empty() {
            return invalid("alerts.player cannot be empty");
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Result<(), ConfigError> {
    Err(ConfigError::ValidationError(msg.into()))
}

// Duration::from_secs_f64 panics on negative, NaN or overflowing input.
fn is_positive_seconds(value: f64) -> bool {
    value.is_finite() && value > 0.0 && value < 86_400.0
}
