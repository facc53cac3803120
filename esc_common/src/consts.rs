//! System-wide defaults for the ESC monitor.
//!
//! Single source of truth for thresholds, cadences and limits.

/// Default number of monitored ESC channels.
pub const DEFAULT_CHANNEL_COUNT: u16 = 8;

/// Maximum number of ESC channels.
pub const MAX_CHANNELS: u16 = 64;

/// Default HIGH alarm threshold [°C].
pub const DEFAULT_HIGH_THRESHOLD: f64 = 35.0;

/// Default CRITICAL alarm threshold [°C].
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 40.0;

/// Default hysteresis band below a threshold before an alarm clears [°C].
pub const DEFAULT_HYSTERESIS: f64 = 3.0;

/// Lower bound of a physically plausible reading [°C].
pub const DEFAULT_MIN_PLAUSIBLE: f64 = -50.0;

/// Upper bound of a physically plausible reading [°C].
pub const DEFAULT_MAX_PLAUSIBLE: f64 = 300.0;

/// Default tick interval in seconds.
pub const DEFAULT_TICK_INTERVAL_S: f64 = 0.5;

/// Default status report interval in seconds.
pub const DEFAULT_REPORT_INTERVAL_S: f64 = 5.0;

/// Default number of channel entries per report line.
pub const DEFAULT_REPORT_CHUNK_SIZE: usize = 4;

/// Default depth of the alert dispatch queue.
pub const DEFAULT_ALERT_QUEUE_DEPTH: usize = 16;

/// Default external command used to play alert sounds.
pub const DEFAULT_SOUND_PLAYER: &str = "aplay";

/// Canonical service name (used for logging).
pub const SERVICE_NAME: &str = "esc_monitor";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_consistent() {
        assert!(DEFAULT_CHANNEL_COUNT > 0 && DEFAULT_CHANNEL_COUNT <= MAX_CHANNELS);
        assert!(DEFAULT_CRITICAL_THRESHOLD > DEFAULT_HIGH_THRESHOLD);
        assert!(DEFAULT_HYSTERESIS > 0.0);
        assert!(DEFAULT_MIN_PLAUSIBLE < DEFAULT_MAX_PLAUSIBLE);
        assert!(DEFAULT_REPORT_INTERVAL_S >= DEFAULT_TICK_INTERVAL_S);
        assert!(DEFAULT_REPORT_CHUNK_SIZE > 0);
    }
}
