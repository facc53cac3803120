//! Fallback alert handler: console bell held for the severity's tone length.

use esc_common::alert::handler::{AlertError, AlertHandler};
use esc_common::alert::types::{Alert, Severity};
use esc_common::config::{AlertProfile, AlertsConfig};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

const BELL: &[u8] = b"\x07";

/// Rings the terminal bell, then holds for the configured tone duration so
/// repeated alerts stay distinguishable.
///
/// The bell has no pitch; `tone_hz` is only logged.
pub struct ToneBeeper<W> {
    out: Mutex<W>,
    high: AlertProfile,
    critical: AlertProfile,
}

impl ToneBeeper<io::Stderr> {
    /// Beeper writing to the process's stderr.
    pub fn stderr(config: &AlertsConfig) -> Self {
        Self::new(io::stderr(), config)
    }
}

impl<W: Write + Send> ToneBeeper<W> {
    /// Beeper writing to `out`.
    pub fn new(out: W, config: &AlertsConfig) -> Self {
        Self {
            out: Mutex::new(out),
            high: config.high.clone(),
            critical: config.critical.clone(),
        }
    }

    /// Tone parameters for a severity.
    pub fn profile(&self, severity: Severity) -> &AlertProfile {
        match severity {
            Severity::High => &self.high,
            Severity::Critical => &self.critical,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> AlertHandler for ToneBeeper<W> {
    fn name(&self) -> &'static str {
        "tone"
    }

    fn handle_alert(&self, alert: &Alert) -> Result<(), AlertError> {
        let profile = self.profile(alert.severity);
        debug!(
            "{}: console bell (nominal {} Hz) for {} ms",
            alert.channel, profile.tone_hz, profile.tone_ms
        );

        {
            let mut out = self.out.lock();
            out.write_all(BELL)
                .and_then(|()| out.flush())
                .map_err(|e| AlertError::Tone(e.to_string()))?;
        }

        let hold = profile.tone_duration();
        if hold > Duration::ZERO {
            std::thread::sleep(hold);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::sensor::types::Channel;

    fn short_tones() -> AlertsConfig {
        let mut config = AlertsConfig::default();
        config.high.tone_ms = 1;
        config.critical.tone_ms = 0;
        config
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rings_bell_once_per_alert() {
        let beeper = ToneBeeper::new(Vec::new(), &short_tones());
        let ch = Channel::new(2).unwrap();
        beeper
            .handle_alert(&Alert::new(ch, Severity::High, "hot"))
            .unwrap();
        beeper
            .handle_alert(&Alert::new(ch, Severity::Critical, "hotter"))
            .unwrap();
        assert_eq!(beeper.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn default_tones_follow_severity() {
        let beeper = ToneBeeper::new(Vec::new(), &AlertsConfig::default());
        assert_eq!(beeper.profile(Severity::High).tone_hz, 1100);
        assert_eq!(beeper.profile(Severity::Critical).tone_hz, 1600);
    }

    #[test]
    fn write_failure_is_reported() {
        let beeper = ToneBeeper::new(BrokenPipe, &short_tones());
        let alert = Alert::new(Channel::new(1).unwrap(), Severity::High, "hot");
        assert!(matches!(
            beeper.handle_alert(&alert),
            Err(AlertError::Tone(_))
        ));
    }
}
