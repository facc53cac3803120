//! Primary alert handler: play the severity's sound file.

use esc_common::alert::handler::{AlertError, AlertHandler};
use esc_common::alert::types::{Alert, Severity};
use esc_common::config::AlertsConfig;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Plays sound assets through an external command (`<player> <file>`).
///
/// The call waits for the player to finish; it runs on the dispatcher's
/// worker thread.
#[derive(Debug, Clone)]
pub struct SoundPlayer {
    player: String,
    high: Option<PathBuf>,
    critical: Option<PathBuf>,
}

impl SoundPlayer {
    /// Create a player from the alert configuration.
    pub fn from_config(config: &AlertsConfig) -> Self {
        Self {
            player: config.player.clone(),
            high: config.high.sound.clone(),
            critical: config.critical.sound.clone(),
        }
    }

    /// Sound asset for a severity, if configured.
    pub fn sound_for(&self, severity: Severity) -> Option<&Path> {
        match severity {
            Severity::High => self.high.as_deref(),
            Severity::Critical => self.critical.as_deref(),
        }
    }
}

impl AlertHandler for SoundPlayer {
    fn name(&self) -> &'static str {
        "sound"
    }

    fn handle_alert(&self, alert: &Alert) -> Result<(), AlertError> {
        let path = self
            .sound_for(alert.severity)
            .ok_or(AlertError::NoSound(alert.severity))?;
        if !path.is_file() {
            return Err(AlertError::AssetMissing(path.to_path_buf()));
        }

        debug!("{}: playing {:?}", alert.channel, path);
        let status = Command::new(&self.player)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| AlertError::Spawn {
                player: self.player.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AlertError::PlayerFailed {
                player: self.player.clone(),
                status: status.to_string(),
            })
        }
    }
}
