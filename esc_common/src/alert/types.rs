//! Alert payload types.

use crate::sensor::types::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alarm severity. CRITICAL is a superset of HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Temperature at or above the high threshold.
    High,
    /// Temperature at or above the critical threshold.
    Critical,
}

impl Severity {
    /// Upper-case label used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An alert handed to the dispatcher when an alarm is raised.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Channel that raised the alarm.
    pub channel: Channel,
    /// Alarm severity.
    pub severity: Severity,
    /// Human-readable context (the raise log line).
    pub message: String,
}

impl Alert {
    /// Create a new alert.
    pub fn new(channel: Channel, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            channel,
            severity,
            message: message.into(),
        }
    }
}
