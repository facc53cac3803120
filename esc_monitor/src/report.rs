//! Periodic status report.
//!
//! Independent of alarms: every tick the loop offers the tick's samples,
//! and at most once per report interval a table of all channels is
//! produced:
//!
//! ```text
//! [14:03:27]
//! ESC1 : 36.2 C   |   ESC2 : 35.8 C   |   ESC3 : -- C   |   ESC4 : 33.0 C
//! ESC5 : 31.4 C   |   ESC6 : 30.9 C   |   ESC7 : 32.2 C   |   ESC8 : 29.7 C
//! ```

use chrono::{DateTime, Local};
use esc_common::config::ReportConfig;
use esc_common::sensor::types::{Channel, Sample};
use std::fmt;
use std::time::Duration;

/// Separator between entries on one report line.
pub const ENTRY_SEPARATOR: &str = "   |   ";

/// Placeholder for an absent sample.
pub const ABSENT_PLACEHOLDER: &str = "--";

/// One emitted report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Timestamp header followed by chunked channel entries.
    Table {
        /// `HH:MM:SS` local time.
        stamp: String,
        /// One string per line, entries joined by [`ENTRY_SEPARATOR`].
        lines: Vec<String>,
    },
    /// No channel had data this tick.
    NoData {
        /// `HH:MM:SS` local time.
        stamp: String,
    },
}

impl Report {
    /// Build a report from one tick's samples. `samples[i]` is channel `i + 1`.
    pub fn build(wall: DateTime<Local>, samples: &[Sample], chunk_size: usize) -> Self {
        let stamp = wall.format("%H:%M:%S").to_string();

        if samples.iter().all(Option::is_none) {
            return Self::NoData { stamp };
        }

        let entries: Vec<String> = Channel::all(samples.len() as u16)
            .zip(samples)
            .map(|(channel, &sample)| format_entry(channel, sample))
            .collect();
        let lines = entries
            .chunks(chunk_size.max(1))
            .map(|chunk| chunk.join(ENTRY_SEPARATOR))
            .collect();

        Self::Table { stamp, lines }
    }

    /// Table lines, excluding the header. Empty for `NoData`.
    pub fn table_lines(&self) -> &[String] {
        match self {
            Self::Table { lines, .. } => lines,
            Self::NoData { .. } => &[],
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { stamp, lines } => {
                writeln!(f, "[{stamp}]")?;
                for line in lines {
                    writeln!(f, "{line}")?;
                }
                writeln!(f)
            }
            Self::NoData { stamp } => writeln!(f, "[{stamp}] No ESC data available"),
        }
    }
}

/// Format a temperature with one decimal, or the placeholder.
pub fn format_temperature(sample: Sample) -> String {
    match sample {
        Some(t) => format!("{t:.1}"),
        None => ABSENT_PLACEHOLDER.to_string(),
    }
}

/// `ESC<i> : <t> C`
pub fn format_entry(channel: Channel, sample: Sample) -> String {
    format!("{channel} : {} C", format_temperature(sample))
}

/// Rate-limits reports to one per interval.
#[derive(Debug, Clone)]
pub struct Reporter {
    interval: Duration,
    chunk_size: usize,
    last_report: Option<Duration>,
}

impl Reporter {
    /// Create a reporter that has never reported.
    pub fn new(interval: Duration, chunk_size: usize) -> Self {
        Self {
            interval,
            chunk_size,
            last_report: None,
        }
    }

    /// Create a reporter from configuration.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.interval(), config.chunk_size)
    }

    /// Monotonic time of the last emitted report.
    pub fn last_report(&self) -> Option<Duration> {
        self.last_report
    }

    /// Returns true if a report is due at `now`.
    pub fn is_due(&self, now: Duration) -> bool {
        match self.last_report {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }

    /// Offer one tick's samples. Returns a report if one is due.
    ///
    /// `now` is monotonic time; `wall` only stamps the header.
    pub fn poll(&mut self, now: Duration, wall: DateTime<Local>, samples: &[Sample]) -> Option<Report> {
        if !self.is_due(now) {
            return None;
        }
        self.last_report = Some(now);
        Some(Report::build(wall, samples, self.chunk_size))
    }
}
