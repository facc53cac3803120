//! # ESC Temperature Monitor
//!
//! Samples every ESC temperature channel on a fixed tick, runs a two-level
//! (HIGH / CRITICAL) hysteresis alarm per channel, hands raised alarms to a
//! non-blocking alert dispatcher and prints a periodic status table.
//!
//! # Module Structure
//!
//! - [`core`] - `EscMonitor`, the tick loop
//! - [`alarm`] - Per-channel alarm state machine
//! - [`sampler`] - Plausibility filter in front of a temperature source
//! - [`source_registry`] / [`sources`] - Temperature source factories
//! - [`dispatch`] - Alert dispatcher, sound and tone handlers
//! - [`report`] - Periodic status report
//! - [`clock`] - Injectable time source
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        EscMonitor (tick)                      │
//! │  ┌─────────┐    ┌────────────┐    ┌────────────────────────┐  │
//! │  │ Sampler │───►│ AlarmBank  │───►│ AlertDispatcher        │  │
//! │  └────┬────┘    └────────────┘    │  (worker thread)       │  │
//! │       │                           └────────────────────────┘  │
//! │       │         ┌────────────┐                                │
//! │       └────────►│ Reporter   │───► stdout                     │
//! │                 └────────────┘                                │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod alarm;
pub mod clock;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod report;
pub mod sampler;
pub mod source_registry;
pub mod sources;

// Re-export key types for convenience
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::{EscMonitor, TickSummary};
pub use crate::error::MonitorError;
pub use crate::sampler::Sampler;
pub use crate::source_registry::SourceRegistry;
