//! Alert dispatch: getting raise events out of the loop and into speakers.
//!
//! - [`worker`] - `AlertDispatcher`, a bounded queue drained by a worker thread
//! - [`fallback`] - Primary/fallback handler chain
//! - [`sound`] - Sound file playback through an external player
//! - [`tone`] - Console bell fallback
//!
//! ```text
//!  EscMonitor ──dispatch()──► [ bounded queue ] ──► worker thread
//!  (never blocks)                                   └─► FallbackChain
//!                                                        ├─ SoundPlayer
//!                                                        └─ ToneBeeper
//! ```

pub mod fallback;
pub mod sound;
pub mod tone;
pub mod worker;

use esc_common::alert::types::Alert;

pub use fallback::FallbackChain;
pub use sound::SoundPlayer;
pub use tone::ToneBeeper;
pub use worker::{AlertDispatcher, DispatchCounts};

/// Fire-and-forget alert sink used by the monitor loop.
///
/// Implementations must not block the caller for the duration of the alert
/// and must not surface failures; there is nothing the loop could do with
/// them.
pub trait Dispatch: Send {
    /// Hand off an alert.
    fn dispatch(&self, alert: Alert);
}
