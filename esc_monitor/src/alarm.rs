//! Per-channel alarm state machine with hysteresis.
//!
//! Each channel carries two flags, HIGH and CRITICAL. A tick's sample is
//! fed through [`evaluate`], which clears before it raises and never lets
//! CRITICAL stand without HIGH.

pub mod bank;
pub mod machine;
pub mod state;

pub use bank::AlarmBank;
pub use machine::{AlarmEvent, TransitionKind, Transitions, evaluate};
pub use state::AlarmState;
