//! Alarm states of every channel, owned by the monitor loop.

use crate::alarm::machine::{AlarmEvent, Transitions, evaluate};
use crate::alarm::state::AlarmState;
use esc_common::config::ThresholdConfig;
use esc_common::sensor::types::{Channel, Sample};

/// One `AlarmState` per channel plus the thresholds they are judged by.
///
/// Each slot is only ever updated by the evaluation of its own channel.
#[derive(Debug, Clone)]
pub struct AlarmBank {
    states: Vec<AlarmState>,
    thresholds: ThresholdConfig,
}

impl AlarmBank {
    /// Create a bank of `count` channels, all alarms clear.
    pub fn new(count: u16, thresholds: ThresholdConfig) -> Self {
        Self {
            states: vec![AlarmState::default(); usize::from(count)],
            thresholds,
        }
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the bank has no channels.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &ThresholdConfig {
        &self.thresholds
    }

    /// Current state of a channel, `None` if out of range.
    pub fn state(&self, channel: Channel) -> Option<AlarmState> {
        self.states.get(channel.slot()).copied()
    }

    /// Evaluate one channel's sample and store the resulting state.
    ///
    /// Channels outside the bank produce no events.
    pub fn evaluate(&mut self, channel: Channel, sample: Sample) -> Transitions {
        let Some(slot) = self.states.get_mut(channel.slot()) else {
            return Transitions::new();
        };
        let (next, events) = evaluate(channel, sample, *slot, &self.thresholds);
        *slot = next;
        events
    }

    /// Evaluate a full tick. `samples[i]` belongs to channel `i + 1`.
    ///
    /// Events are returned in ascending channel order.
    pub fn evaluate_all(&mut self, samples: &[Sample]) -> Vec<AlarmEvent> {
        let mut events = Vec::new();
        for (channel, &sample) in Channel::all(self.len() as u16).zip(samples) {
            events.extend(self.evaluate(channel, sample));
        }
        events
    }

    /// Number of channels with an active HIGH (or CRITICAL) alarm.
    pub fn active_count(&self) -> usize {
        self.states.iter().filter(|s| s.high_active()).count()
    }
}
