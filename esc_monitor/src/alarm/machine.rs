//! Alarm transition evaluation.
//!
//! [`evaluate`] is a pure function of `(sample, state, thresholds)`. Per
//! tick it checks, in this fixed order:
//!
//! 1. CRITICAL clear (`sample <= critical - hysteresis`)
//! 2. HIGH clear (`sample <= high - hysteresis`)
//! 3. CRITICAL raise (`sample >= critical`), which also forces HIGH on
//! 4. otherwise HIGH raise (`sample >= high`)
//!
//! Raising CRITICAL before HIGH matters: a sample that jumps from below
//! HIGH straight past CRITICAL must raise CRITICAL, not just HIGH.

use crate::alarm::state::AlarmState;
use esc_common::alert::types::{Alert, Severity};
use esc_common::config::ThresholdConfig;
use esc_common::sensor::types::{Channel, Sample};
use std::fmt;

/// Upper bound of events one evaluation can produce: two clears, or one raise.
///
/// A clear and a raise never happen together: after a CRITICAL clear HIGH is
/// still active, and a HIGH clear puts the sample below both raise points.
pub const MAX_TRANSITIONS: usize = 2;

/// Events produced by one evaluation, without heap allocation.
pub type Transitions = heapless::Vec<AlarmEvent, MAX_TRANSITIONS>;

/// Kind of alarm transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// HIGH alarm became active.
    HighRaised,
    /// HIGH alarm cleared.
    HighCleared,
    /// CRITICAL (and with it HIGH) alarm became active.
    CriticalRaised,
    /// CRITICAL alarm cleared. HIGH may still be active.
    CriticalCleared,
}

impl TransitionKind {
    /// Severity this transition belongs to.
    pub const fn severity(self) -> Severity {
        match self {
            Self::HighRaised | Self::HighCleared => Severity::High,
            Self::CriticalRaised | Self::CriticalCleared => Severity::Critical,
        }
    }

    /// Returns true for `*Raised` transitions.
    pub const fn is_raise(self) -> bool {
        matches!(self, Self::HighRaised | Self::CriticalRaised)
    }
}

/// One alarm transition on one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmEvent {
    /// Channel that transitioned.
    pub channel: Channel,
    /// What happened.
    pub kind: TransitionKind,
    /// Sample that caused the transition [°C].
    pub temperature: f64,
    /// Raise threshold of the affected severity [°C].
    pub threshold: f64,
}

impl AlarmEvent {
    /// Alert to dispatch for this event. Clears are log-only and yield `None`.
    pub fn to_alert(&self) -> Option<Alert> {
        self.kind
            .is_raise()
            .then(|| Alert::new(self.channel, self.kind.severity(), self.to_string()))
    }
}

impl fmt::Display for AlarmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransitionKind::HighRaised => write!(
                f,
                "{} HIGH: {:.1} C >= {:?} C - high sound",
                self.channel, self.temperature, self.threshold
            ),
            TransitionKind::CriticalRaised => write!(
                f,
                "{} CRITICAL: {:.1} C >= {:?} C - critical sound",
                self.channel, self.temperature, self.threshold
            ),
            TransitionKind::HighCleared => write!(
                f,
                "{}: temperature dropped below high threshold ({:.1} C)",
                self.channel, self.temperature
            ),
            TransitionKind::CriticalCleared => write!(
                f,
                "{}: temperature dropped below critical threshold ({:.1} C)",
                self.channel, self.temperature
            ),
        }
    }
}

/// Evaluate one channel's sample against its current alarm state.
///
/// Returns the next state and the transitions taken, in evaluation order.
/// An absent sample leaves the state untouched and produces no events.
pub fn evaluate(
    channel: Channel,
    sample: Sample,
    state: AlarmState,
    thresholds: &ThresholdConfig,
) -> (AlarmState, Transitions) {
    let mut next = state;
    let mut events = Transitions::new();

    let Some(temp) = sample else {
        return (next, events);
    };

    let event = |kind, threshold| AlarmEvent {
        channel,
        kind,
        temperature: temp,
        threshold,
    };

    if next.critical_active() && temp <= thresholds.critical_clear() {
        next.remove(AlarmState::CRITICAL);
        record(
            &mut events,
            event(TransitionKind::CriticalCleared, thresholds.critical),
        );
    }

    if next.high_active() && temp <= thresholds.high_clear() {
        next.remove(AlarmState::HIGH);
        record(&mut events, event(TransitionKind::HighCleared, thresholds.high));
    }

    if !next.critical_active() && temp >= thresholds.critical {
        next.insert(AlarmState::CRITICAL | AlarmState::HIGH);
        record(
            &mut events,
            event(TransitionKind::CriticalRaised, thresholds.critical),
        );
    } else if !next.high_active() && temp >= thresholds.high {
        next.insert(AlarmState::HIGH);
        record(&mut events, event(TransitionKind::HighRaised, thresholds.high));
    }

    debug_assert!(next.is_consistent(), "{channel}: CRITICAL without HIGH");
    (next, events)
}

#[inline]
fn record(events: &mut Transitions, event: AlarmEvent) {
    let pushed = events.push(event).is_ok();
    debug_assert!(pushed, "more than {MAX_TRANSITIONS} transitions in one evaluation");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(index: u16) -> Channel {
        Channel::new(index).unwrap()
    }

    fn kinds(events: &Transitions) -> Vec<TransitionKind> {
        events.iter().map(|e| e.kind).collect()
    }

    /// Feed a sequence, returning the events of every step.
    fn run(samples: &[f64]) -> Vec<Vec<TransitionKind>> {
        let thresholds = ThresholdConfig::default();
        let mut state = AlarmState::default();
        samples
            .iter()
            .map(|&t| {
                let (next, events) = evaluate(ch(1), Some(t), state, &thresholds);
                state = next;
                kinds(&events)
            })
            .collect()
    }

    #[test]
    fn reference_sequence_yields_expected_events() {
        use TransitionKind::*;

        let steps = run(&[34.0, 36.0, 41.0, 38.0, 36.5, 31.0]);
        assert_eq!(
            steps,
            vec![
                vec![],
                vec![HighRaised],
                vec![CriticalRaised],
                vec![],
                vec![CriticalCleared],
                vec![HighCleared],
            ]
        );
    }

    #[test]
    fn reference_sequence_states() {
        let thresholds = ThresholdConfig::default();
        let mut state = AlarmState::default();
        let mut states = Vec::new();
        for t in [34.0, 36.0, 41.0, 38.0, 36.5, 31.0] {
            state = evaluate(ch(1), Some(t), state, &thresholds).0;
            states.push(state);
        }
        assert_eq!(
            states,
            vec![
                AlarmState::empty(),
                AlarmState::HIGH,
                AlarmState::HIGH | AlarmState::CRITICAL,
                AlarmState::HIGH | AlarmState::CRITICAL,
                AlarmState::HIGH,
                AlarmState::empty(),
            ]
        );
    }

    #[test]
    fn jump_straight_to_critical_raises_critical_only() {
        let thresholds = ThresholdConfig::default();
        let (state, events) = evaluate(ch(2), Some(45.0), AlarmState::empty(), &thresholds);
        assert_eq!(state, AlarmState::HIGH | AlarmState::CRITICAL);
        assert_eq!(kinds(&events), vec![TransitionKind::CriticalRaised]);
    }

    #[test]
    fn drop_from_critical_to_cold_clears_both_in_order() {
        let thresholds = ThresholdConfig::default();
        let active = AlarmState::HIGH | AlarmState::CRITICAL;
        let (state, events) = evaluate(ch(1), Some(20.0), active, &thresholds);
        assert_eq!(state, AlarmState::empty());
        assert_eq!(
            kinds(&events),
            vec![TransitionKind::CriticalCleared, TransitionKind::HighCleared]
        );
        assert_eq!(events.len(), MAX_TRANSITIONS);
    }

    #[test]
    fn repeated_sample_emits_only_on_transition() {
        assert_eq!(run(&[36.0, 36.0]), vec![vec![TransitionKind::HighRaised], vec![]]);
        assert_eq!(
            run(&[42.0, 42.0]),
            vec![vec![TransitionKind::CriticalRaised], vec![]]
        );
        assert_eq!(
            run(&[36.0, 30.0, 30.0]),
            vec![vec![TransitionKind::HighRaised], vec![TransitionKind::HighCleared], vec![]]
        );
    }

    #[test]
    fn absent_sample_never_changes_state() {
        let thresholds = ThresholdConfig::default();
        for state in [
            AlarmState::empty(),
            AlarmState::HIGH,
            AlarmState::HIGH | AlarmState::CRITICAL,
        ] {
            let (next, events) = evaluate(ch(1), None, state, &thresholds);
            assert_eq!(next, state);
            assert!(events.is_empty());
        }
    }

    #[test]
    fn hysteresis_band_holds_alarm() {
        // 33.0 is below HIGH but above its clear point (32.0).
        let steps = run(&[35.0, 33.0, 32.5, 32.0]);
        assert_eq!(
            steps,
            vec![
                vec![TransitionKind::HighRaised],
                vec![],
                vec![],
                vec![TransitionKind::HighCleared]
            ]
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        let thresholds = ThresholdConfig::default();
        let (state, _) = evaluate(ch(1), Some(35.0), AlarmState::empty(), &thresholds);
        assert!(state.high_active());
        let (state, _) = evaluate(ch(1), Some(40.0), state, &thresholds);
        assert!(state.critical_active());
        let (state, _) = evaluate(ch(1), Some(37.0), state, &thresholds);
        assert!(!state.critical_active());
        assert!(state.high_active());
    }

    #[test]
    fn critical_clear_then_reraise() {
        use TransitionKind::*;
        let steps = run(&[41.0, 37.0, 40.0]);
        assert_eq!(steps, vec![vec![CriticalRaised], vec![CriticalCleared], vec![CriticalRaised]]);
    }

    #[test]
    fn event_log_lines() {
        let thresholds = ThresholdConfig::default();
        let (state, events) = evaluate(ch(3), Some(36.04), AlarmState::empty(), &thresholds);
        assert_eq!(events[0].to_string(), "ESC3 HIGH: 36.0 C >= 35.0 C - high sound");

        let (state, events) = evaluate(ch(3), Some(41.26), state, &thresholds);
        assert_eq!(
            events[0].to_string(),
            "ESC3 CRITICAL: 41.3 C >= 40.0 C - critical sound"
        );

        let (_, events) = evaluate(ch(3), Some(30.0), state, &thresholds);
        assert_eq!(
            events[0].to_string(),
            "ESC3: temperature dropped below critical threshold (30.0 C)"
        );
        assert_eq!(
            events[1].to_string(),
            "ESC3: temperature dropped below high threshold (30.0 C)"
        );
    }

    #[test]
    fn raise_line_shows_configured_threshold_exactly() {
        let thresholds = ThresholdConfig {
            high: 35.25,
            critical: 40.125,
            hysteresis: 3.0,
        };
        let (state, events) = evaluate(ch(2), Some(35.3), AlarmState::empty(), &thresholds);
        assert_eq!(events[0].to_string(), "ESC2 HIGH: 35.3 C >= 35.25 C - high sound");

        let (_, events) = evaluate(ch(2), Some(40.2), state, &thresholds);
        assert_eq!(
            events[0].to_string(),
            "ESC2 CRITICAL: 40.2 C >= 40.125 C - critical sound"
        );
    }

    #[test]
    fn only_raises_become_alerts() {
        let thresholds = ThresholdConfig::default();
        let (state, events) = evaluate(ch(5), Some(40.5), AlarmState::empty(), &thresholds);
        let alert = events[0].to_alert().expect("raise must produce an alert");
        assert_eq!(alert.channel, ch(5));
        assert_eq!(alert.severity, Severity::Critical);
        assert!(alert.message.starts_with("ESC5 CRITICAL"));

        let (_, events) = evaluate(ch(5), Some(10.0), state, &thresholds);
        assert!(events.iter().all(|e| e.to_alert().is_none()));
    }
}
