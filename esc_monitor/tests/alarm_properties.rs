//! Property tests for the per-channel alarm state machine.

use esc_common::config::ThresholdConfig;
use esc_common::sensor::types::{Channel, Sample};
use esc_monitor::alarm::machine::MAX_TRANSITIONS;
use esc_monitor::alarm::{AlarmBank, AlarmState, TransitionKind, evaluate};
use proptest::prelude::*;

fn sample() -> impl Strategy<Value = Sample> {
    prop_oneof![
        1 => Just(None),
        6 => (20.0f64..50.0).prop_map(Some),
    ]
}

fn thresholds() -> impl Strategy<Value = ThresholdConfig> {
    (25.0f64..40.0, 1.0f64..10.0, 0.5f64..5.0).prop_map(|(high, gap, hysteresis)| {
        ThresholdConfig {
            high,
            critical: high + gap,
            hysteresis,
        }
    })
}

fn channel() -> Channel {
    Channel::new(1).unwrap()
}

proptest! {
    /// CRITICAL is never active without HIGH, whatever the input sequence,
    /// and one evaluation never both clears and raises.
    #[test]
    fn critical_implies_high(
        t in thresholds(),
        samples in prop::collection::vec(sample(), 0..200),
    ) {
        let mut state = AlarmState::default();
        for s in samples {
            let (next, events) = evaluate(channel(), s, state, &t);
            prop_assert!(!next.critical_active() || next.high_active());
            prop_assert!(events.len() <= MAX_TRANSITIONS);
            prop_assert!(!(events.iter().any(|e| e.kind.is_raise())
                && events.iter().any(|e| !e.kind.is_raise())));
            state = next;
        }
    }

    /// Feeding the same value twice never produces events the second time.
    #[test]
    fn repeated_sample_is_quiet(
        t in thresholds(),
        warmup in prop::collection::vec(sample(), 0..50),
        value in 20.0f64..50.0,
    ) {
        let mut state = AlarmState::default();
        for s in warmup {
            state = evaluate(channel(), s, state, &t).0;
        }
        let (once, _) = evaluate(channel(), Some(value), state, &t);
        let (twice, events) = evaluate(channel(), Some(value), once, &t);
        prop_assert_eq!(once, twice);
        prop_assert!(events.is_empty());
    }

    /// Absent samples never change state.
    #[test]
    fn absent_sample_is_inert(t in thresholds(), bits in 0u8..4) {
        let state = AlarmState::from_bits_truncate(bits);
        let state = if state.critical_active() { state | AlarmState::HIGH } else { state };
        let (next, events) = evaluate(channel(), None, state, &t);
        prop_assert_eq!(next, state);
        prop_assert!(events.is_empty());
    }

    /// Raises and clears of each severity alternate, starting with a raise.
    #[test]
    fn raises_and_clears_alternate(
        t in thresholds(),
        samples in prop::collection::vec(sample(), 0..200),
    ) {
        let mut bank = AlarmBank::new(1, t);
        let mut high_up = false;
        let mut critical_up = false;
        for s in samples {
            for event in bank.evaluate_all(&[s]) {
                match event.kind {
                    TransitionKind::HighRaised => {
                        prop_assert!(!high_up);
                        high_up = true;
                    }
                    TransitionKind::HighCleared => {
                        prop_assert!(high_up);
                        high_up = false;
                    }
                    TransitionKind::CriticalRaised => {
                        prop_assert!(!critical_up);
                        critical_up = true;
                        high_up = true;
                    }
                    TransitionKind::CriticalCleared => {
                        prop_assert!(critical_up);
                        critical_up = false;
                    }
                }
            }
        }
        let state = bank.state(channel()).unwrap();
        prop_assert_eq!(state.high_active(), high_up);
        prop_assert_eq!(state.critical_active(), critical_up);
    }
}
