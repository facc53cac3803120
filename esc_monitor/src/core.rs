//! Monitor core and tick loop.
//!
//! `EscMonitor` owns every piece of mutable state (alarm bank, report
//! cadence, timing statistics) and runs strictly sequential ticks:
//!
//! ```text
//! sample all channels ─► evaluate alarms ─► log events / dispatch raises
//!                     └─────────────────► reporter (own cadence)
//! ```

use crate::alarm::{AlarmBank, AlarmEvent, AlarmState};
use crate::clock::Clock;
use crate::dispatch::{AlertDispatcher, Dispatch, FallbackChain, SoundPlayer, ToneBeeper};
use crate::error::MonitorError;
use crate::report::{Report, Reporter};
use crate::sampler::Sampler;
use crate::source_registry::SourceRegistry;
use chrono::{DateTime, Local};
use esc_common::config::MonitorConfig;
use esc_common::sensor::types::{Channel, Sample};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one tick.
#[derive(Debug, Clone, Default)]
pub struct TickSummary {
    /// Plausibility-filtered samples, `samples[i]` is channel `i + 1`.
    pub samples: Vec<Sample>,
    /// Alarm transitions in channel order.
    pub events: Vec<AlarmEvent>,
    /// Report emitted this tick, if one was due.
    pub report: Option<Report>,
}

/// Timing statistics for loop monitoring.
#[derive(Debug, Default)]
struct TimingStats {
    /// Number of ticks executed
    tick_count: u64,
    /// Ticks that took longer than the tick interval
    overruns: u64,
    /// Longest observed tick
    max_tick: Duration,
}

/// The ESC temperature monitor.
pub struct EscMonitor {
    channel_count: u16,
    tick_interval: Duration,
    sampler: Sampler,
    alarms: AlarmBank,
    reporter: Reporter,
    dispatcher: Box<dyn Dispatch>,
    out: Box<dyn Write + Send>,
    running: Arc<AtomicBool>,
    stats: TimingStats,
}

impl EscMonitor {
    /// Assemble a monitor from explicit collaborators.
    ///
    /// # Errors
    /// Returns `MonitorError::Config` if the configuration is invalid.
    pub fn new(
        config: &MonitorConfig,
        sampler: Sampler,
        dispatcher: Box<dyn Dispatch>,
        out: Box<dyn Write + Send>,
    ) -> Result<Self, MonitorError> {
        config.validate()?;

        info!(
            "EscMonitor created: {} channels, source={}, high={:.1} C, critical={:.1} C, hysteresis={:.1} C",
            config.channels.count,
            sampler.source_name(),
            config.thresholds.high,
            config.thresholds.critical,
            config.thresholds.hysteresis
        );

        Ok(Self {
            channel_count: config.channels.count,
            tick_interval: config.timing.tick_interval(),
            sampler,
            alarms: AlarmBank::new(config.channels.count, config.thresholds),
            reporter: Reporter::from_config(&config.report),
            dispatcher,
            out,
            running: Arc::new(AtomicBool::new(false)),
            stats: TimingStats::default(),
        })
    }

    /// Build the production monitor: registered source, sound alerts with
    /// a console tone fallback, reports on stdout.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, the source is
    /// unknown, or the alert worker cannot be started.
    pub fn from_config(
        config: &MonitorConfig,
        registry: &SourceRegistry,
    ) -> Result<Self, MonitorError> {
        config.validate()?;

        let source = registry.create_source(&config.sampler.source, &config.sampler)?;
        let sampler = Sampler::new(source, config.sampler.band());

        let handler = FallbackChain::new(
            Box::new(SoundPlayer::from_config(&config.alerts)),
            Box::new(ToneBeeper::stderr(&config.alerts)),
        );
        let dispatcher = AlertDispatcher::spawn(Box::new(handler), config.alerts.queue_depth)
            .map_err(MonitorError::Dispatcher)?;

        Self::new(config, sampler, Box::new(dispatcher), Box::new(io::stdout()))
    }

    /// Run one tick at monotonic time `now`.
    ///
    /// Alarms are evaluated and raises dispatched on every tick; the report
    /// only when its own interval has elapsed.
    pub fn tick(&mut self, now: Duration, wall: DateTime<Local>) -> TickSummary {
        let samples = self.sampler.sample_all(self.channel_count);
        let events = self.alarms.evaluate_all(&samples);

        for event in &events {
            if event.kind.is_raise() {
                warn!("{event}");
            } else {
                info!("{event}");
            }
            if let Some(alert) = event.to_alert() {
                self.dispatcher.dispatch(alert);
            }
        }

        let report = self.reporter.poll(now, wall, &samples);
        if let Some(report) = &report {
            self.emit_report(report);
        }

        TickSummary {
            samples,
            events,
            report,
        }
    }

    /// Run one tick and sleep out the remainder of the tick interval.
    pub fn step(&mut self, clock: &dyn Clock) -> TickSummary {
        let tick_start = clock.monotonic();
        let summary = self.tick(tick_start, clock.wall());
        let elapsed = clock.monotonic().saturating_sub(tick_start);

        self.stats.tick_count += 1;
        if elapsed > self.stats.max_tick {
            self.stats.max_tick = elapsed;
        }

        if elapsed > self.tick_interval {
            self.stats.overruns += 1;
            if self.stats.overruns <= 10 || self.stats.overruns % 1000 == 0 {
                warn!(
                    "Tick overrun #{}: tick took {}ms (interval {}ms)",
                    self.stats.overruns,
                    elapsed.as_millis(),
                    self.tick_interval.as_millis()
                );
            }
        } else {
            clock.sleep(self.tick_interval - elapsed);
        }

        if self.stats.tick_count % 1000 == 0 {
            debug!(
                "Monitor loop: {} ticks, max={}ms, overruns={}, active alarms={}",
                self.stats.tick_count,
                self.stats.max_tick.as_millis(),
                self.stats.overruns,
                self.alarms.active_count()
            );
        }

        summary
    }

    /// Run ticks until the running flag is cleared.
    pub fn run(&mut self, clock: &dyn Clock) {
        info!(
            "ESC temperature monitor started ({} channels, tick={}ms)",
            self.channel_count,
            self.tick_interval.as_millis()
        );
        self.running.store(true, Ordering::SeqCst);

        while self.running.load(Ordering::SeqCst) {
            self.step(clock);
        }

        info!(
            "ESC temperature monitor stopped after {} ticks (overruns: {})",
            self.stats.tick_count, self.stats.overruns
        );
    }

    /// Request the loop to stop after the current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Get the running flag for signal handlers.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Current alarm state of a channel.
    pub fn alarm_state(&self, channel: Channel) -> Option<AlarmState> {
        self.alarms.state(channel)
    }

    /// Number of monitored channels.
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Get timing statistics: (ticks, overruns, longest tick).
    pub fn stats(&self) -> (u64, u64, Duration) {
        (
            self.stats.tick_count,
            self.stats.overruns,
            self.stats.max_tick,
        )
    }

    fn emit_report(&mut self, report: &Report) {
        let result = write!(self.out, "{report}").and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!("Failed to write status report: {e}");
        }
    }
}
