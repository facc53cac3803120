//! Alert dispatcher backed by a worker thread.
//!
//! The monitor loop only ever does a `try_send` into a bounded queue. The
//! worker drains the queue and runs the (possibly slow) handler chain, so
//! a stuck sound player can delay other alerts but never a tick.
//!
//! On shutdown only the alert currently playing is finished; alerts still
//! queued are discarded and counted as dropped. [`AlertDispatcher::drain`]
//! plays them all instead.

use crate::dispatch::Dispatch;
use esc_common::alert::handler::AlertHandler;
use esc_common::alert::types::Alert;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Shared dispatch counters.
#[derive(Debug, Default)]
struct DispatchStats {
    dispatched: AtomicU64,
    dropped: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of the dispatch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchCounts {
    /// Alerts accepted into the queue.
    pub dispatched: u64,
    /// Alerts dropped because the queue was full or closed, or discarded
    /// unplayed at shutdown.
    pub dropped: u64,
    /// Alerts a handler rendered successfully.
    pub delivered: u64,
    /// Alerts every handler failed to render.
    pub failed: u64,
}

/// Non-blocking alert dispatcher.
pub struct AlertDispatcher {
    sender: Option<SyncSender<Alert>>,
    worker: Option<JoinHandle<()>>,
    stats: Arc<DispatchStats>,
    discard: Arc<AtomicBool>,
}

impl AlertDispatcher {
    /// Start the worker thread running `handler` behind a queue of
    /// `queue_depth` alerts.
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(handler: Box<dyn AlertHandler>, queue_depth: usize) -> io::Result<Self> {
        let (sender, receiver) = mpsc::sync_channel::<Alert>(queue_depth);
        let stats = Arc::new(DispatchStats::default());
        let discard = Arc::new(AtomicBool::new(false));
        let worker_stats = Arc::clone(&stats);
        let worker_discard = Arc::clone(&discard);

        let worker = thread::Builder::new()
            .name("esc-alerts".to_string())
            .spawn(move || {
                debug!("Alert worker started (handler={})", handler.name());
                let mut discarded = 0u64;
                for alert in receiver {
                    if worker_discard.load(Ordering::Acquire) {
                        discarded += 1;
                        continue;
                    }
                    match handler.handle_alert(&alert) {
                        Ok(()) => {
                            worker_stats.delivered.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            worker_stats.failed.fetch_add(1, Ordering::Relaxed);
                            warn!("{} {} alert not delivered: {e}", alert.channel, alert.severity);
                        }
                    }
                }
                if discarded > 0 {
                    worker_stats.dropped.fetch_add(discarded, Ordering::Relaxed);
                    warn!("Discarded {discarded} queued alerts at shutdown");
                }
                debug!("Alert worker stopped");
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            stats,
            discard,
        })
    }

    /// Current counters.
    pub fn counts(&self) -> DispatchCounts {
        DispatchCounts {
            dispatched: self.stats.dispatched.load(Ordering::Relaxed),
            dropped: self.stats.dropped.load(Ordering::Relaxed),
            delivered: self.stats.delivered.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        }
    }

    /// Close the queue, discard alerts not yet started and wait for the
    /// one in progress.
    ///
    /// Alerts dispatched afterwards are dropped.
    pub fn shutdown(&mut self) {
        self.discard.store(true, Ordering::Release);
        self.close();
    }

    /// Close the queue and wait until every queued alert has been handled.
    ///
    /// Alerts dispatched afterwards are dropped.
    pub fn drain(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.sender = None;
        if let Some(worker) = self.worker.take() {
            debug!("Waiting for alert worker to finish");
            if worker.join().is_err() {
                warn!("Alert worker panicked");
            }
        }
    }
}

impl Dispatch for AlertDispatcher {
    fn dispatch(&self, alert: Alert) {
        let Some(sender) = self.sender.as_ref() else {
            self.stats.dropped.fetch_add(1, Ordering::Relaxed);
            warn!("{} {} alert dropped: dispatcher stopped", alert.channel, alert.severity);
            return;
        };

        match sender.try_send(alert) {
            Ok(()) => {
                self.stats.dispatched.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(alert)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("{} {} alert dropped: queue full", alert.channel, alert.severity);
            }
            Err(TrySendError::Disconnected(alert)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("{} {} alert dropped: worker gone", alert.channel, alert.severity);
            }
        }
    }
}

impl Drop for AlertDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_common::alert::handler::AlertError;
    use esc_common::alert::types::Severity;
    use esc_common::sensor::types::Channel;
    use parking_lot::Mutex;
    use std::sync::mpsc::{Receiver, Sender};
    use std::time::Duration;

    fn alert(index: u16) -> Alert {
        Alert::new(Channel::new(index).unwrap(), Severity::High, "hot")
    }

    struct Collect(Arc<Mutex<Vec<u16>>>);

    impl AlertHandler for Collect {
        fn name(&self) -> &'static str {
            "collect"
        }

        fn handle_alert(&self, alert: &Alert) -> Result<(), AlertError> {
            self.0.lock().push(alert.channel.index());
            Ok(())
        }
    }

    struct AlwaysFails;

    impl AlertHandler for AlwaysFails {
        fn name(&self) -> &'static str {
            "fails"
        }

        fn handle_alert(&self, _alert: &Alert) -> Result<(), AlertError> {
            Err(AlertError::Tone("no console".to_string()))
        }
    }

    /// Signals when it starts an alert, then waits for the gate.
    struct Gated {
        started: Mutex<Sender<()>>,
        gate: Mutex<Receiver<()>>,
    }

    impl AlertHandler for Gated {
        fn name(&self) -> &'static str {
            "gated"
        }

        fn handle_alert(&self, _alert: &Alert) -> Result<(), AlertError> {
            let _ = self.started.lock().send(());
            let _ = self.gate.lock().recv();
            Ok(())
        }
    }

    #[test]
    fn alerts_are_delivered_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher =
            AlertDispatcher::spawn(Box::new(Collect(Arc::clone(&seen))), 8).unwrap();
        for index in 1..=3 {
            dispatcher.dispatch(alert(index));
        }
        dispatcher.drain();

        assert_eq!(*seen.lock(), vec![1, 2, 3]);
        assert_eq!(
            dispatcher.counts(),
            DispatchCounts {
                dispatched: 3,
                dropped: 0,
                delivered: 3,
                failed: 0
            }
        );
    }

    #[test]
    fn handler_failure_is_counted_not_propagated() {
        let mut dispatcher = AlertDispatcher::spawn(Box::new(AlwaysFails), 4).unwrap();
        dispatcher.dispatch(alert(1));
        dispatcher.drain();
        assert_eq!(dispatcher.counts().failed, 1);
        assert_eq!(dispatcher.counts().delivered, 0);
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (started_tx, started_rx) = mpsc::channel();
        let (gate_tx, gate_rx) = mpsc::channel();
        let mut dispatcher = AlertDispatcher::spawn(
            Box::new(Gated {
                started: Mutex::new(started_tx),
                gate: Mutex::new(gate_rx),
            }),
            1,
        )
        .unwrap();

        dispatcher.dispatch(alert(1));
        started_rx.recv().unwrap(); // worker is now busy with alert 1
        dispatcher.dispatch(alert(2)); // fills the queue
        dispatcher.dispatch(alert(3)); // dropped

        drop(gate_tx);
        dispatcher.drain();

        let counts = dispatcher.counts();
        assert_eq!(counts.dispatched, 2);
        assert_eq!(counts.dropped, 1);
        assert_eq!(counts.delivered, 2);
    }

    #[test]
    fn dispatch_after_shutdown_is_dropped() {
        let mut dispatcher = AlertDispatcher::spawn(Box::new(AlwaysFails), 1).unwrap();
        dispatcher.shutdown();
        dispatcher.dispatch(alert(1));
        assert_eq!(dispatcher.counts().dropped, 1);
    }

    #[test]
    fn shutdown_discards_queued_alerts() {
        let (started_tx, started_rx) = mpsc::channel();
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let mut dispatcher = AlertDispatcher::spawn(
            Box::new(Gated {
                started: Mutex::new(started_tx),
                gate: Mutex::new(gate_rx),
            }),
            4,
        )
        .unwrap();

        dispatcher.dispatch(alert(1));
        started_rx.recv().unwrap(); // worker is now busy with alert 1
        dispatcher.dispatch(alert(2));
        dispatcher.dispatch(alert(3));

        // Release the in-flight alert only after shutdown has begun.
        let release = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            drop(gate_tx);
        });
        dispatcher.shutdown();
        release.join().unwrap();

        assert!(started_rx.try_recv().is_err(), "queued alerts must not start");
        let counts = dispatcher.counts();
        assert_eq!(counts.dispatched, 3);
        assert_eq!(counts.delivered, 1);
        assert_eq!(counts.dropped, 2);
    }
}
