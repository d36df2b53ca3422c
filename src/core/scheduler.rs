//! Interval-driven scheduler for analysis cycles

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio::sync::{watch, Mutex, Notify};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::core::cycle::{CycleOutcome, CycleReport, CycleRunner};
use crate::error::SchedulerError;
use crate::history::HistoryStore;
use crate::metrics::Metrics;
use crate::reporting::{ReportingSink, RECENT_SHOWN};

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Measured from the end of one cycle to the start of the next
    pub interval: Duration,
    pub run_on_start: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(120),
            run_on_start: true,
        }
    }
}

/// Runs at most one cycle at a time, on a timer or on request
pub struct CycleScheduler {
    runner: CycleRunner,
    history: Arc<HistoryStore>,
    sink: Arc<dyn ReportingSink>,
    metrics: Arc<Metrics>,
    config: SchedulerConfig,
    cycle_lock: Mutex<()>,
    running: Arc<AtomicBool>,
    pending: Arc<AtomicBool>,
    last_cycle_id: AtomicU64,
    trigger: Arc<Notify>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    shutdown_rx: watch::Receiver<bool>,
}

/// Cloneable control surface for a running scheduler
#[derive(Clone)]
pub struct SchedulerHandle {
    trigger: Arc<Notify>,
    running: Arc<AtomicBool>,
    pending: Arc<AtomicBool>,
    shutdown_tx: Arc<watch::Sender<bool>>,
}

impl SchedulerHandle {
    /// Ask the control loop to start a cycle now.
    ///
    /// Rejected while a cycle is running or another trigger has not been
    /// picked up yet; requests are not queued.
    pub fn trigger(&self) -> Result<(), SchedulerError> {
        if *self.shutdown_tx.borrow() {
            return Err(SchedulerError::ShuttingDown);
        }
        if self.running.load(Ordering::SeqCst) {
            return Err(SchedulerError::CycleInProgress);
        }
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SchedulerError::CycleInProgress);
        }
        self.trigger.notify_one();
        Ok(())
    }

    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_running_cycle(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

struct RunningFlag<'a>(&'a AtomicBool);

impl<'a> RunningFlag<'a> {
    fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CycleScheduler {
    pub fn new(
        runner: CycleRunner,
        history: Arc<HistoryStore>,
        sink: Arc<dyn ReportingSink>,
        metrics: Arc<Metrics>,
        config: SchedulerConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            interval_secs = config.interval.as_secs(),
            run_on_start = config.run_on_start,
            "CycleScheduler: created with interval {}s",
            config.interval.as_secs()
        );

        Self {
            runner,
            history,
            sink,
            metrics,
            config,
            cycle_lock: Mutex::new(()),
            running: Arc::new(AtomicBool::new(false)),
            pending: Arc::new(AtomicBool::new(false)),
            last_cycle_id: AtomicU64::new(0),
            trigger: Arc::new(Notify::new()),
            shutdown_tx: Arc::new(shutdown_tx),
            shutdown_rx,
        }
    }

    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            trigger: self.trigger.clone(),
            running: self.running.clone(),
            pending: self.pending.clone(),
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Run one cycle now, record it and report it.
    ///
    /// Fails with `CycleInProgress` if another cycle holds the lock, and with
    /// `ShuttingDown` if shutdown was requested before or during the cycle.
    pub async fn run_cycle(&self) -> Result<CycleReport, SchedulerError> {
        let _guard = self
            .cycle_lock
            .try_lock()
            .map_err(|_| SchedulerError::CycleInProgress)?;
        let _running = RunningFlag::set(&self.running);

        if *self.shutdown_rx.borrow() {
            return Err(SchedulerError::ShuttingDown);
        }

        let cycle_id = self.last_cycle_id.fetch_add(1, Ordering::SeqCst) + 1;
        let timer = self.metrics.cycle_duration_seconds.start_timer();

        match self.runner.run(cycle_id, &self.shutdown_rx).await {
            CycleOutcome::Completed(report) => {
                timer.observe_duration();
                self.history.record(&report.signals).await;

                self.metrics.cycles_total.inc();
                self.metrics.signals_total.inc_by(report.signals.len() as u64);

                let stats = self.history.statistics().await;
                let recent = self.history.recent(RECENT_SHOWN).await;
                self.sink.report_cycle(&report, &stats, &recent);

                Ok(report)
            }
            CycleOutcome::Aborted {
                cycle_id,
                batches_completed,
            } => {
                timer.stop_and_discard();
                self.metrics.cycles_aborted_total.inc();
                warn!(
                    cycle_id,
                    batches_completed,
                    "Cycle {} aborted by shutdown, results discarded",
                    cycle_id
                );
                Err(SchedulerError::ShuttingDown)
            }
        }
    }

    /// Control loop; returns once shutdown is requested
    pub async fn run(&self) {
        let mut shutdown = self.shutdown_rx.clone();
        let mut next = if self.config.run_on_start {
            Instant::now()
        } else {
            Instant::now() + self.config.interval
        };

        info!("CycleScheduler: started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep_until(next) => {
                    // A trigger that raced the timer is served by this cycle
                    if self.pending.swap(false, Ordering::SeqCst) {
                        self.trigger.notified().now_or_never();
                    }
                }
                _ = self.trigger.notified() => {
                    self.pending.store(false, Ordering::SeqCst);
                    debug!("CycleScheduler: manual trigger");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
            }

            match self.run_cycle().await {
                Ok(report) => {
                    debug!(
                        cycle_id = report.cycle_id,
                        signals = report.signals.len(),
                        "CycleScheduler: cycle finished"
                    );
                }
                Err(SchedulerError::CycleInProgress) => {
                    debug!("CycleScheduler: cycle already running, tick skipped");
                }
                Err(SchedulerError::ShuttingDown) => break,
            }

            next = Instant::now() + self.config.interval;
        }

        info!("CycleScheduler: stopped");
    }
}
