// packages/journal/src/recording/scheduler.rs
//! Periodic flush scheduler
//!
//! One background task owns a fixed-period ticker. Every tick awaits a
//! flush; the outcome is logged and the ticker keeps going regardless, so a
//! transient write failure is simply retried next period.

use crate::recording::writer::DurableWriter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Period between scheduled flushes
pub const FLUSH_INTERVAL: Duration = Duration::from_secs(60);

/// Drives [`DurableWriter::flush`] on a fixed period
pub struct FlushScheduler {
    writer: Arc<DurableWriter>,
    period: Duration,
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl FlushScheduler {
    /// Scheduler firing every [`FLUSH_INTERVAL`]
    pub fn new(writer: Arc<DurableWriter>) -> Self {
        Self {
            writer,
            period: FLUSH_INTERVAL,
            cancel: None,
            handle: None,
        }
    }

    /// Start ticking. The first flush happens one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            warn!("Flush scheduler already running");
            return;
        }

        info!(
            "Starting flush scheduler every {:?} for {}",
            self.period,
            self.writer.sink_location()
        );

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let writer = Arc::clone(&self.writer);
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = token.cancelled() => break,

                    _ = ticker.tick() => {
                        match writer.flush().await {
                            Ok(report) if report.records > 0 => {
                                debug!("Scheduled flush wrote {} records", report.records);
                            }
                            Ok(_) => {}
                            Err(e) => error!("Scheduled flush failed: {}", e),
                        }
                    }
                }
            }

            debug!("Flush scheduler stopped");
        });

        self.cancel = Some(cancel);
        self.handle = Some(handle);
    }

    /// Cancel pending ticks and wait for a flush already in progress.
    ///
    /// Safe to call when never started or already stopped.
    pub async fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Flush scheduler task failed: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for FlushScheduler {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
