//! Deletion confirmation
//!
//! RunPod acknowledges a delete before the resource is actually gone. After a
//! delete, the confirmer keeps probing the resource on a fixed interval until
//! RunPod reports it missing or the deadline passes. Time is read through a
//! [`Clock`] so tests can run the loop without waiting.

use crate::config::DeletionSettings;
use crate::error::{ReconcileError, ResourceKind};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Shortest delay between existence checks; smaller intervals are raised to it
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Source of time for polling loops
#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;
    /// Wait for `duration` to pass
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock time backed by the Tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait::async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Result of waiting for a deletion
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// RunPod reports the resource as gone
    Confirmed,
    /// Delete was accepted but the resource was still visible when we stopped
    /// looking. Not an error: local state should still be discarded.
    TimedOut,
}

/// Polls until a deleted resource disappears
#[derive(Clone)]
pub struct DeletionConfirmer {
    timeout: Duration,
    poll_interval: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for DeletionConfirmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionConfirmer")
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl Default for DeletionConfirmer {
    fn default() -> Self {
        Self::from_settings(&DeletionSettings::default())
    }
}

impl DeletionConfirmer {
    /// Create a confirmer using wall-clock time
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self::with_clock(timeout, poll_interval, Arc::new(TokioClock))
    }

    /// Create a confirmer reading time from `clock`
    ///
    /// `poll_interval` is raised to [`MIN_POLL_INTERVAL`].
    pub fn with_clock(timeout: Duration, poll_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            timeout,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            clock,
        }
    }

    /// Create a wall-clock confirmer from configured bounds
    pub fn from_settings(settings: &DeletionSettings) -> Self {
        Self::new(settings.timeout(), settings.poll_interval())
    }

    /// Total time to wait for a deleted resource to disappear
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Delay between existence checks
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait for `probe` to report [`ReconcileError::NotFound`].
    ///
    /// `probe` is one existence check (a read of the resource). Each check is
    /// preceded by one poll interval, shortened to end at the deadline. Errors
    /// other than not-found are logged and polling continues. Cancelling
    /// `cancel` stops the wait promptly with [`DeletionOutcome::TimedOut`].
    pub async fn await_gone<F, Fut>(
        &self,
        resource: ResourceKind,
        id: &str,
        cancel: &CancellationToken,
        mut probe: F,
    ) -> DeletionOutcome
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<(), ReconcileError>> + Send,
    {
        // A deadline past the clock's range means only cancellation ends the wait
        let deadline = self.clock.now().checked_add(self.timeout);
        let mut polls: u32 = 0;

        loop {
            let now = self.clock.now();
            let wait = match deadline {
                Some(deadline) if now >= deadline => {
                    warn!(
                        "{} {} still present after {:?} ({} polls); deletion not confirmed",
                        resource, id, self.timeout, polls
                    );
                    return DeletionOutcome::TimedOut;
                }
                Some(deadline) => self.poll_interval.min(deadline - now),
                None => self.poll_interval,
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Stopped waiting for {} {} to disappear: cancelled", resource, id);
                    return DeletionOutcome::TimedOut;
                }
                _ = self.clock.sleep(wait) => {}
            }

            polls += 1;
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Stopped waiting for {} {} to disappear: cancelled", resource, id);
                    return DeletionOutcome::TimedOut;
                }
                result = probe() => result,
            };

            match result {
                Err(e) if e.is_not_found() => {
                    info!("Confirmed {} {} is gone after {} polls", resource, id, polls);
                    return DeletionOutcome::Confirmed;
                }
                Err(e) => {
                    warn!("Transient error while waiting for {} {} to disappear: {}", resource, id, e);
                }
                Ok(()) => {
                    debug!("{} {} still present (poll {})", resource, id, polls);
                }
            }
        }
    }
}
