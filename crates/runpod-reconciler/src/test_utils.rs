//! Test utilities for unit testing reconcilers
//!
//! This module provides a virtual clock and helpers for building a reconciler
//! over the in-memory mock client.

#[cfg(test)]
use crate::deletion::{Clock, DeletionConfirmer};
#[cfg(test)]
use crate::reconciler::Reconciler;
#[cfg(test)]
use runpod_client::MockRunPodClient;
#[cfg(test)]
use std::sync::{Arc, Mutex};
#[cfg(test)]
use std::time::{Duration, Instant};

/// Clock whose time only moves when something sleeps on it
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Virtual time that has passed since creation
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }

    /// Every sleep requested so far
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        *self.elapsed.lock().unwrap() += duration;
        tokio::task::yield_now().await;
    }
}

/// Confirmer with the given bounds (in seconds) running on `clock`
#[cfg(test)]
pub fn manual_confirmer(clock: &Arc<ManualClock>, timeout_secs: u64, interval_secs: u64) -> DeletionConfirmer {
    DeletionConfirmer::with_clock(
        Duration::from_secs(timeout_secs),
        Duration::from_secs(interval_secs),
        Arc::clone(clock) as Arc<dyn Clock>,
    )
}

/// Reconciler over a fresh mock client with a virtual clock
#[cfg(test)]
pub fn create_test_reconciler() -> (Reconciler, MockRunPodClient, Arc<ManualClock>) {
    let mock = MockRunPodClient::new("http://test-runpod");
    let clock = Arc::new(ManualClock::new());
    let reconciler = Reconciler::new(Arc::new(mock.clone()), manual_confirmer(&clock, 300, 5));
    (reconciler, mock, clock)
}
