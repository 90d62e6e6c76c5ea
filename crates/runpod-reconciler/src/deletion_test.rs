//! Unit tests for the deletion confirmer

#[cfg(test)]
mod tests {
    use crate::deletion::{Clock, DeletionConfirmer, DeletionOutcome, MIN_POLL_INTERVAL};
    use crate::error::{FaultContext, Operation, ReconcileError, ResourceKind};
    use crate::test_utils::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn present() -> Result<(), ReconcileError> {
        Ok(())
    }

    fn gone() -> Result<(), ReconcileError> {
        Err(ReconcileError::NotFound {
            context: FaultContext::with_id(Operation::Read, ResourceKind::Pod, "p1"),
        })
    }

    #[tokio::test]
    async fn test_confirmed_on_first_not_found() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 300, 5);
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &CancellationToken::new(), || {
                polls.fetch_add(1, Ordering::SeqCst);
                async { gone() }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::Confirmed);
        assert_eq!(polls.load(Ordering::SeqCst), 1);
        assert_eq!(clock.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_times_out_when_resource_never_disappears() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 2, 1);
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &CancellationToken::new(), || {
                polls.fetch_add(1, Ordering::SeqCst);
                async { present() }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(polls.load(Ordering::SeqCst), 2);
        assert_eq!(clock.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_last_sleep_is_clipped_to_deadline() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 12, 5);

        let outcome = confirmer
            .await_gone(ResourceKind::Endpoint, "ep1", &CancellationToken::new(), || async { present() })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_secs(5), Duration::from_secs(5), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_transient_errors_keep_polling() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 300, 5);
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::NetworkVolume, "v1", &CancellationToken::new(), || {
                let n = polls.fetch_add(1, Ordering::SeqCst);
                async move {
                    let result: Result<(), ReconcileError> = if n < 2 {
                        Err(ReconcileError::RemoteRejected {
                            context: FaultContext::with_id(Operation::Read, ResourceKind::NetworkVolume, "v1"),
                            status: 502,
                            body: "bad gateway".to_string(),
                        })
                    } else {
                        Err(ReconcileError::NotFound {
                            context: FaultContext::with_id(Operation::Read, ResourceKind::NetworkVolume, "v1"),
                        })
                    };
                    result
                }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::Confirmed);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_cancellation_stops_waiting() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 300, 5);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &cancel, || {
                polls.fetch_add(1, Ordering::SeqCst);
                async { present() }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancellation_during_poll_loop() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 300, 5);
        let cancel = CancellationToken::new();
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &cancel, || {
                if polls.fetch_add(1, Ordering::SeqCst) == 2 {
                    cancel.cancel();
                }
                async { present() }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_timeout_never_polls() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = manual_confirmer(&clock, 0, 5);
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &CancellationToken::new(), || {
                polls.fetch_add(1, Ordering::SeqCst);
                async { present() }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unrepresentable_deadline_waits_for_cancellation() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = DeletionConfirmer::with_clock(
            Duration::from_secs(u64::MAX),
            Duration::from_secs(1),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &cancel, || async { present() })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_unrepresentable_deadline_still_confirms() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = DeletionConfirmer::with_clock(
            Duration::MAX,
            Duration::from_secs(5),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &CancellationToken::new(), || {
                let n = polls.fetch_add(1, Ordering::SeqCst);
                async move { if n < 2 { present() } else { gone() } }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::Confirmed);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(clock.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_zero_interval_is_raised_to_minimum() {
        let clock = Arc::new(ManualClock::new());
        let confirmer = DeletionConfirmer::with_clock(
            Duration::from_secs(1),
            Duration::ZERO,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        assert_eq!(confirmer.poll_interval(), MIN_POLL_INTERVAL);
        let polls = AtomicU32::new(0);

        let outcome = confirmer
            .await_gone(ResourceKind::Pod, "p1", &CancellationToken::new(), || {
                polls.fetch_add(1, Ordering::SeqCst);
                async { present() }
            })
            .await;

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(polls.load(Ordering::SeqCst), 10);
        assert_eq!(DeletionConfirmer::new(Duration::from_secs(1), Duration::ZERO).poll_interval(), MIN_POLL_INTERVAL);
    }
}
