//! Unit tests for the pod reconciler

#[cfg(test)]
mod tests {
    use super::super::pod_requires_full_update;
    use crate::deletion::DeletionOutcome;
    use crate::desired::PodConfig;
    use crate::error::{Operation, ReconcileError};
    use crate::state::PodState;
    use crate::test_utils::*;
    use runpod_client::mock::DeletionLag;
    use runpod_client::{Field, Pod, RunPodClientTrait, RunPodError};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn gpu_pod() -> PodConfig {
        PodConfig {
            image_name: Field::Value("runpod/pytorch:2.1".to_string()),
            gpu_count: Field::Value(1),
            ports: Field::Value(vec!["8888/http".to_string(), "22/tcp".to_string()]),
            data_center_ids: Field::Value(vec!["EU-RO-1".to_string()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_pod_applies_server_defaults() {
        let (reconciler, mock, _clock) = create_test_reconciler();

        let state = reconciler.create_pod(&gpu_pod()).await.unwrap();

        assert!(!state.id.is_empty());
        assert_eq!(state.config.name, Field::Value("my pod".to_string()));
        assert_eq!(state.config.volume_mount_path, Field::Value("/workspace".to_string()));
        assert_eq!(state.config.image_name, Field::Value("runpod/pytorch:2.1".to_string()));
        assert_eq!(state.observed.desired_status.as_deref(), Some("RUNNING"));
        assert_eq!(state.observed.actual_data_center, None);
        assert_eq!(mock.calls(), vec!["create_pod"]);
    }

    #[tokio::test]
    async fn test_create_then_read_is_stable() {
        let (reconciler, _mock, _clock) = create_test_reconciler();

        let created = reconciler.create_pod(&gpu_pod()).await.unwrap();
        let read = reconciler.read_pod(&created.id, &created).await.unwrap();

        // The image is not echoed on reads but survives the merge
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_read_missing_pod_is_not_found() {
        let (reconciler, _mock, _clock) = create_test_reconciler();

        let err = reconciler.read_pod("nope", &PodState::default()).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.context().map(|c| c.operation), Some(Operation::Read));
    }

    #[tokio::test]
    async fn test_import_pod_populates_from_remote() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        mock.add_pod(Pod {
            id: "existing".to_string(),
            name: Some("trainer".to_string()),
            gpu_count: Some(2),
            locked: Some(false),
            machine_id: Some("host-123".to_string()),
            ..Default::default()
        });

        let state = reconciler.import_pod("existing").await.unwrap();

        assert_eq!(state.id, "existing");
        assert_eq!(state.config.name, Field::Value("trainer".to_string()));
        assert_eq!(state.config.gpu_count, Field::Value(2));
        assert_eq!(state.config.locked, Field::Value(false));
        assert!(state.config.image_name.is_unset());
        assert_eq!(state.observed.machine_id.as_deref(), Some("host-123"));
    }

    #[tokio::test]
    async fn test_update_refuses_data_center_change_without_remote_call() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            data_center_ids: Field::Value(vec!["US-TX-3".to_string()]),
            ..Default::default()
        };
        let err = reconciler.update_pod(&prior.id, &cfg, &prior).await.unwrap_err();

        match err {
            ReconcileError::ImmutableFieldChanged { field, .. } => assert_eq!(field, "data_center_ids"),
            other => panic!("expected ImmutableFieldChanged, got {:?}", other),
        }
        assert_eq!(mock.call_count("update_pod"), 0);
        assert_eq!(mock.calls(), vec!["create_pod"]);
    }

    #[tokio::test]
    async fn test_attaching_volume_after_create_is_refused() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            network_volume_id: Field::Value("vol-1".to_string()),
            ..Default::default()
        };
        let err = reconciler.update_pod_in_place(&prior.id, &cfg, &prior).await.unwrap_err();

        assert!(matches!(err, ReconcileError::ImmutableFieldChanged { field: "network_volume_id", .. }));
        assert_eq!(mock.call_count("update_pod_in_place"), 0);
    }

    #[tokio::test]
    async fn test_restating_immutable_value_is_allowed() {
        let (reconciler, _mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            data_center_ids: Field::Value(vec!["EU-RO-1".to_string()]),
            name: Field::Value("renamed".to_string()),
            ..Default::default()
        };
        let state = reconciler.update_pod_in_place(&prior.id, &cfg, &prior).await.unwrap();

        assert_eq!(state.config.name, Field::Value("renamed".to_string()));
    }

    #[tokio::test]
    async fn test_full_update_changes_image() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            image_name: Field::Value("runpod/pytorch:2.2".to_string()),
            ..Default::default()
        };
        let state = reconciler.update_pod(&prior.id, &cfg, &prior).await.unwrap();

        assert_eq!(state.config.image_name, Field::Value("runpod/pytorch:2.2".to_string()));
        assert_eq!(state.config.ports, prior.config.ports);

        let pods = mock.list_pods().await.unwrap();
        assert_eq!(pods[0].image_name.as_deref(), Some("runpod/pytorch:2.2"));
    }

    #[tokio::test]
    async fn test_in_place_update_only_transmits_name_and_lock() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            locked: Field::Value(true),
            image_name: Field::Value("runpod/other:1".to_string()),
            ..Default::default()
        };
        let state = reconciler.update_pod_in_place(&prior.id, &cfg, &prior).await.unwrap();

        assert_eq!(state.config.locked, Field::Value(true));
        assert_eq!(state.config.image_name, prior.config.image_name);
        let pods = mock.list_pods().await.unwrap();
        assert_eq!(pods[0].locked, Some(true));
        assert_eq!(pods[0].image_name.as_deref(), Some("runpod/pytorch:2.1"));
    }

    #[tokio::test]
    async fn test_in_place_update_does_not_record_unsent_env() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            env: Field::Value([("MODE".to_string(), "prod".to_string())].into_iter().collect()),
            ..Default::default()
        };
        let state = reconciler.update_pod_in_place(&prior.id, &cfg, &prior).await.unwrap();
        assert!(state.config.env.is_unset());

        let refreshed = reconciler.read_pod(&state.id, &state).await.unwrap();
        let pods = mock.list_pods().await.unwrap();
        assert_eq!(pods[0].env, None);
        assert_eq!(refreshed.config.env.into_option(), pods[0].env);
    }

    #[tokio::test]
    async fn test_full_update_does_not_record_gpu_count() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let cfg = PodConfig {
            gpu_count: Field::Value(4),
            template_id: Field::Value("tpl-1".to_string()),
            ..Default::default()
        };
        let state = reconciler.update_pod(&prior.id, &cfg, &prior).await.unwrap();

        assert_eq!(state.config.gpu_count, Field::Value(1));
        assert!(state.config.template_id.is_unset());
        let pods = mock.list_pods().await.unwrap();
        assert_eq!(pods[0].gpu_count, Some(1));
    }

    #[tokio::test]
    async fn test_requires_full_update() {
        let (reconciler, _mock, _clock) = create_test_reconciler();
        let prior = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let rename = PodConfig {
            name: Field::Value("renamed".to_string()),
            locked: Field::Value(true),
            ..Default::default()
        };
        assert!(!pod_requires_full_update(&rename, &prior));

        let same_ports = PodConfig {
            ports: prior.config.ports.clone(),
            ..Default::default()
        };
        assert!(!pod_requires_full_update(&same_ports, &prior));

        let new_env = PodConfig {
            env: Field::Value([("MODE".to_string(), "prod".to_string())].into_iter().collect()),
            ..Default::default()
        };
        assert!(pod_requires_full_update(&new_env, &prior));

        // No update variant carries the GPU count
        let more_gpus = PodConfig {
            gpu_count: Field::Value(4),
            ..Default::default()
        };
        assert!(!pod_requires_full_update(&more_gpus, &prior));
    }

    #[tokio::test]
    async fn test_create_rejected_is_surfaced() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        mock.fail_next(
            "create_pod",
            RunPodError::Api { status: 400, body: "no GPUs available".to_string() },
        );

        let err = reconciler.create_pod(&gpu_pod()).await.unwrap_err();

        match err {
            ReconcileError::RemoteRejected { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, "no GPUs available");
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
        // Not retried
        assert_eq!(mock.call_count("create_pod"), 1);
    }

    #[tokio::test]
    async fn test_create_undecodable_response() {
        let (reconciler, mock, _clock) = create_test_reconciler();
        mock.fail_next("create_pod", RunPodError::Decode("expected object".to_string()));

        let err = reconciler.create_pod(&gpu_pod()).await.unwrap_err();

        assert!(matches!(err, ReconcileError::DecodeFailed { .. }));
    }

    #[tokio::test]
    async fn test_delete_and_wait_confirms() {
        let (reconciler, mock, clock) = create_test_reconciler();
        mock.set_deletion_lag(DeletionLag::Reads(2));
        let state = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let outcome = reconciler
            .delete_pod_and_wait(&state.id, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, DeletionOutcome::Confirmed);
        assert_eq!(mock.call_count("get_pod"), 3);
        assert_eq!(clock.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_delete_and_wait_times_out() {
        let (reconciler, mock, clock) = create_test_reconciler();
        mock.set_deletion_lag(DeletionLag::Never);
        let state = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let outcome = reconciler
            .delete_pod_and_wait(&state.id, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome, DeletionOutcome::TimedOut);
        assert_eq!(mock.call_count("get_pod"), 60);
        assert_eq!(clock.elapsed(), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_delete_rejected_skips_waiting() {
        let (reconciler, mock, _clock) = create_test_reconciler();

        let err = reconciler
            .delete_pod_and_wait("nope", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ReconcileError::RemoteRejected { status: 404, .. }));
        assert_eq!(mock.call_count("get_pod"), 0);
    }

    #[tokio::test]
    async fn test_stop_and_start() {
        let (reconciler, _mock, _clock) = create_test_reconciler();
        let state = reconciler.create_pod(&gpu_pod()).await.unwrap();

        reconciler.stop_pod(&state.id).await.unwrap();
        let stopped = reconciler.read_pod(&state.id, &state).await.unwrap();
        assert_eq!(stopped.observed.desired_status.as_deref(), Some("EXITED"));

        reconciler.start_pod(&state.id).await.unwrap();
        let started = reconciler.read_pod(&state.id, &stopped).await.unwrap();
        assert_eq!(started.observed.desired_status.as_deref(), Some("RUNNING"));
    }

    #[tokio::test]
    async fn test_list_pods() {
        let (reconciler, _mock, _clock) = create_test_reconciler();
        let state = reconciler.create_pod(&gpu_pod()).await.unwrap();

        let pods = reconciler.list_pods().await.unwrap();

        assert_eq!(pods.len(), 1);
        assert_eq!(pods[0].id, state.id);
        assert_eq!(pods[0].gpu_count, Some(1));
        assert_eq!(pods[0].image_name.as_deref(), Some("runpod/pytorch:2.1"));
    }
}
