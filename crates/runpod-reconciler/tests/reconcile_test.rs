//! End-to-end reconciliation against a local wiremock server
//!
//! Drives the reconciler through the real HTTP transport to check what
//! reaches the wire and how RunPod's answers fold into local state.

use runpod_client::{Field, RunPodClient};
use runpod_reconciler::{
    DeletionConfirmer, DeletionOutcome, EndpointConfig, NetworkVolumeConfig, PodConfig, PodState,
    ReconcileError, Reconciler,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn reconciler_for(base_url: String) -> Reconciler {
    let client = RunPodClient::new(base_url, "test-key".to_string()).unwrap();
    Reconciler::new(
        Arc::new(client),
        DeletionConfirmer::new(Duration::from_secs(2), Duration::from_millis(100)),
    )
}

fn http_pod() -> PodConfig {
    PodConfig {
        gpu_count: Field::Value(1),
        ports: Field::Value(vec!["8080/http".to_string()]),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_pod_sends_declared_fields_and_merges_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pods"))
        .and(body_json(json!({"gpuCount": 1, "ports": ["8080/http"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "my pod",
            "gpuCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = reconciler_for(server.uri()).create_pod(&http_pod()).await.unwrap();

    assert_eq!(state.id, "p1");
    assert_eq!(state.config.name, Field::Value("my pod".to_string()));
    assert_eq!(state.config.gpu_count, Field::Value(1));
    // Not echoed by RunPod, kept from the declaration
    assert_eq!(state.config.ports, Field::Value(vec!["8080/http".to_string()]));
    assert!(state.config.image_name.is_unset());
}

#[tokio::test]
async fn test_create_without_identity_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "my pod"})))
        .mount(&server)
        .await;

    let err = reconciler_for(server.uri()).create_pod(&http_pod()).await.unwrap_err();

    assert!(matches!(err, ReconcileError::DecodeFailed { .. }));
}

#[tokio::test]
async fn test_read_keeps_image_not_echoed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pods/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "my pod",
            "desiredStatus": "RUNNING",
            "gpuCount": 1,
            "publicIp": "",
            "portMappings": {"22": 10022}
        })))
        .mount(&server)
        .await;

    let prior = PodState {
        id: "p1".to_string(),
        config: PodConfig {
            image_name: Field::Value("runpod/pytorch:2.1".to_string()),
            ..http_pod()
        },
        ..Default::default()
    };
    let state = reconciler_for(server.uri()).read_pod("p1", &prior).await.unwrap();

    assert_eq!(state.config.image_name, Field::Value("runpod/pytorch:2.1".to_string()));
    assert_eq!(state.observed.desired_status.as_deref(), Some("RUNNING"));
    assert_eq!(state.observed.port_mappings.as_ref().and_then(|m| m.get("22")), Some(&10022));
    assert_eq!(state.observed.actual_data_center, None);
}

#[tokio::test]
async fn test_read_missing_pod_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pods/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("pod not found"))
        .mount(&server)
        .await;

    let err = reconciler_for(server.uri())
        .read_pod("gone", &PodState::default())
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_api_is_transport_failure() {
    // Nothing listens on port 1
    let err = reconciler_for("http://127.0.0.1:1".to_string())
        .list_pods()
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::TransportFailure { .. }));
}

#[tokio::test]
async fn test_endpoint_update_rejection_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/endpoints/ep1"))
        .and(body_json(json!({"workersMax": 0})))
        .respond_with(ResponseTemplate::new(400).set_body_string("workersMax must be >= workersMin"))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = EndpointConfig {
        workers_max: Field::Value(0),
        ..Default::default()
    };
    let err = reconciler_for(server.uri())
        .update_endpoint("ep1", &cfg, &Default::default())
        .await
        .unwrap_err();

    match err {
        ReconcileError::RemoteRejected { status, body, .. } => {
            assert_eq!(status, 400);
            assert_eq!(body, "workersMax must be >= workersMin");
        }
        other => panic!("expected RemoteRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_network_volume_delete_waits_for_disappearance() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/networkvolumes/vol1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    // Still visible on the first poll, then gone
    Mock::given(method("GET"))
        .and(path("/networkvolumes/vol1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vol1",
            "name": "datasets",
            "size": 50,
            "dataCenterId": "EU-RO-1"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/networkvolumes/vol1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = reconciler_for(server.uri())
        .delete_network_volume_and_wait("vol1", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, DeletionOutcome::Confirmed);
}

#[tokio::test]
async fn test_network_volume_create_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/networkvolumes"))
        .and(body_json(json!({"name": "datasets", "size": 50, "dataCenterId": "EU-RO-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vol1",
            "name": "datasets",
            "size": 50,
            "dataCenterId": "EU-RO-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cfg = NetworkVolumeConfig {
        name: Field::Value("datasets".to_string()),
        size: Field::Value(50),
        data_center_id: Field::Value("EU-RO-1".to_string()),
    };
    let state = reconciler_for(server.uri()).create_network_volume(&cfg).await.unwrap();

    assert_eq!(state.id, "vol1");
    assert_eq!(state.config, cfg);
}
