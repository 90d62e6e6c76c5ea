//! HTTP-level tests for the RunPod transport
//!
//! Runs the real `RunPodClient` against a local wiremock server.

use runpod_client::{Field, NetworkVolumeUpdateRequest, PodCreateRequest, RunPodClient, RunPodError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RunPodClient {
    RunPodClient::new(server.uri(), "test-key".to_string()).unwrap()
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pods"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let pods = client_for(&server).list_pods().await.unwrap();
    assert!(pods.is_empty());
}

#[tokio::test]
async fn test_create_pod_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pods"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"gpuCount": 1, "interruptible": false, "minVCPUPerGPU": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "my pod",
            "gpuCount": 1,
            "minVCPUPerGPU": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = PodCreateRequest {
        gpu_count: Field::Value(1),
        interruptible: Field::Value(false),
        min_vcpu_per_gpu: Field::Value(4),
        ..Default::default()
    };
    let pod = client_for(&server).create_pod(&request).await.unwrap();
    assert_eq!(pod.id, "p1");
    assert_eq!(pod.name.as_deref(), Some("my pod"));
    assert_eq!(pod.min_vcpu_per_gpu, Some(4));
    assert_eq!(pod.image_name, None);
}

#[tokio::test]
async fn test_pod_image_is_read_from_image_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pods/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "image": "runpod/base:0.4",
            "portMappings": {"22": 40022},
            "costPerHr": 0.2
        })))
        .mount(&server)
        .await;

    let pod = client_for(&server).get_pod("p1").await.unwrap();
    assert_eq!(pod.image_name.as_deref(), Some("runpod/base:0.4"));
    assert_eq!(pod.port_mappings.unwrap().get("22"), Some(&40022));
    assert_eq!(pod.cost_per_hr, Some(0.2));
}

#[tokio::test]
async fn test_get_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/endpoints/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("endpoint not found"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_endpoint("gone").await.unwrap_err();
    assert!(err.is_not_found(), "got {:?}", err);
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/networkvolumes/v1"))
        .respond_with(ResponseTemplate::new(400).set_body_string("size can only increase"))
        .mount(&server)
        .await;

    let request = NetworkVolumeUpdateRequest {
        size: Field::Value(5),
        ..Default::default()
    };
    let err = client_for(&server)
        .update_network_volume("v1", &request)
        .await
        .unwrap_err();
    match err {
        RunPodError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "size can only increase");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_404_is_not_translated() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/pods/p1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_pod("p1").await.unwrap_err();
    assert!(matches!(err, RunPodError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_templates().await.unwrap_err();
    match err {
        RunPodError::Decode(message) => assert!(message.contains("<html>maintenance</html>")),
        other => panic!("expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stop_and_start_ignore_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pods/p1/stop"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/pods/p1/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.stop_pod("p1").await.unwrap();
    client.start_pod("p1").await.unwrap();
}
