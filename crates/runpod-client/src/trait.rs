//! RunPodClient trait for mocking
//!
//! This trait abstracts the RunPodClient so the reconciliation core takes its
//! remote collaborator by injection. The concrete RunPodClient implements this
//! trait, and tests can use mock implementations.

use crate::error::RunPodError;
use crate::models::*;

/// Trait for RunPod API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime,
/// and implementations must tolerate concurrent calls on different identities.
#[async_trait::async_trait]
pub trait RunPodClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // Pods
    async fn create_pod(&self, request: &PodCreateRequest) -> Result<Pod, RunPodError>;
    async fn get_pod(&self, id: &str) -> Result<Pod, RunPodError>;
    async fn update_pod(&self, id: &str, request: &PodUpdateRequest) -> Result<Pod, RunPodError>;
    async fn update_pod_in_place(&self, id: &str, request: &PodInPlaceUpdateRequest) -> Result<Pod, RunPodError>;
    async fn delete_pod(&self, id: &str) -> Result<(), RunPodError>;
    async fn stop_pod(&self, id: &str) -> Result<(), RunPodError>;
    async fn start_pod(&self, id: &str) -> Result<(), RunPodError>;
    async fn list_pods(&self) -> Result<Vec<Pod>, RunPodError>;

    // Serverless endpoints
    async fn create_endpoint(&self, request: &EndpointCreateRequest) -> Result<Endpoint, RunPodError>;
    async fn get_endpoint(&self, id: &str) -> Result<Endpoint, RunPodError>;
    async fn update_endpoint(&self, id: &str, request: &EndpointUpdateRequest) -> Result<Endpoint, RunPodError>;
    async fn delete_endpoint(&self, id: &str) -> Result<(), RunPodError>;
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, RunPodError>;

    // Network volumes
    async fn create_network_volume(&self, request: &NetworkVolumeCreateRequest) -> Result<NetworkVolume, RunPodError>;
    async fn get_network_volume(&self, id: &str) -> Result<NetworkVolume, RunPodError>;
    async fn update_network_volume(&self, id: &str, request: &NetworkVolumeUpdateRequest) -> Result<NetworkVolume, RunPodError>;
    async fn delete_network_volume(&self, id: &str) -> Result<(), RunPodError>;
    async fn list_network_volumes(&self) -> Result<Vec<NetworkVolume>, RunPodError>;

    // Templates
    async fn list_templates(&self) -> Result<Vec<Template>, RunPodError>;
}
