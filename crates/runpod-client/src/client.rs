//! RunPod API client
//!
//! Implements the RunPod REST API (`https://rest.runpod.io/v1`) for pods,
//! serverless endpoints, network volumes and templates.

use crate::common::HttpClient;
use crate::error::RunPodError;
use crate::models::*;
use crate::runpod_trait::RunPodClientTrait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Production RunPod REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://rest.runpod.io/v1";

/// Overall timeout applied to every remote call unless overridden
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// RunPod API client
///
/// Cheap to clone and safe to share across tasks; the underlying connection
/// pool and credentials are reused by every call.
#[derive(Debug, Clone)]
pub struct RunPodClient {
    http: HttpClient,
}

impl RunPodClient {
    /// Create a new RunPod client with the default request timeout
    ///
    /// # Arguments
    /// * `base_url` - RunPod REST base URL (e.g., "https://rest.runpod.io/v1")
    /// * `api_key` - API key sent as a bearer token; must not be empty
    pub fn new(base_url: String, api_key: String) -> Result<Self, RunPodError> {
        Self::with_timeout(base_url, api_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new RunPod client with an explicit per-request timeout
    pub fn with_timeout(
        base_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, RunPodError> {
        if api_key.trim().is_empty() {
            return Err(RunPodError::Configuration(
                "RunPod API key must not be empty".to_string(),
            ));
        }
        if base_url.trim().is_empty() {
            return Err(RunPodError::Configuration(
                "RunPod base URL must not be empty".to_string(),
            ));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http: HttpClient::new(client, base_url, api_key),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // Pods

    /// Create a pod (`POST /pods`)
    pub async fn create_pod(&self, request: &PodCreateRequest) -> Result<Pod, RunPodError> {
        self.http.post("/pods", request).await
    }

    /// Get a pod (`GET /pods/{id}`)
    pub async fn get_pod(&self, id: &str) -> Result<Pod, RunPodError> {
        self.http.get(&format!("/pods/{}", id)).await
    }

    /// Full update (`PUT /pods/{id}`); RunPod resets the pod
    pub async fn update_pod(&self, id: &str, request: &PodUpdateRequest) -> Result<Pod, RunPodError> {
        self.http.put(&format!("/pods/{}", id), request).await
    }

    /// In-place update (`PATCH /pods/{id}`); no reset
    pub async fn update_pod_in_place(
        &self,
        id: &str,
        request: &PodInPlaceUpdateRequest,
    ) -> Result<Pod, RunPodError> {
        self.http.patch(&format!("/pods/{}", id), request).await
    }

    /// Delete a pod (`DELETE /pods/{id}`)
    pub async fn delete_pod(&self, id: &str) -> Result<(), RunPodError> {
        self.http.delete(&format!("/pods/{}", id)).await
    }

    /// Stop a pod (`POST /pods/{id}/stop`)
    pub async fn stop_pod(&self, id: &str) -> Result<(), RunPodError> {
        debug!("Stopping pod {}", id);
        self.http.post_empty(&format!("/pods/{}/stop", id)).await
    }

    /// Start a stopped pod (`POST /pods/{id}/start`)
    pub async fn start_pod(&self, id: &str) -> Result<(), RunPodError> {
        debug!("Starting pod {}", id);
        self.http.post_empty(&format!("/pods/{}/start", id)).await
    }

    /// List pods (`GET /pods`)
    pub async fn list_pods(&self) -> Result<Vec<Pod>, RunPodError> {
        self.http.get("/pods").await
    }

    // Endpoints

    /// Create a serverless endpoint (`POST /endpoints`)
    pub async fn create_endpoint(
        &self,
        request: &EndpointCreateRequest,
    ) -> Result<Endpoint, RunPodError> {
        self.http.post("/endpoints", request).await
    }

    /// Get a serverless endpoint (`GET /endpoints/{id}`)
    pub async fn get_endpoint(&self, id: &str) -> Result<Endpoint, RunPodError> {
        self.http.get(&format!("/endpoints/{}", id)).await
    }

    /// Update a serverless endpoint (`PATCH /endpoints/{id}`)
    pub async fn update_endpoint(
        &self,
        id: &str,
        request: &EndpointUpdateRequest,
    ) -> Result<Endpoint, RunPodError> {
        self.http.patch(&format!("/endpoints/{}", id), request).await
    }

    /// Delete a serverless endpoint (`DELETE /endpoints/{id}`)
    pub async fn delete_endpoint(&self, id: &str) -> Result<(), RunPodError> {
        self.http.delete(&format!("/endpoints/{}", id)).await
    }

    /// List serverless endpoints (`GET /endpoints`)
    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>, RunPodError> {
        self.http.get("/endpoints").await
    }

    // Network volumes

    /// Create a network volume (`POST /networkvolumes`)
    pub async fn create_network_volume(
        &self,
        request: &NetworkVolumeCreateRequest,
    ) -> Result<NetworkVolume, RunPodError> {
        self.http.post("/networkvolumes", request).await
    }

    /// Get a network volume (`GET /networkvolumes/{id}`)
    pub async fn get_network_volume(&self, id: &str) -> Result<NetworkVolume, RunPodError> {
        self.http.get(&format!("/networkvolumes/{}", id)).await
    }

    /// Update a network volume (`PATCH /networkvolumes/{id}`)
    pub async fn update_network_volume(
        &self,
        id: &str,
        request: &NetworkVolumeUpdateRequest,
    ) -> Result<NetworkVolume, RunPodError> {
        self.http.patch(&format!("/networkvolumes/{}", id), request).await
    }

    /// Delete a network volume (`DELETE /networkvolumes/{id}`)
    pub async fn delete_network_volume(&self, id: &str) -> Result<(), RunPodError> {
        self.http.delete(&format!("/networkvolumes/{}", id)).await
    }

    /// List network volumes (`GET /networkvolumes`)
    pub async fn list_network_volumes(&self) -> Result<Vec<NetworkVolume>, RunPodError> {
        self.http.get("/networkvolumes").await
    }

    // Templates

    /// List templates (`GET /templates`)
    pub async fn list_templates(&self) -> Result<Vec<Template>, RunPodError> {
        self.http.get("/templates").await
    }
}

#[async_trait::async_trait]
impl RunPodClientTrait for RunPodClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn create_pod(&self, request: &PodCreateRequest) -> Result<Pod, RunPodError> {
        self.create_pod(request).await
    }

    async fn get_pod(&self, id: &str) -> Result<Pod, RunPodError> {
        self.get_pod(id).await
    }

    async fn update_pod(&self, id: &str, request: &PodUpdateRequest) -> Result<Pod, RunPodError> {
        self.update_pod(id, request).await
    }

    async fn update_pod_in_place(
        &self,
        id: &str,
        request: &PodInPlaceUpdateRequest,
    ) -> Result<Pod, RunPodError> {
        self.update_pod_in_place(id, request).await
    }

    async fn delete_pod(&self, id: &str) -> Result<(), RunPodError> {
        self.delete_pod(id).await
    }

    async fn stop_pod(&self, id: &str) -> Result<(), RunPodError> {
        self.stop_pod(id).await
    }

    async fn start_pod(&self, id: &str) -> Result<(), RunPodError> {
        self.start_pod(id).await
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, RunPodError> {
        self.list_pods().await
    }

    async fn create_endpoint(&self, request: &EndpointCreateRequest) -> Result<Endpoint, RunPodError> {
        self.create_endpoint(request).await
    }

    async fn get_endpoint(&self, id: &str) -> Result<Endpoint, RunPodError> {
        self.get_endpoint(id).await
    }

    async fn update_endpoint(
        &self,
        id: &str,
        request: &EndpointUpdateRequest,
    ) -> Result<Endpoint, RunPodError> {
        self.update_endpoint(id, request).await
    }

    async fn delete_endpoint(&self, id: &str) -> Result<(), RunPodError> {
        self.delete_endpoint(id).await
    }

    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, RunPodError> {
        self.list_endpoints().await
    }

    async fn create_network_volume(
        &self,
        request: &NetworkVolumeCreateRequest,
    ) -> Result<NetworkVolume, RunPodError> {
        self.create_network_volume(request).await
    }

    async fn get_network_volume(&self, id: &str) -> Result<NetworkVolume, RunPodError> {
        self.get_network_volume(id).await
    }

    async fn update_network_volume(
        &self,
        id: &str,
        request: &NetworkVolumeUpdateRequest,
    ) -> Result<NetworkVolume, RunPodError> {
        self.update_network_volume(id, request).await
    }

    async fn delete_network_volume(&self, id: &str) -> Result<(), RunPodError> {
        self.delete_network_volume(id).await
    }

    async fn list_network_volumes(&self) -> Result<Vec<NetworkVolume>, RunPodError> {
        self.list_network_volumes().await
    }

    async fn list_templates(&self) -> Result<Vec<Template>, RunPodError> {
        self.list_templates().await
    }
}
