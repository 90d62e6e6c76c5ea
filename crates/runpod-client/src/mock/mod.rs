//! Mock RunPodClient for unit testing
//!
//! This module provides a mock implementation of RunPodClientTrait that can be used
//! in unit tests without network access. It emulates the parts of RunPod's
//! behaviour the reconciliation core has to cope with:
//! - server-side defaults applied to attributes missing from a create request
//! - partial echo: `GET /pods/{id}` never returns the image
//! - asynchronous deletion: a deleted resource can stay readable for a number
//!   of reads, or forever
//!
//! The mock is organized into resource-specific modules:
//! - `pods.rs` - pod lifecycle and power control
//! - `endpoints.rs` - serverless endpoints
//! - `network_volumes.rs` - network volumes

#![allow(clippy::unwrap_used, reason = "a poisoned store lock only follows a panicking test")]

mod endpoints;
mod network_volumes;
mod pods;

use crate::error::RunPodError;
use crate::models::*;
use crate::runpod_trait::RunPodClientTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// How many reads a deleted resource survives before it disappears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionLag {
    /// Gone after this many successful reads (0 = gone immediately)
    Reads(u32),
    /// Delete is acknowledged but the resource never disappears
    Never,
}

/// Mock RunPodClient for testing
///
/// This mock stores resources in memory and can be configured to return
/// specific responses for testing different scenarios.
#[derive(Debug, Clone)]
pub struct MockRunPodClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) pods: Arc<Mutex<HashMap<String, Pod>>>,
    pub(crate) endpoints: Arc<Mutex<HashMap<String, Endpoint>>>,
    pub(crate) network_volumes: Arc<Mutex<HashMap<String, NetworkVolume>>>,
    pub(crate) templates: Arc<Mutex<Vec<Template>>>,
    // Deleted identities still readable, with reads remaining (None = forever)
    pub(crate) pending_deletes: Arc<Mutex<HashMap<String, Option<u32>>>>,
    pub(crate) deletion_lag: Arc<Mutex<DeletionLag>>,
    // One-shot failures keyed by operation name
    pub(crate) failures: Arc<Mutex<HashMap<String, RunPodError>>>,
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockRunPodClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            pods: Arc::new(Mutex::new(HashMap::new())),
            endpoints: Arc::new(Mutex::new(HashMap::new())),
            network_volumes: Arc::new(Mutex::new(HashMap::new())),
            templates: Arc::new(Mutex::new(Vec::new())),
            pending_deletes: Arc::new(Mutex::new(HashMap::new())),
            deletion_lag: Arc::new(Mutex::new(DeletionLag::Reads(0))),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add a pod to the mock store (for test setup)
    pub fn add_pod(&self, pod: Pod) {
        self.pods.lock().unwrap().insert(pod.id.clone(), pod);
    }

    /// Add an endpoint to the mock store (for test setup)
    pub fn add_endpoint(&self, endpoint: Endpoint) {
        self.endpoints.lock().unwrap().insert(endpoint.id.clone(), endpoint);
    }

    /// Add a network volume to the mock store (for test setup)
    pub fn add_network_volume(&self, volume: NetworkVolume) {
        self.network_volumes.lock().unwrap().insert(volume.id.clone(), volume);
    }

    /// Add a template to the mock store (for test setup)
    pub fn add_template(&self, template: Template) {
        self.templates.lock().unwrap().push(template);
    }

    /// Control how long deleted resources stay readable
    pub fn set_deletion_lag(&self, lag: DeletionLag) {
        *self.deletion_lag.lock().unwrap() = lag;
    }

    /// Make the next call to `operation` (e.g. `"create_pod"`) fail with `error`
    pub fn fail_next(&self, operation: &str, error: RunPodError) {
        self.failures.lock().unwrap().insert(operation.to_string(), error);
    }

    /// Every operation invoked so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times `operation` was invoked
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == operation).count()
    }

    /// Record a call and surface any injected failure for it
    pub(crate) fn enter(&self, operation: &str) -> Result<(), RunPodError> {
        self.calls.lock().unwrap().push(operation.to_string());
        match self.failures.lock().unwrap().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Generate next ID
    pub(crate) fn next_id(&self, prefix: &str) -> String {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        format!("{}{:08}", prefix, current)
    }

    /// Start deleting `id`. Returns true when it should be removed right away.
    pub(crate) fn begin_delete(&self, id: &str) -> bool {
        match *self.deletion_lag.lock().unwrap() {
            DeletionLag::Reads(0) => true,
            DeletionLag::Reads(n) => {
                self.pending_deletes.lock().unwrap().insert(id.to_string(), Some(n));
                false
            }
            DeletionLag::Never => {
                self.pending_deletes.lock().unwrap().insert(id.to_string(), None);
                false
            }
        }
    }

    /// Consume one read of a pending delete. Returns true when `id` is now gone.
    pub(crate) fn observe_pending_delete(&self, id: &str) -> bool {
        let mut pending = self.pending_deletes.lock().unwrap();
        match pending.get_mut(id) {
            Some(Some(0)) => {
                pending.remove(id);
                true
            }
            Some(Some(remaining)) => {
                *remaining -= 1;
                false
            }
            Some(None) | None => false,
        }
    }
}

pub(crate) fn not_found(kind: &str, id: &str) -> RunPodError {
    RunPodError::NotFound(format!("{} {} not found", kind, id))
}

#[async_trait::async_trait]
impl RunPodClientTrait for MockRunPodClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create_pod(&self, request: &PodCreateRequest) -> Result<Pod, RunPodError> {
        pods::create_pod(self, request).await
    }

    async fn get_pod(&self, id: &str) -> Result<Pod, RunPodError> {
        pods::get_pod(self, id).await
    }

    async fn update_pod(&self, id: &str, request: &PodUpdateRequest) -> Result<Pod, RunPodError> {
        pods::update_pod(self, id, request).await
    }

    async fn update_pod_in_place(
        &self,
        id: &str,
        request: &PodInPlaceUpdateRequest,
    ) -> Result<Pod, RunPodError> {
        pods::update_pod_in_place(self, id, request).await
    }

    async fn delete_pod(&self, id: &str) -> Result<(), RunPodError> {
        pods::delete_pod(self, id).await
    }

    async fn stop_pod(&self, id: &str) -> Result<(), RunPodError> {
        pods::set_desired_status(self, "stop_pod", id, "EXITED").await
    }

    async fn start_pod(&self, id: &str) -> Result<(), RunPodError> {
        pods::set_desired_status(self, "start_pod", id, "RUNNING").await
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, RunPodError> {
        pods::list_pods(self).await
    }

    async fn create_endpoint(&self, request: &EndpointCreateRequest) -> Result<Endpoint, RunPodError> {
        endpoints::create_endpoint(self, request).await
    }

    async fn get_endpoint(&self, id: &str) -> Result<Endpoint, RunPodError> {
        endpoints::get_endpoint(self, id).await
    }

    async fn update_endpoint(
        &self,
        id: &str,
        request: &EndpointUpdateRequest,
    ) -> Result<Endpoint, RunPodError> {
        endpoints::update_endpoint(self, id, request).await
    }

    async fn delete_endpoint(&self, id: &str) -> Result<(), RunPodError> {
        endpoints::delete_endpoint(self, id).await
    }

    async fn list_endpoints(&self) -> Result<Vec<Endpoint>, RunPodError> {
        endpoints::list_endpoints(self).await
    }

    async fn create_network_volume(
        &self,
        request: &NetworkVolumeCreateRequest,
    ) -> Result<NetworkVolume, RunPodError> {
        network_volumes::create_network_volume(self, request).await
    }

    async fn get_network_volume(&self, id: &str) -> Result<NetworkVolume, RunPodError> {
        network_volumes::get_network_volume(self, id).await
    }

    async fn update_network_volume(
        &self,
        id: &str,
        request: &NetworkVolumeUpdateRequest,
    ) -> Result<NetworkVolume, RunPodError> {
        network_volumes::update_network_volume(self, id, request).await
    }

    async fn delete_network_volume(&self, id: &str) -> Result<(), RunPodError> {
        network_volumes::delete_network_volume(self, id).await
    }

    async fn list_network_volumes(&self) -> Result<Vec<NetworkVolume>, RunPodError> {
        network_volumes::list_network_volumes(self).await
    }

    async fn list_templates(&self) -> Result<Vec<Template>, RunPodError> {
        self.enter("list_templates")?;
        Ok(self.templates.lock().unwrap().clone())
    }
}
