//! Serverless endpoint reconciler

use super::{Reconciler, ensure_unchanged, missing_field, missing_identity, remote_fault};
use crate::deletion::DeletionOutcome;
use crate::desired::EndpointConfig;
use crate::error::{FaultContext, Operation, ReconcileError, ResourceKind};
use crate::inventory::EndpointSummary;
use crate::merge::merge_endpoint;
use crate::state::EndpointState;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl Reconciler {
    /// Create an endpoint from `cfg`. `template_id` must be declared.
    pub async fn create_endpoint(&self, cfg: &EndpointConfig) -> Result<EndpointState, ReconcileError> {
        let context = FaultContext::new(Operation::Create, ResourceKind::Endpoint);
        let request = cfg
            .to_create_request()
            .map_err(|missing| missing_field(&context, missing.0))?;
        info!("Creating endpoint {:?} from template {}", cfg.name.as_ref(), request.template_id);

        let remote = self
            .client
            .create_endpoint(&request)
            .await
            .map_err(|e| remote_fault(&context, e))?;
        if remote.id.is_empty() {
            return Err(missing_identity(&context));
        }

        let state = merge_endpoint(&EndpointState::declared(cfg.clone()), remote);
        info!("Created endpoint {}", state.id);
        Ok(state)
    }

    /// Refresh `prior` from RunPod.
    pub async fn read_endpoint(&self, id: &str, prior: &EndpointState) -> Result<EndpointState, ReconcileError> {
        let context = FaultContext::with_id(Operation::Read, ResourceKind::Endpoint, id);
        debug!("Reading endpoint {}", id);

        let remote = self
            .client
            .get_endpoint(id)
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let base = EndpointState { id: id.to_string(), ..prior.clone() };
        Ok(merge_endpoint(&base, remote))
    }

    /// Adopt an existing endpoint.
    pub async fn import_endpoint(&self, id: &str) -> Result<EndpointState, ReconcileError> {
        self.read_endpoint(id, &EndpointState::default()).await
    }

    /// Update (`PATCH`). `compute_type` cannot change.
    pub async fn update_endpoint(
        &self,
        id: &str,
        cfg: &EndpointConfig,
        prior: &EndpointState,
    ) -> Result<EndpointState, ReconcileError> {
        let context = FaultContext::with_id(Operation::Update, ResourceKind::Endpoint, id);
        ensure_unchanged(&context, "compute_type", &prior.config.compute_type, &cfg.compute_type)?;
        info!("Updating endpoint {}", id);

        let remote = self
            .client
            .update_endpoint(id, &cfg.to_update_request())
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let base = EndpointState {
            id: id.to_string(),
            config: prior.config.overlaid_by(cfg),
            observed: prior.observed.clone(),
        };
        Ok(merge_endpoint(&base, remote))
    }

    /// Ask RunPod to delete the endpoint.
    pub async fn delete_endpoint(&self, id: &str) -> Result<(), ReconcileError> {
        let context = FaultContext::with_id(Operation::Delete, ResourceKind::Endpoint, id);
        info!("Deleting endpoint {}", id);

        self.client
            .delete_endpoint(id)
            .await
            .map_err(|e| remote_fault(&context, e))
    }

    /// Poll until the endpoint is gone or the deletion bound elapses.
    pub async fn await_endpoint_gone(&self, id: &str, cancel: &CancellationToken) -> DeletionOutcome {
        let client = &self.client;
        self.deletion
            .await_gone(ResourceKind::Endpoint, id, cancel, move || async move {
                client.get_endpoint(id).await.map(|_| ()).map_err(|e| {
                    ReconcileError::from_client(
                        FaultContext::with_id(Operation::AwaitGone, ResourceKind::Endpoint, id),
                        e,
                    )
                })
            })
            .await
    }

    /// Delete the endpoint and wait for RunPod to confirm it is gone.
    pub async fn delete_endpoint_and_wait(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<DeletionOutcome, ReconcileError> {
        self.delete_endpoint(id).await?;
        Ok(self.await_endpoint_gone(id, cancel).await)
    }

    /// Every serverless endpoint in the account
    pub async fn list_endpoints(&self) -> Result<Vec<EndpointSummary>, ReconcileError> {
        let context = FaultContext::new(Operation::List, ResourceKind::Endpoint);

        let endpoints = self
            .client
            .list_endpoints()
            .await
            .map_err(|e| remote_fault(&context, e))?;
        debug!("Listed {} endpoints", endpoints.len());
        Ok(endpoints.into_iter().map(EndpointSummary::from).collect())
    }
}
