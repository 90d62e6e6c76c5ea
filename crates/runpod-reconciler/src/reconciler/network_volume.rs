//! Network volume reconciler

use super::{Reconciler, ensure_unchanged, missing_field, missing_identity, remote_fault};
use crate::deletion::DeletionOutcome;
use crate::desired::NetworkVolumeConfig;
use crate::error::{FaultContext, Operation, ReconcileError, ResourceKind};
use crate::inventory::NetworkVolumeSummary;
use crate::merge::merge_network_volume;
use crate::state::NetworkVolumeState;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

impl Reconciler {
    /// Create a network volume. Name, size and data center are all required.
    pub async fn create_network_volume(
        &self,
        cfg: &NetworkVolumeConfig,
    ) -> Result<NetworkVolumeState, ReconcileError> {
        let context = FaultContext::new(Operation::Create, ResourceKind::NetworkVolume);
        let request = cfg
            .to_create_request()
            .map_err(|missing| missing_field(&context, missing.0))?;
        info!(
            "Creating network volume {} ({} GB in {})",
            request.name, request.size, request.data_center_id
        );

        let remote = self
            .client
            .create_network_volume(&request)
            .await
            .map_err(|e| remote_fault(&context, e))?;
        if remote.id.is_empty() {
            return Err(missing_identity(&context));
        }

        let state = merge_network_volume(&NetworkVolumeState::declared(cfg.clone()), remote);
        info!("Created network volume {}", state.id);
        Ok(state)
    }

    /// Refresh `prior` from RunPod.
    pub async fn read_network_volume(
        &self,
        id: &str,
        prior: &NetworkVolumeState,
    ) -> Result<NetworkVolumeState, ReconcileError> {
        let context = FaultContext::with_id(Operation::Read, ResourceKind::NetworkVolume, id);
        debug!("Reading network volume {}", id);

        let remote = self
            .client
            .get_network_volume(id)
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let base = NetworkVolumeState { id: id.to_string(), ..prior.clone() };
        Ok(merge_network_volume(&base, remote))
    }

    /// Adopt an existing network volume.
    pub async fn import_network_volume(&self, id: &str) -> Result<NetworkVolumeState, ReconcileError> {
        self.read_network_volume(id, &NetworkVolumeState::default()).await
    }

    /// Rename or grow (`PATCH`). The data center cannot change.
    pub async fn update_network_volume(
        &self,
        id: &str,
        cfg: &NetworkVolumeConfig,
        prior: &NetworkVolumeState,
    ) -> Result<NetworkVolumeState, ReconcileError> {
        let context = FaultContext::with_id(Operation::Update, ResourceKind::NetworkVolume, id);
        ensure_unchanged(&context, "data_center_id", &prior.config.data_center_id, &cfg.data_center_id)?;
        info!("Updating network volume {}", id);

        let remote = self
            .client
            .update_network_volume(id, &cfg.to_update_request())
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let base = NetworkVolumeState {
            id: id.to_string(),
            config: prior.config.overlaid_by(cfg),
        };
        Ok(merge_network_volume(&base, remote))
    }

    /// Ask RunPod to delete the network volume.
    pub async fn delete_network_volume(&self, id: &str) -> Result<(), ReconcileError> {
        let context = FaultContext::with_id(Operation::Delete, ResourceKind::NetworkVolume, id);
        info!("Deleting network volume {}", id);

        self.client
            .delete_network_volume(id)
            .await
            .map_err(|e| remote_fault(&context, e))
    }

    /// Poll until the network volume is gone or the deletion bound elapses.
    pub async fn await_network_volume_gone(&self, id: &str, cancel: &CancellationToken) -> DeletionOutcome {
        let client = &self.client;
        self.deletion
            .await_gone(ResourceKind::NetworkVolume, id, cancel, move || async move {
                client.get_network_volume(id).await.map(|_| ()).map_err(|e| {
                    ReconcileError::from_client(
                        FaultContext::with_id(Operation::AwaitGone, ResourceKind::NetworkVolume, id),
                        e,
                    )
                })
            })
            .await
    }

    /// Delete the network volume and wait for RunPod to confirm it is gone.
    pub async fn delete_network_volume_and_wait(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<DeletionOutcome, ReconcileError> {
        self.delete_network_volume(id).await?;
        Ok(self.await_network_volume_gone(id, cancel).await)
    }

    /// Every network volume in the account
    pub async fn list_network_volumes(&self) -> Result<Vec<NetworkVolumeSummary>, ReconcileError> {
        let context = FaultContext::new(Operation::List, ResourceKind::NetworkVolume);

        let volumes = self
            .client
            .list_network_volumes()
            .await
            .map_err(|e| remote_fault(&context, e))?;
        debug!("Listed {} network volumes", volumes.len());
        Ok(volumes.into_iter().map(NetworkVolumeSummary::from).collect())
    }
}
