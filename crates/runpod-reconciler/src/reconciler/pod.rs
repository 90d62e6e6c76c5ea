//! Pod reconciler
//!
//! RunPod offers two ways to change a running pod: `PUT` resets it and
//! accepts most container settings, `PATCH` changes only the name and lock
//! without a reset. The caller picks the variant; [`pod_requires_full_update`]
//! tells adapters which one a change needs. Attributes neither variant carries
//! (GPU count, template, placement filters) cannot be changed on a live pod.

use super::{Reconciler, ensure_unchanged, missing_identity, remote_fault};
use crate::deletion::DeletionOutcome;
use crate::desired::PodConfig;
use crate::error::{FaultContext, Operation, ReconcileError, ResourceKind};
use crate::inventory::PodSummary;
use crate::merge::merge_pod;
use crate::state::PodState;
use runpod_client::{Field, Pod};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Whether applying `cfg` to `prior` changes anything only the full update
/// carries. Changes no update can carry are not counted.
pub fn pod_requires_full_update(cfg: &PodConfig, prior: &PodState) -> bool {
    let outside_in_place = PodConfig {
        name: Field::Unset,
        locked: Field::Unset,
        ..PodConfig::from(cfg.to_update_request())
    };
    prior.config.overlaid_by(&outside_in_place) != prior.config
}

fn check_immutable(context: &FaultContext, cfg: &PodConfig, prior: &PodState) -> Result<(), ReconcileError> {
    let current = &prior.config;
    ensure_unchanged(context, "network_volume_id", &current.network_volume_id, &cfg.network_volume_id)?;
    ensure_unchanged(context, "data_center_ids", &current.data_center_ids, &cfg.data_center_ids)?;
    ensure_unchanged(context, "compute_type", &current.compute_type, &cfg.compute_type)?;
    ensure_unchanged(context, "cloud_type", &current.cloud_type, &cfg.cloud_type)?;
    Ok(())
}

/// Declared changes the chosen request did not carry stay out of the snapshot.
fn warn_unsent(id: &str, cfg: &PodConfig, sent: &PodConfig, prior: &PodState) {
    if prior.config.overlaid_by(cfg) != prior.config.overlaid_by(sent) {
        warn!(
            "Pod {}: declared changes outside the update's attribute set were not sent and are not recorded",
            id
        );
    }
}

/// Attributes the request carried join the snapshot, then RunPod's answer is folded on top.
fn fold_update(id: &str, sent: &PodConfig, prior: &PodState, remote: Pod) -> PodState {
    let base = PodState {
        id: id.to_string(),
        config: prior.config.overlaid_by(sent),
        observed: prior.observed.clone(),
    };
    merge_pod(&base, remote)
}

impl Reconciler {
    /// Create a pod from `cfg`.
    ///
    /// Only declared attributes are sent; RunPod defaults the rest. The
    /// returned snapshot carries the new identity.
    pub async fn create_pod(&self, cfg: &PodConfig) -> Result<PodState, ReconcileError> {
        let context = FaultContext::new(Operation::Create, ResourceKind::Pod);
        info!("Creating pod {:?}", cfg.name.as_ref());

        let remote = self
            .client
            .create_pod(&cfg.to_create_request())
            .await
            .map_err(|e| remote_fault(&context, e))?;
        if remote.id.is_empty() {
            return Err(missing_identity(&context));
        }

        let state = merge_pod(&PodState::declared(cfg.clone()), remote);
        info!("Created pod {}", state.id);
        Ok(state)
    }

    /// Refresh `prior` from RunPod.
    ///
    /// Fails with [`ReconcileError::NotFound`] when the pod no longer exists.
    pub async fn read_pod(&self, id: &str, prior: &PodState) -> Result<PodState, ReconcileError> {
        let context = FaultContext::with_id(Operation::Read, ResourceKind::Pod, id);
        debug!("Reading pod {}", id);

        let remote = self
            .client
            .get_pod(id)
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let base = PodState { id: id.to_string(), ..prior.clone() };
        Ok(merge_pod(&base, remote))
    }

    /// Adopt an existing pod: a read with nothing known beforehand.
    pub async fn import_pod(&self, id: &str) -> Result<PodState, ReconcileError> {
        self.read_pod(id, &PodState::default()).await
    }

    /// Full update (`PUT`); RunPod resets the pod.
    ///
    /// Only the attributes the request carries are recorded in the returned snapshot.
    pub async fn update_pod(&self, id: &str, cfg: &PodConfig, prior: &PodState) -> Result<PodState, ReconcileError> {
        let context = FaultContext::with_id(Operation::Update, ResourceKind::Pod, id);
        check_immutable(&context, cfg, prior)?;
        info!("Updating pod {} (reset)", id);

        let request = cfg.to_update_request();
        let remote = self
            .client
            .update_pod(id, &request)
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let sent = PodConfig::from(request);
        warn_unsent(id, cfg, &sent, prior);
        Ok(fold_update(id, &sent, prior, remote))
    }

    /// In-place update (`PATCH`); only name and lock are sent or recorded.
    pub async fn update_pod_in_place(
        &self,
        id: &str,
        cfg: &PodConfig,
        prior: &PodState,
    ) -> Result<PodState, ReconcileError> {
        let context = FaultContext::with_id(Operation::UpdateInPlace, ResourceKind::Pod, id);
        check_immutable(&context, cfg, prior)?;
        info!("Updating pod {} in place", id);

        let request = cfg.to_in_place_request();
        let remote = self
            .client
            .update_pod_in_place(id, &request)
            .await
            .map_err(|e| remote_fault(&context, e))?;

        let sent = PodConfig::from(request);
        warn_unsent(id, cfg, &sent, prior);
        Ok(fold_update(id, &sent, prior, remote))
    }

    /// Ask RunPod to delete the pod. Returns once the request is accepted.
    pub async fn delete_pod(&self, id: &str) -> Result<(), ReconcileError> {
        let context = FaultContext::with_id(Operation::Delete, ResourceKind::Pod, id);
        info!("Deleting pod {}", id);

        self.client
            .delete_pod(id)
            .await
            .map_err(|e| remote_fault(&context, e))
    }

    /// Poll until the pod is gone or the deletion bound elapses.
    pub async fn await_pod_gone(&self, id: &str, cancel: &CancellationToken) -> DeletionOutcome {
        let client = &self.client;
        self.deletion
            .await_gone(ResourceKind::Pod, id, cancel, move || async move {
                client.get_pod(id).await.map(|_| ()).map_err(|e| {
                    ReconcileError::from_client(
                        FaultContext::with_id(Operation::AwaitGone, ResourceKind::Pod, id),
                        e,
                    )
                })
            })
            .await
    }

    /// Delete the pod and wait for RunPod to confirm it is gone.
    pub async fn delete_pod_and_wait(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<DeletionOutcome, ReconcileError> {
        self.delete_pod(id).await?;
        Ok(self.await_pod_gone(id, cancel).await)
    }

    /// Stop the pod. Local state is untouched; read afterwards to observe it.
    pub async fn stop_pod(&self, id: &str) -> Result<(), ReconcileError> {
        let context = FaultContext::with_id(Operation::Stop, ResourceKind::Pod, id);
        info!("Stopping pod {}", id);

        self.client
            .stop_pod(id)
            .await
            .map_err(|e| remote_fault(&context, e))
    }

    /// Start a stopped pod. Local state is untouched.
    pub async fn start_pod(&self, id: &str) -> Result<(), ReconcileError> {
        let context = FaultContext::with_id(Operation::Start, ResourceKind::Pod, id);
        info!("Starting pod {}", id);

        self.client
            .start_pod(id)
            .await
            .map_err(|e| remote_fault(&context, e))
    }

    /// Every pod in the account
    pub async fn list_pods(&self) -> Result<Vec<PodSummary>, ReconcileError> {
        let context = FaultContext::new(Operation::List, ResourceKind::Pod);

        let pods = self
            .client
            .list_pods()
            .await
            .map_err(|e| remote_fault(&context, e))?;
        debug!("Listed {} pods", pods.len());
        Ok(pods.into_iter().map(PodSummary::from).collect())
    }
}
