//! Reconciliation logic for RunPod resources.
//!
//! One file per resource type, each adding its lifecycle to [`Reconciler`]:
//! - `pod`: create, read, full and in-place update, delete, power control
//! - `endpoint`: serverless endpoints
//! - `network_volume`: network volumes
//! - `template`: template listing (read-only)
//!
//! Every operation works on a single identity end to end and performs at most
//! one remote write. Nothing is retried here; callers own retry policy.

pub mod endpoint;
pub mod network_volume;
pub mod pod;
pub mod template;

#[cfg(test)]
mod pod_test;

pub use pod::pod_requires_full_update;

use crate::deletion::DeletionConfirmer;
use crate::error::{FaultContext, ReconcileError};
use runpod_client::{Field, RunPodClientTrait, RunPodError};
use std::fmt;
use std::sync::Arc;
use tracing::{error, warn};

/// Reconciles declared RunPod resources against the live API.
///
/// Holds no per-resource state; local snapshots are passed in and handed back
/// by each call. Safe to share across tasks working on different identities.
#[derive(Clone)]
pub struct Reconciler {
    pub(crate) client: Arc<dyn RunPodClientTrait>,
    pub(crate) deletion: DeletionConfirmer,
}

impl fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("base_url", &self.client.base_url())
            .field("deletion", &self.deletion)
            .finish()
    }
}

impl Reconciler {
    /// Create a reconciler over an injected client
    pub fn new(client: Arc<dyn RunPodClientTrait>, deletion: DeletionConfirmer) -> Self {
        Self { client, deletion }
    }

    /// The remote client this reconciler talks to
    pub fn client(&self) -> &Arc<dyn RunPodClientTrait> {
        &self.client
    }
}

/// Translate and log a client error surfaced to the caller.
pub(crate) fn remote_fault(context: &FaultContext, err: RunPodError) -> ReconcileError {
    let fault = ReconcileError::from_client(context.clone(), err);
    if fault.is_not_found() {
        warn!("{}", fault);
    } else {
        error!("{}", fault);
    }
    fault
}

/// Refuse a declared value for an attribute fixed at creation when it differs
/// from what the prior snapshot holds (an unset prior counts as different).
pub(crate) fn ensure_unchanged<T: PartialEq + fmt::Debug>(
    context: &FaultContext,
    field: &'static str,
    current: &Field<T>,
    requested: &Field<T>,
) -> Result<(), ReconcileError> {
    match requested {
        Field::Value(value) if current.as_ref() != Some(value) => {
            let fault = ReconcileError::ImmutableFieldChanged {
                context: context.clone(),
                field,
                current: current
                    .as_ref()
                    .map_or_else(|| "unset".to_string(), |v| format!("{:?}", v)),
                requested: format!("{:?}", value),
            };
            error!("{}", fault);
            Err(fault)
        }
        _ => Ok(()),
    }
}

/// Fault for a create response that carried no identity.
pub(crate) fn missing_identity(context: &FaultContext) -> ReconcileError {
    let fault = ReconcileError::DecodeFailed {
        context: context.clone(),
        message: "response carried no id".to_string(),
    };
    error!("{}", fault);
    fault
}

/// Fault for a required attribute left undeclared.
pub(crate) fn missing_field(context: &FaultContext, field: &'static str) -> ReconcileError {
    let fault = ReconcileError::MissingRequiredField { context: context.clone(), field };
    error!("{}", fault);
    fault
}
