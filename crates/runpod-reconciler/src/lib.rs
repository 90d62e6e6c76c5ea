//! RunPod resource reconciliation
//!
//! Turns declared pods, serverless endpoints and network volumes into RunPod
//! API calls, and keeps a caller-held snapshot of each resource consistent
//! with what RunPod actually has.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use runpod_reconciler::{DeletionConfirmer, Field, PodConfig, ProviderConfig, Reconciler};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolved = ProviderConfig::default().resolve()?;
//! let reconciler = Reconciler::new(
//!     Arc::new(resolved.client()?),
//!     DeletionConfirmer::from_settings(&resolved.deletion),
//! );
//!
//! let cfg = PodConfig {
//!     image_name: Field::Value("runpod/pytorch:2.1".to_string()),
//!     gpu_count: Field::Value(1),
//!     ..Default::default()
//! };
//! let state = reconciler.create_pod(&cfg).await?;
//! let state = reconciler.read_pod(&state.id, &state).await?;
//!
//! let outcome = reconciler
//!     .delete_pod_and_wait(&state.id, &CancellationToken::new())
//!     .await?;
//! println!("deletion: {:?}", outcome);
//! # Ok(())
//! # }
//! ```
//!
//! # Components
//!
//! - **codec**: desired config to request payloads, omitting undeclared attributes
//! - **merge**: remote records folded onto prior snapshots, field by field
//! - **reconciler**: create/read/update/delete per resource type
//! - **deletion**: bounded, cancellable polling until a delete is confirmed

pub mod codec;
pub mod config;
pub mod deletion;
pub mod desired;
pub mod error;
pub mod inventory;
pub mod merge;
pub mod reconciler;
pub mod state;

#[cfg(test)]
mod deletion_test;
#[cfg(test)]
mod test_utils;

pub use codec::MissingField;
pub use config::{DeletionSettings, MAX_TIMEOUT_SECS, ProviderConfig, ResolvedConfig};
pub use deletion::{Clock, DeletionConfirmer, DeletionOutcome, MIN_POLL_INTERVAL, TokioClock};
pub use desired::{EndpointConfig, NetworkVolumeConfig, PodConfig};
pub use error::{FaultContext, Operation, ReconcileError, ResourceKind};
pub use inventory::{EndpointSummary, NetworkVolumeSummary, PodSummary, TemplateSummary};
pub use reconciler::{Reconciler, pod_requires_full_update};
pub use runpod_client::Field;
pub use state::{EndpointObserved, EndpointState, NetworkVolumeState, PodObserved, PodState};
