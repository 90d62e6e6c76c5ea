//! Local state snapshots
//!
//! A snapshot is what the caller keeps between operations: the identity RunPod
//! assigned, the configuration as declared and confirmed, and the read-only
//! attributes RunPod computes. Snapshots are only ever produced as the result
//! of a successful create, read or update.

use crate::desired::{EndpointConfig, NetworkVolumeConfig, PodConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only pod attributes computed by RunPod
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodObserved {
    /// RUNNING, EXITED or TERMINATED
    pub desired_status: Option<String>,
    /// Public address, once assigned
    pub public_ip: Option<String>,
    /// Host the pod is placed on
    pub machine_id: Option<String>,
    /// RunPod exposes no data center for a running pod, so this is always unknown.
    pub actual_data_center: Option<String>,
    /// Listed hourly cost
    pub cost_per_hr: Option<f64>,
    /// Hourly cost after discounts
    pub adjusted_cost_per_hr: Option<f64>,
    /// Memory allotted to the pod
    pub memory_in_gb: Option<f64>,
    /// Last start timestamp
    pub last_started_at: Option<String>,
    /// Description of the last status transition
    pub last_status_change: Option<String>,
    /// Internal port to public port
    pub port_mappings: Option<BTreeMap<String, i64>>,
}

/// Local snapshot of a pod
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodState {
    /// Identity assigned by RunPod; empty until created
    pub id: String,
    /// Declared and confirmed configuration
    pub config: PodConfig,
    /// Attributes computed by RunPod
    pub observed: PodObserved,
}

/// Read-only endpoint attributes computed by RunPod
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointObserved {
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Owning account
    pub user_id: Option<String>,
    /// Incremented by RunPod on every update
    pub version: Option<i64>,
}

/// Local snapshot of a serverless endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointState {
    /// Identity assigned by RunPod; empty until created
    pub id: String,
    /// Declared and confirmed configuration
    pub config: EndpointConfig,
    /// Attributes computed by RunPod
    pub observed: EndpointObserved,
}

/// Local snapshot of a network volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkVolumeState {
    /// Identity assigned by RunPod; empty until created
    pub id: String,
    /// Declared and confirmed configuration
    pub config: NetworkVolumeConfig,
}

impl PodState {
    /// Snapshot of a declaration RunPod has not confirmed yet
    pub fn declared(config: PodConfig) -> Self {
        Self { config, ..Default::default() }
    }
}

impl EndpointState {
    /// Snapshot of a declaration RunPod has not confirmed yet
    pub fn declared(config: EndpointConfig) -> Self {
        Self { config, ..Default::default() }
    }
}

impl NetworkVolumeState {
    /// Snapshot of a declaration RunPod has not confirmed yet
    pub fn declared(config: NetworkVolumeConfig) -> Self {
        Self { config, ..Default::default() }
    }
}
