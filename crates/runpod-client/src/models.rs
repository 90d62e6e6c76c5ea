//! RunPod API models
//!
//! Two families live here:
//! - remote records (`Pod`, `Endpoint`, `NetworkVolume`, `Template`) decoded from
//!   response bodies. Every attribute is optional because the API omits fields
//!   freely and zero values are ambiguous.
//! - request payloads (`*Request`) whose optional attributes are [`Field`]s, so
//!   unset attributes never reach the wire.
//!
//! See: https://rest.runpod.io/v1/docs

use crate::presence::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Server-side defaults RunPod documents for attributes left out of a create request.
pub mod defaults {
    /// Pod name when none is given
    pub const POD_NAME: &str = "my pod";
    /// GPU or CPU pod
    pub const COMPUTE_TYPE: &str = "GPU";
    /// SECURE or COMMUNITY cloud
    pub const CLOUD_TYPE: &str = "SECURE";
    /// GPUs attached to a GPU pod / endpoint worker
    pub const GPU_COUNT: i64 = 1;
    /// vCPUs allocated to a CPU pod / endpoint worker
    pub const VCPU_COUNT: i64 = 2;
    /// Container disk, wiped on restart
    pub const CONTAINER_DISK_IN_GB: i64 = 50;
    /// Pod volume, persisted across restarts
    pub const VOLUME_IN_GB: i64 = 20;
    /// Where the pod volume is mounted
    pub const VOLUME_MOUNT_PATH: &str = "/workspace";
    /// Minimum vCPUs per GPU
    pub const MIN_VCPU_PER_GPU: i64 = 2;
    /// Minimum RAM (GB) per GPU
    pub const MIN_RAM_PER_GPU: i64 = 8;
    /// GPU type / CPU flavor / data center selection strategy
    pub const PRIORITY: &str = "availability";
    /// Minimum endpoint workers
    pub const WORKERS_MIN: i64 = 0;
    /// Seconds a worker idles before scale-down
    pub const IDLE_TIMEOUT: i64 = 5;
    /// Endpoint autoscaler strategy
    pub const SCALER_TYPE: &str = "QUEUE_DELAY";
    /// Endpoint autoscaler threshold
    pub const SCALER_VALUE: i64 = 4;
}

/// Pod as returned by `GET /pods/{id}` and the write endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pod {
    pub id: String,
    pub name: Option<String>,
    /// Reads use `image`, writes use `imageName`; reads usually omit it entirely.
    #[serde(rename = "image")]
    pub image_name: Option<String>,
    pub compute_type: Option<String>,
    pub cloud_type: Option<String>,
    pub gpu_count: Option<i64>,
    pub vcpu_count: Option<i64>,
    pub memory_in_gb: Option<f64>,
    pub gpu_type_ids: Option<Vec<String>>,
    pub cpu_flavor_ids: Option<Vec<String>>,
    pub data_center_ids: Option<Vec<String>>,
    pub container_disk_in_gb: Option<i64>,
    pub volume_in_gb: Option<i64>,
    pub volume_mount_path: Option<String>,
    pub ports: Option<Vec<String>>,
    pub env: Option<BTreeMap<String, String>>,
    pub docker_entrypoint: Option<Vec<String>>,
    pub docker_start_cmd: Option<Vec<String>>,
    pub template_id: Option<String>,
    pub network_volume_id: Option<String>,
    pub interruptible: Option<bool>,
    pub locked: Option<bool>,
    #[serde(rename = "minVCPUPerGPU")]
    pub min_vcpu_per_gpu: Option<i64>,
    #[serde(rename = "minRAMPerGPU")]
    pub min_ram_per_gpu: Option<i64>,
    pub min_download_mbps: Option<f64>,
    pub min_upload_mbps: Option<f64>,
    #[serde(rename = "minDiskBandwidthMBps")]
    pub min_disk_bandwidth_mbps: Option<f64>,
    pub support_public_ip: Option<bool>,
    pub global_networking: Option<bool>,
    pub allowed_cuda_versions: Option<Vec<String>>,
    pub country_codes: Option<Vec<String>>,
    pub gpu_type_priority: Option<String>,
    pub cpu_flavor_priority: Option<String>,
    pub data_center_priority: Option<String>,
    pub container_registry_auth_id: Option<String>,
    pub desired_status: Option<String>,
    pub public_ip: Option<String>,
    pub port_mappings: Option<BTreeMap<String, i64>>,
    pub machine_id: Option<String>,
    pub cost_per_hr: Option<f64>,
    pub adjusted_cost_per_hr: Option<f64>,
    pub last_started_at: Option<String>,
    pub last_status_change: Option<String>,
    pub machine: Option<serde_json::Value>,
    pub gpu: Option<serde_json::Value>,
    pub network_volume: Option<serde_json::Value>,
}

/// Body of `POST /pods`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodCreateRequest {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub compute_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub cloud_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_count: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub vcpu_count: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_type_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub cpu_flavor_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_center_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub container_disk_in_gb: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub volume_in_gb: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub volume_mount_path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub ports: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub env: Field<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub docker_entrypoint: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub docker_start_cmd: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub template_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub network_volume_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub interruptible: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub locked: Field<bool>,
    #[serde(default, rename = "minVCPUPerGPU", skip_serializing_if = "Field::is_unset")]
    pub min_vcpu_per_gpu: Field<i64>,
    #[serde(default, rename = "minRAMPerGPU", skip_serializing_if = "Field::is_unset")]
    pub min_ram_per_gpu: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub min_download_mbps: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub min_upload_mbps: Field<f64>,
    #[serde(default, rename = "minDiskBandwidthMBps", skip_serializing_if = "Field::is_unset")]
    pub min_disk_bandwidth_mbps: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub support_public_ip: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub global_networking: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub allowed_cuda_versions: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub country_codes: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_type_priority: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub cpu_flavor_priority: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_center_priority: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub container_registry_auth_id: Field<String>,
}

/// Body of `PUT /pods/{id}`; applying it resets the pod
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodUpdateRequest {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image_name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub container_disk_in_gb: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub volume_in_gb: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub volume_mount_path: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub ports: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub env: Field<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub docker_entrypoint: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub docker_start_cmd: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub locked: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub global_networking: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub container_registry_auth_id: Field<String>,
}

/// Body of `PATCH /pods/{id}`; does not reset the pod
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodInPlaceUpdateRequest {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub locked: Field<bool>,
}

/// Serverless endpoint as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoint {
    pub id: String,
    pub name: Option<String>,
    pub template_id: Option<String>,
    pub compute_type: Option<String>,
    pub gpu_count: Option<i64>,
    pub vcpu_count: Option<i64>,
    pub gpu_type_ids: Option<Vec<String>>,
    pub cpu_flavor_ids: Option<Vec<String>>,
    pub data_center_ids: Option<Vec<String>>,
    pub network_volume_id: Option<String>,
    pub workers_min: Option<i64>,
    pub workers_max: Option<i64>,
    pub idle_timeout: Option<i64>,
    pub execution_timeout_ms: Option<i64>,
    pub scaler_type: Option<String>,
    pub scaler_value: Option<i64>,
    pub allowed_cuda_versions: Option<Vec<String>>,
    pub env: Option<BTreeMap<String, String>>,
    pub flashboot: Option<bool>,
    pub created_at: Option<String>,
    pub user_id: Option<String>,
    pub version: Option<i64>,
    pub template: Option<serde_json::Value>,
}

/// Body of `POST /endpoints`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointCreateRequest {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    /// Required by the API; the reconciler refuses to send a create without it.
    pub template_id: String,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub compute_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_count: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub vcpu_count: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_type_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub cpu_flavor_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_center_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub network_volume_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub workers_min: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub workers_max: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub idle_timeout: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub execution_timeout_ms: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub scaler_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub scaler_value: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub allowed_cuda_versions: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub flashboot: Field<bool>,
}

/// Body of `PATCH /endpoints/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointUpdateRequest {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub template_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_count: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub vcpu_count: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub gpu_type_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub cpu_flavor_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_center_ids: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub network_volume_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub workers_min: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub workers_max: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub idle_timeout: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub execution_timeout_ms: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub scaler_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub scaler_value: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub allowed_cuda_versions: Field<Vec<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub flashboot: Field<bool>,
}

/// Network volume as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkVolume {
    pub id: String,
    pub name: Option<String>,
    pub size: Option<i64>,
    pub data_center_id: Option<String>,
}

/// Body of `POST /networkvolumes`; every attribute is required
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVolumeCreateRequest {
    pub name: String,
    pub size: i64,
    pub data_center_id: String,
}

/// Body of `PATCH /networkvolumes/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkVolumeUpdateRequest {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub size: Field<i64>,
}

/// Pod/endpoint template, list-only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub id: String,
    pub name: Option<String>,
    pub image_name: Option<String>,
    pub category: Option<String>,
    pub container_disk_in_gb: Option<i64>,
    pub volume_in_gb: Option<i64>,
    pub volume_mount_path: Option<String>,
    pub ports: Option<Vec<String>>,
    pub env: Option<BTreeMap<String, String>>,
    pub docker_entrypoint: Option<Vec<String>>,
    pub docker_start_cmd: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub is_runpod: Option<bool>,
    pub is_serverless: Option<bool>,
    pub readme: Option<String>,
    pub runtime_in_min: Option<i64>,
    pub start_jupyter: Option<bool>,
    pub start_ssh: Option<bool>,
    pub container_registry_auth_id: Option<String>,
    pub earned: Option<f64>,
}
