//! State merger
//!
//! Folds a freshly fetched remote record onto a prior local snapshot. Each
//! attribute follows exactly one rule:
//!
//! 1. [`sticky`]: declarable attributes RunPod may not echo. An absent or
//!    blank remote value keeps the prior value.
//! 2. [`computed`]: read-only attributes. The remote value always wins, even
//!    when absent.
//! 3. [`when_present`]: declarable attributes where zero/false is a real
//!    value. The remote value wins whenever the key is present at all.
//!
//! Merging is pure: it never fails and never touches the network.

use crate::desired::{EndpointConfig, NetworkVolumeConfig, PodConfig};
use crate::state::{
    EndpointObserved, EndpointState, NetworkVolumeState, PodObserved, PodState,
};
use runpod_client::{Endpoint, Field, NetworkVolume, Pod};
use std::collections::BTreeMap;

/// Values RunPod uses to mean "nothing to report"
pub trait Blank {
    /// True for the empty or zero value
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for i64 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl Blank for f64 {
    fn is_blank(&self) -> bool {
        *self == 0.0
    }
}

/// Rule 1: take a non-blank remote value, otherwise keep what we had.
pub fn sticky<T: Blank + Clone>(prior: &Field<T>, remote: Option<T>) -> Field<T> {
    match remote {
        Some(value) if !value.is_blank() => Field::Value(value),
        _ => prior.clone(),
    }
}

/// Rule 2: the remote value, whatever it is.
pub fn computed<T>(remote: Option<T>) -> Option<T> {
    remote
}

/// Rule 3: take the remote value whenever it was reported, zero included.
pub fn when_present<T: Clone>(prior: &Field<T>, remote: Option<T>) -> Field<T> {
    match remote {
        Some(value) => Field::Value(value),
        None => prior.clone(),
    }
}

/// The identity is assigned once; a known identity is never replaced.
fn identity(prior: &str, remote: String) -> String {
    if prior.is_empty() { remote } else { prior.to_string() }
}

/// Fold a pod record onto a prior snapshot
pub fn merge_pod(prior: &PodState, remote: Pod) -> PodState {
    let c = &prior.config;
    PodState {
        id: identity(&prior.id, remote.id),
        config: PodConfig {
            name: sticky(&c.name, remote.name),
            image_name: sticky(&c.image_name, remote.image_name),
            compute_type: sticky(&c.compute_type, remote.compute_type),
            cloud_type: sticky(&c.cloud_type, remote.cloud_type),
            gpu_count: sticky(&c.gpu_count, remote.gpu_count),
            vcpu_count: sticky(&c.vcpu_count, remote.vcpu_count),
            gpu_type_ids: sticky(&c.gpu_type_ids, remote.gpu_type_ids),
            cpu_flavor_ids: sticky(&c.cpu_flavor_ids, remote.cpu_flavor_ids),
            data_center_ids: sticky(&c.data_center_ids, remote.data_center_ids),
            container_disk_in_gb: sticky(&c.container_disk_in_gb, remote.container_disk_in_gb),
            volume_in_gb: sticky(&c.volume_in_gb, remote.volume_in_gb),
            volume_mount_path: sticky(&c.volume_mount_path, remote.volume_mount_path),
            ports: sticky(&c.ports, remote.ports),
            env: sticky(&c.env, remote.env),
            docker_entrypoint: sticky(&c.docker_entrypoint, remote.docker_entrypoint),
            docker_start_cmd: sticky(&c.docker_start_cmd, remote.docker_start_cmd),
            template_id: sticky(&c.template_id, remote.template_id),
            network_volume_id: sticky(&c.network_volume_id, remote.network_volume_id),
            interruptible: when_present(&c.interruptible, remote.interruptible),
            locked: when_present(&c.locked, remote.locked),
            min_vcpu_per_gpu: sticky(&c.min_vcpu_per_gpu, remote.min_vcpu_per_gpu),
            min_ram_per_gpu: sticky(&c.min_ram_per_gpu, remote.min_ram_per_gpu),
            min_download_mbps: sticky(&c.min_download_mbps, remote.min_download_mbps),
            min_upload_mbps: sticky(&c.min_upload_mbps, remote.min_upload_mbps),
            min_disk_bandwidth_mbps: sticky(&c.min_disk_bandwidth_mbps, remote.min_disk_bandwidth_mbps),
            support_public_ip: when_present(&c.support_public_ip, remote.support_public_ip),
            global_networking: when_present(&c.global_networking, remote.global_networking),
            allowed_cuda_versions: sticky(&c.allowed_cuda_versions, remote.allowed_cuda_versions),
            country_codes: sticky(&c.country_codes, remote.country_codes),
            gpu_type_priority: sticky(&c.gpu_type_priority, remote.gpu_type_priority),
            cpu_flavor_priority: sticky(&c.cpu_flavor_priority, remote.cpu_flavor_priority),
            data_center_priority: sticky(&c.data_center_priority, remote.data_center_priority),
            container_registry_auth_id: sticky(&c.container_registry_auth_id, remote.container_registry_auth_id),
        },
        observed: PodObserved {
            desired_status: computed(remote.desired_status),
            public_ip: computed(remote.public_ip),
            machine_id: computed(remote.machine_id),
            actual_data_center: None,
            cost_per_hr: computed(remote.cost_per_hr),
            adjusted_cost_per_hr: computed(remote.adjusted_cost_per_hr),
            memory_in_gb: computed(remote.memory_in_gb),
            last_started_at: computed(remote.last_started_at),
            last_status_change: computed(remote.last_status_change),
            port_mappings: computed(remote.port_mappings),
        },
    }
}

/// Fold an endpoint record onto a prior snapshot
pub fn merge_endpoint(prior: &EndpointState, remote: Endpoint) -> EndpointState {
    let c = &prior.config;
    EndpointState {
        id: identity(&prior.id, remote.id),
        config: EndpointConfig {
            name: sticky(&c.name, remote.name),
            template_id: sticky(&c.template_id, remote.template_id),
            compute_type: sticky(&c.compute_type, remote.compute_type),
            gpu_count: sticky(&c.gpu_count, remote.gpu_count),
            vcpu_count: sticky(&c.vcpu_count, remote.vcpu_count),
            gpu_type_ids: sticky(&c.gpu_type_ids, remote.gpu_type_ids),
            cpu_flavor_ids: sticky(&c.cpu_flavor_ids, remote.cpu_flavor_ids),
            data_center_ids: sticky(&c.data_center_ids, remote.data_center_ids),
            network_volume_id: sticky(&c.network_volume_id, remote.network_volume_id),
            workers_min: when_present(&c.workers_min, remote.workers_min),
            workers_max: sticky(&c.workers_max, remote.workers_max),
            idle_timeout: sticky(&c.idle_timeout, remote.idle_timeout),
            execution_timeout_ms: sticky(&c.execution_timeout_ms, remote.execution_timeout_ms),
            scaler_type: sticky(&c.scaler_type, remote.scaler_type),
            scaler_value: sticky(&c.scaler_value, remote.scaler_value),
            allowed_cuda_versions: sticky(&c.allowed_cuda_versions, remote.allowed_cuda_versions),
            flashboot: when_present(&c.flashboot, remote.flashboot),
        },
        observed: EndpointObserved {
            created_at: computed(remote.created_at),
            user_id: computed(remote.user_id),
            version: computed(remote.version),
        },
    }
}

/// Fold a network volume record onto a prior snapshot
pub fn merge_network_volume(prior: &NetworkVolumeState, remote: NetworkVolume) -> NetworkVolumeState {
    let c = &prior.config;
    NetworkVolumeState {
        id: identity(&prior.id, remote.id),
        config: NetworkVolumeConfig {
            name: sticky(&c.name, remote.name),
            size: sticky(&c.size, remote.size),
            data_center_id: sticky(&c.data_center_id, remote.data_center_id),
        },
    }
}
