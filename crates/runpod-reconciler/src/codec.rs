//! Field presence codec
//!
//! Turns desired configuration into request payloads. Declared attributes are
//! copied verbatim (zero values included); undeclared ones stay
//! [`Field::Unset`] and are omitted from the JSON body, leaving RunPod to apply
//! its own defaults. Collections are all-or-nothing: a declared list or map is
//! sent whole.

use crate::desired::{EndpointConfig, NetworkVolumeConfig, PodConfig};
use runpod_client::{
    EndpointCreateRequest, EndpointUpdateRequest, Field, NetworkVolumeCreateRequest,
    NetworkVolumeUpdateRequest, PodCreateRequest, PodInPlaceUpdateRequest, PodUpdateRequest,
};

/// A create-time required attribute was not declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

fn required<T: Clone>(field: &Field<T>, name: &'static str) -> Result<T, MissingField> {
    field.as_ref().cloned().ok_or(MissingField(name))
}

impl PodConfig {
    /// Payload for `POST /pods`
    pub fn to_create_request(&self) -> PodCreateRequest {
        PodCreateRequest {
            name: self.name.clone(),
            image_name: self.image_name.clone(),
            compute_type: self.compute_type.clone(),
            cloud_type: self.cloud_type.clone(),
            gpu_count: self.gpu_count.clone(),
            vcpu_count: self.vcpu_count.clone(),
            gpu_type_ids: self.gpu_type_ids.clone(),
            cpu_flavor_ids: self.cpu_flavor_ids.clone(),
            data_center_ids: self.data_center_ids.clone(),
            container_disk_in_gb: self.container_disk_in_gb.clone(),
            volume_in_gb: self.volume_in_gb.clone(),
            volume_mount_path: self.volume_mount_path.clone(),
            ports: self.ports.clone(),
            env: self.env.clone(),
            docker_entrypoint: self.docker_entrypoint.clone(),
            docker_start_cmd: self.docker_start_cmd.clone(),
            template_id: self.template_id.clone(),
            network_volume_id: self.network_volume_id.clone(),
            interruptible: self.interruptible.clone(),
            locked: self.locked.clone(),
            min_vcpu_per_gpu: self.min_vcpu_per_gpu.clone(),
            min_ram_per_gpu: self.min_ram_per_gpu.clone(),
            min_download_mbps: self.min_download_mbps.clone(),
            min_upload_mbps: self.min_upload_mbps.clone(),
            min_disk_bandwidth_mbps: self.min_disk_bandwidth_mbps.clone(),
            support_public_ip: self.support_public_ip.clone(),
            global_networking: self.global_networking.clone(),
            allowed_cuda_versions: self.allowed_cuda_versions.clone(),
            country_codes: self.country_codes.clone(),
            gpu_type_priority: self.gpu_type_priority.clone(),
            cpu_flavor_priority: self.cpu_flavor_priority.clone(),
            data_center_priority: self.data_center_priority.clone(),
            container_registry_auth_id: self.container_registry_auth_id.clone(),
        }
    }

    /// Payload for `PUT /pods/{id}`; other declared attributes are not sent
    pub fn to_update_request(&self) -> PodUpdateRequest {
        PodUpdateRequest {
            name: self.name.clone(),
            image_name: self.image_name.clone(),
            container_disk_in_gb: self.container_disk_in_gb.clone(),
            volume_in_gb: self.volume_in_gb.clone(),
            volume_mount_path: self.volume_mount_path.clone(),
            ports: self.ports.clone(),
            env: self.env.clone(),
            docker_entrypoint: self.docker_entrypoint.clone(),
            docker_start_cmd: self.docker_start_cmd.clone(),
            locked: self.locked.clone(),
            global_networking: self.global_networking.clone(),
            container_registry_auth_id: self.container_registry_auth_id.clone(),
        }
    }

    /// Payload for `PATCH /pods/{id}`
    pub fn to_in_place_request(&self) -> PodInPlaceUpdateRequest {
        PodInPlaceUpdateRequest {
            name: self.name.clone(),
            locked: self.locked.clone(),
        }
    }
}

/// The attributes a full update actually carried
impl From<PodUpdateRequest> for PodConfig {
    fn from(request: PodUpdateRequest) -> Self {
        PodConfig {
            name: request.name,
            image_name: request.image_name,
            container_disk_in_gb: request.container_disk_in_gb,
            volume_in_gb: request.volume_in_gb,
            volume_mount_path: request.volume_mount_path,
            ports: request.ports,
            env: request.env,
            docker_entrypoint: request.docker_entrypoint,
            docker_start_cmd: request.docker_start_cmd,
            locked: request.locked,
            global_networking: request.global_networking,
            container_registry_auth_id: request.container_registry_auth_id,
            ..Default::default()
        }
    }
}

/// The attributes an in-place update actually carried
impl From<PodInPlaceUpdateRequest> for PodConfig {
    fn from(request: PodInPlaceUpdateRequest) -> Self {
        PodConfig {
            name: request.name,
            locked: request.locked,
            ..Default::default()
        }
    }
}

impl EndpointConfig {
    /// Payload for `POST /endpoints`
    pub fn to_create_request(&self) -> Result<EndpointCreateRequest, MissingField> {
        Ok(EndpointCreateRequest {
            name: self.name.clone(),
            template_id: required(&self.template_id, "template_id")?,
            compute_type: self.compute_type.clone(),
            gpu_count: self.gpu_count.clone(),
            vcpu_count: self.vcpu_count.clone(),
            gpu_type_ids: self.gpu_type_ids.clone(),
            cpu_flavor_ids: self.cpu_flavor_ids.clone(),
            data_center_ids: self.data_center_ids.clone(),
            network_volume_id: self.network_volume_id.clone(),
            workers_min: self.workers_min.clone(),
            workers_max: self.workers_max.clone(),
            idle_timeout: self.idle_timeout.clone(),
            execution_timeout_ms: self.execution_timeout_ms.clone(),
            scaler_type: self.scaler_type.clone(),
            scaler_value: self.scaler_value.clone(),
            allowed_cuda_versions: self.allowed_cuda_versions.clone(),
            flashboot: self.flashboot.clone(),
        })
    }

    /// Payload for `PATCH /endpoints/{id}`; everything but compute_type
    pub fn to_update_request(&self) -> EndpointUpdateRequest {
        EndpointUpdateRequest {
            name: self.name.clone(),
            template_id: self.template_id.clone(),
            gpu_count: self.gpu_count.clone(),
            vcpu_count: self.vcpu_count.clone(),
            gpu_type_ids: self.gpu_type_ids.clone(),
            cpu_flavor_ids: self.cpu_flavor_ids.clone(),
            data_center_ids: self.data_center_ids.clone(),
            network_volume_id: self.network_volume_id.clone(),
            workers_min: self.workers_min.clone(),
            workers_max: self.workers_max.clone(),
            idle_timeout: self.idle_timeout.clone(),
            execution_timeout_ms: self.execution_timeout_ms.clone(),
            scaler_type: self.scaler_type.clone(),
            scaler_value: self.scaler_value.clone(),
            allowed_cuda_versions: self.allowed_cuda_versions.clone(),
            flashboot: self.flashboot.clone(),
        }
    }
}

impl NetworkVolumeConfig {
    /// Payload for `POST /networkvolumes`
    pub fn to_create_request(&self) -> Result<NetworkVolumeCreateRequest, MissingField> {
        Ok(NetworkVolumeCreateRequest {
            name: required(&self.name, "name")?,
            size: required(&self.size, "size")?,
            data_center_id: required(&self.data_center_id, "data_center_id")?,
        })
    }

    /// Payload for `PATCH /networkvolumes/{id}`
    pub fn to_update_request(&self) -> NetworkVolumeUpdateRequest {
        NetworkVolumeUpdateRequest {
            name: self.name.clone(),
            size: self.size.clone(),
        }
    }
}
