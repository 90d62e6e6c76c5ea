//! Desired configuration records
//!
//! What the caller declares for a resource. Every attribute is a [`Field`], so
//! "leave it to RunPod" and "set it to zero" stay distinct. The same records,
//! merged with what RunPod echoes back, form the configuration half of the
//! local state snapshots in [`crate::state`].

use runpod_client::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared pod attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodConfig {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub image_name: Field<String>,
    /// GPU or CPU; fixed at creation
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub compute_type: Field<String>,
    /// SECURE or COMMUNITY; fixed at creation
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
    /// Fixed at creation
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
    /// Attached network volume; fixed at creation
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub network_volume_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub interruptible: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub locked: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub min_vcpu_per_gpu: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub min_ram_per_gpu: Field<i64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub min_download_mbps: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub min_upload_mbps: Field<f64>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
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

impl PodConfig {
    /// Attributes declared in `newer` replace ours; undeclared ones are kept.
    pub fn overlaid_by(&self, newer: &PodConfig) -> PodConfig {
        PodConfig {
            name: self.name.overlaid_by(&newer.name),
            image_name: self.image_name.overlaid_by(&newer.image_name),
            compute_type: self.compute_type.overlaid_by(&newer.compute_type),
            cloud_type: self.cloud_type.overlaid_by(&newer.cloud_type),
            gpu_count: self.gpu_count.overlaid_by(&newer.gpu_count),
            vcpu_count: self.vcpu_count.overlaid_by(&newer.vcpu_count),
            gpu_type_ids: self.gpu_type_ids.overlaid_by(&newer.gpu_type_ids),
            cpu_flavor_ids: self.cpu_flavor_ids.overlaid_by(&newer.cpu_flavor_ids),
            data_center_ids: self.data_center_ids.overlaid_by(&newer.data_center_ids),
            container_disk_in_gb: self.container_disk_in_gb.overlaid_by(&newer.container_disk_in_gb),
            volume_in_gb: self.volume_in_gb.overlaid_by(&newer.volume_in_gb),
            volume_mount_path: self.volume_mount_path.overlaid_by(&newer.volume_mount_path),
            ports: self.ports.overlaid_by(&newer.ports),
            env: self.env.overlaid_by(&newer.env),
            docker_entrypoint: self.docker_entrypoint.overlaid_by(&newer.docker_entrypoint),
            docker_start_cmd: self.docker_start_cmd.overlaid_by(&newer.docker_start_cmd),
            template_id: self.template_id.overlaid_by(&newer.template_id),
            network_volume_id: self.network_volume_id.overlaid_by(&newer.network_volume_id),
            interruptible: self.interruptible.overlaid_by(&newer.interruptible),
            locked: self.locked.overlaid_by(&newer.locked),
            min_vcpu_per_gpu: self.min_vcpu_per_gpu.overlaid_by(&newer.min_vcpu_per_gpu),
            min_ram_per_gpu: self.min_ram_per_gpu.overlaid_by(&newer.min_ram_per_gpu),
            min_download_mbps: self.min_download_mbps.overlaid_by(&newer.min_download_mbps),
            min_upload_mbps: self.min_upload_mbps.overlaid_by(&newer.min_upload_mbps),
            min_disk_bandwidth_mbps: self.min_disk_bandwidth_mbps.overlaid_by(&newer.min_disk_bandwidth_mbps),
            support_public_ip: self.support_public_ip.overlaid_by(&newer.support_public_ip),
            global_networking: self.global_networking.overlaid_by(&newer.global_networking),
            allowed_cuda_versions: self.allowed_cuda_versions.overlaid_by(&newer.allowed_cuda_versions),
            country_codes: self.country_codes.overlaid_by(&newer.country_codes),
            gpu_type_priority: self.gpu_type_priority.overlaid_by(&newer.gpu_type_priority),
            cpu_flavor_priority: self.cpu_flavor_priority.overlaid_by(&newer.cpu_flavor_priority),
            data_center_priority: self.data_center_priority.overlaid_by(&newer.data_center_priority),
            container_registry_auth_id: self.container_registry_auth_id.overlaid_by(&newer.container_registry_auth_id),
        }
    }
}

/// Declared serverless endpoint attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    /// Required at creation
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub template_id: Field<String>,
    /// GPU or CPU; fixed at creation
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
    /// Zero is a meaningful value (scale to zero)
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

impl EndpointConfig {
    /// Attributes declared in `newer` replace ours; undeclared ones are kept.
    pub fn overlaid_by(&self, newer: &EndpointConfig) -> EndpointConfig {
        EndpointConfig {
            name: self.name.overlaid_by(&newer.name),
            template_id: self.template_id.overlaid_by(&newer.template_id),
            compute_type: self.compute_type.overlaid_by(&newer.compute_type),
            gpu_count: self.gpu_count.overlaid_by(&newer.gpu_count),
            vcpu_count: self.vcpu_count.overlaid_by(&newer.vcpu_count),
            gpu_type_ids: self.gpu_type_ids.overlaid_by(&newer.gpu_type_ids),
            cpu_flavor_ids: self.cpu_flavor_ids.overlaid_by(&newer.cpu_flavor_ids),
            data_center_ids: self.data_center_ids.overlaid_by(&newer.data_center_ids),
            network_volume_id: self.network_volume_id.overlaid_by(&newer.network_volume_id),
            workers_min: self.workers_min.overlaid_by(&newer.workers_min),
            workers_max: self.workers_max.overlaid_by(&newer.workers_max),
            idle_timeout: self.idle_timeout.overlaid_by(&newer.idle_timeout),
            execution_timeout_ms: self.execution_timeout_ms.overlaid_by(&newer.execution_timeout_ms),
            scaler_type: self.scaler_type.overlaid_by(&newer.scaler_type),
            scaler_value: self.scaler_value.overlaid_by(&newer.scaler_value),
            allowed_cuda_versions: self.allowed_cuda_versions.overlaid_by(&newer.allowed_cuda_versions),
            flashboot: self.flashboot.overlaid_by(&newer.flashboot),
        }
    }
}

/// Declared network volume attributes; all three are required at creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkVolumeConfig {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub name: Field<String>,
    /// Size in GB; RunPod only lets it grow
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub size: Field<i64>,
    /// Fixed at creation
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub data_center_id: Field<String>,
}

impl NetworkVolumeConfig {
    /// Attributes declared in `newer` replace ours; undeclared ones are kept.
    pub fn overlaid_by(&self, newer: &NetworkVolumeConfig) -> NetworkVolumeConfig {
        NetworkVolumeConfig {
            name: self.name.overlaid_by(&newer.name),
            size: self.size.overlaid_by(&newer.size),
            data_center_id: self.data_center_id.overlaid_by(&newer.data_center_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_config_keeps_presence() {
        let yaml = r#"
template_id: tpl-1
workers_min: 0
flashboot: false
"#;
        let cfg: EndpointConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.template_id, Field::Value("tpl-1".to_string()));
        assert_eq!(cfg.workers_min, Field::Value(0));
        assert_eq!(cfg.flashboot, Field::Value(false));
        assert!(cfg.workers_max.is_unset());
        assert!(cfg.name.is_unset());
    }

    #[test]
    fn test_overlay_only_replaces_declared_fields() {
        let prior = NetworkVolumeConfig {
            name: Field::Value("data".to_string()),
            size: Field::Value(10),
            data_center_id: Field::Value("EU-RO-1".to_string()),
        };
        let newer = NetworkVolumeConfig {
            size: Field::Value(20),
            ..Default::default()
        };

        let merged = prior.overlaid_by(&newer);
        assert_eq!(merged.name, Field::Value("data".to_string()));
        assert_eq!(merged.size, Field::Value(20));
        assert_eq!(merged.data_center_id, Field::Value("EU-RO-1".to_string()));
    }
}
