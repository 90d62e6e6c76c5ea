//! Inventory summaries
//!
//! Flat, read-only views of what exists in the account, as returned by the
//! list operations. Unlike local state snapshots these are never merged; they
//! show exactly what RunPod reported.

use runpod_client::{Endpoint, NetworkVolume, Pod, Template};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PodSummary {
    pub id: String,
    pub name: Option<String>,
    pub image_name: Option<String>,
    pub desired_status: Option<String>,
    pub public_ip: Option<String>,
    pub machine_id: Option<String>,
    pub cost_per_hr: Option<f64>,
    pub adjusted_cost_per_hr: Option<f64>,
    pub memory_in_gb: Option<f64>,
    pub vcpu_count: Option<i64>,
    pub gpu_count: Option<i64>,
}

impl From<Pod> for PodSummary {
    fn from(pod: Pod) -> Self {
        Self {
            id: pod.id,
            name: pod.name,
            image_name: pod.image_name,
            desired_status: pod.desired_status,
            public_ip: pod.public_ip,
            machine_id: pod.machine_id,
            cost_per_hr: pod.cost_per_hr,
            adjusted_cost_per_hr: pod.adjusted_cost_per_hr,
            memory_in_gb: pod.memory_in_gb,
            vcpu_count: pod.vcpu_count,
            gpu_count: pod.gpu_count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointSummary {
    pub id: String,
    pub name: Option<String>,
    pub template_id: Option<String>,
    pub compute_type: Option<String>,
    pub gpu_count: Option<i64>,
    pub vcpu_count: Option<i64>,
    pub workers_min: Option<i64>,
    pub workers_max: Option<i64>,
    pub idle_timeout: Option<i64>,
    pub execution_timeout_ms: Option<i64>,
    pub scaler_type: Option<String>,
    pub scaler_value: Option<i64>,
    pub created_at: Option<String>,
    pub version: Option<i64>,
}

impl From<Endpoint> for EndpointSummary {
    fn from(endpoint: Endpoint) -> Self {
        Self {
            id: endpoint.id,
            name: endpoint.name,
            template_id: endpoint.template_id,
            compute_type: endpoint.compute_type,
            gpu_count: endpoint.gpu_count,
            vcpu_count: endpoint.vcpu_count,
            workers_min: endpoint.workers_min,
            workers_max: endpoint.workers_max,
            idle_timeout: endpoint.idle_timeout,
            execution_timeout_ms: endpoint.execution_timeout_ms,
            scaler_type: endpoint.scaler_type,
            scaler_value: endpoint.scaler_value,
            created_at: endpoint.created_at,
            version: endpoint.version,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkVolumeSummary {
    pub id: String,
    pub name: Option<String>,
    pub size: Option<i64>,
    pub data_center_id: Option<String>,
}

impl From<NetworkVolume> for NetworkVolumeSummary {
    fn from(volume: NetworkVolume) -> Self {
        Self {
            id: volume.id,
            name: volume.name,
            size: volume.size,
            data_center_id: volume.data_center_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: Option<String>,
    pub image_name: Option<String>,
    pub is_serverless: bool,
    pub is_public: bool,
    pub is_runpod: bool,
}

impl From<Template> for TemplateSummary {
    fn from(template: Template) -> Self {
        Self {
            id: template.id,
            name: template.name,
            image_name: template.image_name,
            is_serverless: template.is_serverless.unwrap_or(false),
            is_public: template.is_public.unwrap_or(false),
            is_runpod: template.is_runpod.unwrap_or(false),
        }
    }
}
