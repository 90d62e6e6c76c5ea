//! Serverless endpoint operations for MockRunPodClient

use super::pods::apply;
use super::{MockRunPodClient, not_found};
use crate::error::RunPodError;
use crate::models::*;

pub async fn create_endpoint(client: &MockRunPodClient, request: &EndpointCreateRequest) -> Result<Endpoint, RunPodError> {
        client.enter("create_endpoint")?;

        if request.template_id.is_empty() {
            return Err(RunPodError::Api { status: 400, body: "templateId is required".to_string() });
        }

        let id = client.next_id("ep");
        let compute_type = request.compute_type.clone().into_option()
            .unwrap_or_else(|| defaults::COMPUTE_TYPE.to_string());
        let is_gpu = compute_type == "GPU";

        let endpoint = Endpoint {
            id: id.clone(),
            name: request.name.clone().into_option(),
            template_id: Some(request.template_id.clone()),
            compute_type: Some(compute_type),
            gpu_count: is_gpu.then(|| request.gpu_count.clone().into_option().unwrap_or(defaults::GPU_COUNT)),
            vcpu_count: (!is_gpu).then(|| request.vcpu_count.clone().into_option().unwrap_or(defaults::VCPU_COUNT)),
            gpu_type_ids: request.gpu_type_ids.clone().into_option(),
            cpu_flavor_ids: request.cpu_flavor_ids.clone().into_option(),
            data_center_ids: request.data_center_ids.clone().into_option(),
            network_volume_id: request.network_volume_id.clone().into_option(),
            workers_min: Some(request.workers_min.clone().into_option().unwrap_or(defaults::WORKERS_MIN)),
            workers_max: request.workers_max.clone().into_option(),
            idle_timeout: Some(request.idle_timeout.clone().into_option().unwrap_or(defaults::IDLE_TIMEOUT)),
            execution_timeout_ms: request.execution_timeout_ms.clone().into_option(),
            scaler_type: Some(request.scaler_type.clone().into_option().unwrap_or_else(|| defaults::SCALER_TYPE.to_string())),
            scaler_value: Some(request.scaler_value.clone().into_option().unwrap_or(defaults::SCALER_VALUE)),
            allowed_cuda_versions: request.allowed_cuda_versions.clone().into_option(),
            flashboot: request.flashboot.clone().into_option(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            user_id: Some("user-mock".to_string()),
            version: Some(0),
            ..Default::default()
        };

        client.endpoints.lock().unwrap().insert(id, endpoint.clone());
        Ok(endpoint)
}

pub async fn get_endpoint(client: &MockRunPodClient, id: &str) -> Result<Endpoint, RunPodError> {
        client.enter("get_endpoint")?;

        if client.observe_pending_delete(id) {
            client.endpoints.lock().unwrap().remove(id);
        }

        client.endpoints
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Endpoint", id))
}

pub async fn update_endpoint(client: &MockRunPodClient, id: &str, request: &EndpointUpdateRequest) -> Result<Endpoint, RunPodError> {
        client.enter("update_endpoint")?;

        let mut endpoints = client.endpoints.lock().unwrap();
        let endpoint = endpoints.get_mut(id).ok_or_else(|| not_found("Endpoint", id))?;

        apply(&mut endpoint.name, &request.name);
        apply(&mut endpoint.template_id, &request.template_id);
        apply(&mut endpoint.gpu_count, &request.gpu_count);
        apply(&mut endpoint.vcpu_count, &request.vcpu_count);
        apply(&mut endpoint.gpu_type_ids, &request.gpu_type_ids);
        apply(&mut endpoint.cpu_flavor_ids, &request.cpu_flavor_ids);
        apply(&mut endpoint.data_center_ids, &request.data_center_ids);
        apply(&mut endpoint.network_volume_id, &request.network_volume_id);
        apply(&mut endpoint.workers_min, &request.workers_min);
        apply(&mut endpoint.workers_max, &request.workers_max);
        apply(&mut endpoint.idle_timeout, &request.idle_timeout);
        apply(&mut endpoint.execution_timeout_ms, &request.execution_timeout_ms);
        apply(&mut endpoint.scaler_type, &request.scaler_type);
        apply(&mut endpoint.scaler_value, &request.scaler_value);
        apply(&mut endpoint.allowed_cuda_versions, &request.allowed_cuda_versions);
        apply(&mut endpoint.flashboot, &request.flashboot);
        endpoint.version = Some(endpoint.version.unwrap_or(0) + 1);

        Ok(endpoint.clone())
}

pub async fn delete_endpoint(client: &MockRunPodClient, id: &str) -> Result<(), RunPodError> {
        client.enter("delete_endpoint")?;

        if !client.endpoints.lock().unwrap().contains_key(id) {
            return Err(RunPodError::Api { status: 404, body: format!("endpoint {} not found", id) });
        }
        if client.begin_delete(id) {
            client.endpoints.lock().unwrap().remove(id);
        }
        Ok(())
}

pub async fn list_endpoints(client: &MockRunPodClient) -> Result<Vec<Endpoint>, RunPodError> {
        client.enter("list_endpoints")?;

        let mut endpoints: Vec<Endpoint> = client.endpoints.lock().unwrap().values().cloned().collect();
        endpoints.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(endpoints)
}
