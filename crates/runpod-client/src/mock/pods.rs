//! Pod operations for MockRunPodClient

use super::{MockRunPodClient, not_found};
use crate::error::RunPodError;
use crate::models::*;
use crate::presence::Field;

pub async fn create_pod(client: &MockRunPodClient, request: &PodCreateRequest) -> Result<Pod, RunPodError> {
        client.enter("create_pod")?;

        let id = client.next_id("pod");
        let compute_type = request.compute_type.clone().into_option()
            .unwrap_or_else(|| defaults::COMPUTE_TYPE.to_string());
        let is_gpu = compute_type == "GPU";

        let pod = Pod {
            id: id.clone(),
            name: Some(request.name.clone().into_option().unwrap_or_else(|| defaults::POD_NAME.to_string())),
            image_name: request.image_name.clone().into_option(),
            compute_type: Some(compute_type),
            cloud_type: Some(request.cloud_type.clone().into_option().unwrap_or_else(|| defaults::CLOUD_TYPE.to_string())),
            gpu_count: is_gpu.then(|| request.gpu_count.clone().into_option().unwrap_or(defaults::GPU_COUNT)),
            vcpu_count: Some(request.vcpu_count.clone().into_option().unwrap_or(defaults::VCPU_COUNT)),
            memory_in_gb: Some(if is_gpu { 31.0 } else { 4.0 }),
            gpu_type_ids: request.gpu_type_ids.clone().into_option(),
            cpu_flavor_ids: request.cpu_flavor_ids.clone().into_option(),
            data_center_ids: request.data_center_ids.clone().into_option(),
            container_disk_in_gb: Some(request.container_disk_in_gb.clone().into_option().unwrap_or(defaults::CONTAINER_DISK_IN_GB)),
            volume_in_gb: Some(request.volume_in_gb.clone().into_option().unwrap_or(defaults::VOLUME_IN_GB)),
            volume_mount_path: Some(request.volume_mount_path.clone().into_option().unwrap_or_else(|| defaults::VOLUME_MOUNT_PATH.to_string())),
            ports: request.ports.clone().into_option(),
            env: request.env.clone().into_option(),
            docker_entrypoint: request.docker_entrypoint.clone().into_option(),
            docker_start_cmd: request.docker_start_cmd.clone().into_option(),
            template_id: request.template_id.clone().into_option(),
            network_volume_id: request.network_volume_id.clone().into_option(),
            interruptible: Some(request.interruptible.clone().into_option().unwrap_or(false)),
            locked: Some(request.locked.clone().into_option().unwrap_or(false)),
            min_vcpu_per_gpu: request.min_vcpu_per_gpu.clone().into_option(),
            min_ram_per_gpu: request.min_ram_per_gpu.clone().into_option(),
            support_public_ip: request.support_public_ip.clone().into_option(),
            global_networking: Some(request.global_networking.clone().into_option().unwrap_or(false)),
            allowed_cuda_versions: request.allowed_cuda_versions.clone().into_option(),
            country_codes: request.country_codes.clone().into_option(),
            container_registry_auth_id: request.container_registry_auth_id.clone().into_option(),
            desired_status: Some("RUNNING".to_string()),
            machine_id: Some(format!("machine-{}", id)),
            cost_per_hr: Some(if is_gpu { 0.44 } else { 0.06 }),
            adjusted_cost_per_hr: Some(if is_gpu { 0.44 } else { 0.06 }),
            last_started_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        client.pods.lock().unwrap().insert(id, pod.clone());
        Ok(pod)
}

pub async fn get_pod(client: &MockRunPodClient, id: &str) -> Result<Pod, RunPodError> {
        client.enter("get_pod")?;

        if client.observe_pending_delete(id) {
            client.pods.lock().unwrap().remove(id);
        }

        client.pods
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            // RunPod does not echo the image on reads
            .map(|pod| Pod { image_name: None, ..pod })
            .ok_or_else(|| not_found("Pod", id))
}

pub async fn update_pod(client: &MockRunPodClient, id: &str, request: &PodUpdateRequest) -> Result<Pod, RunPodError> {
        client.enter("update_pod")?;

        let mut pods = client.pods.lock().unwrap();
        let pod = pods.get_mut(id).ok_or_else(|| not_found("Pod", id))?;

        apply(&mut pod.name, &request.name);
        apply(&mut pod.image_name, &request.image_name);
        apply(&mut pod.container_disk_in_gb, &request.container_disk_in_gb);
        apply(&mut pod.volume_in_gb, &request.volume_in_gb);
        apply(&mut pod.volume_mount_path, &request.volume_mount_path);
        apply(&mut pod.ports, &request.ports);
        apply(&mut pod.env, &request.env);
        apply(&mut pod.docker_entrypoint, &request.docker_entrypoint);
        apply(&mut pod.docker_start_cmd, &request.docker_start_cmd);
        apply(&mut pod.locked, &request.locked);
        apply(&mut pod.global_networking, &request.global_networking);
        apply(&mut pod.container_registry_auth_id, &request.container_registry_auth_id);

        // A full update resets the pod
        pod.desired_status = Some("RUNNING".to_string());
        pod.last_started_at = Some(chrono::Utc::now().to_rfc3339());

        Ok(pod.clone())
}

pub async fn update_pod_in_place(client: &MockRunPodClient, id: &str, request: &PodInPlaceUpdateRequest) -> Result<Pod, RunPodError> {
        client.enter("update_pod_in_place")?;

        let mut pods = client.pods.lock().unwrap();
        let pod = pods.get_mut(id).ok_or_else(|| not_found("Pod", id))?;

        apply(&mut pod.name, &request.name);
        apply(&mut pod.locked, &request.locked);

        Ok(pod.clone())
}

pub async fn delete_pod(client: &MockRunPodClient, id: &str) -> Result<(), RunPodError> {
        client.enter("delete_pod")?;

        if !client.pods.lock().unwrap().contains_key(id) {
            return Err(RunPodError::Api { status: 404, body: format!("pod {} not found", id) });
        }
        if client.begin_delete(id) {
            client.pods.lock().unwrap().remove(id);
        }
        Ok(())
}

pub async fn set_desired_status(client: &MockRunPodClient, operation: &str, id: &str, status: &str) -> Result<(), RunPodError> {
        client.enter(operation)?;

        let mut pods = client.pods.lock().unwrap();
        let pod = pods.get_mut(id).ok_or_else(|| RunPodError::Api {
            status: 404,
            body: format!("pod {} not found", id),
        })?;
        pod.desired_status = Some(status.to_string());
        pod.last_status_change = Some(chrono::Utc::now().to_rfc3339());
        Ok(())
}

pub async fn list_pods(client: &MockRunPodClient) -> Result<Vec<Pod>, RunPodError> {
        client.enter("list_pods")?;

        let mut pods: Vec<Pod> = client.pods.lock().unwrap().values().cloned().collect();
        pods.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pods)
}

/// Overwrite `target` with a declared value; unset leaves it alone.
pub(crate) fn apply<T: Clone>(target: &mut Option<T>, value: &Field<T>) {
    if let Field::Value(v) = value {
        *target = Some(v.clone());
    }
}
