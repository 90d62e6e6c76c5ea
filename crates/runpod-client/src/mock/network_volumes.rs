//! Network volume operations for MockRunPodClient

use super::pods::apply;
use super::{MockRunPodClient, not_found};
use crate::error::RunPodError;
use crate::models::*;

pub async fn create_network_volume(client: &MockRunPodClient, request: &NetworkVolumeCreateRequest) -> Result<NetworkVolume, RunPodError> {
        client.enter("create_network_volume")?;

        if request.name.is_empty() || request.data_center_id.is_empty() || request.size <= 0 {
            return Err(RunPodError::Api {
                status: 400,
                body: "name, size and dataCenterId are required".to_string(),
            });
        }

        let id = client.next_id("vol");
        let volume = NetworkVolume {
            id: id.clone(),
            name: Some(request.name.clone()),
            size: Some(request.size),
            data_center_id: Some(request.data_center_id.clone()),
        };

        client.network_volumes.lock().unwrap().insert(id, volume.clone());
        Ok(volume)
}

pub async fn get_network_volume(client: &MockRunPodClient, id: &str) -> Result<NetworkVolume, RunPodError> {
        client.enter("get_network_volume")?;

        if client.observe_pending_delete(id) {
            client.network_volumes.lock().unwrap().remove(id);
        }

        client.network_volumes
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found("Network volume", id))
}

pub async fn update_network_volume(client: &MockRunPodClient, id: &str, request: &NetworkVolumeUpdateRequest) -> Result<NetworkVolume, RunPodError> {
        client.enter("update_network_volume")?;

        let mut volumes = client.network_volumes.lock().unwrap();
        let volume = volumes.get_mut(id).ok_or_else(|| not_found("Network volume", id))?;

        if let (Some(&requested), Some(current)) = (request.size.as_ref(), volume.size) {
            if requested < current {
                return Err(RunPodError::Api {
                    status: 400,
                    body: "network volumes can only grow".to_string(),
                });
            }
        }
        apply(&mut volume.name, &request.name);
        apply(&mut volume.size, &request.size);

        Ok(volume.clone())
}

pub async fn delete_network_volume(client: &MockRunPodClient, id: &str) -> Result<(), RunPodError> {
        client.enter("delete_network_volume")?;

        if !client.network_volumes.lock().unwrap().contains_key(id) {
            return Err(RunPodError::Api { status: 404, body: format!("network volume {} not found", id) });
        }
        if client.begin_delete(id) {
            client.network_volumes.lock().unwrap().remove(id);
        }
        Ok(())
}

pub async fn list_network_volumes(client: &MockRunPodClient) -> Result<Vec<NetworkVolume>, RunPodError> {
        client.enter("list_network_volumes")?;

        let mut volumes: Vec<NetworkVolume> = client.network_volumes.lock().unwrap().values().cloned().collect();
        volumes.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(volumes)
}
