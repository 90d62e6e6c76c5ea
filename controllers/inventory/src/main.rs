//! RunPod Inventory
//!
//! Prints everything the configured account owns as JSON:
//! - pods
//! - serverless endpoints
//! - network volumes
//! - templates
//!
//! Configuration comes from the YAML file named by `RUNPOD_CONFIG` when set,
//! otherwise from defaults plus `RUNPOD_API_KEY`.

use anyhow::{Context, Result};
use runpod_reconciler::{
    DeletionConfirmer, EndpointSummary, NetworkVolumeSummary, PodSummary, ProviderConfig, Reconciler,
    TemplateSummary,
};
use serde::Serialize;
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH_ENV: &str = "RUNPOD_CONFIG";

#[derive(Debug, Serialize)]
struct Inventory {
    pods: Vec<PodSummary>,
    endpoints: Vec<EndpointSummary>,
    network_volumes: Vec<NetworkVolumeSummary>,
    templates: Vec<TemplateSummary>,
}

fn load_config() -> Result<ProviderConfig> {
    match env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            ProviderConfig::from_file(&path).with_context(|| format!("loading {}", path))
        }
        Err(_) => Ok(ProviderConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting RunPod Inventory");

    let config = load_config()?.resolve().context("resolving provider configuration")?;
    info!("Configuration: {:?}", config);

    let client = config.client().context("building RunPod client")?;
    let reconciler = Reconciler::new(Arc::new(client), DeletionConfirmer::from_settings(&config.deletion));

    let inventory = Inventory {
        pods: reconciler.list_pods().await?,
        endpoints: reconciler.list_endpoints().await?,
        network_volumes: reconciler.list_network_volumes().await?,
        templates: reconciler.list_templates().await?,
    };
    info!(
        "Found {} pods, {} endpoints, {} network volumes, {} templates",
        inventory.pods.len(),
        inventory.endpoints.len(),
        inventory.network_volumes.len(),
        inventory.templates.len()
    );

    println!("{}", serde_json::to_string_pretty(&inventory)?);
    Ok(())
}
