//! Provider configuration
//!
//! Loaded from an optional YAML file. The API key may instead come from the
//! `RUNPOD_API_KEY` environment variable; an explicit `api_key` in the file
//! wins over the environment.

use crate::error::ReconcileError;
use runpod_client::{DEFAULT_BASE_URL, RunPodClient};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted when no `api_key` is configured
pub const API_KEY_ENV: &str = "RUNPOD_API_KEY";

/// Upper bound for any configured timeout (one day)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_deletion_timeout_secs() -> u64 {
    300
}

fn default_poll_interval_secs() -> u64 {
    5
}

/// Deletion confirmation bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionSettings {
    /// Total time to wait for a deleted resource to disappear
    #[serde(default = "default_deletion_timeout_secs")]
    pub timeout_secs: u64,
    /// Delay between existence checks
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for DeletionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_deletion_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl DeletionSettings {
    /// Total wait as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Provider configuration as written by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// RunPod API key; falls back to `RUNPOD_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// REST base URL; defaults to the public v1 API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Overall timeout of a single remote call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Deletion confirmation bounds
    #[serde(default)]
    pub deletion: DeletionSettings,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            deletion: DeletionSettings::default(),
        }
    }
}

impl ProviderConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ReconcileError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| ReconcileError::InvalidConfig(format!("invalid provider config: {}", e)))
    }

    /// Read and parse a YAML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReconcileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReconcileError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> Result<ResolvedConfig, ReconcileError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve against an arbitrary environment lookup
    pub fn resolve_with<F>(&self, env: F) -> Result<ResolvedConfig, ReconcileError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env(API_KEY_ENV))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ReconcileError::InvalidConfig(format!(
                    "api_key must be configured or {} must be set",
                    API_KEY_ENV
                ))
            })?;

        if self.request_timeout_secs == 0 {
            return Err(ReconcileError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ReconcileError::InvalidConfig(format!(
                "request_timeout_secs must be at most {}",
                MAX_TIMEOUT_SECS
            )));
        }
        if self.deletion.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ReconcileError::InvalidConfig(format!(
                "deletion.timeout_secs must be at most {}",
                MAX_TIMEOUT_SECS
            )));
        }
        if self.deletion.poll_interval_secs == 0 {
            return Err(ReconcileError::InvalidConfig(
                "deletion.poll_interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(ResolvedConfig {
            api_key,
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            deletion: self.deletion.clone(),
        })
    }
}

/// Configuration with defaults and environment applied
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Non-empty API key
    pub api_key: String,
    /// REST base URL
    pub base_url: String,
    /// Overall timeout of a single remote call
    pub request_timeout: Duration,
    /// Deletion confirmation bounds
    pub deletion: DeletionSettings,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("deletion", &self.deletion)
            .finish()
    }
}

impl ResolvedConfig {
    /// Build the RunPod client this configuration describes
    pub fn client(&self) -> Result<RunPodClient, ReconcileError> {
        RunPodClient::with_timeout(self.base_url.clone(), self.api_key.clone(), self.request_timeout)
            .map_err(|e| ReconcileError::InvalidConfig(e.to_string()))
    }
}
