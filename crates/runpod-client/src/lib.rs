//! RunPod REST API Client
//!
//! A Rust client library for the RunPod REST API. Provides type-safe models
//! and methods for pods, serverless endpoints, network volumes and templates.
//!
//! # Example
//!
//! ```no_run
//! use runpod_client::{Field, PodCreateRequest, RunPodClient, DEFAULT_BASE_URL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RunPodClient::new(
//!     DEFAULT_BASE_URL.to_string(),
//!     "your-api-key".to_string(),
//! )?;
//!
//! // Only set attributes are transmitted; RunPod defaults the rest.
//! let request = PodCreateRequest {
//!     image_name: Field::Value("runpod/pytorch:latest".to_string()),
//!     gpu_count: Field::Value(1),
//!     ..Default::default()
//! };
//! let pod = client.create_pod(&request).await?;
//!
//! let refreshed = client.get_pod(&pod.id).await?;
//! # let _ = refreshed;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Tri-state payloads**: unset attributes never reach the wire
//! - **Pods**: create, read, full and in-place update, stop/start, delete, list
//! - **Serverless endpoints and network volumes**: create, read, update, delete, list
//! - **Templates**: list
//! - **test-util**: an in-memory `MockRunPodClient`

pub mod client;
pub mod common;
pub mod error;
pub mod models;
pub mod presence;
#[path = "trait.rs"]
pub mod runpod_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT, RunPodClient};
pub use common::HttpClient;
pub use error::RunPodError;
pub use models::*;
pub use presence::Field;
pub use runpod_trait::RunPodClientTrait;
#[cfg(feature = "test-util")]
pub use mock::MockRunPodClient;
