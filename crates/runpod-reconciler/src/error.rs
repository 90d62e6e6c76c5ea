//! Reconciler error types.
//!
//! Every remote fault is tagged with the operation, resource kind and identity
//! (when known) it occurred under, so callers can log a precise cause without
//! threading that context themselves.

use runpod_client::RunPodError;
use std::fmt;
use thiserror::Error;

/// Lifecycle operation a fault occurred in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create a resource
    Create,
    /// Refresh or import a resource
    Read,
    /// Full update (pods) or the only update (endpoints, volumes)
    Update,
    /// Pod update that does not reset the pod
    UpdateInPlace,
    /// Delete request
    Delete,
    /// Polling after a delete
    AwaitGone,
    /// Pod stop
    Stop,
    /// Pod start
    Start,
    /// Inventory listing
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::UpdateInPlace => "in-place update",
            Operation::Delete => "delete",
            Operation::AwaitGone => "await deletion of",
            Operation::Stop => "stop",
            Operation::Start => "start",
            Operation::List => "list",
        };
        f.write_str(name)
    }
}

/// RunPod resource kinds managed by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// GPU or CPU pod
    Pod,
    /// Serverless endpoint
    Endpoint,
    /// Network volume
    NetworkVolume,
    /// Pod or endpoint template
    Template,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Pod => "pod",
            ResourceKind::Endpoint => "endpoint",
            ResourceKind::NetworkVolume => "network volume",
            ResourceKind::Template => "template",
        };
        f.write_str(name)
    }
}

/// Where a fault happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultContext {
    /// Operation that failed
    pub operation: Operation,
    /// Kind of resource it targeted
    pub resource: ResourceKind,
    /// Identity, when one was known
    pub identity: Option<String>,
}

impl FaultContext {
    /// Context for an operation on a resource that has no identity yet
    pub fn new(operation: Operation, resource: ResourceKind) -> Self {
        Self { operation, resource, identity: None }
    }

    /// Context for an operation on a known identity
    pub fn with_id(operation: Operation, resource: ResourceKind, id: &str) -> Self {
        Self { operation, resource, identity: Some(id.to_string()) }
    }
}

impl fmt::Display for FaultContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identity {
            Some(id) => write!(f, "{} {} {}", self.operation, self.resource, id),
            None => write!(f, "{} {}", self.operation, self.resource),
        }
    }
}

/// Errors surfaced by reconciler operations.
///
/// None of these are retried by the reconciler.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Network or connection-level failure
    #[error("{context}: transport failure: {source}")]
    TransportFailure {
        /// Where it happened
        context: FaultContext,
        /// Underlying client error
        #[source]
        source: RunPodError,
    },

    /// RunPod answered with an error status
    #[error("{context}: rejected with status {status}: {body}")]
    RemoteRejected {
        /// Where it happened
        context: FaultContext,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("{context}: could not decode response: {message}")]
    DecodeFailed {
        /// Where it happened
        context: FaultContext,
        /// What did not match
        message: String,
    },

    /// The identity does not exist remotely; local state should be discarded
    #[error("{context}: not found")]
    NotFound {
        /// Where it happened
        context: FaultContext,
    },

    /// Caller tried to change an attribute RunPod fixes at creation
    #[error("{context}: {field} cannot change after creation ({current} -> {requested})")]
    ImmutableFieldChanged {
        /// Where it happened
        context: FaultContext,
        /// Attribute name
        field: &'static str,
        /// Value in the prior snapshot, or `unset`
        current: String,
        /// Value the caller declared
        requested: String,
    },

    /// A create-time required attribute was left unset
    #[error("{context}: {field} is required")]
    MissingRequiredField {
        /// Where it happened
        context: FaultContext,
        /// Attribute name
        field: &'static str,
    },

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReconcileError {
    /// Map a client error into the reconciler taxonomy under `context`.
    pub fn from_client(context: FaultContext, err: RunPodError) -> Self {
        match err {
            RunPodError::Http(_) => ReconcileError::TransportFailure { context, source: err },
            RunPodError::Api { status, body } => ReconcileError::RemoteRejected { context, status, body },
            RunPodError::NotFound(_) => ReconcileError::NotFound { context },
            RunPodError::Decode(message) => ReconcileError::DecodeFailed { context, message },
            RunPodError::Serialization(e) => ReconcileError::DecodeFailed {
                context,
                message: format!("request encoding failed: {}", e),
            },
            RunPodError::Configuration(message) => ReconcileError::InvalidConfig(message),
        }
    }

    /// True when the remote service reported that the identity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReconcileError::NotFound { .. })
    }

    /// Context of the fault, when it has one.
    pub fn context(&self) -> Option<&FaultContext> {
        match self {
            ReconcileError::TransportFailure { context, .. }
            | ReconcileError::RemoteRejected { context, .. }
            | ReconcileError::DecodeFailed { context, .. }
            | ReconcileError::NotFound { context }
            | ReconcileError::ImmutableFieldChanged { context, .. }
            | ReconcileError::MissingRequiredField { context, .. } => Some(context),
            ReconcileError::InvalidConfig(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_status_and_body() {
        let context = FaultContext::with_id(Operation::Update, ResourceKind::NetworkVolume, "v1");
        let err = ReconcileError::from_client(
            context,
            RunPodError::Api { status: 400, body: "size can only increase".to_string() },
        );

        assert_eq!(
            err.to_string(),
            "update network volume v1: rejected with status 400: size can only increase"
        );
        assert!(matches!(err, ReconcileError::RemoteRejected { status: 400, .. }));
    }

    #[test]
    fn test_not_found_is_detected() {
        let context = FaultContext::with_id(Operation::Read, ResourceKind::Pod, "p1");
        let err = ReconcileError::from_client(context, RunPodError::NotFound("/pods/p1".to_string()));

        assert!(err.is_not_found());
        assert_eq!(err.context().and_then(|c| c.identity.as_deref()), Some("p1"));
    }

    #[test]
    fn test_context_without_identity() {
        let context = FaultContext::new(Operation::Create, ResourceKind::Endpoint);
        assert_eq!(context.to_string(), "create endpoint");
    }
}
