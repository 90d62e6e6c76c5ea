//! Template listing
//!
//! Templates are read-only here: there is no lifecycle to reconcile.

use super::{Reconciler, remote_fault};
use crate::error::{FaultContext, Operation, ReconcileError, ResourceKind};
use crate::inventory::TemplateSummary;
use tracing::debug;

impl Reconciler {
    /// Every template visible to the account
    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, ReconcileError> {
        let context = FaultContext::new(Operation::List, ResourceKind::Template);

        let templates = self
            .client
            .list_templates()
            .await
            .map_err(|e| remote_fault(&context, e))?;
        debug!("Listed {} templates", templates.len());
        Ok(templates.into_iter().map(TemplateSummary::from).collect())
    }
}
