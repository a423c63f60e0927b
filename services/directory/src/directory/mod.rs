//! The endpoint directory resolution engine.
//!
//! Resolution is one pass over the state store, recomputed on every query:
//!
//! 1. `facts`: normalize each task record into per-port endpoint facts
//! 2. `reconcile`: pick the best-available address list per task
//! 3. `classify`: decide the group keys a port belongs to
//! 4. `aggregate`: fold everything into the final `name -> group` mapping
//!
//! Per-task failures are contained here: a task that cannot contribute is
//! logged and skipped, and the rest of the directory is still served. Only
//! state-store failures abort the whole pass.

mod aggregate;
mod classify;
mod facts;
mod reconcile;

pub use aggregate::{aggregate, EndpointGroup};
pub use classify::classify;
pub use facts::{extract_task_facts, FactsError, PortFacts, TaskFacts};
pub use reconcile::reconcile_addresses;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

use crate::store::{StateStore, StoreError};

/// Errors that abort a whole resolution pass.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The resolution engine for one service's endpoint directory.
///
/// Holds no state beyond the service name; every [`resolve`](Self::resolve)
/// call recomputes the directory from the store.
#[derive(Debug, Clone)]
pub struct EndpointDirectory {
    service: String,
}

impl EndpointDirectory {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Resolve the full directory from the store's current records.
    ///
    /// Group keys are unique and sorted; within a group, entries follow the
    /// store's task return order.
    pub async fn resolve(
        &self,
        store: &dyn StateStore,
    ) -> Result<BTreeMap<String, EndpointGroup>, DirectoryError> {
        let tasks = store.fetch_tasks().await?;

        let mut task_facts = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let addresses = reconcile_addresses(store, &task.name).await?;
            match extract_task_facts(&self.service, task, &addresses) {
                Ok(Some(facts)) => task_facts.push(facts),
                // No discovery declaration; already logged by the extractor.
                Ok(None) => {}
                Err(e) => {
                    warn!(task = %task.name, error = %e, "Dropping task contribution from the directory");
                }
            }
        }

        Ok(aggregate(&self.service, &task_facts))
    }
}
