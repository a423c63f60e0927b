//! In-process state store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use flotilla_model::{TaskRecord, TaskStatusRecord};
use tokio::sync::RwLock;
use tracing::debug;

use super::{StateStore, StoreError};

#[derive(Default)]
struct Tables {
    /// Tasks in insertion order; names are unique within the service.
    tasks: Vec<TaskRecord>,
    statuses: BTreeMap<String, TaskStatusRecord>,
    persisted_statuses: BTreeMap<String, TaskStatusRecord>,
}

/// Read-write in-process store, used by tests and embedders.
///
/// The writer side applies the scheduler's last-known-good rule: a recorded
/// status that carries at least one address also becomes the persisted
/// fallback for that task.
#[derive(Default)]
pub struct MemoryStateStore {
    tables: RwLock<Tables>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a task record, keyed by task name.
    pub async fn insert_task(&self, task: TaskRecord) {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.tasks.iter_mut().find(|t| t.name == task.name) {
            *existing = task;
        } else {
            tables.tasks.push(task);
        }
    }

    /// Record a current status snapshot for a task.
    ///
    /// A snapshot carrying addresses also overwrites the persisted
    /// last-known-good snapshot; an address-less snapshot leaves the
    /// previous fallback in place.
    pub async fn record_status(&self, task_name: &str, status: TaskStatusRecord) {
        let mut tables = self.tables.write().await;
        if status.has_addresses() {
            tables
                .persisted_statuses
                .insert(task_name.to_string(), status.clone());
        } else {
            debug!(task = %task_name, state = %status.state, "Status without addresses; keeping previous last-known-good");
        }
        tables.statuses.insert(task_name.to_string(), status);
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, StoreError> {
        Ok(self.tables.read().await.tasks.clone())
    }

    async fn fetch_status(&self, task_name: &str) -> Result<Option<TaskStatusRecord>, StoreError> {
        Ok(self.tables.read().await.statuses.get(task_name).cloned())
    }

    async fn fetch_persisted_status(
        &self,
        task_name: &str,
    ) -> Result<Option<TaskStatusRecord>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .persisted_statuses
            .get(task_name)
            .cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
