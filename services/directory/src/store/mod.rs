//! State store interface.
//!
//! The state store is the scheduler's persisted record of tasks and their
//! status snapshots. The directory only reads it; two implementations are
//! provided:
//! - [`MemoryStateStore`]: in-process, read-write, for tests and embedders
//! - [`SnapshotStateStore`]: read-only view over the scheduler's snapshot file

mod memory;
mod snapshot;

pub use memory::MemoryStateStore;
pub use snapshot::{SnapshotFile, SnapshotStateStore, SNAPSHOT_VERSION};

use async_trait::async_trait;
use flotilla_model::{TaskRecord, TaskStatusRecord};
use thiserror::Error;

/// Errors surfaced by state store reads.
///
/// Store failures are not retried by the directory; they surface to the
/// caller as a server error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the scheduler's task and status records.
///
/// Implementations must tolerate concurrent reads; the directory performs
/// no locking of its own and may resolve several queries at once.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// All task records, in the store's return order. The directory
    /// preserves this order within endpoint groups.
    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, StoreError>;

    /// The current status snapshot for a task, if one was ever reported.
    async fn fetch_status(&self, task_name: &str) -> Result<Option<TaskStatusRecord>, StoreError>;

    /// The persisted last-known-good snapshot: the most recent status that
    /// carried at least one address.
    async fn fetch_persisted_status(
        &self,
        task_name: &str,
    ) -> Result<Option<TaskStatusRecord>, StoreError>;

    /// Whether the store can currently serve reads.
    async fn health_check(&self) -> Result<(), StoreError>;
}
