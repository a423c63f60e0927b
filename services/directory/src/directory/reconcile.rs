//! Reachability reconciliation.
//!
//! Picks the best-available address list for a task: the current status
//! snapshot when it carries addresses, else the persisted last-known-good
//! snapshot, else nothing. A task that is temporarily unreachable keeps
//! resolving to its last known location; one that never reported an address
//! is left to the placement-host fallback in facts extraction.

use std::net::IpAddr;

use crate::store::{StateStore, StoreError};

/// Resolve the best-available ordered address list for one task.
pub async fn reconcile_addresses(
    store: &dyn StateStore,
    task_name: &str,
) -> Result<Vec<IpAddr>, StoreError> {
    if let Some(status) = store.fetch_status(task_name).await? {
        if status.has_addresses() {
            return Ok(status.addresses);
        }
    }

    if let Some(persisted) = store.fetch_persisted_status(task_name).await? {
        if persisted.has_addresses() {
            return Ok(persisted.addresses);
        }
    }

    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use flotilla_model::{TaskState, TaskStatusRecord};

    use super::*;
    use crate::store::MemoryStateStore;

    #[tokio::test]
    async fn test_current_status_wins() {
        let store = MemoryStateStore::new();
        store
            .record_status(
                "web-0",
                TaskStatusRecord::new(TaskState::Running, vec!["10.0.0.2".parse().unwrap()]),
            )
            .await;
        store
            .record_status(
                "web-0",
                TaskStatusRecord::new(TaskState::Running, vec!["10.0.0.1".parse().unwrap()]),
            )
            .await;

        let addresses = reconcile_addresses(&store, "web-0").await.unwrap();
        assert_eq!(addresses, vec!["10.0.0.1".parse::<IpAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn test_persisted_fallback_when_current_is_addressless() {
        let store = MemoryStateStore::new();
        store
            .record_status(
                "web-0",
                TaskStatusRecord::new(TaskState::Running, vec!["10.0.0.9".parse().unwrap()]),
            )
            .await;
        store
            .record_status("web-0", TaskStatusRecord::new(TaskState::Lost, vec![]))
            .await;

        let addresses = reconcile_addresses(&store, "web-0").await.unwrap();
        assert_eq!(addresses, vec!["10.0.0.9".parse::<IpAddr>().unwrap()]);
    }

    #[tokio::test]
    async fn test_no_status_at_all_is_empty() {
        let store = MemoryStateStore::new();
        assert!(reconcile_addresses(&store, "web-0").await.unwrap().is_empty());
    }
}
