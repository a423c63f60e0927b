//! Snapshot-file state store.
//!
//! The scheduler publishes its task and status records as a versioned JSON
//! snapshot, written atomically (write to temp, rename). The directory
//! reloads the file when its size or mtime changes, checked once at the
//! start of a query (`fetch_tasks`) so a single query observes one snapshot
//! generation. During scheduler outages the last loaded view keeps serving;
//! load failures surface through `health_check`, not through queries.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use flotilla_model::{TaskRecord, TaskStatusRecord};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{StateStore, StoreError};

/// Snapshot file format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk snapshot format, as the scheduler writes it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Format version.
    pub version: u32,
    /// Service the snapshot belongs to (informational; the directory's
    /// service name comes from its own configuration).
    pub service: String,
    /// Task records, in scheduler order.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    /// Current status snapshots by task name.
    #[serde(default)]
    pub statuses: BTreeMap<String, TaskStatusRecord>,
    /// Last-known-good snapshots by task name.
    #[serde(default)]
    pub persisted_statuses: BTreeMap<String, TaskStatusRecord>,
}

/// Size and mtime of the file at load time; a change triggers a reload.
type Fingerprint = (u64, SystemTime);

#[derive(Default)]
struct View {
    tasks: Vec<TaskRecord>,
    statuses: BTreeMap<String, TaskStatusRecord>,
    persisted_statuses: BTreeMap<String, TaskStatusRecord>,
}

#[derive(Default)]
struct Loaded {
    fingerprint: Option<Fingerprint>,
    view: View,
    last_error: Option<String>,
}

/// Read-only view over the scheduler's snapshot file.
pub struct SnapshotStateStore {
    path: PathBuf,
    loaded: RwLock<Loaded>,
}

impl SnapshotStateStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            loaded: RwLock::new(Loaded::default()),
        }
    }

    /// Reload the snapshot if the file changed since the last load.
    ///
    /// A missing or unreadable file keeps the previous view serving and is
    /// reported through `health_check`.
    async fn reload_if_changed(&self) {
        let fingerprint = match fs::metadata(&self.path).and_then(|m| Ok((m.len(), m.modified()?)))
        {
            Ok(fp) => fp,
            Err(e) => {
                let mut loaded = self.loaded.write().await;
                if loaded.last_error.is_none() {
                    warn!(path = %self.path.display(), error = %e, "Snapshot file unreadable; keeping previous view");
                }
                loaded.last_error = Some(format!(
                    "snapshot file {} unreadable: {e}",
                    self.path.display()
                ));
                return;
            }
        };

        {
            let loaded = self.loaded.read().await;
            if loaded.fingerprint == Some(fingerprint) {
                return;
            }
        }

        let mut loaded = self.loaded.write().await;
        // Another query may have reloaded while we waited for the lock.
        if loaded.fingerprint == Some(fingerprint) {
            return;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read snapshot file; keeping previous view");
                loaded.last_error = Some(format!("failed to read snapshot: {e}"));
                return;
            }
        };

        let snapshot: SnapshotFile = match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to parse snapshot file; keeping previous view");
                loaded.last_error = Some(format!("failed to parse snapshot: {e}"));
                return;
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                file_version = snapshot.version,
                current_version = SNAPSHOT_VERSION,
                "Snapshot version mismatch; serving an empty directory"
            );
            loaded.fingerprint = Some(fingerprint);
            loaded.view = View::default();
            loaded.last_error = None;
            return;
        }

        info!(
            path = %self.path.display(),
            service = %snapshot.service,
            task_count = snapshot.tasks.len(),
            "Loaded scheduler snapshot"
        );

        loaded.fingerprint = Some(fingerprint);
        loaded.view = View {
            tasks: snapshot.tasks,
            statuses: snapshot.statuses,
            persisted_statuses: snapshot.persisted_statuses,
        };
        loaded.last_error = None;
    }
}

#[async_trait]
impl StateStore for SnapshotStateStore {
    async fn fetch_tasks(&self) -> Result<Vec<TaskRecord>, StoreError> {
        self.reload_if_changed().await;
        let loaded = self.loaded.read().await;
        debug!(task_count = loaded.view.tasks.len(), "Serving snapshot view");
        Ok(loaded.view.tasks.clone())
    }

    async fn fetch_status(&self, task_name: &str) -> Result<Option<TaskStatusRecord>, StoreError> {
        Ok(self
            .loaded
            .read()
            .await
            .view
            .statuses
            .get(task_name)
            .cloned())
    }

    async fn fetch_persisted_status(
        &self,
        task_name: &str,
    ) -> Result<Option<TaskStatusRecord>, StoreError> {
        Ok(self
            .loaded
            .read()
            .await
            .view
            .persisted_statuses
            .get(task_name)
            .cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.reload_if_changed().await;
        match &self.loaded.read().await.last_error {
            None => Ok(()),
            Some(e) => Err(StoreError::Unavailable(e.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env::temp_dir;

    use flotilla_model::{TaskState, TaskStatusRecord};

    use super::*;

    fn snapshot_json(task_name: &str) -> String {
        let snapshot = SnapshotFile {
            version: SNAPSHOT_VERSION,
            service: "kafka".to_string(),
            tasks: vec![TaskRecord {
                name: task_name.to_string(),
                discovery: None,
                placement_host: None,
            }],
            statuses: BTreeMap::from([(
                task_name.to_string(),
                TaskStatusRecord::new(TaskState::Running, vec!["10.0.0.5".parse().unwrap()]),
            )]),
            persisted_statuses: BTreeMap::new(),
        };
        serde_json::to_string(&snapshot).unwrap()
    }

    fn temp_path(tag: &str) -> PathBuf {
        temp_dir().join(format!("directory-snapshot-{tag}-{}.json", std::process::id()))
    }

    #[tokio::test]
    async fn test_reload_on_file_change() {
        let path = temp_path("reload");
        fs::write(&path, snapshot_json("broker-0")).unwrap();

        let store = SnapshotStateStore::new(path.clone());
        let tasks = store.fetch_tasks().await.unwrap();
        assert_eq!(tasks[0].name, "broker-0");
        assert!(store.health_check().await.is_ok());

        let status = store.fetch_status("broker-0").await.unwrap().unwrap();
        assert_eq!(status.addresses, vec!["10.0.0.5".parse::<std::net::IpAddr>().unwrap()]);

        // Rewrite with different content; the longer name changes the size
        // so the fingerprint check cannot miss it.
        fs::write(&path, snapshot_json("broker-replacement-1")).unwrap();
        let tasks = store.fetch_tasks().await.unwrap();
        assert_eq!(tasks[0].name, "broker-replacement-1");

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_corrupt_rewrite_keeps_previous_view() {
        let path = temp_path("corrupt");
        fs::write(&path, snapshot_json("broker-0")).unwrap();

        let store = SnapshotStateStore::new(path.clone());
        assert_eq!(store.fetch_tasks().await.unwrap().len(), 1);

        fs::write(&path, "{not json").unwrap();
        let tasks = store.fetch_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "broker-0");
        assert!(store.health_check().await.is_err());

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_version_mismatch_serves_empty_view() {
        let path = temp_path("version");
        fs::write(
            &path,
            r#"{"version": 99, "service": "kafka", "tasks": [{"name": "broker-0"}]}"#,
        )
        .unwrap();

        let store = SnapshotStateStore::new(path.clone());
        assert!(store.fetch_tasks().await.unwrap().is_empty());
        // A mismatched version is a loaded (if empty) view, not an outage.
        assert!(store.health_check().await.is_ok());

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_and_degraded() {
        let store = SnapshotStateStore::new(temp_path("missing"));
        assert!(store.fetch_tasks().await.unwrap().is_empty());
        assert!(store.health_check().await.is_err());
    }
}
