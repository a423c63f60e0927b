//! Task liveness status snapshots.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse lifecycle state reported for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Staging,
    Running,
    Draining,
    Stopped,
    Failed,
    Lost,
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskState::Staging => "staging",
            TaskState::Running => "running",
            TaskState::Draining => "draining",
            TaskState::Stopped => "stopped",
            TaskState::Failed => "failed",
            TaskState::Lost => "lost",
        };
        write!(f, "{s}")
    }
}

/// One observed liveness snapshot for a task.
///
/// Two instances matter to resolution: the *current* snapshot (latest
/// report, possibly stale or address-less) and the *persisted last-known*
/// snapshot, which the scheduler writes whenever a status carrying at least
/// one address was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusRecord {
    /// Lifecycle state at observation time.
    pub state: TaskState,

    /// IP addresses assigned to the task. Empty unless the task was running
    /// when the snapshot was taken.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<IpAddr>,

    /// When the scheduler observed this snapshot.
    pub recorded_at: DateTime<Utc>,
}

impl TaskStatusRecord {
    /// Create a snapshot observed now.
    pub fn new(state: TaskState, addresses: Vec<IpAddr>) -> Self {
        Self {
            state,
            addresses,
            recorded_at: Utc::now(),
        }
    }

    /// True when the snapshot carries at least one assigned address.
    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization_roundtrip() {
        let status = TaskStatusRecord::new(
            TaskState::Running,
            vec!["10.0.0.5".parse().unwrap(), "fd00::5".parse().unwrap()],
        );

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"state\":\"running\""));
        assert!(json.contains("10.0.0.5"));

        let parsed: TaskStatusRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }

    #[test]
    fn test_addressless_status_omits_addresses() {
        let status = TaskStatusRecord::new(TaskState::Lost, vec![]);
        assert!(!status.has_addresses());

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("addresses"));

        let parsed: TaskStatusRecord = serde_json::from_str(&json).unwrap();
        assert!(parsed.addresses.is_empty());
    }
}
