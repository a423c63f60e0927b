//! Task records as persisted by the scheduler.
//!
//! A `TaskRecord` is the scheduler's durable description of one placed task:
//! its name, the discovery metadata it declared, and the node it was placed
//! on. Reachability lives in status snapshots (`status.rs`), not here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Labels attached to a port declaration.
///
/// Ordered so that repeated resolution passes observe labels in a stable
/// order regardless of how the record was produced.
pub type PortLabels = BTreeMap<String, String>;

/// Visibility of a declared port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortVisibility {
    /// Reachable by the scheduler only; never listed anywhere.
    Private,
    /// Reachable fleet-wide; the only level the endpoint directory lists.
    Fleet,
    /// Exposed outside the fleet through an edge proxy.
    External,
}

impl PortVisibility {
    /// The single visibility level eligible for the endpoint directory.
    pub const DISPLAYED: PortVisibility = PortVisibility::Fleet;
}

impl std::fmt::Display for PortVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PortVisibility::Private => "private",
            PortVisibility::Fleet => "fleet",
            PortVisibility::External => "external",
        };
        write!(f, "{s}")
    }
}

/// One network port a task declares for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDeclaration {
    /// Port number the workload listens on.
    pub number: u16,

    /// Port name; the directory group key when no VIP labels are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Visibility level.
    pub visibility: PortVisibility,

    /// Free-form labels. Keys beginning `VIP_` declare VIP memberships
    /// (see [`crate::vip`]).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: PortLabels,
}

impl PortDeclaration {
    /// The port name, treating an empty string the same as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// How a task asks to be exposed for hostname-based resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySpec {
    /// Alias advertised in auto hostnames; the task name is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Declared ports, in declaration order.
    #[serde(default)]
    pub ports: Vec<PortDeclaration>,
}

/// A task as recorded by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task name, unique within the service.
    pub name: String,

    /// Discovery declaration. Tasks without one are invisible to the
    /// endpoint directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoverySpec>,

    /// Hostname of the node the task was placed on, recorded at placement
    /// time. Used as the address fallback for tasks that never reported an
    /// IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_host: Option<String>,
}

impl TaskRecord {
    /// Name to advertise in auto hostnames: the discovery alias when set
    /// and non-empty, otherwise the task's own name.
    ///
    /// Returns `None` when the task declares no discovery at all.
    pub fn discovery_name(&self) -> Option<&str> {
        self.discovery.as_ref().map(|spec| {
            spec.alias
                .as_deref()
                .filter(|alias| !alias.is_empty())
                .unwrap_or(&self.name)
        })
    }
}
