//! Task facts extraction.
//!
//! Normalizes one task record plus its reconciled addresses into per-port
//! endpoint facts ready for grouping. Tasks without a discovery declaration
//! and ports that are not fleet-visible are skipped with a log line, never
//! an error; a task that needs the placement-host fallback but has none is
//! a per-task failure that the caller contains.

use std::net::IpAddr;

use flotilla_model::{naming, PortDeclaration, PortVisibility, TaskRecord};
use thiserror::Error;
use tracing::info;

/// A required fact could not be derived; aborts this task's contribution.
#[derive(Debug, Error)]
pub enum FactsError {
    #[error("task reported no addresses and has no placement host recorded")]
    MissingPlacementHost,
}

/// Endpoint facts for one fleet-visible port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortFacts {
    /// The declaration as the task recorded it; group keys come from its
    /// labels and name.
    pub declaration: PortDeclaration,

    /// Auto hostname entry (`{name}.{service}.tasks.flotilla:{port}`).
    pub dns_entry: String,

    /// One `host:port` entry per reconciled address, or a single entry on
    /// the placement host when no address was ever reported.
    pub address_entries: Vec<String>,
}

/// Endpoint facts for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFacts {
    pub task_name: String,
    pub ports: Vec<PortFacts>,
}

/// Extract endpoint facts from one task record.
///
/// Returns `Ok(None)` for tasks without a discovery declaration.
pub fn extract_task_facts(
    service: &str,
    task: &TaskRecord,
    addresses: &[IpAddr],
) -> Result<Option<TaskFacts>, FactsError> {
    let Some(discovery) = &task.discovery else {
        info!(task = %task.name, "Task has no discovery declaration; not listed");
        return Ok(None);
    };
    let discovery_name = task.discovery_name().unwrap_or(&task.name);

    let mut ports = Vec::with_capacity(discovery.ports.len());
    for declaration in &discovery.ports {
        if declaration.visibility != PortVisibility::DISPLAYED {
            info!(
                task = %task.name,
                port = declaration.number,
                visibility = %declaration.visibility,
                required = %PortVisibility::DISPLAYED,
                "Port visibility is not eligible for the directory; skipping port"
            );
            continue;
        }

        let address_entries = if addresses.is_empty() {
            let host = task
                .placement_host
                .as_deref()
                .filter(|h| !h.is_empty())
                .ok_or(FactsError::MissingPlacementHost)?;
            vec![naming::to_endpoint(host, declaration.number)]
        } else {
            addresses
                .iter()
                .map(|ip| naming::to_endpoint(&ip.to_string(), declaration.number))
                .collect()
        };

        ports.push(PortFacts {
            declaration: declaration.clone(),
            dns_entry: naming::task_endpoint(service, discovery_name, declaration.number),
            address_entries,
        });
    }

    Ok(Some(TaskFacts {
        task_name: task.name.clone(),
        ports,
    }))
}
