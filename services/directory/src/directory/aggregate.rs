//! Directory aggregation.
//!
//! A pure fold of per-task endpoint facts into the final mapping of group
//! name to endpoint group. Group names are unique and sorted (`BTreeMap`);
//! within a group, entries keep the task iteration order. Only the VIP
//! endpoint list is deduplicated; `dns` and `address` carry one entry per
//! contributing task on purpose.

use std::collections::BTreeMap;

use flotilla_model::naming;
use serde::Serialize;

use super::classify::classify;
use super::facts::TaskFacts;

/// One directory entry, keyed by a VIP name or a bare port name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointGroup {
    /// Auto hostname entries, one per contributing task port.
    pub dns: Vec<String>,

    /// Address entries, one per reconciled address of each contributing
    /// task port.
    pub address: Vec<String>,

    /// The most recently appended VIP endpoint; kept for older clients,
    /// `vips` is the authoritative list. Absent for port-name groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip: Option<String>,

    /// Deduplicated canonical VIP endpoints. Absent for port-name groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vips: Vec<String>,
}

/// Fold task facts into the directory mapping.
///
/// A port with VIP memberships is listed under every named VIP group and
/// never under its bare port name; a port without memberships is listed
/// under its port name, or nowhere when it has none.
pub fn aggregate(service: &str, facts: &[TaskFacts]) -> BTreeMap<String, EndpointGroup> {
    let mut groups: BTreeMap<String, EndpointGroup> = BTreeMap::new();

    for task in facts {
        for port in &task.ports {
            let memberships = classify(&task.task_name, &port.declaration);

            if memberships.is_empty() {
                let Some(group_name) = port.declaration.name() else {
                    continue;
                };
                let group = groups.entry(group_name.to_string()).or_default();
                group.dns.push(port.dns_entry.clone());
                group.address.extend(port.address_entries.iter().cloned());
                continue;
            }

            for membership in &memberships {
                let group = groups.entry(membership.name.clone()).or_default();
                group.dns.push(port.dns_entry.clone());
                group.address.extend(port.address_entries.iter().cloned());

                let endpoint = naming::vip_endpoint(service, membership);
                // Groups are small; a linear scan is enough.
                if !group.vips.contains(&endpoint) {
                    group.vips.push(endpoint.clone());
                }
                group.vip = Some(endpoint);
            }
        }
    }

    groups
}
