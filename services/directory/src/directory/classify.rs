//! Port classification.

use flotilla_model::{vip, PortDeclaration, VipMembership};

/// All VIP memberships a port declares through its labels.
///
/// Labels outside the VIP convention are ignored; a port with an empty
/// result falls back to grouping under its own port name.
pub fn classify(task_name: &str, port: &PortDeclaration) -> Vec<VipMembership> {
    port.labels
        .iter()
        .filter_map(|(key, value)| vip::parse_vip_label(task_name, key, value))
        .collect()
}
