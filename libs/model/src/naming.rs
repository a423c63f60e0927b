//! Endpoint naming conventions for the flotilla internal resolver.
//!
//! Two DNS zones are served by the resolver:
//!
//! - `tasks.flotilla` — auto hostnames for individual tasks:
//!   `{name}.{service}.tasks.flotilla`
//! - `vips.flotilla` — virtual service identities:
//!   `{vip}.{service}.vips.flotilla`
//!
//! Service names may be folder-qualified (`"prod/kafka"`); hostnames use the
//! reversed path segments joined with dots (`"kafka.prod"`) so that the most
//! specific label comes first, DNS-style.

use crate::vip::VipMembership;

/// DNS zone for per-task auto hostnames.
pub const TASK_DNS_ZONE: &str = "tasks.flotilla";

/// DNS zone for VIP hostnames.
pub const VIP_DNS_ZONE: &str = "vips.flotilla";

/// Format a `host:port` endpoint value.
///
/// IPv6 literals are bracketed so the value stays splittable on the last
/// colon (`"[fd00::5]:8080"`).
pub fn to_endpoint(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Auto hostname endpoint for one task port.
pub fn task_endpoint(service: &str, discovery_name: &str, port: u16) -> String {
    let host = format!(
        "{discovery_name}.{}.{TASK_DNS_ZONE}",
        canonical_service_name(service)
    );
    to_endpoint(&host, port)
}

/// Canonical endpoint for a VIP membership.
pub fn vip_endpoint(service: &str, vip: &VipMembership) -> String {
    let host = format!(
        "{}.{}.{VIP_DNS_ZONE}",
        vip.name,
        canonical_service_name(service)
    );
    to_endpoint(&host, vip.port)
}

/// Hostname form of a possibly folder-qualified service name.
///
/// Leading and repeated slashes are tolerated; segments are reversed and
/// dot-joined. A name without slashes passes through unchanged.
pub fn canonical_service_name(service: &str) -> String {
    let mut segments: Vec<&str> = service.split('/').filter(|s| !s.is_empty()).collect();
    segments.reverse();
    segments.join(".")
}
