//! VIP label convention.
//!
//! A task may advertise a port under one or more virtual service identities
//! (VIPs) by attaching labels to the port declaration. The convention:
//!
//! - the label key starts with `VIP_` (`VIP_0`, `VIP_1`, ...)
//! - the label value is `"<vip-name>:<vip-port>"`
//!
//! The vip port is the port clients dial on the VIP, which need not match
//! the task-side port the label is attached to. Labels outside the
//! convention are not VIP declarations and are skipped without comment;
//! a `VIP_` key with a malformed value is logged and skipped.

use tracing::warn;

/// Label key prefix declaring VIP membership.
pub const VIP_LABEL_PREFIX: &str = "VIP_";

/// Membership of one port in a named virtual service identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VipMembership {
    /// VIP name; becomes the directory group key.
    pub name: String,

    /// Port advertised under the VIP.
    pub port: u16,
}

/// Parse a single port label as a VIP declaration.
///
/// `task_name` is only used for diagnostics on malformed values.
pub fn parse_vip_label(task_name: &str, key: &str, value: &str) -> Option<VipMembership> {
    if !key.starts_with(VIP_LABEL_PREFIX) {
        return None;
    }

    let Some((name, port)) = value.split_once(':') else {
        warn!(
            task = %task_name,
            label = %key,
            value = %value,
            "VIP label value is not of the form name:port; skipping"
        );
        return None;
    };

    if name.is_empty() {
        warn!(
            task = %task_name,
            label = %key,
            value = %value,
            "VIP label has an empty vip name; skipping"
        );
        return None;
    }

    let port = match port.parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!(
                task = %task_name,
                label = %key,
                port = %port,
                "VIP label port is not a valid port number; skipping"
            );
            return None;
        }
    };

    Some(VipMembership {
        name: name.to_string(),
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_vip_label() {
        let vip = parse_vip_label("web-0", "VIP_0", "vip-web:80").unwrap();
        assert_eq!(vip.name, "vip-web");
        assert_eq!(vip.port, 80);
    }

    #[test]
    fn test_indexed_keys_all_match_prefix() {
        assert!(parse_vip_label("web-0", "VIP_0", "a:1").is_some());
        assert!(parse_vip_label("web-0", "VIP_17", "a:1").is_some());
    }

    #[test]
    fn test_non_vip_labels_are_skipped() {
        assert!(parse_vip_label("web-0", "region", "eu-west").is_none());
        assert!(parse_vip_label("web-0", "vip_0", "vip-web:80").is_none());
    }

    #[test]
    fn test_malformed_values_are_skipped() {
        // No separator.
        assert!(parse_vip_label("web-0", "VIP_0", "vip-web").is_none());
        // Non-numeric port.
        assert!(parse_vip_label("web-0", "VIP_0", "vip-web:http").is_none());
        // Out of range.
        assert!(parse_vip_label("web-0", "VIP_0", "vip-web:70000").is_none());
        // Empty name.
        assert!(parse_vip_label("web-0", "VIP_0", ":80").is_none());
    }
}
