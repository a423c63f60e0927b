//! Directory service configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory configuration (env-driven).
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to listen on (example: 0.0.0.0:7070).
    pub listen_addr: String,

    /// Service whose tasks this directory resolves. May be folder-qualified
    /// (example: prod/kafka).
    pub service: String,

    /// Scheduler snapshot file to serve from. When unset, the directory
    /// starts on an empty in-memory store (dev/embedding mode).
    pub snapshot_file: Option<PathBuf>,

    /// Fixed-value custom endpoints registered at startup.
    pub custom_endpoints: Vec<(String, String)>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let listen_addr =
            std::env::var("FLOTILLA_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:7070".to_string());

        let service = std::env::var("FLOTILLA_SERVICE")
            .context("Missing service name. Set FLOTILLA_SERVICE to the service to resolve.")?;

        let snapshot_file = std::env::var("FLOTILLA_SNAPSHOT_FILE")
            .ok()
            .map(PathBuf::from);

        let custom_endpoints = std::env::var("FLOTILLA_CUSTOM_ENDPOINTS")
            .ok()
            .map(|v| parse_custom_endpoints(&v))
            .transpose()
            .context("FLOTILLA_CUSTOM_ENDPOINTS must be comma-separated name=value pairs.")?
            .unwrap_or_default();

        let log_level = std::env::var("FLOTILLA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            listen_addr,
            service,
            snapshot_file,
            custom_endpoints,
            log_level,
        })
    }
}

/// Parse `name=value,name=value` custom endpoint bindings.
fn parse_custom_endpoints(raw: &str) -> Result<Vec<(String, String)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("'{pair}' is not a name=value pair"))?;
            anyhow::ensure!(!name.is_empty(), "'{pair}' has an empty endpoint name");
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}
