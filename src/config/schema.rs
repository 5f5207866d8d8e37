//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the origin.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Interface the origin listens on when nothing else is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port the origin listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8000;

/// Root configuration for the origin server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OriginConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Behaviour of the fixed routes.
    pub origin: OriginSettings,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl OriginConfig {
    /// Replace the host and/or port of the bind address.
    ///
    /// Whatever part is not given is kept from the current bind address,
    /// falling back to the defaults when that address cannot be split.
    pub fn override_bind(&mut self, host: Option<&str>, port: Option<u16>) {
        if host.is_none() && port.is_none() {
            return;
        }

        let current = split_host_port(&self.listener.bind_address);
        let host = host
            .or(current.map(|(h, _)| h))
            .unwrap_or(DEFAULT_HOST)
            .to_string();
        let port = port.or(current.map(|(_, p)| p)).unwrap_or(DEFAULT_PORT);

        self.listener.bind_address = join_host_port(&host, port);
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000" or "localhost:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: join_host_port(DEFAULT_HOST, DEFAULT_PORT),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Settings for the fixed origin routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OriginSettings {
    /// Identifier reported by `GET /`.
    pub name: String,

    /// Delay applied by `GET /slow`, in seconds.
    pub slow_delay_secs: u64,
}

impl Default for OriginSettings {
    fn default() -> Self {
        Self {
            name: "local-origin".to_string(),
            slow_delay_secs: 5,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Address of the scrape endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "origin_server=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9000".to_string(),
        }
    }
}

/// Split `host:port`, accepting bracketed IPv6 hosts.
pub fn split_host_port(addr: &str) -> Option<(&str, u16)> {
    let (host, port) = addr.rsplit_once(':')?;
    let port = port.parse().ok()?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if host.is_empty() {
        return None;
    }
    Some((host, port))
}

fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
