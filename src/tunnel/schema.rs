//! Tunnel agent configuration file.
//!
//! Mirrors the YAML the external tunnel agent reads: a tunnel ID, the path
//! to its credentials file, and ingress rules matched top to bottom.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix of a service that answers with a fixed status instead of
/// forwarding.
pub const HTTP_STATUS_PREFIX: &str = "http_status:";

/// Root of the tunnel agent's config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TunnelConfig {
    /// Tunnel UUID or name.
    pub tunnel: String,

    /// Path to the tunnel's credentials JSON.
    pub credentials_file: PathBuf,

    /// Ingress rules, first match wins.
    #[serde(default)]
    pub ingress: Vec<IngressRule>,
}

impl TunnelConfig {
    /// Build a config routing every hostname to the origin, closed by a
    /// `404` catch-all.
    pub fn for_origin<I>(
        tunnel: impl Into<String>,
        credentials_file: impl Into<PathBuf>,
        hostnames: I,
        origin_url: &str,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut ingress: Vec<IngressRule> = hostnames
            .into_iter()
            .map(|host| IngressRule::route(host, origin_url))
            .collect();
        ingress.push(IngressRule::catch_all(404));

        Self {
            tunnel: tunnel.into(),
            credentials_file: credentials_file.into(),
            ingress,
        }
    }

    /// Parse the YAML form.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Render the YAML form.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// One ingress rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    /// Public hostname; absent on the catch-all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Local service URL or `http_status:<code>`.
    pub service: String,
}

impl IngressRule {
    pub fn route(hostname: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            service: service.into(),
        }
    }

    pub fn catch_all(status: u16) -> Self {
        Self {
            hostname: None,
            service: format!("{}{}", HTTP_STATUS_PREFIX, status),
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.hostname.is_none()
    }

    /// Interpret the service string.
    pub fn target(&self) -> Result<IngressTarget, String> {
        IngressTarget::parse(&self.service)
    }
}

/// Where a matched request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngressTarget {
    /// Forward to a local HTTP(S) service.
    Service(Url),
    /// Answer with a fixed status code.
    Status(u16),
}

impl IngressTarget {
    pub fn parse(service: &str) -> Result<Self, String> {
        if let Some(code) = service.strip_prefix(HTTP_STATUS_PREFIX) {
            let code: u16 = code
                .parse()
                .map_err(|_| format!("{:?} is not a status code", code))?;
            if !(100..=599).contains(&code) {
                return Err(format!("status {} is out of range", code));
            }
            return Ok(IngressTarget::Status(code));
        }

        let url = Url::parse(service).map_err(|e| e.to_string())?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(format!("unsupported scheme {:?}", other)),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err("missing host".to_string());
        }
        Ok(IngressTarget::Service(url))
    }
}

impl fmt::Display for IngressTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngressTarget::Service(url) => write!(f, "{}", url),
            IngressTarget::Status(code) => write!(f, "{}{}", HTTP_STATUS_PREFIX, code),
        }
    }
}
