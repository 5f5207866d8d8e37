//! Tunnel config loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tunnel::schema::TunnelConfig;
use crate::tunnel::validation::{validate_ingress, IngressError};

/// Error type for tunnel config loading.
#[derive(Debug, Error)]
pub enum TunnelConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{} invalid ingress rule(s)", .0.len())]
    Invalid(Vec<IngressError>),
}

/// Load and validate a tunnel agent config file.
pub fn load_tunnel_config(path: &Path) -> Result<TunnelConfig, TunnelConfigError> {
    let content = fs::read_to_string(path)?;
    let config = TunnelConfig::from_yaml(&content)?;
    validate_ingress(&config).map_err(TunnelConfigError::Invalid)?;

    tracing::debug!(
        path = %path.display(),
        rules = config.ingress.len(),
        "Tunnel config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_tunnel_config(Path::new("/definitely/not/config.yml")).unwrap_err();
        assert!(matches!(err, TunnelConfigError::Io(_)));
    }

    #[test]
    fn test_load_and_validate() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path();

        let good = dir.join("good.yml");
        fs::write(
            &good,
            "tunnel: lab\ncredentials-file: /tmp/lab.json\ningress:\n  - hostname: a.example.com\n    service: http://localhost:8000\n  - service: http_status:404\n",
        )
        .unwrap();
        assert_eq!(load_tunnel_config(&good).unwrap().ingress.len(), 2);

        let bad = dir.join("bad.yml");
        fs::write(
            &bad,
            "tunnel: lab\ncredentials-file: /tmp/lab.json\ningress:\n  - hostname: a.example.com\n    service: http://localhost:8000\n",
        )
        .unwrap();
        match load_tunnel_config(&bad).unwrap_err() {
            TunnelConfigError::Invalid(errors) => {
                assert_eq!(errors, vec![IngressError::LastRuleNotCatchAll])
            }
            other => panic!("unexpected error: {other}"),
        }

        let garbled = dir.join("garbled.yml");
        fs::write(&garbled, "tunnel: [unclosed").unwrap();
        assert!(matches!(
            load_tunnel_config(&garbled).unwrap_err(),
            TunnelConfigError::Parse(_)
        ));
    }
}
