//! Ingress rule validation.
//!
//! The tunnel agent rejects a config whose last rule is not a catch-all,
//! and a catch-all anywhere else shadows every rule after it. Both are
//! checked here, together with the service targets, before the file is
//! handed over.

use std::collections::HashSet;

use thiserror::Error;

use crate::tunnel::schema::TunnelConfig;

/// A single problem with a tunnel config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngressError {
    #[error("tunnel id must not be empty")]
    MissingTunnelId,

    #[error("credentials-file must not be empty")]
    MissingCredentials,

    #[error("at least one ingress rule is required")]
    NoRules,

    #[error("rule {index}: catch-all rule must be last")]
    CatchAllNotLast { index: usize },

    #[error("last ingress rule must be a catch-all without a hostname")]
    LastRuleNotCatchAll,

    #[error("rule {index}: hostname must not be empty")]
    EmptyHostname { index: usize },

    #[error("rule {index}: hostname {hostname:?} already routed")]
    DuplicateHostname { index: usize, hostname: String },

    #[error("rule {index}: invalid service {service:?}: {reason}")]
    InvalidService {
        index: usize,
        service: String,
        reason: String,
    },
}

/// Check every rule, returning all problems found.
pub fn validate_ingress(config: &TunnelConfig) -> Result<(), Vec<IngressError>> {
    let mut errors = Vec::new();

    if config.tunnel.trim().is_empty() {
        errors.push(IngressError::MissingTunnelId);
    }
    if config.credentials_file.as_os_str().is_empty() {
        errors.push(IngressError::MissingCredentials);
    }

    match config.ingress.last() {
        None => errors.push(IngressError::NoRules),
        Some(last) if !last.is_catch_all() => errors.push(IngressError::LastRuleNotCatchAll),
        Some(_) => {}
    }

    let last_index = config.ingress.len().saturating_sub(1);
    let mut seen = HashSet::new();

    for (index, rule) in config.ingress.iter().enumerate() {
        match &rule.hostname {
            None if index != last_index => {
                errors.push(IngressError::CatchAllNotLast { index });
            }
            None => {}
            Some(hostname) if hostname.trim().is_empty() => {
                errors.push(IngressError::EmptyHostname { index });
            }
            Some(hostname) => {
                if !seen.insert(hostname.to_ascii_lowercase()) {
                    errors.push(IngressError::DuplicateHostname {
                        index,
                        hostname: hostname.clone(),
                    });
                }
            }
        }

        if let Err(reason) = rule.target() {
            errors.push(IngressError::InvalidService {
                index,
                service: rule.service.clone(),
                reason,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tunnel::schema::IngressRule;

    fn config(ingress: Vec<IngressRule>) -> TunnelConfig {
        TunnelConfig {
            tunnel: "lab".into(),
            credentials_file: "/tmp/lab.json".into(),
            ingress,
        }
    }

    #[test]
    fn test_generated_config_is_valid() {
        let config = TunnelConfig::for_origin(
            "lab",
            "/tmp/lab.json",
            ["origin.example.com"],
            "http://localhost:8000",
        );
        assert_eq!(validate_ingress(&config), Ok(()));
    }

    #[test]
    fn test_no_rules() {
        assert_eq!(
            validate_ingress(&config(vec![])),
            Err(vec![IngressError::NoRules])
        );
    }

    #[test]
    fn test_catch_all_placement() {
        let errors = validate_ingress(&config(vec![
            IngressRule::catch_all(404),
            IngressRule::route("origin.example.com", "http://localhost:8000"),
        ]))
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                IngressError::LastRuleNotCatchAll,
                IngressError::CatchAllNotLast { index: 0 },
            ]
        );
    }

    #[test]
    fn test_duplicate_hostnames_case_insensitive() {
        let errors = validate_ingress(&config(vec![
            IngressRule::route("Origin.example.com", "http://localhost:8000"),
            IngressRule::route("origin.example.com", "http://localhost:8001"),
            IngressRule::catch_all(404),
        ]))
        .unwrap_err();

        assert_eq!(
            errors,
            vec![IngressError::DuplicateHostname {
                index: 1,
                hostname: "origin.example.com".into(),
            }]
        );
    }

    #[test]
    fn test_bad_service_and_identity() {
        let mut bad = config(vec![
            IngressRule::route("", "tcp://localhost:22"),
            IngressRule::catch_all(700),
        ]);
        bad.tunnel = " ".into();

        let errors = validate_ingress(&bad).unwrap_err();
        assert!(errors.contains(&IngressError::MissingTunnelId));
        assert!(errors.contains(&IngressError::EmptyHostname { index: 0 }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, IngressError::InvalidService { index: 0, .. })));
        assert!(errors
            .iter()
            .any(|e| matches!(e, IngressError::InvalidService { index: 1, .. })));
    }
}
