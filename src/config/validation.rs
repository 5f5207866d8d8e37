//! Configuration validation.
//!
//! Serde handles the syntax; this checks value ranges and the relations
//! between fields. Every problem is reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{split_host_port, OriginConfig};

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a host:port pair")]
    BindAddress(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("timeouts.request_secs ({request_secs}s) must exceed origin.slow_delay_secs ({slow_delay_secs}s)")]
    SlowRouteExceedsTimeout { request_secs: u64, slow_delay_secs: u64 },

    #[error("origin.name must not be empty")]
    EmptyOriginName,
}

/// Check a configuration before it is handed to the server.
pub fn validate_config(config: &OriginConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if split_host_port(&config.listener.bind_address).is_none() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    } else if config.timeouts.request_secs <= config.origin.slow_delay_secs {
        errors.push(ValidationError::SlowRouteExceedsTimeout {
            request_secs: config.timeouts.request_secs,
            slow_delay_secs: config.origin.slow_delay_secs,
        });
    }

    if config.origin.name.trim().is_empty() {
        errors.push(ValidationError::EmptyOriginName);
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

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&OriginConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = OriginConfig::default();
        config.listener.bind_address = "no-port".to_string();
        config.origin.name = "  ".to_string();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::BindAddress("no-port".into())));
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::EmptyOriginName));
    }

    #[test]
    fn test_slow_delay_must_fit_in_timeout() {
        let mut config = OriginConfig::default();
        config.timeouts.request_secs = 5;
        config.origin.slow_delay_secs = 5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::SlowRouteExceedsTimeout {
                request_secs: 5,
                slow_delay_secs: 5,
            }]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = OriginConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nowhere".into())])
        );
    }
}
