//! Tunnel agent configuration tooling.
//!
//! The tunnel agent is an external program; this module only models the
//! file it reads so ingress rules pointing at this origin can be generated
//! and checked before the agent is started.
//!
//! # Data Flow
//! ```text
//! config.yml
//!     → loader.rs (read & parse YAML)
//!     → validation.rs (rule ordering, targets, duplicates)
//!     → TunnelConfig
//!
//! TunnelConfig::for_origin(...) → to_yaml() → config.yml
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_tunnel_config, TunnelConfigError};
pub use schema::{IngressRule, IngressTarget, TunnelConfig};
pub use validation::{validate_ingress, IngressError};
