//! Tunnel origin server library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod tunnel;

pub use config::schema::OriginConfig;
pub use http::OriginServer;
pub use lifecycle::Shutdown;
