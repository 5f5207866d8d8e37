//! Client for the origin server's fixed routes.

pub mod client;

pub use client::{ErrorDetail, HeadersReport, OriginClient, SlowReport, StatusReport};
