//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (forwarded by the tunnel agent)
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign/propagate request ID)
//!     → handlers.rs (one of four fixed routes, or the 404 fallback)
//!     → error.rs (JSON error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use handlers::AppState;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::OriginServer;
