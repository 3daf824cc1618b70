//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign or keep X-Request-ID)
//!     → observability::capture (entry log, response capture)
//!     → handler.rs (method check, decode, validate)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer, VALIDATE_PATH};
