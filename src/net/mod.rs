//! Network layer.
//!
//! # Responsibilities
//! - Bind the configured TCP address
//! - Surface bind failures so startup can abort
//!
//! # Design Decisions
//! - One listener, one address; no TLS termination here
//! - Connection handling itself is left to hyper via `axum::serve`

pub mod listener;

pub use listener::{bind, ListenerError};
