//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults; no file means the stock listener on :8080
//! - Validation separates syntactic (serde) from semantic checks
//! - The classification rule and reference timezone are not configurable

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig, ServiceConfig};
pub use validation::{validate_config, ValidationError};
