//! Receipt validation subsystem.
//!
//! # Data Flow
//! ```text
//! POST /receipt/validate
//!     → types.rs (decode ValidationRequest from the raw body)
//!     → validator.rs (classify last character, compute expiry)
//!     → types.rs (ValidationResponse envelope)
//!     → error.rs (plain-text error responses for early exits)
//! ```
//!
//! # Design Decisions
//! - Validation is a single ordered pass; the first failing step ends it
//! - Classification is pure; only the expiry reads the clock
//! - The reference timezone is resolved once, at construction

pub mod error;
pub mod types;
pub mod validator;

pub use error::ReceiptError;
pub use types::{ValidationRequest, ValidationResponse};
pub use validator::{classify, ReceiptValidator, Validity, EXPIRY_FORMAT, REFERENCE_TIMEZONE};
