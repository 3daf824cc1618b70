//! Error taxonomy for receipt validation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reasons a validation request ends before a verdict is produced.
///
/// Each variant maps to a fixed status code and a fixed plain-text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// The endpoint only accepts POST.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Body is not JSON or not shaped like `{"receipt": "..."}`.
    #[error("Bad Request")]
    MalformedPayload,

    /// `receipt` is empty or missing.
    #[error("Receipt Required")]
    MissingReceipt,

    /// Last character of the receipt is not a decimal digit.
    #[error("Invalid Receipt Format")]
    InvalidReceiptFormat,

    /// Body exceeds the configured limit. Only reachable after the
    /// method has been accepted.
    #[error("Payload Too Large")]
    PayloadTooLarge,
}

impl ReceiptError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReceiptError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ReceiptError::MalformedPayload
            | ReceiptError::MissingReceipt
            | ReceiptError::InvalidReceiptFormat => StatusCode::BAD_REQUEST,
            ReceiptError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
