//! Endpoint handlers.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::server::AppState;
use crate::receipt::{ReceiptError, ValidationRequest};

/// `/receipt/validate`.
///
/// Steps run in order and the first failure ends the request:
/// method, JSON decode, presence, last-character format. The body is
/// not read until the method has been accepted.
pub async fn validate_receipt(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ReceiptError> {
    if request.method() != Method::POST {
        return Err(ReceiptError::MethodNotAllowed);
    }

    // Buffered under the router's DefaultBodyLimit.
    let body = Bytes::from_request(request, &state)
        .await
        .map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ReceiptError::PayloadTooLarge
            } else {
                ReceiptError::MalformedPayload
            }
        })?;

    let payload = ValidationRequest::decode(&body)?;
    let verdict = state.validator.validate(&payload)?;

    tracing::debug!(
        status = verdict.status(),
        expire_date = verdict.expire_date().unwrap_or("-"),
        "Receipt classified"
    );

    Ok((StatusCode::OK, Json(verdict)).into_response())
}

/// Anything other than the validation path.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
