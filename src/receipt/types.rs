//! Wire types for the validation endpoint.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::receipt::error::ReceiptError;

const RECEIPT_KEY: &str = "receipt";

/// Inbound payload: `{"receipt": "<string>"}`.
///
/// Decoding is lenient in the same ways as Go's `encoding/json`:
/// - the key matches ASCII case-insensitively (`Receipt`, `RECEIPT`)
/// - repeated keys are allowed and the last string wins
/// - `null` (for the field or the whole document) leaves the receipt empty
/// - unknown keys are skipped
///
/// An empty receipt is rejected later as `Receipt Required`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRequest {
    pub receipt: String,
}

impl<'de> Deserialize<'de> for ValidationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RequestVisitor)
    }
}

struct RequestVisitor;

impl<'de> Visitor<'de> for RequestVisitor {
    type Value = ValidationRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with a string `receipt` field")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ValidationRequest::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = ValidationRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case(RECEIPT_KEY) {
                // null keeps whatever an earlier key set
                if let Some(receipt) = map.next_value::<Option<String>>()? {
                    request.receipt = receipt;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(request)
    }
}

impl ValidationRequest {
    /// Decode the first JSON value in `body`.
    ///
    /// Bytes after a complete value are ignored. An empty body, malformed
    /// JSON, or a value of the wrong shape is `MalformedPayload`.
    pub fn decode(body: &[u8]) -> Result<Self, ReceiptError> {
        serde_json::Deserializer::from_slice(body)
            .into_iter::<ValidationRequest>()
            .next()
            .and_then(Result::ok)
            .ok_or(ReceiptError::MalformedPayload)
    }
}

/// Outbound verdict.
///
/// `expire-date` is present exactly when `status` is true; the only
/// constructors are [`ValidationResponse::valid`] and
/// [`ValidationResponse::invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResponse {
    status: bool,
    #[serde(rename = "expire-date", skip_serializing_if = "Option::is_none")]
    expire_date: Option<String>,
}

impl ValidationResponse {
    pub fn valid(expire_date: String) -> Self {
        Self {
            status: true,
            expire_date: Some(expire_date),
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: false,
            expire_date: None,
        }
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn expire_date(&self) -> Option<&str> {
        self.expire_date.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_request() {
        let req = ValidationRequest::decode(br#"{"receipt":"ABC123"}"#).unwrap();
        assert_eq!(req.receipt, "ABC123");

        // Unknown fields are tolerated
        let req = ValidationRequest::decode(br#"{"receipt":"9","store":"x"}"#).unwrap();
        assert_eq!(req.receipt, "9");

        // Missing key decodes as empty
        let req = ValidationRequest::decode(b"{}").unwrap();
        assert!(req.receipt.is_empty());
    }

    #[test]
    fn test_decode_null_receipt_is_empty() {
        let req = ValidationRequest::decode(br#"{"receipt":null}"#).unwrap();
        assert!(req.receipt.is_empty());

        let req = ValidationRequest::decode(b"null").unwrap();
        assert!(req.receipt.is_empty());

        // A later null does not erase an earlier value
        let req = ValidationRequest::decode(br#"{"receipt":"3","receipt":null}"#).unwrap();
        assert_eq!(req.receipt, "3");
    }

    #[test]
    fn test_decode_duplicate_keys_last_wins() {
        let req = ValidationRequest::decode(br#"{"receipt":"2","receipt":"1"}"#).unwrap();
        assert_eq!(req.receipt, "1");
    }

    #[test]
    fn test_decode_key_is_case_insensitive() {
        let req = ValidationRequest::decode(br#"{"Receipt":"1"}"#).unwrap();
        assert_eq!(req.receipt, "1");

        let req = ValidationRequest::decode(br#"{"receipt":"4","RECEIPT":"5"}"#).unwrap();
        assert_eq!(req.receipt, "5");
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let req = ValidationRequest::decode(b"{\"receipt\":\"7\"}\n{garbage").unwrap();
        assert_eq!(req.receipt, "7");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for body in [
            &b""[..],
            b"not json",
            b"\"not json\"",
            b"[1,2,3]",
            br#"{"receipt":5}"#,
            br#"{"receipt":["1"]}"#,
            b"true",
            br#"{"receipt":"12""#,
        ] {
            assert_eq!(
                ValidationRequest::decode(body),
                Err(ReceiptError::MalformedPayload),
                "body {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_invalid_response_omits_expire_date() {
        let json = serde_json::to_string(&ValidationResponse::invalid()).unwrap();
        assert_eq!(json, r#"{"status":false}"#);
    }

    #[test]
    fn test_valid_response_carries_expire_date() {
        let resp = ValidationResponse::valid("2026-10-20 09:30:00".to_string());
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"status":true,"expire-date":"2026-10-20 09:30:00"}"#);
        assert!(resp.status());
        assert_eq!(resp.expire_date(), Some("2026-10-20 09:30:00"));
    }
}
