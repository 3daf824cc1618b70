//! Receipt classification and expiry computation.
//!
//! # Responsibilities
//! - Check the receipt is present and ends in a decimal digit
//! - Derive validity from the parity of that digit
//! - Stamp valid receipts with an expiry in the reference timezone

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::receipt::error::ReceiptError;
use crate::receipt::types::{ValidationRequest, ValidationResponse};

/// Zone every expiry is expressed in.
pub const REFERENCE_TIMEZONE: &str = "America/Chicago";

/// Expiry layout: 24-hour clock, no offset.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const VALIDITY_WINDOW_HOURS: i64 = 24;

/// Outcome of classifying a well-formed receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Last digit is odd.
    Valid,
    /// Last digit is even.
    Invalid,
}

/// Classify a receipt by its final character.
///
/// An empty receipt is `MissingReceipt`; a final character outside
/// ASCII `0-9` is `InvalidReceiptFormat`.
pub fn classify(receipt: &str) -> Result<Validity, ReceiptError> {
    let last = receipt
        .chars()
        .next_back()
        .ok_or(ReceiptError::MissingReceipt)?;
    let digit = last
        .to_digit(10)
        .ok_or(ReceiptError::InvalidReceiptFormat)?;

    if digit % 2 == 1 {
        Ok(Validity::Valid)
    } else {
        Ok(Validity::Invalid)
    }
}

/// Produces validation verdicts.
///
/// Holds the resolved reference zone. If the zone cannot be resolved the
/// validator keeps working and expresses expiries in UTC instead.
#[derive(Debug, Clone)]
pub struct ReceiptValidator {
    zone: Option<Tz>,
}

impl ReceiptValidator {
    pub fn new() -> Self {
        Self::from_zone_name(REFERENCE_TIMEZONE)
    }

    fn from_zone_name(name: &str) -> Self {
        let zone = match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(error) => {
                tracing::warn!(
                    zone = name,
                    error = %error,
                    "Timezone lookup failed, expiry dates fall back to UTC"
                );
                None
            }
        };
        Self { zone }
    }

    /// Whether the reference zone was resolved.
    pub fn has_reference_zone(&self) -> bool {
        self.zone.is_some()
    }

    /// Validate against the current wall clock.
    pub fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse, ReceiptError> {
        self.validate_at(&request.receipt, Utc::now())
    }

    /// Validate as if the request arrived at `now`.
    pub fn validate_at(
        &self,
        receipt: &str,
        now: DateTime<Utc>,
    ) -> Result<ValidationResponse, ReceiptError> {
        match classify(receipt)? {
            Validity::Valid => Ok(ValidationResponse::valid(self.expiry_at(now))),
            Validity::Invalid => Ok(ValidationResponse::invalid()),
        }
    }

    /// Format `now + 24h` in the reference zone.
    ///
    /// The window is an absolute duration, so across a DST change the
    /// wall-clock hour shifts by the offset difference.
    pub fn expiry_at(&self, now: DateTime<Utc>) -> String {
        let expires = now + TimeDelta::hours(VALIDITY_WINDOW_HOURS);
        match self.zone {
            Some(tz) => expires.with_timezone(&tz).format(EXPIRY_FORMAT).to_string(),
            None => expires.format(EXPIRY_FORMAT).to_string(),
        }
    }
}

impl Default for ReceiptValidator {
    fn default() -> Self {
        Self::new()
    }
}
