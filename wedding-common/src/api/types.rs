//! Shared API request/response types
//!
//! Bodies for `GET /{guest_id}/rsvp` and `POST /{guest_id}/rsvp`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rsvp::{ResponseKind, RsvpResponse};
use crate::Result;

// ========================================
// Status (GET /{guest_id}/rsvp)
// ========================================

/// Recorded RSVP returned by the status endpoint
///
/// # Examples
///
/// ```
/// use wedding_common::api::types::RsvpStatus;
///
/// let status: RsvpStatus =
///     serde_json::from_str(r#"{"response": "accept", "guest_count": 2}"#).unwrap();
/// assert_eq!(status.guest_count, 2);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RsvpStatus {
    /// "accept" or "decline"
    pub response: ResponseKind,

    /// Head count; 0 for declines, may be omitted by older servers
    #[serde(default)]
    pub guest_count: i64,

    /// Name the guest submitted with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,

    /// When the response was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_date: Option<DateTime<Utc>>,
}

impl RsvpStatus {
    /// Convert to the domain response, validating the head count
    pub fn to_response(&self) -> Result<RsvpResponse> {
        RsvpResponse::from_wire(self.response, self.guest_count)
    }
}

// ========================================
// Submission (POST /{guest_id}/rsvp)
// ========================================

/// Body posted when a guest answers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RsvpSubmission {
    pub guest_name: String,
    pub response: ResponseKind,
    pub guest_count: i64,
}

impl RsvpSubmission {
    /// Build the wire body for `response`; declines always carry 0 guests
    pub fn new(guest_name: impl Into<String>, response: &RsvpResponse) -> Self {
        Self {
            guest_name: guest_name.into(),
            response: response.kind(),
            guest_count: i64::from(response.guest_count()),
        }
    }
}

/// Acknowledgement returned for a stored submission
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RsvpAck {
    pub message: String,

    /// Identifier of the stored record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

// ========================================
// Error Response Types
// ========================================

/// Error body returned with every non-2xx status
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ========================================
// Tests
// ========================================
