//! RSVP domain types
//!
//! A guest answers an invitation exactly once, either accepting with a
//! positive head count or declining. These types are shared by the service
//! (storage and validation) and the guest client (status check and submit).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generic invitation page slug; a link ending in this segment names no guest
pub const PLACEHOLDER_SLUG: &str = "invitation";

/// Name shown and submitted when the invitation link carries no `to` parameter
pub const DEFAULT_DISPLAY_NAME: &str = "Guest";

/// Opaque invitee token taken from the last segment of the invitation path
///
/// Construction rejects the empty string and [`PLACEHOLDER_SLUG`], so holding
/// a `GuestId` means status checks and submissions may be attempted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    /// Parse a raw path segment, returning `None` for empty or placeholder values
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER_SLUG {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire and column value of the `response` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ResponseKind {
    Accept,
    Decline,
}

impl ResponseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Accept => "accept",
            ResponseKind::Decline => "decline",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "accept" => Ok(ResponseKind::Accept),
            "decline" => Ok(ResponseKind::Decline),
            other => Err(Error::InvalidInput(format!(
                "Unknown RSVP response '{}' (expected 'accept' or 'decline')",
                other
            ))),
        }
    }
}

/// A guest's answer to the invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpResponse {
    /// Attending with `guest_count` people (always at least 1)
    Accepted { guest_count: u32 },
    /// Not attending
    Declined,
}

impl RsvpResponse {
    /// Build an acceptance, rejecting a zero head count
    pub fn accepted(guest_count: u32) -> Result<Self> {
        if guest_count == 0 {
            return Err(Error::InvalidInput(
                "An accepted RSVP needs at least one guest".to_string(),
            ));
        }
        Ok(RsvpResponse::Accepted { guest_count })
    }

    /// Rebuild a response from its wire representation
    ///
    /// Declines ignore the supplied count. Acceptances require a count in
    /// `1..=u32::MAX`.
    pub fn from_wire(kind: ResponseKind, guest_count: i64) -> Result<Self> {
        match kind {
            ResponseKind::Decline => Ok(RsvpResponse::Declined),
            ResponseKind::Accept => {
                let count = u32::try_from(guest_count).map_err(|_| {
                    Error::InvalidInput(format!("Invalid guest count: {}", guest_count))
                })?;
                Self::accepted(count)
            }
        }
    }

    pub fn kind(&self) -> ResponseKind {
        match self {
            RsvpResponse::Accepted { .. } => ResponseKind::Accept,
            RsvpResponse::Declined => ResponseKind::Decline,
        }
    }

    /// Head count as sent on the wire; a decline is always 0
    pub fn guest_count(&self) -> u32 {
        match self {
            RsvpResponse::Accepted { guest_count } => *guest_count,
            RsvpResponse::Declined => 0,
        }
    }
}
