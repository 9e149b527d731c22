//! # Wedding Common Library
//!
//! Shared code for the invitation service and the guest RSVP client:
//! - RSVP domain types (guest identifiers, responses)
//! - JSON wire types for the `/{guest_id}/rsvp` endpoints
//! - Configuration loading and data folder resolution
//! - Common error type

pub mod api;
pub mod config;
pub mod error;
pub mod rsvp;

pub use error::{Error, Result};
pub use rsvp::{GuestId, ResponseKind, RsvpResponse};
