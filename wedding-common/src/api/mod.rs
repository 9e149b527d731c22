//! API module for the shared HTTP contract
//!
//! Request and response bodies exchanged between the invitation service
//! (`wedding-site`) and the guest client (`wedding-rsvp`). No HTTP framework
//! dependencies live here; each side wraps these with its own transport.

pub mod types;

pub use types::{ErrorResponse, RsvpAck, RsvpStatus, RsvpSubmission};
