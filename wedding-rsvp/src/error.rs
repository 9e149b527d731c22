//! Error types for the guest RSVP flow

use thiserror::Error;

/// Shown when a failed submission carries no usable server message
pub const GENERIC_SUBMIT_ERROR: &str =
    "There was an error submitting your RSVP. Please try again.";

/// RSVP client errors
///
/// "No prior RSVP" is not an error; the status check reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum RsvpError {
    /// Request never produced an HTTP response (connect, timeout, TLS)
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// Service answered with a non-2xx status
    #[error("Server rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    ServerRejected { status: u16, message: Option<String> },

    /// Response body could not be parsed or failed validation
    #[error("Malformed response: {0}")]
    MalformedPayload(String),

    /// Guest did not provide what the action needs; no request was made
    #[error("Missing input: {0}")]
    UserInputMissing(String),

    /// Invitation link or service address could not be used
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RsvpError {
    /// Text to show the guest in an error notice
    pub fn user_message(&self) -> String {
        match self {
            RsvpError::ServerRejected {
                message: Some(message),
                ..
            } => message.clone(),
            RsvpError::UserInputMissing(message) => message.clone(),
            _ => GENERIC_SUBMIT_ERROR.to_string(),
        }
    }
}
