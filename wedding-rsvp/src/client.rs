//! RSVP service client
//!
//! `GET /{guest_id}/rsvp` reads a prior response; `POST /{guest_id}/rsvp`
//! records a new one. Paths are root-relative to the service base URL.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use wedding_common::api::{ErrorResponse, RsvpAck, RsvpStatus, RsvpSubmission};
use wedding_common::rsvp::{GuestId, RsvpResponse};

use crate::error::RsvpError;

const USER_AGENT: &str = concat!("wedding-rsvp/", env!("CARGO_PKG_VERSION"));

/// Requests that never complete resolve as network failures after this long
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Operations the RSVP flow needs from the service
#[async_trait]
pub trait RsvpService: Send + Sync {
    /// Read the stored response for `guest`; `Ok(None)` when there is none
    async fn fetch_status(&self, guest: &GuestId) -> Result<Option<RsvpResponse>, RsvpError>;

    /// Record `response` for `guest`
    async fn submit(
        &self,
        guest: &GuestId,
        display_name: &str,
        response: &RsvpResponse,
    ) -> Result<RsvpAck, RsvpError>;

    /// Fail-open status check
    ///
    /// Any failure is logged and reported as "no prior response" so a
    /// transient error never stops a guest from answering.
    async fn check(&self, guest: &GuestId) -> Option<RsvpResponse> {
        match self.fetch_status(guest).await {
            Ok(found) => found,
            Err(e) => {
                warn!(guest_id = %guest, error = %e, "RSVP status check failed, treating as unanswered");
                None
            }
        }
    }
}

/// HTTP implementation of [`RsvpService`]
pub struct RsvpClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl RsvpClient {
    pub fn new(base_url: Url) -> Result<Self, RsvpError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, RsvpError> {
        if base_url.cannot_be_a_base() {
            return Err(RsvpError::InvalidUrl(format!(
                "{} cannot be used as a service address",
                base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| RsvpError::NetworkFailure(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{origin}/{guest_id}/rsvp`, with the id re-encoded as one segment
    fn rsvp_url(&self, guest: &GuestId) -> Result<Url, RsvpError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| RsvpError::InvalidUrl(format!("{} has no path", self.base_url)))?
            .clear()
            .push(guest.as_str())
            .push("rsvp");
        Ok(url)
    }
}

#[async_trait]
impl RsvpService for RsvpClient {
    async fn fetch_status(&self, guest: &GuestId) -> Result<Option<RsvpResponse>, RsvpError> {
        let url = self.rsvp_url(guest)?;
        debug!(guest_id = %guest, url = %url, "Checking RSVP status");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| RsvpError::NetworkFailure(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(guest_id = %guest, "No prior RSVP");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(RsvpError::ServerRejected {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let body: RsvpStatus = response
            .json()
            .await
            .map_err(|e| RsvpError::MalformedPayload(e.to_string()))?;

        let found = body
            .to_response()
            .map_err(|e| RsvpError::MalformedPayload(e.to_string()))?;

        Ok(Some(found))
    }

    async fn submit(
        &self,
        guest: &GuestId,
        display_name: &str,
        response: &RsvpResponse,
    ) -> Result<RsvpAck, RsvpError> {
        let url = self.rsvp_url(guest)?;
        let body = RsvpSubmission::new(display_name, response);
        debug!(guest_id = %guest, response = %body.response, guest_count = body.guest_count, "Submitting RSVP");

        let http_response = self
            .http_client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RsvpError::NetworkFailure(e.to_string()))?;

        let status = http_response.status();

        if !status.is_success() {
            return Err(RsvpError::ServerRejected {
                status: status.as_u16(),
                message: error_message(http_response).await,
            });
        }

        http_response
            .json::<RsvpAck>()
            .await
            .map_err(|e| RsvpError::MalformedPayload(e.to_string()))
    }
}

/// Pull `{error: ...}` out of a failed response, if present and non-blank
async fn error_message(response: reqwest::Response) -> Option<String> {
    response
        .json::<ErrorResponse>()
        .await
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}
