//! Guest identity resolution from the invitation link
//!
//! `https://host/abc123?to=Ana+Cruz` resolves to guest `abc123` shown as
//! "Ana Cruz". Resolution never fails: anything unusable degrades to
//! "no guest id" and the default display name.

use url::Url;
use wedding_common::rsvp::{GuestId, DEFAULT_DISPLAY_NAME};

/// Query parameter carrying the guest's display name
const NAME_PARAM: &str = "to";

/// Who the invitation page is addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestIdentity {
    /// `None` when the link has no usable guest segment; no network calls
    /// are made for such a guest
    pub guest_id: Option<GuestId>,
    pub display_name: String,
}

impl GuestIdentity {
    /// Identity used when the link is unusable
    pub fn anonymous() -> Self {
        Self {
            guest_id: None,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
        }
    }

    /// Resolve from a raw invitation link
    pub fn resolve(page_url: &str) -> Self {
        match Url::parse(page_url) {
            Ok(url) => Self::from_url(&url),
            Err(e) => {
                tracing::debug!(url = %page_url, error = %e, "Unparseable invitation link");
                Self::anonymous()
            }
        }
    }

    pub fn from_url(url: &Url) -> Self {
        Self {
            guest_id: last_path_segment(url).and_then(|segment| GuestId::parse(&segment)),
            display_name: display_name(url),
        }
    }
}

/// Last non-empty path segment, percent-decoded
///
/// `/%69nvitation` and `/%20` decode to the placeholder and a blank id, so
/// they resolve to "no guest" just as the server's path extractor does. A
/// segment that is not valid UTF-8 once decoded names no guest.
fn last_path_segment(url: &Url) -> Option<String> {
    let raw = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    match urlencoding::decode(raw) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            tracing::debug!(segment = %raw, error = %e, "Undecodable guest segment");
            None
        }
    }
}

// query_pairs() percent-decodes and maps '+' to ' '
fn display_name(url: &Url) -> String {
    url.query_pairs()
        .find(|(key, _)| key == NAME_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}
