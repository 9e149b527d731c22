//! HTTP API handlers for wedding-site

pub mod rsvp;
pub mod status;
pub mod ui;

pub use rsvp::{get_rsvp, list_rsvps, submit_rsvp};
pub use status::{status_routes, BUILD_INFO};
pub use ui::{serve_app_js, serve_invitation};
