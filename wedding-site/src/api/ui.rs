//! Invitation page routes
//!
//! The same page is served for `/` and every `/{guest_id}` link; the page
//! script resolves the guest from its own address.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

const INVITATION_HTML: &str = include_str!("../ui/invitation.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// GET / and GET /:guest_id
pub async fn serve_invitation() -> Html<&'static str> {
    Html(INVITATION_HTML)
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        APP_JS,
    )
        .into_response()
}
