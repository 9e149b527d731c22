//! wedding-site library - invitation page and RSVP service
//!
//! Serves the invitation page for every guest link and records each guest's
//! single RSVP in SQLite.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// RSVP database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let rsvp = Router::new()
        .route(
            "/:guest_id/rsvp",
            get(api::get_rsvp).post(api::submit_rsvp),
        )
        .route("/api/rsvps", get(api::list_rsvps));

    let pages = Router::new()
        .route("/", get(api::serve_invitation))
        .route("/:guest_id", get(api::serve_invitation))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::status_routes());

    Router::new()
        .merge(rsvp)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
