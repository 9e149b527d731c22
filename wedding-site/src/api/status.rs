//! Liveness and build identity
//!
//! `GET /health` answers as long as the process serves requests;
//! `GET /api/buildinfo` reports what was compiled (see `build.rs`).

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

const MODULE_NAME: &str = "wedding-site";

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
}

/// Identity baked in at compile time
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_hash: env!("GIT_HASH"),
    build_timestamp: env!("BUILD_TIMESTAMP"),
    build_profile: env!("BUILD_PROFILE"),
};

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        module: MODULE_NAME,
        version: BUILD_INFO.version,
    })
}

pub async fn build_info() -> Json<&'static BuildInfo> {
    Json(&BUILD_INFO)
}

pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/buildinfo", get(build_info))
}
