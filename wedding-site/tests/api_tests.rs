//! Integration tests for wedding-site HTTP endpoints
//!
//! Each test builds the router over a fresh in-memory database and drives it
//! with `oneshot`, so no port is bound.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method
use wedding_site::{build_router, db, AppState};

/// Test helper: Router over an empty in-memory database
async fn setup_app() -> Router {
    let pool = db::init_memory_database()
        .await
        .expect("Should open in-memory database");
    build_router(AppState::new(pool))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Pages and service info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app().await;

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "wedding-site");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app().await;

    let (status, body) = send(&app, get("/api/buildinfo")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
}

#[tokio::test]
async fn test_invitation_page_served_for_root_and_guest_links() {
    let app = setup_app().await;

    for uri in ["/", "/abc123", "/invitation"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);

        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"), "{}", uri);

        let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
        assert!(html.contains("/static/app.js"), "{}", uri);
        assert!(html.contains("id=\"rsvp\""), "{}", uri);
    }
}

#[tokio::test]
async fn test_app_js_served_as_javascript() {
    let app = setup_app().await;

    let response = app.oneshot(get("/static/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );

    // Guest resolution must survive malformed escapes like `/abc%E0%A4`
    let script = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    let decode_fn = script
        .split("function decodeSegment")
        .nth(1)
        .expect("script should define decodeSegment");
    let decode_body = &decode_fn[..decode_fn.find("\n}\n").unwrap()];
    assert!(decode_body.contains("try {"));
    assert!(decode_body.contains("catch"));
    assert!(decode_body.contains("return '';"));
    assert!(!script
        .split("function resolveGuest")
        .nth(1)
        .unwrap()
        .split("\n}\n")
        .next()
        .unwrap()
        .contains("decodeURIComponent"));
}

// =============================================================================
// GET /:guest_id/rsvp
// =============================================================================

#[tokio::test]
async fn test_status_not_found_before_answer() {
    let app = setup_app().await;

    let (status, body) = send(&app, get("/abc123/rsvp")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("abc123"));
}

#[tokio::test]
async fn test_placeholder_guest_is_bad_request() {
    let app = setup_app().await;

    for uri in ["/invitation/rsvp", "/%69nvitation/rsvp", "/%20/rsvp"] {
        let (status, _) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }

    let (status, _) = send(
        &app,
        post_json(
            "/invitation/rsvp",
            json!({"guest_name": "Guest", "response": "decline", "guest_count": 0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// POST /:guest_id/rsvp
// =============================================================================

#[tokio::test]
async fn test_accept_then_status_reports_count() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/abc123/rsvp",
            json!({"guest_name": "Ana Cruz", "response": "accept", "guest_count": 3}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "RSVP submitted successfully");
    assert!(body["uid"].is_string());

    let (status, body) = send(&app, get("/abc123/rsvp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "accept");
    assert_eq!(body["guest_count"], 3);
    assert_eq!(body["guest_name"], "Ana Cruz");
    assert!(body["response_date"].is_string());
}

#[tokio::test]
async fn test_decline_stores_zero_guests() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        post_json(
            "/xyz789/rsvp",
            json!({"guest_name": "Guest", "response": "decline", "guest_count": 4}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, get("/xyz789/rsvp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "decline");
    assert_eq!(body["guest_count"], 0);
}

#[tokio::test]
async fn test_second_submission_conflicts_and_keeps_first() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        post_json(
            "/abc123/rsvp",
            json!({"guest_name": "Guest", "response": "accept", "guest_count": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        post_json(
            "/abc123/rsvp",
            json!({"guest_name": "Guest", "response": "decline", "guest_count": 0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already"));

    let (_, body) = send(&app, get("/abc123/rsvp")).await;
    assert_eq!(body["response"], "accept");
    assert_eq!(body["guest_count"], 2);
}

#[tokio::test]
async fn test_invalid_submissions_rejected() {
    let app = setup_app().await;

    let cases = [
        json!({"guest_name": "Guest", "response": "accept", "guest_count": 0}),
        json!({"guest_name": "Guest", "response": "accept", "guest_count": -2}),
        json!({"guest_name": "   ", "response": "decline", "guest_count": 0}),
        json!({"guest_name": "Guest", "response": "maybe", "guest_count": 1}),
        json!({"guest_name": "Guest"}),
    ];

    for case in cases {
        let (status, body) = send(&app, post_json("/abc123/rsvp", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", case);
        assert!(body["error"].is_string(), "{}", case);
    }

    let (status, _) = send(&app, get("/abc123/rsvp")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = setup_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/abc123/rsvp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// GET /api/rsvps
// =============================================================================

#[tokio::test]
async fn test_list_rsvps_newest_first() {
    let app = setup_app().await;

    for (guest, response, count) in [("first", "accept", 2), ("second", "decline", 0)] {
        let (status, _) = send(
            &app,
            post_json(
                &format!("/{}/rsvp", guest),
                json!({"guest_name": guest, "response": response, "guest_count": count}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let (status, body) = send(&app, get("/api/rsvps")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["guest_id"], "second");
    assert_eq!(rows[1]["guest_id"], "first");
    assert_eq!(rows[1]["guest_count"], 2);
}
