//! Guest client against a live wedding-site server
//!
//! The server runs on an ephemeral port over an in-memory database; the
//! terminal client's controller drives the same HTTP endpoints the page does.

use url::Url;
use wedding_rsvp::{
    GuestIdentity, RsvpClient, RsvpController, TerminalView, UiEvent, UiUpdate, View,
};
use wedding_site::{build_router, db, AppState};

/// Start the service and return its base address
async fn start_server() -> Url {
    let pool = db::init_memory_database().await.unwrap();
    let app = build_router(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Url::parse(&format!("http://{}/", addr)).unwrap()
}

fn controller_for(page: &Url) -> RsvpController<RsvpClient> {
    let client = RsvpClient::new(page.clone()).unwrap();
    RsvpController::new(GuestIdentity::from_url(page), client)
}

fn last_render(updates: &[UiUpdate]) -> Option<&View> {
    updates.iter().rev().find_map(|u| match u {
        UiUpdate::Render(view) => Some(view),
        UiUpdate::Notify(_) => None,
    })
}

#[tokio::test]
async fn test_accept_then_reload_shows_recorded_answer() {
    let base = start_server().await;
    let page = base.join("abc123?to=Ana").unwrap();

    let mut controller = controller_for(&page);
    let updates = controller.dispatch(UiEvent::PageLoaded).await;
    assert!(last_render(&updates).unwrap().has_controls());

    controller.dispatch(UiEvent::AcceptSelected).await;
    let updates = controller
        .dispatch(UiEvent::SubmitPressed {
            guest_count: "3".to_string(),
        })
        .await;
    assert_eq!(
        last_render(&updates),
        Some(&View::Terminal(TerminalView::ThankYou { guest_count: 3 }))
    );

    // A fresh page load for the same guest finds the stored answer
    let mut reloaded = controller_for(&page);
    let updates = reloaded.dispatch(UiEvent::PageLoaded).await;
    let view = last_render(&updates).unwrap();
    assert_eq!(
        view,
        &View::Terminal(TerminalView::AlreadyAccepted { guest_count: 3 })
    );
    assert!(!view.has_controls());
}

#[tokio::test]
async fn test_decline_then_reload_shows_regret() {
    let base = start_server().await;
    let page = base.join("xyz789").unwrap();

    let mut controller = controller_for(&page);
    controller.dispatch(UiEvent::PageLoaded).await;
    let updates = controller.dispatch(UiEvent::DeclineSelected).await;
    assert_eq!(
        last_render(&updates),
        Some(&View::Terminal(TerminalView::Regret))
    );

    let mut reloaded = controller_for(&page);
    let updates = reloaded.dispatch(UiEvent::PageLoaded).await;
    assert_eq!(
        last_render(&updates),
        Some(&View::Terminal(TerminalView::AlreadyDeclined))
    );
}

#[tokio::test]
async fn test_second_device_submission_is_refused() {
    let base = start_server().await;
    let page = base.join("abc123").unwrap();

    // Both pages load before either guest answers
    let mut first = controller_for(&page);
    let mut second = controller_for(&page);
    first.dispatch(UiEvent::PageLoaded).await;
    second.dispatch(UiEvent::PageLoaded).await;

    first.dispatch(UiEvent::DeclineSelected).await;
    assert!(first.flow().is_answered());

    let updates = second.dispatch(UiEvent::DeclineSelected).await;
    assert!(!second.flow().is_answered());
    assert!(updates.iter().any(|u| matches!(
        u,
        UiUpdate::Notify(notice) if notice.message.contains("already")
    )));
}
