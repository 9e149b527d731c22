//! RSVP endpoints
//!
//! - `GET /:guest_id/rsvp`: the guest's recorded answer, 404 if none
//! - `POST /:guest_id/rsvp`: record the guest's answer, once
//! - `GET /api/rsvps`: every recorded answer, newest first

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};
use wedding_common::api::{RsvpAck, RsvpStatus, RsvpSubmission};
use wedding_common::rsvp::{GuestId, RsvpResponse};

use crate::db::{rsvps, RsvpRecord};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const SUBMITTED_MESSAGE: &str = "RSVP submitted successfully";
pub const ALREADY_ANSWERED_MESSAGE: &str =
    "An RSVP has already been recorded for this invitation.";

fn parse_guest(raw: &str) -> ApiResult<GuestId> {
    GuestId::parse(raw)
        .ok_or_else(|| ApiError::BadRequest("Invitation link has no guest code".to_string()))
}

/// GET /:guest_id/rsvp
pub async fn get_rsvp(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
) -> ApiResult<Json<RsvpStatus>> {
    let guest = parse_guest(&guest_id)?;

    let record = rsvps::find_by_guest(&state.db, &guest)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No RSVP found for {}", guest)))?;

    Ok(Json(record.to_status()))
}

/// POST /:guest_id/rsvp
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
    payload: Result<Json<RsvpSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RsvpAck>)> {
    let guest = parse_guest(&guest_id)?;
    let Json(submission) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let guest_name = submission.guest_name.trim();
    if guest_name.is_empty() {
        return Err(ApiError::BadRequest("guest_name is required".to_string()));
    }

    let response = RsvpResponse::from_wire(submission.response, submission.guest_count)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    match rsvps::insert(&state.db, &guest, guest_name, &response).await {
        Ok(record) => {
            info!(
                guest_id = %guest,
                guest_name = %record.guest_name,
                response = %record.response,
                guest_count = record.guest_count,
                "RSVP recorded"
            );
            Ok((
                StatusCode::CREATED,
                Json(RsvpAck {
                    message: SUBMITTED_MESSAGE.to_string(),
                    uid: Some(record.uid),
                }),
            ))
        }
        Err(e) if rsvps::is_unique_violation(&e) => {
            warn!(guest_id = %guest, "Rejected second RSVP");
            Err(ApiError::Conflict(ALREADY_ANSWERED_MESSAGE.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/rsvps
pub async fn list_rsvps(State(state): State<AppState>) -> ApiResult<Json<Vec<RsvpRecord>>> {
    Ok(Json(rsvps::list_all(&state.db).await?))
}
