//! RSVP queries

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;
use wedding_common::api::RsvpStatus;
use wedding_common::rsvp::{GuestId, ResponseKind, RsvpResponse};

/// Stored RSVP row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RsvpRecord {
    pub uid: String,
    pub guest_id: String,
    pub guest_name: String,
    pub response: ResponseKind,
    pub guest_count: i64,
    pub response_date: DateTime<Utc>,
}

impl RsvpRecord {
    /// Body for `GET /{guest_id}/rsvp`
    pub fn to_status(&self) -> RsvpStatus {
        RsvpStatus {
            response: self.response,
            guest_count: self.guest_count,
            guest_name: Some(self.guest_name.clone()),
            response_date: Some(self.response_date),
        }
    }
}

/// Find the response recorded for `guest`
pub async fn find_by_guest(
    pool: &SqlitePool,
    guest: &GuestId,
) -> Result<Option<RsvpRecord>, sqlx::Error> {
    sqlx::query_as::<_, RsvpRecord>(
        "SELECT uid, guest_id, guest_name, response, guest_count, response_date
         FROM rsvps WHERE guest_id = ?",
    )
    .bind(guest.as_str())
    .fetch_optional(pool)
    .await
}

/// Record `response` for `guest`
///
/// Fails with a unique-constraint violation if the guest already answered.
pub async fn insert(
    pool: &SqlitePool,
    guest: &GuestId,
    guest_name: &str,
    response: &RsvpResponse,
) -> Result<RsvpRecord, sqlx::Error> {
    let record = RsvpRecord {
        uid: Uuid::new_v4().to_string(),
        guest_id: guest.as_str().to_string(),
        guest_name: guest_name.to_string(),
        response: response.kind(),
        guest_count: i64::from(response.guest_count()),
        response_date: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO rsvps (uid, guest_id, guest_name, response, guest_count, response_date)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.uid)
    .bind(&record.guest_id)
    .bind(&record.guest_name)
    .bind(record.response)
    .bind(record.guest_count)
    .bind(record.response_date)
    .execute(pool)
    .await?;

    Ok(record)
}

/// All responses, newest first
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<RsvpRecord>, sqlx::Error> {
    sqlx::query_as::<_, RsvpRecord>(
        "SELECT uid, guest_id, guest_name, response, guest_count, response_date
         FROM rsvps ORDER BY response_date DESC",
    )
    .fetch_all(pool)
    .await
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
