use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use sereno_core::Error;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ReservationRequest {
    slot_id: i64,
}

#[derive(Debug, Serialize)]
struct ReservationResponse {
    reservation_id: i64,
    expires_at: DateTime<Utc>,
    expires_in_seconds: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reservations", post(create_reservation))
        .route("/api/reservations/{id}", delete(delete_reservation))
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<ReservationRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    if req.slot_id <= 0 {
        return Err(Error::validation("slot_id", "Invalid slot_id").into());
    }

    let reservation = state
        .reservations
        .create_hold(req.slot_id, state.hold_ttl)
        .await?;

    info!(
        "Created reservation {} for slot {}, expires at {}",
        reservation.id, req.slot_id, reservation.expires_at
    );

    Ok(Json(ReservationResponse {
        reservation_id: reservation.id,
        expires_at: reservation.expires_at,
        expires_in_seconds: (reservation.expires_at - Utc::now()).num_seconds(),
    }))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.reservations.cancel(id).await?;
    info!("Deleted reservation {}", id);
    Ok(StatusCode::NO_CONTENT)
}
