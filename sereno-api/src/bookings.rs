use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use sereno_core::models::{Booking, BookingDetail, BookingRequest};
use sereno_core::validate;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/{id}", get(get_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Booking>, AppError> {
    validate::booking_request(&req)?;

    let detail = state.bookings.commit(&req).await?;

    info!(
        "Created booking {} for {} ({}) on {} at {}",
        detail.id, detail.client_name, detail.email, detail.date, detail.time_slot
    );

    // The confirmation email must not delay or fail the response.
    sereno_notify::dispatch(state.notifier.clone(), detail.clone());

    Ok(Json(detail.booking()))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookingDetail>, AppError> {
    let detail = state.bookings.get_detail(id).await?;
    info!(
        "Successfully returned booking details for ID {} (reference: {})",
        id, detail.reference
    );
    Ok(Json(detail))
}
