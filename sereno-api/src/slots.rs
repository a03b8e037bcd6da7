use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use sereno_core::models::Slot;
use sereno_core::Error;

use crate::error::AppError;
use crate::state::AppState;

/// Both parameters are required; they arrive as strings so a missing value
/// can be told apart from an unparsable one.
#[derive(Debug, Deserialize)]
struct SlotsQuery {
    date: Option<String>,
    service_id: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/slots", get(list_slots))
}

async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<Slot>>, AppError> {
    let date = query
        .date
        .filter(|d| !d.is_empty())
        .ok_or_else(|| Error::validation("date", "Missing required parameter: date"))?;

    let service_id = query
        .service_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::validation("service_id", "Missing required parameter: service_id"))?
        .parse::<i64>()
        .map_err(|_| Error::validation("service_id", "Invalid service_id parameter"))?;

    let slots = state.slots.list_visible(&date, service_id).await?;
    info!(
        "Successfully returned {} time slots for date {} and service {}",
        slots.len(),
        date,
        service_id
    );
    Ok(Json(slots))
}
