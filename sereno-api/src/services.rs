use axum::{extract::State, routing::get, Json, Router};
use tracing::info;

use sereno_core::models::Service;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/massage-types", get(list_services))
}

async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, AppError> {
    let services = state.catalog.list().await?;
    info!("Successfully returned {} massage types", services.len());
    Ok(Json(services))
}
