use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError(sereno_core::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            sereno_core::Error::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message, "field": field })),
            ),
            sereno_core::Error::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg })))
            }
            sereno_core::Error::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({ "error": msg })))
            }
            sereno_core::Error::Database(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
            }
        };

        (status, body).into_response()
    }
}

impl From<sereno_core::Error> for AppError {
    fn from(err: sereno_core::Error) -> Self {
        Self(err)
    }
}
