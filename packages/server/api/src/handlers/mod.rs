use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub mod boards;
pub mod items;
pub mod search;

#[derive(Debug)]
pub enum ServiceError {
    BadRequest(String),
    NotFound(String),
    DatabaseError(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::BadRequest(e) => (StatusCode::BAD_REQUEST, e),
            ServiceError::NotFound(e) => (StatusCode::NOT_FOUND, e),
            ServiceError::DatabaseError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        // Full detail goes to the log, not the response body
        tracing::error!("Database operation failed: {}", e);
        ServiceError::DatabaseError("Database operation failed".to_string())
    }
}
