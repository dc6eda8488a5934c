//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Every service and store operation returns this type, and every handler
/// returns `Result<_, AppError>`, so no error escapes the request boundary
/// unconverted.
///
/// # Error Categories
///
/// - **Validation Errors**: Missing or malformed request fields
/// - **Resource Errors**: Referenced house does not exist
/// - **Conflict Errors**: House name already taken
/// - **Authentication Errors**: Admin key missing or wrong
/// - **Storage Errors**: Any sqlx::Error from database operations
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// Returns HTTP 500. The underlying error is logged, never sent.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// Referenced house does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("House not found")]
    HouseNotFound,

    /// A house with this exact name already exists.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("House '{0}' already exists")]
    DuplicateHouse(String),

    /// Admin key is missing or does not match.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or missing admin API key")]
    Unauthorized,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "message": "Human-readable error message"
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `DuplicateHouse` → 400 Bad Request
/// - `Unauthorized` → 401 Unauthorized
/// - `HouseNotFound` → 404 Not Found
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::DuplicateHouse(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::HouseNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "Storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
