//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{app::AppState, error::AppError, store::PointsStore};

/// Health check response.
///
/// Returns service status and store connectivity.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Store connection status
    pub database: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "database": "connected",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// If the store is unreachable, returns the standard 500 error response.
pub async fn health_check<S: PointsStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<HealthResponse>, AppError> {
    state.store.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        database: "connected".to_string(),
        timestamp: Utc::now(),
    }))
}
