//! Point ledger HTTP handlers.
//!
//! This module implements the points-related API endpoints:
//! - POST /api/points - Add or remove points for a house
//! - GET /api/points/history - Recent transactions, optionally filtered by house

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;

use crate::{
    app::AppState,
    error::AppError,
    models::point_transaction::{AwardPointsRequest, AwardPointsResponse, TransactionWithHouse},
    services::{ledger_service, query_service},
    store::PointsStore,
};

/// Query string of the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Substring of a house name, or `all`
    pub house: Option<String>,
}

/// Apply a point delta to a house.
///
/// # Endpoint
///
/// `POST /api/points`
///
/// # Request Body
///
/// ```json
/// {
///   "houseId": "550e8400-...",
///   "points": 10,
///   "comment": "quiz"
/// }
/// ```
///
/// # Response (200)
///
/// ```json
/// {
///   "transaction": { "id": "770e8400-...", "houseId": "550e8400-...", "points": 10, "comment": "quiz", "createdAt": "..." },
///   "house": { "id": "550e8400-...", "name": "Serdaigle", "points": 10, "createdAt": "...", "updatedAt": "..." }
/// }
/// ```
///
/// # Errors
///
/// - **400**: Missing house id, missing/non-integer/zero points, malformed body
/// - **404**: House not found
/// - **500**: Storage error, nothing was written
pub async fn award_points<S: PointsStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<AwardPointsRequest>, JsonRejection>,
) -> Result<Json<AwardPointsResponse>, AppError> {
    let Json(request) = payload?;
    let result = ledger_service::apply_request(&state.store, request).await?;

    Ok(Json(result))
}

/// List recent point transactions.
///
/// # Endpoint
///
/// `GET /api/points/history?house=<name fragment|all>`
///
/// Returns at most 50 rows, newest first, each with the owning house name
/// embedded as `house.name`.
pub async fn history<S: PointsStore>(
    State(state): State<AppState<S>>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<Vec<TransactionWithHouse>>, AppError> {
    let Query(params) = params?;
    let rows = query_service::list_transactions(
        &state.store,
        params.house.as_deref(),
        state.unmatched_house_filter,
    )
    .await?;

    Ok(Json(rows))
}
