//! House HTTP handlers.
//!
//! This module implements the house-related API endpoints:
//! - GET /api/houses - List houses, highest balance first
//! - POST /api/houses - Create a house

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    app::AppState,
    error::AppError,
    models::house::{CreateHouseRequest, House},
    services::query_service,
    store::PointsStore,
};

/// List all houses.
///
/// # Endpoint
///
/// `GET /api/houses`
///
/// # Response
///
/// - **Success (200 OK)**: Array of houses sorted by points descending
/// - **Error (500)**: Storage error
pub async fn list_houses<S: PointsStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<House>>, AppError> {
    let houses = query_service::list_houses(&state.store).await?;
    Ok(Json(houses))
}

/// Create a new house with zero points.
///
/// # Endpoint
///
/// `POST /api/houses`
///
/// # Request Body
///
/// ```json
/// { "name": "Serdaigle" }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created house
/// - **Error (400)**: Name missing, blank, or already taken
/// - **Error (401)**: Admin key required and not supplied
/// - **Error (500)**: Storage error
pub async fn create_house<S: PointsStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateHouseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<House>), AppError> {
    let Json(request) = payload?;
    let house = query_service::create_house(&state.store, request.name).await?;

    Ok((StatusCode::CREATED, Json(house)))
}
