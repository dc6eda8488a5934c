//! Ledger service - the only writer of house balances.
//!
//! This service handles:
//! - Validation of point adjustments
//! - Atomic balance update paired with an audit record
//!
//! # Atomicity Guarantees
//!
//! The store applies the balance change and the transaction insert as one
//! unit, so the sum of a house's transaction deltas always equals its
//! balance.

use uuid::Uuid;

use crate::{
    error::AppError,
    models::point_transaction::{AwardPointsRequest, AwardPointsResponse},
    store::PointsStore,
};

/// Apply a point delta to a house and record it.
///
/// # Process
///
/// 1. Validate the delta (present, non-zero)
/// 2. Normalize the comment (trimmed, blank becomes `None`)
/// 3. Increment the balance and insert the transaction atomically
///
/// # Errors
///
/// - `InvalidRequest`: Delta is zero
/// - `HouseNotFound`: House doesn't exist (nothing is written)
/// - `Database`: Storage failed (nothing is written)
pub async fn apply_points<S: PointsStore>(
    store: &S,
    house_id: Uuid,
    delta: i64,
    comment: Option<String>,
) -> Result<AwardPointsResponse, AppError> {
    if delta == 0 {
        return Err(AppError::InvalidRequest(
            "Points must be a non-zero integer".to_string(),
        ));
    }

    let comment = comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let (transaction, house) = store.apply_points(house_id, delta, comment).await?;

    tracing::info!(
        house = %house.name,
        delta,
        balance = house.points,
        transaction_id = %transaction.id,
        "Points applied"
    );

    Ok(AwardPointsResponse { transaction, house })
}

/// Validate an `AwardPointsRequest` body and apply it.
///
/// Missing fields are reported individually before the ledger is touched.
pub async fn apply_request<S: PointsStore>(
    store: &S,
    request: AwardPointsRequest,
) -> Result<AwardPointsResponse, AppError> {
    let house_id = request
        .house_id
        .ok_or_else(|| AppError::InvalidRequest("houseId is required".to_string()))?;

    let delta = request
        .points
        .ok_or_else(|| AppError::InvalidRequest("points must be an integer".to_string()))?;

    apply_points(store, house_id, delta, request.comment).await
}
