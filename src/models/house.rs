//! House data models and API request types.
//!
//! This module defines:
//! - `House`: Database entity representing a competing house
//! - `CreateHouseRequest`: Request body for creating houses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Names of the houses created when the store starts out empty.
pub const SEED_HOUSES: [&str; 4] = ["Gryffondor", "Poufsouffle", "Serdaigle", "Serpentard"];

/// Represents a house record from the database.
///
/// # Database Table
///
/// Maps to the `houses` table. `points` is only changed by the ledger,
/// together with an insert into `point_transactions`, so it always equals
/// the sum of the house's transaction deltas.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "Serdaigle",
///   "points": 120,
///   "createdAt": "2025-12-20T10:00:00Z",
///   "updatedAt": "2025-12-21T16:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    /// Unique identifier for this house
    pub id: Uuid,

    /// Display name, unique across houses (exact match)
    pub name: String,

    /// Current point balance, may be negative
    pub points: i64,

    /// Timestamp when the house was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last balance change
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a new house.
///
/// ```json
/// { "name": "Serdaigle" }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateHouseRequest {
    /// Missing and blank names are rejected by the service
    pub name: Option<String>,
}
