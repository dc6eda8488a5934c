//! Point transaction data models and API request/response types.
//!
//! This module defines:
//! - `PointTransaction`: Database entity for one point adjustment
//! - `AwardPointsRequest` / `AwardPointsResponse`: the ledger endpoint body types
//! - `TransactionWithHouse`: a history row joined with its house name

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::house::House;

/// Represents a row of the append-only `point_transactions` table.
///
/// Rows are inserted by the ledger in the same database transaction that
/// moves the house balance, and are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointTransaction {
    /// Unique identifier for this transaction
    pub id: Uuid,

    /// House whose balance was adjusted
    pub house_id: Uuid,

    /// Signed delta, never zero
    pub points: i64,

    /// Optional audit comment
    pub comment: Option<String>,

    /// When the adjustment was recorded
    pub created_at: DateTime<Utc>,
}

/// Request to add points to (or remove points from) a house.
///
/// # JSON Example
///
/// ```json
/// {
///   "houseId": "550e8400-e29b-41d4-a716-446655440000",
///   "points": -5,
///   "comment": "Late to class"
/// }
/// ```
///
/// Every field is optional at the serde level so that a missing field is
/// reported with a specific message instead of a generic body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardPointsRequest {
    pub house_id: Option<Uuid>,
    pub points: Option<i64>,
    pub comment: Option<String>,
}

/// Result of a ledger write: the recorded transaction and the house as it
/// stands after the increment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardPointsResponse {
    pub transaction: PointTransaction,
    pub house: House,
}

/// Name of the house a history row belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseName {
    pub name: String,
}

/// Database row for the history query (transaction joined with house name).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRow {
    pub id: Uuid,
    pub house_id: Uuid,
    pub points: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub house_name: String,
}

/// A history entry as returned by `GET /api/points/history`.
///
/// ```json
/// {
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "houseId": "550e8400-e29b-41d4-a716-446655440000",
///   "points": 10,
///   "comment": "quiz",
///   "createdAt": "2025-12-21T16:00:00Z",
///   "house": { "name": "Serdaigle" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithHouse {
    pub id: Uuid,
    pub house_id: Uuid,
    pub points: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub house: HouseName,
}

impl From<TransactionRow> for TransactionWithHouse {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            house_id: row.house_id,
            points: row.points,
            comment: row.comment,
            created_at: row.created_at,
            house: HouseName {
                name: row.house_name,
            },
        }
    }
}
