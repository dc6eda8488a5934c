//! Storage backends for houses and point transactions.
//!
//! Services never talk to a database directly; they receive a handle that
//! implements [`PointsStore`]. Two backends exist:
//!
//! - [`PgStore`]: PostgreSQL through a `sqlx` pool (production)
//! - [`MemoryStore`]: process-local state behind an async mutex (no
//!   `DATABASE_URL`, and tests)
//!
//! Both must uphold the same contract: `apply_points` inserts the
//! transaction and moves the balance as one unit, and concurrent calls for
//! the same house are serialized.

use std::future::Future;

use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        house::House,
        point_transaction::{PointTransaction, TransactionWithHouse},
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence operations needed by the ledger and query services.
///
/// Methods return `impl Future + Send` so handlers generic over the store
/// remain usable as axum handlers.
pub trait PointsStore: Clone + Send + Sync + 'static {
    /// Check that the backend is reachable.
    fn ping(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// All houses, points descending, ties in creation order then by name.
    fn list_houses(&self) -> impl Future<Output = Result<Vec<House>, AppError>> + Send;

    fn count_houses(&self) -> impl Future<Output = Result<i64, AppError>> + Send;

    /// Exact, case-sensitive name lookup.
    fn find_house_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<House>, AppError>> + Send;

    /// First house in creation order whose name contains `fragment`,
    /// compared case-insensitively.
    fn find_house_matching(
        &self,
        fragment: &str,
    ) -> impl Future<Output = Result<Option<House>, AppError>> + Send;

    /// Insert a house with zero points.
    ///
    /// Fails with `DuplicateHouse` if the name is taken.
    fn insert_house(&self, name: &str) -> impl Future<Output = Result<House, AppError>> + Send;

    /// Record a transaction and add `delta` to the house balance atomically.
    ///
    /// Fails with `HouseNotFound` (and changes nothing) for an unknown house.
    fn apply_points(
        &self,
        house_id: Uuid,
        delta: i64,
        comment: Option<String>,
    ) -> impl Future<Output = Result<(PointTransaction, House), AppError>> + Send;

    /// Newest-first history, optionally restricted to one house.
    fn list_transactions(
        &self,
        house_id: Option<Uuid>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<TransactionWithHouse>, AppError>> + Send;
}
