//! In-process store.
//!
//! Used when no `DATABASE_URL` is configured, and by the test suite. All
//! state sits behind one `tokio::sync::Mutex`, which serializes ledger writes
//! the way the row lock does in PostgreSQL. Nothing survives a restart.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::PointsStore;
use crate::{
    error::AppError,
    models::{
        house::House,
        point_transaction::{HouseName, PointTransaction, TransactionWithHouse},
    },
};

#[derive(Debug, Default)]
struct Inner {
    /// Kept in creation order
    houses: Vec<House>,
    /// Kept in insertion order, oldest first
    transactions: Vec<PointTransaction>,
}

/// Store that keeps houses and transactions in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointsStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_houses(&self) -> Result<Vec<House>, AppError> {
        let inner = self.inner.lock().await;
        let mut houses = inner.houses.clone();
        // Stable sort keeps creation order among equal balances
        houses.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(houses)
    }

    async fn count_houses(&self) -> Result<i64, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.houses.len() as i64)
    }

    async fn find_house_by_name(&self, name: &str) -> Result<Option<House>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.houses.iter().find(|h| h.name == name).cloned())
    }

    async fn find_house_matching(&self, fragment: &str) -> Result<Option<House>, AppError> {
        let needle = fragment.to_lowercase();
        let inner = self.inner.lock().await;
        Ok(inner
            .houses
            .iter()
            .find(|h| h.name.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn insert_house(&self, name: &str) -> Result<House, AppError> {
        let mut inner = self.inner.lock().await;
        if inner.houses.iter().any(|h| h.name == name) {
            return Err(AppError::DuplicateHouse(name.to_string()));
        }

        let now = Utc::now();
        let house = House {
            id: Uuid::new_v4(),
            name: name.to_string(),
            points: 0,
            created_at: now,
            updated_at: now,
        };
        inner.houses.push(house.clone());

        Ok(house)
    }

    async fn apply_points(
        &self,
        house_id: Uuid,
        delta: i64,
        comment: Option<String>,
    ) -> Result<(PointTransaction, House), AppError> {
        let mut inner = self.inner.lock().await;

        let house = inner
            .houses
            .iter_mut()
            .find(|h| h.id == house_id)
            .ok_or(AppError::HouseNotFound)?;

        // Checked before anything is written
        let points = house.points.checked_add(delta).ok_or_else(|| {
            AppError::InvalidRequest("Point balance would overflow".to_string())
        })?;

        let now = Utc::now();
        house.points = points;
        house.updated_at = now;
        let house = house.clone();

        let transaction = PointTransaction {
            id: Uuid::new_v4(),
            house_id,
            points: delta,
            comment,
            created_at: now,
        };
        inner.transactions.push(transaction.clone());

        Ok((transaction, house))
    }

    async fn list_transactions(
        &self,
        house_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<TransactionWithHouse>, AppError> {
        let inner = self.inner.lock().await;
        let limit = usize::try_from(limit).unwrap_or(0);

        // Insertion order is chronological, so walking backwards is newest first
        let rows = inner
            .transactions
            .iter()
            .rev()
            .filter(|t| house_id.is_none_or(|id| t.house_id == id))
            .take(limit)
            .filter_map(|t| {
                let house = inner.houses.iter().find(|h| h.id == t.house_id)?;
                Some(TransactionWithHouse {
                    id: t.id,
                    house_id: t.house_id,
                    points: t.points,
                    comment: t.comment.clone(),
                    created_at: t.created_at,
                    house: HouseName {
                        name: house.name.clone(),
                    },
                })
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_apply_leaves_state_untouched() {
        let store = MemoryStore::new();
        let house = store.insert_house("Serdaigle").await.unwrap();
        store.apply_points(house.id, i64::MAX, None).await.unwrap();

        let err = store.apply_points(house.id, 1, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let houses = store.list_houses().await.unwrap();
        assert_eq!(houses[0].points, i64::MAX);
        assert_eq!(store.list_transactions(None, 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn matching_is_case_insensitive_and_prefers_oldest() {
        let store = MemoryStore::new();
        store.insert_house("Serdaigle").await.unwrap();
        store.insert_house("Serpentard").await.unwrap();

        let found = store.find_house_matching("SER").await.unwrap().unwrap();
        assert_eq!(found.name, "Serdaigle");

        let found = store.find_house_matching("pent").await.unwrap().unwrap();
        assert_eq!(found.name, "Serpentard");

        assert!(store.find_house_matching("zz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn concurrent_applies_all_land() {
        let store = MemoryStore::new();
        let house = store.insert_house("Gryffondor").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.apply_points(house.id, 3, None).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let houses = store.list_houses().await.unwrap();
        assert_eq!(houses[0].points, 60);
        assert_eq!(store.list_transactions(None, 50).await.unwrap().len(), 20);
    }
}
