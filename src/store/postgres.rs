//! PostgreSQL store.
//!
//! # Atomicity Guarantees
//!
//! `apply_points` runs inside a PostgreSQL transaction. The `UPDATE` of the
//! house row takes a row lock, so concurrent adjustments to the same house
//! queue behind each other, and the transaction insert commits or rolls back
//! together with the balance change.

use uuid::Uuid;

use super::PointsStore;
use crate::{
    db::DbPool,
    error::AppError,
    models::{
        house::House,
        point_transaction::{PointTransaction, TransactionRow, TransactionWithHouse},
    },
};

const HOUSE_COLUMNS: &str = "id, name, points, created_at, updated_at";

/// Store backed by a `sqlx` PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PointsStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_houses(&self) -> Result<Vec<House>, AppError> {
        let houses = sqlx::query_as::<_, House>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses ORDER BY points DESC, created_at ASC, name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(houses)
    }

    async fn count_houses(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM houses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn find_house_by_name(&self, name: &str) -> Result<Option<House>, AppError> {
        let house = sqlx::query_as::<_, House>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(house)
    }

    async fn find_house_matching(&self, fragment: &str) -> Result<Option<House>, AppError> {
        // POSITION instead of ILIKE so '%' and '_' in the fragment match literally
        let house = sqlx::query_as::<_, House>(&format!(
            r#"
            SELECT {HOUSE_COLUMNS} FROM houses
            WHERE POSITION(LOWER($1) IN LOWER(name)) > 0
            ORDER BY created_at ASC, name ASC
            LIMIT 1
            "#
        ))
        .bind(fragment)
        .fetch_optional(&self.pool)
        .await?;

        Ok(house)
    }

    async fn insert_house(&self, name: &str) -> Result<House, AppError> {
        let inserted = sqlx::query_as::<_, House>(&format!(
            "INSERT INTO houses (name, points) VALUES ($1, 0) RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(name)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(house) => Ok(house),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(AppError::DuplicateHouse(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn apply_points(
        &self,
        house_id: Uuid,
        delta: i64,
        comment: Option<String>,
    ) -> Result<(PointTransaction, House), AppError> {
        let mut tx = self.pool.begin().await?;

        // The UPDATE locks the row until commit
        let house = sqlx::query_as::<_, House>(&format!(
            r#"
            UPDATE houses
            SET points = points + $1,
                updated_at = NOW()
            WHERE id = $2
            RETURNING {HOUSE_COLUMNS}
            "#
        ))
        .bind(delta)
        .bind(house_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(house) = house else {
            tx.rollback().await?;
            return Err(AppError::HouseNotFound);
        };

        let transaction = sqlx::query_as::<_, PointTransaction>(
            r#"
            INSERT INTO point_transactions (house_id, points, comment)
            VALUES ($1, $2, $3)
            RETURNING id, house_id, points, comment, created_at
            "#,
        )
        .bind(house_id)
        .bind(delta)
        .bind(comment)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((transaction, house))
    }

    async fn list_transactions(
        &self,
        house_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<TransactionWithHouse>, AppError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT t.id, t.house_id, t.points, t.comment, t.created_at, h.name AS house_name
            FROM point_transactions t
            JOIN houses h ON h.id = t.house_id
            WHERE $1::uuid IS NULL OR t.house_id = $1
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT $2
            "#,
        )
        .bind(house_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
