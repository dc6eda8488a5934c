//! PostgreSQL store tests.
//!
//! Ignored by default: run with `DATABASE_URL` pointing at a server where
//! test databases may be created, then `cargo test -- --ignored`.

use house_points_server::{
    error::AppError,
    services::{ledger_service, query_service, seed},
    store::{PgStore, PointsStore},
};
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn balance_tracks_transaction_sum(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let a = store.insert_house("A").await.unwrap();

    for delta in [10, -3, 7, -20] {
        ledger_service::apply_points(&store, a.id, delta, None)
            .await
            .unwrap();
    }

    let sum: Option<i64> =
        sqlx::query_scalar("SELECT SUM(points)::BIGINT FROM point_transactions WHERE house_id = $1")
            .bind(a.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let houses = store.list_houses().await.unwrap();

    assert_eq!(houses[0].points, -6);
    assert_eq!(sum, Some(-6));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn unknown_house_rolls_back(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    store.insert_house("A").await.unwrap();

    let err = store
        .apply_points(Uuid::new_v4(), 5, Some("ghost".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::HouseNotFound));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM point_transactions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_adjustments_serialize(pool: PgPool) {
    let store = PgStore::new(pool);
    let a = store.insert_house("A").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.apply_points(a.id, 2, None).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let houses = store.list_houses().await.unwrap();
    assert_eq!(houses[0].points, 20);
    assert_eq!(store.list_transactions(None, 50).await.unwrap().len(), 10);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_name_is_conflict(pool: PgPool) {
    let store = PgStore::new(pool);
    store.insert_house("Serdaigle").await.unwrap();

    let err = store.insert_house("Serdaigle").await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateHouse(_)));
    assert_eq!(store.count_houses().await.unwrap(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn history_filter_and_order(pool: PgPool) {
    let store = PgStore::new(pool);
    seed::seed_houses(&store).await.unwrap();

    let gryffondor = store.find_house_by_name("Gryffondor").await.unwrap().unwrap();
    let serpentard = store.find_house_by_name("Serpentard").await.unwrap().unwrap();
    store.apply_points(gryffondor.id, 1, None).await.unwrap();
    store.apply_points(serpentard.id, 2, None).await.unwrap();
    store.apply_points(gryffondor.id, 3, None).await.unwrap();

    let rows = query_service::list_transactions(&store, Some("GRYF"), Default::default())
        .await
        .unwrap();
    assert_eq!(rows.iter().map(|r| r.points).collect::<Vec<_>>(), [3, 1]);
    assert!(rows.iter().all(|r| r.house.name == "Gryffondor"));

    let houses = query_service::list_houses(&store).await.unwrap();
    assert_eq!(houses[0].name, "Gryffondor");
    assert_eq!(houses[1].name, "Serpentard");
}
