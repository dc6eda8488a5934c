//! Read-side queries over houses and point history, plus house creation.

use crate::{
    config::UnmatchedHouseFilter,
    error::AppError,
    models::{house::House, point_transaction::TransactionWithHouse},
    store::PointsStore,
};

/// Maximum number of rows returned by the history endpoint.
pub const HISTORY_LIMIT: i64 = 50;

/// Filter value meaning "every house".
const ALL_HOUSES: &str = "all";

/// All houses, highest balance first.
pub async fn list_houses<S: PointsStore>(store: &S) -> Result<Vec<House>, AppError> {
    store.list_houses().await
}

/// Up to [`HISTORY_LIMIT`] transactions, newest first.
///
/// `house_filter` selects the first house whose name contains it
/// (case-insensitive). `None`, an empty string and `"all"` mean no filter.
/// When the filter matches no house, `unmatched` decides between the
/// unfiltered history and an empty list.
pub async fn list_transactions<S: PointsStore>(
    store: &S,
    house_filter: Option<&str>,
    unmatched: UnmatchedHouseFilter,
) -> Result<Vec<TransactionWithHouse>, AppError> {
    let fragment = house_filter
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != ALL_HOUSES);

    let house_id = match fragment {
        None => None,
        Some(fragment) => match store.find_house_matching(fragment).await? {
            Some(house) => Some(house.id),
            None => match unmatched {
                UnmatchedHouseFilter::All => {
                    tracing::debug!(filter = fragment, "No house matches filter, returning all");
                    None
                }
                UnmatchedHouseFilter::Empty => return Ok(Vec::new()),
            },
        },
    };

    store.list_transactions(house_id, HISTORY_LIMIT).await
}

/// Create a house with zero points.
///
/// # Errors
///
/// - `InvalidRequest`: Name missing or blank
/// - `DuplicateHouse`: A house with exactly this name exists
pub async fn create_house<S: PointsStore>(
    store: &S,
    name: Option<String>,
) -> Result<House, AppError> {
    let name = name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("House name is required".to_string()))?;

    if store.find_house_by_name(name).await?.is_some() {
        return Err(AppError::DuplicateHouse(name.to_string()));
    }

    let house = store.insert_house(name).await?;
    tracing::info!(house = %house.name, id = %house.id, "House created");

    Ok(house)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::ledger_service, store::MemoryStore};

    #[tokio::test]
    async fn houses_sorted_by_points_with_stable_ties() {
        let store = MemoryStore::new();
        let a = create_house(&store, Some("A".into())).await.unwrap();
        let b = create_house(&store, Some("B".into())).await.unwrap();
        let c = create_house(&store, Some("C".into())).await.unwrap();
        ledger_service::apply_points(&store, c.id, 2, None).await.unwrap();

        let first: Vec<_> = list_houses(&store).await.unwrap();
        let names: Vec<_> = first.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);

        for _ in 0..5 {
            assert_eq!(list_houses(&store).await.unwrap(), first);
        }
        assert_eq!(first[1].id, a.id);
        assert_eq!(first[2].id, b.id);
    }

    #[tokio::test]
    async fn history_is_capped_and_newest_first() {
        let store = MemoryStore::new();
        let a = create_house(&store, Some("A".into())).await.unwrap();
        for i in 1..=60 {
            ledger_service::apply_points(&store, a.id, i, None).await.unwrap();
        }

        let rows = list_transactions(&store, None, UnmatchedHouseFilter::All)
            .await
            .unwrap();
        assert_eq!(rows.len(), 50);
        assert_eq!(rows[0].points, 60);
        assert_eq!(rows[49].points, 11);
        assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn quiz_scenario() {
        let store = MemoryStore::new();
        let a = create_house(&store, Some("A".into())).await.unwrap();
        let b = create_house(&store, Some("B".into())).await.unwrap();

        ledger_service::apply_points(&store, a.id, 10, Some("quiz".into()))
            .await
            .unwrap();

        let houses = list_houses(&store).await.unwrap();
        assert_eq!((houses[0].id, houses[0].points), (a.id, 10));
        assert_eq!((houses[1].id, houses[1].points), (b.id, 0));

        let rows = list_transactions(&store, None, UnmatchedHouseFilter::All)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].house_id, a.id);
        assert_eq!(rows[0].points, 10);
        assert_eq!(rows[0].comment.as_deref(), Some("quiz"));
        assert_eq!(rows[0].house.name, "A");

        ledger_service::apply_points(&store, a.id, -5, None).await.unwrap();

        let houses = list_houses(&store).await.unwrap();
        assert_eq!(houses[0].points, 5);

        let rows = list_transactions(&store, None, UnmatchedHouseFilter::All)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].points, -5);
        assert_eq!(rows[1].points, 10);
    }

    #[tokio::test]
    async fn history_filter_semantics() {
        let store = MemoryStore::new();
        let g = create_house(&store, Some("Gryffondor".into())).await.unwrap();
        let s = create_house(&store, Some("Serpentard".into())).await.unwrap();
        ledger_service::apply_points(&store, g.id, 1, None).await.unwrap();
        ledger_service::apply_points(&store, s.id, 2, None).await.unwrap();

        let rows = list_transactions(&store, Some("GRYFF"), UnmatchedHouseFilter::All)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].house.name, "Gryffondor");

        for filter in [None, Some("all"), Some(""), Some("  ")] {
            let rows = list_transactions(&store, filter, UnmatchedHouseFilter::All)
                .await
                .unwrap();
            assert_eq!(rows.len(), 2, "filter {filter:?}");
        }

        let rows = list_transactions(&store, Some("nobody"), UnmatchedHouseFilter::All)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let rows = list_transactions(&store, Some("nobody"), UnmatchedHouseFilter::Empty)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn duplicate_and_blank_names_are_rejected() {
        let store = MemoryStore::new();
        create_house(&store, Some("Serdaigle".into())).await.unwrap();

        let err = create_house(&store, Some("Serdaigle".into())).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateHouse(_)));

        // Uniqueness is case-sensitive
        create_house(&store, Some("serdaigle".into())).await.unwrap();

        for name in [None, Some(String::new()), Some("   ".into())] {
            let err = create_house(&store, name).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidRequest(_)));
        }

        assert_eq!(store.count_houses().await.unwrap(), 2);
    }
}
