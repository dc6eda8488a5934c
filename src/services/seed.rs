//! Initial data for an empty store.

use crate::{error::AppError, models::house::SEED_HOUSES, store::PointsStore};

/// Create the four fixed houses with zero points if no house exists yet.
///
/// Returns the number of houses created. A house inserted concurrently by
/// another server instance is skipped rather than treated as an error.
pub async fn seed_houses<S: PointsStore>(store: &S) -> Result<usize, AppError> {
    if store.count_houses().await? > 0 {
        tracing::info!("Houses already present, skipping seed");
        return Ok(0);
    }

    let mut created = 0;
    for name in SEED_HOUSES {
        match store.insert_house(name).await {
            Ok(_) => created += 1,
            Err(AppError::DuplicateHouse(_)) => {}
            Err(err) => return Err(err),
        }
    }

    tracing::info!(created, "Houses seeded");
    Ok(created)
}
