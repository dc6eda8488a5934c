//! Router construction and shared handler state.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::{Config, UnmatchedHouseFilter},
    handlers,
    middleware::auth::{AdminKey, require_admin_key},
    store::PointsStore,
};

/// State shared with every handler via `State` extraction.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// Storage handle, constructed once at startup
    pub store: S,

    /// Required for mutations when present
    pub admin_key: Option<AdminKey>,

    pub unmatched_house_filter: UnmatchedHouseFilter,
}

impl<S: PointsStore> AppState<S> {
    /// State with no admin key and the default history filter behavior.
    pub fn new(store: S) -> Self {
        Self {
            store,
            admin_key: None,
            unmatched_house_filter: UnmatchedHouseFilter::default(),
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self {
            store,
            admin_key: config.admin_api_key.as_deref().map(AdminKey::new),
            unmatched_house_filter: config.unmatched_house_filter,
        }
    }

    pub fn with_admin_key(mut self, key: &str) -> Self {
        self.admin_key = Some(AdminKey::new(key));
        self
    }

    pub fn with_unmatched_house_filter(mut self, behavior: UnmatchedHouseFilter) -> Self {
        self.unmatched_house_filter = behavior;
        self
    }
}

/// Build the HTTP router.
///
/// # Routes
///
/// - `GET /health`
/// - `GET /api/houses`, `POST /api/houses`
/// - `POST /api/points`
/// - `GET /api/points/history`
///
/// The `/api` routes sit behind the admin key guard, which only inspects
/// mutating requests.
pub fn create_router<S: PointsStore>(state: AppState<S>) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/houses",
            get(handlers::houses::list_houses::<S>).post(handlers::houses::create_house::<S>),
        )
        .route("/api/points", post(handlers::points::award_points::<S>))
        .route("/api/points/history", get(handlers::points::history::<S>))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin_key::<S>,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check::<S>))
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
