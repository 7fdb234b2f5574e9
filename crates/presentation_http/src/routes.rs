//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, middleware::ChaosLayer, state::AppState};

/// Create the main router with all routes
///
/// Only the demo API sits behind the chaos layer; health, statistics and
/// configuration endpoints are always answered directly.
pub fn create_router(state: AppState) -> Router {
    let demo = Router::new()
        .route("/api/users", get(handlers::demo::list_users))
        .route("/api/products", get(handlers::demo::list_products))
        .route("/api/orders", post(handlers::demo::create_order))
        .route("/dashboard", get(handlers::demo::dashboard))
        .layer(ChaosLayer::new(state.chaos.clone()));

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        // Chaos control endpoints
        .route("/chaos/stats", get(handlers::chaos::get_stats))
        .route("/chaos/stats/reset", post(handlers::chaos::reset_stats))
        .route("/chaos/config", get(handlers::chaos::get_config))
        .merge(demo)
        // Attach state
        .with_state(state)
}
