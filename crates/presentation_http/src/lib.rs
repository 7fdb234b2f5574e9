//! HTTP presentation layer - Axum server with the chaos middleware
//!
//! Serves a small demo API behind `ChaosLayer`, plus unwrapped endpoints for
//! health, chaos statistics and the effective configuration.

pub mod config_reload;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use config_reload::{ChaosRuntime, ReloadableChaos, spawn_config_reload_handler};
pub use error::{ApiError, CHAOS_ID_HEADER};
pub use middleware::{ChaosLayer, ChaosService};
pub use routes::create_router;
pub use shutdown::drain_with_timeout;
pub use state::AppState;
