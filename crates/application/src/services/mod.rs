//! Application services - the chaos engine and its helpers

mod chaos_engine;
pub mod custom_generators;
pub mod outcome_synthesis;
mod stats_tracker;

pub use chaos_engine::ChaosEngine;
pub use custom_generators::CustomChaosRegistry;
pub use stats_tracker::StatsTracker;
