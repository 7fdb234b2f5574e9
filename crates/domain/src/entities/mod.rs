//! Domain entities - configuration, decisions and their statistics

mod chaos_config;
mod chaos_stats;
mod outcome;
mod preset;
mod request_descriptor;

pub use chaos_config::{
    ChaosConfig, ChaosSettings, CustomChaosSettings, CustomChaosSpec, DEFAULT_CUSTOM_SHARE,
};
pub use chaos_stats::{ChaosStats, StatsReport, chaos_rate};
pub use outcome::{BodyTransform, CustomPayload, Outcome};
pub use preset::Preset;
pub use request_descriptor::RequestDescriptor;
