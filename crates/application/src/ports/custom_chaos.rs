//! Custom chaos generator port

use async_trait::async_trait;
use domain::{CustomPayload, RequestDescriptor};

use super::RandomSource;

/// A named source of custom interventions
///
/// Generators receive the engine's random source so that seeded runs stay
/// reproducible. Any resource a generator consumes must be bounded in size
/// and duration.
#[async_trait]
pub trait CustomChaos: Send + Sync {
    /// Registry name, e.g. `network-jitter`
    fn name(&self) -> &str;

    /// Produce a payload, or `None` to let the request through untouched
    async fn produce(
        &self,
        request: &RequestDescriptor,
        random: &dyn RandomSource,
    ) -> Option<CustomPayload>;
}
