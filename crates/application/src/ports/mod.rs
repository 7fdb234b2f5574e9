//! Port definitions for the application layer
//!
//! Ports are the capabilities the chaos engine needs from the outside world.
//! Adapters in the infrastructure layer implement these ports.

mod chaos_observer;
mod clock;
mod custom_chaos;
mod random_source;

#[cfg(test)]
pub use chaos_observer::MockChaosObserver;
pub use chaos_observer::{ChaosEvent, ChaosObserver, SkipReason};
#[cfg(test)]
pub use clock::MockClock;
pub use clock::Clock;
pub use custom_chaos::CustomChaos;
#[cfg(test)]
pub use random_source::MockRandomSource;
pub use random_source::{RandomSource, RandomSourceExt};
