//! Adapters implementing the engine's ports

mod std_random_source;
mod system_clock;
mod tracing_observer;

pub use std_random_source::StdRandomSource;
pub use system_clock::SystemClock;
pub use tracing_observer::TracingObserver;
