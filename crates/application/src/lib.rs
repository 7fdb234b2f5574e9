//! Application layer - the chaos decision engine
//!
//! Contains the engine, its statistics and the built-in custom generators,
//! together with the ports through which randomness, time and observers
//! are injected. Infrastructure adapters implement these ports.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
