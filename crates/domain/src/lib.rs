//! Domain layer for the chaos monkey
//!
//! Contains the validated chaos configuration, the outcome model handed to
//! sink adapters, and the statistics snapshot. This layer performs no I/O and
//! draws no randomness of its own.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::ConfigurationError;
pub use value_objects::*;
