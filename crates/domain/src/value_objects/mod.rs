//! Value Objects - Immutable, validated chaos configuration primitives

mod chaos_kind;
mod correlation_id;
mod delay_range;
mod error_codes;
mod outcome_weights;
mod probability;
mod route_matcher;
mod time_window;

pub use chaos_kind::{ChaosKind, GibberishFormat};
pub use correlation_id::CorrelationId;
pub use delay_range::DelayRange;
pub use error_codes::{ErrorCodes, RECOGNIZED_ERROR_CODES};
pub use outcome_weights::OutcomeWeights;
pub use probability::Probability;
pub use route_matcher::{RouteMatcher, RouteSpec, matches_any};
pub use time_window::{TimeOfDay, TimeWindow, TimeWindowSpec, any_window_contains};
