//! Administration CLI for the chaos monkey
//!
//! Offline commands run the engine in-process; remote commands talk to a
//! running `chaos-monkey-server`.

pub mod cli;
pub mod remote;
pub mod simulate;

pub use cli::{Cli, Commands, DEFAULT_URL, endpoint_url, log_filter_from_verbosity};
pub use remote::{ChaosClient, RemoteError};
pub use simulate::{SimulationReport, check_config, run_simulation, simulation_config};
