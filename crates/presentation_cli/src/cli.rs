//! Command-line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default address of `chaos-monkey-server`
pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Chaos monkey CLI
#[derive(Debug, Parser)]
#[command(name = "chaos-monkey-cli")]
#[command(author, version, about = "Chaos monkey administration CLI", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the built-in presets
    Presets,

    /// Validate a configuration file and show the merged chaos settings
    ///
    /// Environment variables (CHAOS_MONKEY_*) are applied on top of the file.
    /// Example: chaos-monkey-cli check-config --config ./config.toml
    CheckConfig {
        /// Path to the configuration file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },

    /// Run decisions offline and print the resulting statistics
    ///
    /// Delays are decided but not waited out.
    /// Example: chaos-monkey-cli simulate --preset wild --requests 5000 --seed 7
    Simulate {
        /// Preset to simulate (defaults apply when omitted)
        #[arg(short, long)]
        preset: Option<String>,

        /// Configuration file to simulate instead of a preset
        #[arg(short, long, conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Number of requests to decide
        #[arg(short = 'n', long, default_value = "1000")]
        requests: u32,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Request path handed to the engine
        #[arg(long, default_value = "/api/users")]
        path: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show chaos statistics of a running server
    Stats {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Reset chaos statistics of a running server
    ResetStats {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },

    /// Check server health (usable as a container healthcheck)
    Health {
        /// Server URL
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,
    },
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}
