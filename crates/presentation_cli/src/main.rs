//! Chaos monkey CLI
//!
//! Command-line interface for administration and offline simulation.

#![allow(clippy::print_stdout)]

use clap::Parser;
use infrastructure::{LogFormat, TelemetryConfig, init_telemetry};
use presentation_cli::{
    ChaosClient, Cli, Commands, check_config, log_filter_from_verbosity, run_simulation,
    simulate::{render_presets, render_report},
    simulation_config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    init_telemetry(&TelemetryConfig {
        log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
        log_format: LogFormat::Text,
    })?;

    match cli.command {
        Commands::Presets => {
            println!("📋 Presets:");
            println!();
            print!("{}", render_presets());
        },

        Commands::CheckConfig { config } => match check_config(&config) {
            Ok((app_config, settings)) => {
                println!("✅ Configuration is valid: {}", config.display());
                println!(
                    "   Chaos: {} (preset: {})",
                    if app_config.chaos.enabled { "enabled" } else { "disabled" },
                    app_config.chaos.preset.as_deref().unwrap_or("none")
                );
                println!("   Listen: {}", app_config.server.bind_address());
                println!();
                println!("{}", serde_json::to_string_pretty(&settings)?);
            },
            Err(e) => {
                println!("❌ Invalid configuration: {e}");
                std::process::exit(1);
            },
        },

        Commands::Simulate {
            preset,
            config,
            requests,
            seed,
            path,
            json,
        } => {
            let chaos = simulation_config(preset.as_deref(), config.as_deref())?;
            let report = run_simulation(&chaos, requests, seed, &path).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        },

        Commands::Stats { url } => {
            let stats = ChaosClient::new(url).stats().await?;
            println!("📊 Chaos Statistics:");
            println!("{}", serde_json::to_string_pretty(&stats)?);
        },

        Commands::ResetStats { url } => {
            let resp = ChaosClient::new(url).reset_stats().await?;
            println!("🧹 {}", resp.message);
        },

        Commands::Health { url } => match ChaosClient::new(url).health().await {
            Ok(_) => {
                println!("✅ Healthy");
                std::process::exit(0);
            },
            Err(e) => {
                println!("❌ Unhealthy: {e}");
                std::process::exit(1);
            },
        },
    }

    Ok(())
}
