//! Integration tests for CLI
//!
//! These tests verify command parsing and the offline commands without
//! contacting a server.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;

use clap::Parser;
use domain::Preset;
use presentation_cli::{Cli, Commands, DEFAULT_URL, run_simulation, simulation_config};

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_parses_presets_command() {
    let cli = parse_args(&["chaos-monkey-cli", "presets"]).unwrap();
    assert!(matches!(cli.command, Commands::Presets));
}

#[test]
fn cli_parses_simulate_with_defaults() {
    let cli = parse_args(&["chaos-monkey-cli", "simulate"]).unwrap();
    if let Commands::Simulate {
        preset,
        config,
        requests,
        seed,
        path,
        json,
    } = cli.command
    {
        assert!(preset.is_none());
        assert!(config.is_none());
        assert_eq!(requests, 1000);
        assert!(seed.is_none());
        assert_eq!(path, "/api/users");
        assert!(!json);
    } else {
        panic!("Expected Simulate command");
    }
}

#[test]
fn cli_parses_simulate_with_options() {
    let cli = parse_args(&[
        "chaos-monkey-cli",
        "simulate",
        "--preset",
        "wild",
        "--requests",
        "250",
        "--seed",
        "7",
        "--path",
        "/api/orders",
    ])
    .unwrap();
    if let Commands::Simulate {
        preset,
        requests,
        seed,
        path,
        ..
    } = cli.command
    {
        assert_eq!(preset.as_deref(), Some("wild"));
        assert_eq!(requests, 250);
        assert_eq!(seed, Some(7));
        assert_eq!(path, "/api/orders");
    } else {
        panic!("Expected Simulate command");
    }
}

#[test]
fn cli_rejects_preset_together_with_config() {
    let result = parse_args(&[
        "chaos-monkey-cli",
        "simulate",
        "--preset",
        "wild",
        "--config",
        "config.toml",
    ]);
    assert!(result.is_err());
}

#[test]
fn cli_parses_check_config_default_path() {
    let cli = parse_args(&["chaos-monkey-cli", "check-config"]).unwrap();
    if let Commands::CheckConfig { config } = cli.command {
        assert_eq!(config.to_str(), Some("config.toml"));
    } else {
        panic!("Expected CheckConfig command");
    }
}

#[test]
fn cli_parses_remote_commands_with_default_url() {
    let cli = parse_args(&["chaos-monkey-cli", "stats"]).unwrap();
    assert!(matches!(cli.command, Commands::Stats { url } if url == DEFAULT_URL));

    let cli = parse_args(&["chaos-monkey-cli", "reset-stats", "--url", "http://chaos:8080"]).unwrap();
    assert!(matches!(cli.command, Commands::ResetStats { url } if url == "http://chaos:8080"));

    let cli = parse_args(&["chaos-monkey-cli", "health"]).unwrap();
    assert!(matches!(cli.command, Commands::Health { .. }));
}

#[test]
fn cli_counts_verbosity() {
    let cli = parse_args(&["chaos-monkey-cli", "-vv", "presets"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn cli_rejects_unknown_command() {
    assert!(parse_args(&["chaos-monkey-cli", "bananas"]).is_err());
}

#[tokio::test]
async fn every_preset_simulates() {
    for preset in Preset::all() {
        let config = simulation_config(Some(preset.name()), None).unwrap();
        let report = run_simulation(&config, 100, Some(1), "/api/users").await.unwrap();
        assert_eq!(report.stats.total_requests, 100);
        assert_eq!(report.source, preset.name());
    }
}

#[tokio::test]
async fn certain_chaos_with_delay_only_delays_everything() {
    let config = infrastructure::ChaosAppConfig {
        probability: Some(1.0),
        outcome_weights: Some(domain::OutcomeWeights::new(100, 0, 0)),
        ..infrastructure::ChaosAppConfig::default()
    };

    let report = run_simulation(&config, 1000, Some(3), "/").await.unwrap();
    assert_eq!(report.stats.delayed_requests, 1000);
    assert_eq!(report.stats.chaos_rate_percent, "100.0");
}
