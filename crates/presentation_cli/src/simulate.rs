//! Offline simulation and configuration checks
//!
//! Both run the real engine in dry-run mode: every decision is made and
//! recorded, but delays are not waited out.

use std::{collections::BTreeMap, path::Path};

use application::ApplicationError;
use domain::{ChaosSettings, Outcome, Preset, RequestDescriptor, StatsReport};
use infrastructure::{AppConfig, ChaosAppConfig, EngineOptions, build_engine};
use serde::Serialize;
use tracing::info;

/// Result of an offline run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Preset name, or "defaults"
    pub source: String,
    pub requests: u32,
    pub seed: Option<u64>,
    pub stats: StatsReport,
    /// Injected error responses by status code
    pub status_codes: BTreeMap<u16, u64>,
    /// Custom outcomes by generator name
    pub custom: BTreeMap<String, u64>,
}

/// Decide `requests` requests for `path` and collect the outcomes
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` when `config` is invalid
pub async fn run_simulation(
    config: &ChaosAppConfig,
    requests: u32,
    seed: Option<u64>,
    path: &str,
) -> Result<SimulationReport, ApplicationError> {
    let options = EngineOptions {
        dry_run: true,
        seed,
    };
    let engine = build_engine(config, options)?;

    let mut status_codes = BTreeMap::new();
    let mut custom = BTreeMap::new();
    let descriptor = RequestDescriptor::new("GET", path);

    for _ in 0..requests {
        match engine.decide(&descriptor).await {
            Outcome::Error { status_code, .. } => {
                *status_codes.entry(status_code).or_insert(0) += 1;
            },
            Outcome::Custom { name, .. } => {
                *custom.entry(name).or_insert(0) += 1;
            },
            Outcome::None | Outcome::Delay { .. } | Outcome::Gibberish { .. } => {},
        }
    }

    let stats = engine.stats().report();
    info!(requests, chaos_rate = %stats.chaos_rate_percent, "Simulation finished");

    Ok(SimulationReport {
        source: config
            .preset
            .clone()
            .unwrap_or_else(|| "defaults".to_string()),
        requests,
        seed,
        stats,
        status_codes,
        custom,
    })
}

/// Chaos configuration for a simulation: a preset or a file
///
/// # Errors
///
/// Returns an error for an unknown preset or an unreadable file
pub fn simulation_config(
    preset: Option<&str>,
    config_path: Option<&Path>,
) -> Result<ChaosAppConfig, ApplicationError> {
    if let Some(path) = config_path {
        return Ok(AppConfig::load_from(path, true)?.chaos);
    }
    match preset {
        Some(name) => Ok(ChaosAppConfig::with_preset(name.parse::<Preset>()?)),
        None => Ok(ChaosAppConfig::default()),
    }
}

/// Load a configuration file and validate its chaos section
///
/// Returns the merged settings an engine would run with.
///
/// # Errors
///
/// Returns `ApplicationError::ConfigLoad` for an unreadable file and
/// `ApplicationError::Configuration` for invalid chaos settings
pub fn check_config(path: &Path) -> Result<(AppConfig, ChaosSettings), ApplicationError> {
    let config = AppConfig::load_from(path, true)?;
    let chaos_config = config.chaos.to_chaos_config()?;
    Ok((config, chaos_config.to_settings()))
}

/// Render a report for the terminal
pub fn render_report(report: &SimulationReport) -> String {
    let stats = &report.stats;
    let mut out = String::new();
    out.push_str(&format!(
        "🐒 Simulated {} requests ({})\n",
        report.requests, report.source
    ));
    if let Some(seed) = report.seed {
        out.push_str(&format!("   Seed: {seed}\n"));
    }
    out.push_str(&format!("   Chaos rate: {}%\n", stats.chaos_rate_percent));
    out.push_str(&format!(
        "   ⏳ Delayed: {} (avg {}ms)\n",
        stats.delayed_requests, stats.average_delay_ms
    ));
    out.push_str(&format!("   💥 Errors: {}\n", stats.error_requests));
    for (code, count) in &report.status_codes {
        out.push_str(&format!("      {code}: {count}\n"));
    }
    out.push_str(&format!("   🙈 Gibberish: {}\n", stats.gibberish_requests));
    if !report.custom.is_empty() {
        out.push_str(&format!("   🔧 Custom: {}\n", stats.custom_requests));
        for (name, count) in &report.custom {
            out.push_str(&format!("      {name}: {count}\n"));
        }
    }
    out
}

/// One line per preset for the terminal
pub fn render_presets() -> String {
    let mut out = String::new();
    for preset in Preset::all() {
        let settings = preset.settings();
        out.push_str(&format!(
            "{:<14} p={:<4} delay={}-{}ms codes={:?}\n               {}\n",
            preset.name(),
            settings.probability,
            settings.delay_range.0,
            settings.delay_range.1,
            settings.error_codes,
            preset.description(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn simulation_counts_every_request() {
        let config = ChaosAppConfig::with_preset(Preset::Wild);
        let report = run_simulation(&config, 500, Some(7), "/api/users")
            .await
            .unwrap();

        assert_eq!(report.stats.total_requests, 500);
        assert_eq!(report.source, "wild");
        let errors: u64 = report.status_codes.values().sum();
        assert_eq!(errors, report.stats.error_requests);
        for code in report.status_codes.keys() {
            assert!([500, 503, 502].contains(code));
        }
    }

    #[tokio::test]
    async fn seeded_simulations_repeat() {
        let config = ChaosAppConfig::with_preset(Preset::Extreme);
        let first = run_simulation(&config, 200, Some(42), "/").await.unwrap();
        let second = run_simulation(&config, 200, Some(42), "/").await.unwrap();

        assert_eq!(first.stats.delayed_requests, second.stats.delayed_requests);
        assert_eq!(first.stats.error_requests, second.stats.error_requests);
        assert_eq!(first.status_codes, second.status_codes);
    }

    #[tokio::test]
    async fn zero_probability_never_intervenes() {
        let config = ChaosAppConfig {
            probability: Some(0.0),
            ..ChaosAppConfig::default()
        };
        let report = run_simulation(&config, 100, None, "/").await.unwrap();

        assert_eq!(report.stats.total_requests, 100);
        assert_eq!(report.stats.chaos_rate_percent, "0.0");
        assert!(report.status_codes.is_empty());
    }

    #[tokio::test]
    async fn invalid_config_builds_no_engine() {
        let config = ChaosAppConfig {
            probability: Some(1.5),
            ..ChaosAppConfig::default()
        };
        let err = run_simulation(&config, 10, None, "/").await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn simulation_config_resolves_aliases() {
        let config = simulation_config(Some("network"), None).unwrap();
        assert_eq!(config.preset().unwrap(), Some(Preset::NetworkLike));

        assert!(simulation_config(Some("banana"), None).is_err());
        assert_eq!(simulation_config(None, None).unwrap(), ChaosAppConfig::default());
    }

    #[test]
    fn check_config_merges_file_over_preset() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[chaos]\npreset = \"mild\"\nerror_codes = [418]").unwrap();

        let (config, settings) = check_config(file.path()).unwrap();
        assert_eq!(config.chaos.preset.as_deref(), Some("mild"));
        assert!((settings.probability - 0.1).abs() < f64::EPSILON);
        assert_eq!(settings.error_codes, vec![418]);
    }

    #[test]
    fn check_config_rejects_bad_range() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[chaos]\ndelay_range = [900, 100]").unwrap();

        assert!(check_config(file.path()).unwrap_err().is_configuration());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = check_config(Path::new("/nonexistent/chaos.toml")).unwrap_err();
        assert!(matches!(err, ApplicationError::ConfigLoad(_)));
    }

    #[test]
    fn presets_are_rendered() {
        let rendered = render_presets();
        for preset in Preset::all() {
            assert!(rendered.contains(preset.name()));
        }
    }

    #[test]
    fn report_lists_status_codes() {
        let report = SimulationReport {
            source: "wild".to_string(),
            requests: 3,
            seed: Some(1),
            stats: domain::ChaosStats::empty(chrono::Utc::now()).report(),
            status_codes: BTreeMap::from([(503, 2)]),
            custom: BTreeMap::new(),
        };
        let rendered = render_report(&report);
        assert!(rendered.contains("503: 2"));
        assert!(rendered.contains("Seed: 1"));
        assert!(!rendered.contains("Custom"));
    }
}
