//! Chaos monkey HTTP server
//!
//! Main entry point for the demo server.

use std::time::Duration;

use infrastructure::{AppConfig, EngineOptions, init_telemetry};
use presentation_http::{
    AppState, ReloadableChaos, create_router, drain_with_timeout, spawn_config_reload_handler,
};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: it selects the log format
    let loaded = AppConfig::load();
    let initial_config = loaded.as_ref().cloned().unwrap_or_default();
    init_telemetry(&initial_config.telemetry)?;

    info!("🐒 Chaos monkey v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Err(e) = &loaded {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %initial_config.server.host,
        port = %initial_config.server.port,
        chaos_enabled = initial_config.chaos.enabled,
        preset = initial_config.chaos.preset.as_deref().unwrap_or("none"),
        "Configuration loaded"
    );

    // An invalid chaos section is fatal: no engine is built from it
    let chaos = spawn_config_reload_handler(ReloadableChaos::from_config(
        initial_config.clone(),
        EngineOptions::default(),
    )?);

    let app = create_router(AppState::new(chaos))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = initial_config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📊 Chaos statistics: http://{}/chaos/stats", addr);
    info!("🔄 SIGHUP for config reload is enabled (Unix only)");

    let shutdown_timeout =
        Duration::from_secs(initial_config.server.shutdown_timeout_secs.unwrap_or(30));

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal(shutdown_timeout).await;
        let _ = signalled_tx.send(());
    });

    match drain_with_timeout(server.into_future(), signalled_rx, shutdown_timeout).await {
        Some(result) => {
            result?;
            info!("👋 Server shutdown complete");
        },
        None => warn!(
            "⌛ Connections still open after {:?}, shutting down anyway",
            shutdown_timeout
        ),
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
