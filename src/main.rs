use anyhow::{Context, Result};
use axum::serve;
use media_dash::core::config::Config;
use media_dash::core::refresh::{spawn_refresh_task, Poller};
use media_dash::core::routes::build_router;
use media_dash::core::state::AppState;
use media_dash::core::tracing_init::init_tracing;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let explicit_path = env::args().nth(1).map(PathBuf::from);

    // An explicit path must exist; the default one is optional and
    // everything can come from SONARR_API, SONARR_KEY, ... instead.
    let (config, config_source) = match explicit_path {
        Some(path) => {
            let config = Config::from_file(&path)
                .context(format!("Failed to load configuration from '{}'", path.display()))?;
            (config, path.display().to_string())
        }
        None if PathBuf::from(DEFAULT_CONFIG_PATH).exists() => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            let config = Config::from_file(&path)
                .context(format!("Failed to load configuration from '{}'", path.display()))?;
            (config, path.display().to_string())
        }
        None => {
            let config = Config::from_env().context(
                "No config.toml found and the environment does not provide a complete configuration. \
                Set SONARR_API, SONARR_KEY, RADARR_API, RADARR_KEY and QBITTORRENT_API, or pass a config file path.",
            )?;
            (config, "environment".to_string())
        }
    };

    // Initialize tracing/logging
    init_tracing(&config.logging);

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_source))
}

async fn async_main(config: Config, config_source: String) -> Result<()> {
    info!(
        config_source = %config_source,
        host = %config.server.host,
        port = config.server.port,
        num_threads = config.server.num_threads,
        refresh_interval_seconds = config.refresh.interval_secs,
        history_capacity = config.refresh.history_capacity,
        sonarr = %config.sonarr.url,
        radarr = %config.radarr.url,
        qbittorrent = %config.qbittorrent.url,
        log_level = %config.logging.level,
        "Media dashboard starting"
    );

    let poller = Poller::new(&config).context("Failed to create upstream clients")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let period = Duration::from_secs(config.refresh.interval_secs);

    let state = AppState::new(config);
    let refresh_handle = spawn_refresh_task(poller, state.clone(), period);

    let app = build_router(Arc::new(state)).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        ),
    );

    info!(address = %addr, "Starting TCP listener");

    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "Dashboard listening");

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    refresh_handle.abort();
    info!("Shutting down gracefully");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
