use std::net::SocketAddr;

use anyhow::Context;
use teller_read_api::api::{create_app, AppState};
use teller_read_api::config::Settings;
use teller_read_api::observability::{init_logging, init_metrics, secret_fingerprint, LogConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;

    // Initialize logging
    init_logging(&LogConfig::from(&settings.logging));
    info!(
        version = env!("CARGO_PKG_VERSION"),
        data_path = %settings.data.path.display(),
        static_db = settings.features.static_db,
        manual_data = settings.features.manual_data,
        "Configuration loaded"
    );

    match (&settings.auth.token, settings.auth.require_auth) {
        (Some(token), true) => info!(token_fingerprint = %secret_fingerprint(token), "Bearer auth enabled"),
        (None, true) => warn!("REQUIRE_AUTH is on but BACKEND_API_TOKEN is empty; dataset routes will reject every request"),
        (_, false) => warn!("Dataset routes are unauthenticated"),
    }

    if let Some(metrics_port) = settings.server.metrics_port {
        let metrics_addr: SocketAddr = format!("{}:{}", settings.server.host, metrics_port)
            .parse()
            .context("invalid metrics listen address")?;
        init_metrics(metrics_addr).context("failed to start Prometheus exporter")?;
        info!(address = %metrics_addr, "Metrics exporter listening");
    }

    let addr: SocketAddr = settings
        .listen_addr()
        .parse()
        .context("invalid listen address")?;

    let app = create_app(AppState::from_settings(settings));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(address = %addr, "Read API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Read API shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
