// src/main.rs

use std::net::SocketAddr;

use anyhow::{Context, Result};
use has_balance::{
    api::create_app,
    blockchain::{services::balance::BalanceChecker, NetworkRegistry},
    config::Config,
    AppState,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> Result<()> {
    let addr = SocketAddr::new(state.config.host, state.config.port);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🚀 HTTP Server listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("HTTP server terminated")
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "has_balance=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            return;
        }
    };

    // Build one JSON-RPC client per network
    let registry = match NetworkRegistry::from_config(&config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("❌ Failed to initialize network clients: {:#}", e);
            return;
        }
    };
    info!(
        "Querying networks {:?} (failure policy: {})",
        registry.names(),
        config.failure_policy
    );

    let checker = BalanceChecker::new(registry, config.failure_policy);
    let app_state = AppState::new(config, checker);

    if let Err(e) = run_http_server(app_state).await {
        error!("❌ {:#}", e);
    }
}
