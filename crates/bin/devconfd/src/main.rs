//! # devconfd
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository, event bus and [`DeviceService`]
//! - Build the axum router and serve it until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use devconf_adapter_http_axum::state::AppState;
use devconf_adapter_storage_sqlite_sqlx::device_repo::SqliteDeviceRepository;
use devconf_adapter_storage_sqlite_sqlx::pool;
use devconf_app::event_bus::InProcessEventBus;
use devconf_app::services::device_service::DeviceService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|err| {
            eprintln!("invalid log filter {:?}: {err}", config.logging.filter);
            EnvFilter::new("info")
        }))
        .init();

    // Database
    let db = pool::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .with_context(|| format!("failed to open database {}", config.database_url()))?;
    let device_repo = SqliteDeviceRepository::new(db.pool().clone());

    // Event bus and services
    let event_bus = Arc::new(InProcessEventBus::new(config.events.capacity));
    let device_service = DeviceService::new(device_repo, Arc::clone(&event_bus));

    // HTTP
    let state = AppState::new(device_service, event_bus);
    let app = devconf_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "devconfd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("devconfd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
