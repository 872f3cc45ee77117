//! Titanic API Binary Entry Point
//!
//! This binary runs the passenger records service. Core functionality is
//! provided by the `titanic_api` library crate.

use clap::Parser;
use std::net::SocketAddr;
use std::str::FromStr;
use titanic_api::{
    config::{AppConfig, Environment},
    metrics,
    server::{AppState, create_router},
    storage::{StorageBuilder, StorageHandles},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Titanic API - Passenger Records Service
#[derive(Parser, Debug)]
#[command(name = "titanic-api", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "APP_CONFIG")]
    config: Option<String>,

    /// Environment profile (development, production, testing)
    #[arg(long, env = "APP_ENV")]
    env: Option<String>,

    /// Server bind address (overrides config file)
    #[arg(long, env = "BIND_ADDR")]
    bind: Option<String>,

    /// Server port (overrides config file)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Read .env before clap resolves env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration file if given, otherwise start from defaults
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(ref env) = cli.env {
        config.environment = Environment::from_str(env)
            .map_err(|_| format!("unknown environment profile: '{}'", env))?;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    config.validate()?;

    // Initialize tracing; debug profiles get verbose crate-level logging
    let default_filter = if config.environment.debug() {
        "info,titanic_api=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        environment = %config.environment,
        "Titanic API - Passenger Records Service"
    );

    // Initialize Prometheus metrics
    metrics::init_metrics()?;

    // Build storage layer
    tracing::info!("Initializing storage at: {}", config.database.url);
    let handles = StorageBuilder::new(&config.database.url)
        .pool_size(config.database.pool_size)
        .build()
        .await?;
    tracing::info!("Storage initialized");

    // Create web server state and router
    let app_state = AppState {
        people: handles.people.clone(),
    };
    let app = create_router(app_state);

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;

    tracing::info!("Web server listening on: http://{}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(handles))
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Setup graceful shutdown signal handler.
async fn shutdown_signal(handles: StorageHandles) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }

    tracing::info!("Shutting down storage...");
    handles.close().await;
}
