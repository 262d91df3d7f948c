use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotel_booking::cli::{Cli, Commands};
use hotel_booking::config::Config;
use hotel_booking::db;
use hotel_booking::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?.with_overrides(cli.overrides());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hotel Booking API v{}", env!("CARGO_PKG_VERSION"));
    match &config.source {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::info!(
            "No config file at {}, using defaults",
            cli.config.display()
        ),
    }

    let store = db::init(&config.database).await?;

    match cli.command() {
        Commands::Seed => {
            let store = store.context("Seeding requires a database URL (--database-url or DATABASE_URL)")?;
            let inserted = db::seed_hotels(store.as_ref()).await?;
            tracing::info!(inserted, "Seed complete");
            Ok(())
        }
        Commands::Serve => serve(config, store).await,
    }
}

async fn serve(config: Config, store: Option<db::StoreHandle>) -> Result<()> {
    if config.database.seed_on_startup {
        match store.as_deref() {
            Some(store) => {
                db::seed_hotels(store).await?;
            }
            None => tracing::warn!("seed_on_startup is set but no database is configured"),
        }
    }

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, store));
    let app = hotel_booking::api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
