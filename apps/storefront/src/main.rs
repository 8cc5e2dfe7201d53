//! # Mandi Storefront Entry Point
//!
//! Binds the API server, serves until shutdown.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from environment
//! 3. Connect to database & run migrations
//! 4. Create state (Database, CartState, AppConfig)
//! 5. Serve the router with graceful shutdown

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use mandi_db::{Database, DbConfig};
use mandi_storefront::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    mandi_storefront::init_tracing();

    info!("Starting Mandi storefront API");

    let config = AppConfig::from_env();
    info!(addr = %config.addr, db = %config.database_path.display(), "Configuration loaded");

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database connected and migrations applied");

    let addr = config.addr.clone();
    let state = AppState::new(db, config);
    let app = mandi_storefront::router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received SIGTERM, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
