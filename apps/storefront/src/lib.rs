//! # Mandi Storefront Library
//!
//! Core library for the Mandi storefront HTTP API.
//! This is the main entry point that configures the router and state.
//!
//! ## Module Organization
//! ```text
//! mandi_storefront/
//! ├── lib.rs          ◄─── You are here (router & tracing setup)
//! ├── config.rs       ◄─── Environment configuration
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState wiring
//! │   └── cart.rs     ◄─── Cart state management
//! ├── routes/
//! │   ├── mod.rs      ◄─── Router assembly + shared helpers
//! │   ├── tenants.rs  ◄─── Store directory
//! │   ├── catalog.rs  ◄─── Product browse/search/detail
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── orders.rs   ◄─── Checkout and order lookup
//! │   └── admin.rs    ◄─── Tenant/product/order administration
//! └── error.rs        ◄─── API error type for handlers
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • MANDI_ADDR, MANDI_DB_PATH, MANDI_CORS_ORIGIN                      │
//! │                                                                         │
//! │  3. Connect to Database ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode                                              │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  4. Initialize State ─────────────────────────────────────────────────► │
//! │     • Database pool + empty cart store + config                         │
//! │                                                                         │
//! │  5. Serve ────────────────────────────────────────────────────────────► │
//! │     • axum router with CORS + request tracing                           │
//! │     • Graceful shutdown on Ctrl+C / SIGTERM                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::AppConfig;
pub use state::AppState;

/// Builds the full API router with state attached.
///
/// Kept separate from `main` so integration tests can drive the router
/// directly without binding a socket.
pub fn router(state: AppState) -> axum::Router {
    routes::router(state)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mandi=trace` - Show trace for mandi crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mandi=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
