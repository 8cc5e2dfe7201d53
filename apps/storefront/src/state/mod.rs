//! # State Module
//!
//! Application state for the storefront API.
//!
//! ## State Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      axum Router                                │   │
//! │  │  Router::new().with_state(app_state.clone())                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   Database   │  │  CartState   │  │   AppConfig      │              │
//! │  │              │  │              │  │                  │              │
//! │  │  (SQLite     │  │  Arc<Mutex<  │  │  addr, db path,  │              │
//! │  │   pool)      │  │  CartStore>> │  │  cors, paging    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool (thread-safe)                     │
//! │  • CartState: protected by Arc<Mutex<T>> for exclusive access           │
//! │  • AppConfig: read-only after initialization                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Globals
//! The cart store is NOT a process-wide singleton. It is constructed once
//! at startup, owned by `AppState`, and injected into handlers through
//! axum's `State` extractor. Tests construct their own isolated instances.

mod cart;

pub use cart::CartState;

use std::sync::Arc;

use mandi_db::Database;

use crate::config::AppConfig;

/// Shared application state, cheaply cloneable per request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database handle (internal pool, thread-safe).
    pub db: Database,

    /// The shopping-session cart store.
    pub cart: CartState,

    /// Read-only configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wires up application state from its parts.
    pub fn new(db: Database, config: AppConfig) -> Self {
        AppState {
            db,
            cart: CartState::new(),
            config: Arc::new(config),
        }
    }
}
