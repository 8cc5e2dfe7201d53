//! # Routes Module
//!
//! Router assembly and shared handler helpers.
//!
//! ## API Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Mandi API Routes                                │
//! │                                                                         │
//! │  Storefront (customer-facing)                                          │
//! │  ──────────────────────────                                            │
//! │  GET    /api/health                                                    │
//! │  GET    /api/tenants                          store directory          │
//! │  GET    /api/tenants/{slug}                   store page               │
//! │  GET    /api/tenants/{slug}/products          browse / search          │
//! │  GET    /api/tenants/{slug}/products/{id}     product detail           │
//! │  GET    /api/tenants/{slug}/cart              cart panel + badge       │
//! │  POST   /api/tenants/{slug}/cart/items        add one unit             │
//! │  PUT    /api/tenants/{slug}/cart/items/{pid}  set quantity             │
//! │  DELETE /api/tenants/{slug}/cart/items/{pid}  remove line              │
//! │  DELETE /api/tenants/{slug}/cart              clear cart               │
//! │  POST   /api/tenants/{slug}/orders            checkout                 │
//! │  GET    /api/tenants/{slug}/orders/{id}       order confirmation       │
//! │                                                                         │
//! │  Admin                                                                 │
//! │  ─────                                                                 │
//! │  POST   /api/admin/tenants                        provision a store    │
//! │  POST   /api/admin/tenants/{slug}/products        create product       │
//! │  PUT    /api/admin/tenants/{slug}/products/{id}   update product       │
//! │  DELETE /api/admin/tenants/{slug}/products/{id}   soft delete          │
//! │  GET    /api/admin/tenants/{slug}/orders          order inbox          │
//! │  PATCH  /api/admin/tenants/{slug}/orders/{id}/status                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod tenants;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mandi_core::{CoreError, Tenant};

use crate::error::ApiError;
use crate::state::AppState;

/// Assembles the full API router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/api/health", get(health))
        // Storefront
        .route("/api/tenants", get(tenants::list_tenants))
        .route("/api/tenants/{slug}", get(tenants::get_tenant))
        .route("/api/tenants/{slug}/products", get(catalog::list_products))
        .route(
            "/api/tenants/{slug}/products/{id}",
            get(catalog::get_product),
        )
        .route(
            "/api/tenants/{slug}/cart",
            get(cart::get_cart).delete(cart::clear_cart),
        )
        .route("/api/tenants/{slug}/cart/items", post(cart::add_to_cart))
        .route(
            "/api/tenants/{slug}/cart/items/{product_id}",
            put(cart::update_cart_item).delete(cart::remove_from_cart),
        )
        .route("/api/tenants/{slug}/orders", post(orders::place_order))
        .route("/api/tenants/{slug}/orders/{id}", get(orders::get_order))
        // Admin
        .route("/api/admin/tenants", post(admin::create_tenant))
        .route(
            "/api/admin/tenants/{slug}/products",
            post(admin::create_product),
        )
        .route(
            "/api/admin/tenants/{slug}/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/tenants/{slug}/orders", get(admin::list_orders))
        .route(
            "/api/admin/tenants/{slug}/orders/{id}/status",
            patch(admin::update_order_status),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the CORS layer from the configured origin.
///
/// An unparseable or wildcard origin falls back to allowing any origin,
/// which is the right default for local development.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origin != "*" {
        if let Ok(value) = origin.parse::<HeaderValue>() {
            return layer.allow_origin(value);
        }
        tracing::warn!(origin, "Invalid MANDI_CORS_ORIGIN, allowing any origin");
    }

    layer.allow_origin(Any)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// Liveness/readiness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Resolves a tenant slug to its row, or a 404.
///
/// Every `/{slug}/...` handler goes through here, so deactivated stores
/// are invisible across the whole API.
pub(crate) async fn resolve_tenant(state: &AppState, slug: &str) -> Result<Tenant, ApiError> {
    state
        .db
        .tenants()
        .get_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::TenantNotFound(slug.to_string())))
}
