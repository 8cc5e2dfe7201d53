//! # Tenant Routes
//!
//! The store directory and individual store pages.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use mandi_core::Tenant;

use crate::error::ApiError;
use crate::routes::resolve_tenant;
use crate::state::AppState;

/// Lists active stores for the directory page.
pub async fn list_tenants(State(state): State<AppState>) -> Result<Json<Vec<Tenant>>, ApiError> {
    debug!("list_tenants");

    let tenants = state.db.tenants().list_active(100).await?;
    Ok(Json(tenants))
}

/// Gets one store by slug (branding, currency, localized name).
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Tenant>, ApiError> {
    debug!(slug = %slug, "get_tenant");

    let tenant = resolve_tenant(&state, &slug).await?;
    Ok(Json(tenant))
}
