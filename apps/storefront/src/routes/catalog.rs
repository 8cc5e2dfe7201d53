//! # Catalog Routes
//!
//! Product browsing, search, and the product detail page.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use mandi_core::validation::validate_search_query;
use mandi_core::{CoreError, Product};

use crate::error::ApiError;
use crate::routes::resolve_tenant;
use crate::state::AppState;

/// Query parameters for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Free-text search term. Empty or absent returns the default listing.
    #[serde(default)]
    pub query: String,

    /// Restrict to one category (ignored when a search term is given).
    pub category: Option<String>,

    /// Maximum results. Defaults to the configured page size.
    pub limit: Option<u32>,
}

/// Browses or searches a store's catalog.
///
/// ## Behavior
/// - `?query=tom` → FTS prefix search across sku/name/localized name
/// - `?category=produce` → category listing
/// - neither → default listing sorted by name
pub async fn list_products(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    let limit = params.limit.unwrap_or(state.config.catalog_page_size);

    let query = validate_search_query(&params.query)?;
    debug!(tenant = %tenant.slug, query = %query, limit, "list_products");

    let products = if !query.is_empty() {
        state.db.products().search(&tenant.id, &query, limit).await?
    } else if let Some(category) = &params.category {
        state
            .db
            .products()
            .list_by_category(&tenant.id, category, limit)
            .await?
    } else {
        state.db.products().list_for_tenant(&tenant.id, limit).await?
    };

    Ok(Json(products))
}

/// Gets one product for the detail page.
///
/// Inactive products 404 here: a deactivated product's detail page
/// disappears along with its catalog listing.
pub async fn get_product(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<Json<Product>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, id = %id, "get_product");

    let product = state
        .db
        .products()
        .get_by_id(&tenant.id, &id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| ApiError::from(CoreError::ProductNotFound(id)))?;

    Ok(Json(product))
}
