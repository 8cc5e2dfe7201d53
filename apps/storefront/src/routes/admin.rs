//! # Admin Routes
//!
//! The admin panel's backend: store provisioning, catalog CRUD, and the
//! order inbox. Authentication sits in front of these routes at the
//! deployment edge and is out of scope here.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use mandi_core::validation::{
    validate_name, validate_price_cents, validate_sale_price_cents, validate_slug, validate_unit,
};
use mandi_core::{CoreError, Order, OrderStatus, Product, Tenant};
use mandi_db::repository::product::generate_product_id;
use mandi_db::repository::tenant::generate_tenant_id;

use crate::error::ApiError;
use crate::routes::resolve_tenant;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Body for provisioning a new store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub name_localized: String,
    pub logo_url: Option<String>,
    pub theme_color: Option<String>,
    /// ISO 4217; defaults to SAR.
    pub currency_code: Option<String>,
}

/// Body for creating or replacing a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub name_localized: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: i64,
    pub sale_price_cents: Option<i64>,
    pub unit: String,
    pub image_url: Option<String>,
}

impl ProductRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_name(&self.name)?;
        validate_price_cents(self.price_cents)?;
        validate_sale_price_cents(self.sale_price_cents)?;
        validate_unit(&self.unit)?;
        Ok(())
    }
}

/// Body for moving an order to a new status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Query parameters for the order inbox.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub limit: Option<u32>,
}

// =============================================================================
// Tenant Handlers
// =============================================================================

/// Provisions a new store.
pub async fn create_tenant(
    State(state): State<AppState>,
    Json(body): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<Tenant>), ApiError> {
    debug!(slug = %body.slug, "create_tenant");

    validate_slug(&body.slug)?;
    validate_name(&body.name)?;

    let now = Utc::now();
    let tenant = Tenant {
        id: generate_tenant_id(),
        slug: body.slug,
        name: body.name,
        name_localized: body.name_localized,
        logo_url: body.logo_url,
        theme_color: body.theme_color,
        currency_code: body.currency_code.unwrap_or_else(|| "SAR".to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.db.tenants().insert(&tenant).await?;
    info!(slug = %tenant.slug, id = %tenant.id, "Tenant provisioned");

    Ok((StatusCode::CREATED, Json(tenant)))
}

// =============================================================================
// Product Handlers
// =============================================================================

/// Creates a product in a store's catalog.
pub async fn create_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, sku = %body.sku, "create_product");

    body.validate()?;

    let now = Utc::now();
    let product = Product {
        id: generate_product_id(),
        tenant_id: tenant.id,
        sku: body.sku,
        name: body.name,
        name_localized: body.name_localized,
        description: body.description,
        category: body.category,
        price_cents: body.price_cents,
        sale_price_cents: body.sale_price_cents,
        unit: body.unit,
        image_url: body.image_url,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    state.db.products().insert(&product).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replaces a product's editable fields.
pub async fn update_product(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, id = %id, "update_product");

    body.validate()?;

    let existing = state
        .db
        .products()
        .get_by_id(&tenant.id, &id)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::ProductNotFound(id)))?;

    let product = Product {
        sku: body.sku,
        name: body.name,
        name_localized: body.name_localized,
        description: body.description,
        category: body.category,
        price_cents: body.price_cents,
        sale_price_cents: body.sale_price_cents,
        unit: body.unit,
        image_url: body.image_url,
        ..existing
    };

    state.db.products().update(&product).await?;

    Ok(Json(product))
}

/// Soft-deletes a product (hides it from the storefront).
pub async fn delete_product(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, id = %id, "delete_product");

    state.db.products().soft_delete(&tenant.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Order Handlers
// =============================================================================

/// Lists a store's orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<OrderListQuery>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, "list_orders");

    let orders = state
        .db
        .orders()
        .list_for_tenant(&tenant.id, params.limit.unwrap_or(50))
        .await?;

    Ok(Json(orders))
}

/// Moves an order to a new status.
///
/// The transition table lives in `OrderStatus::can_transition_to`; the
/// repository's guarded UPDATE makes the change race-safe.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, id = %id, status = body.status.as_str(), "update_order_status");

    let order = state
        .db
        .orders()
        .get_by_id(&tenant.id, &id)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::OrderNotFound(id.clone())))?;

    if !order.status.can_transition_to(body.status) {
        return Err(CoreError::InvalidOrderStatus {
            order_id: id,
            current_status: order.status.as_str().to_string(),
            requested_status: body.status.as_str().to_string(),
        }
        .into());
    }

    state
        .db
        .orders()
        .update_status(&order.id, order.status, body.status)
        .await?;

    let updated = state
        .db
        .orders()
        .get_by_id(&tenant.id, &order.id)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::OrderNotFound(order.id.clone())))?;

    Ok(Json(updated))
}
