//! # Cart Routes
//!
//! Cart manipulation for one store's shopping session.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │  Form    │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       place_order                        │
//! │                   update_cart_item  (orders.rs)                        │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation answers with the full cart so the panel and the badge
//! re-render from one response.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mandi_core::{Cart, CartLine, CartProduct, CartTotals, CoreError};

use crate::error::ApiError;
use crate::routes::resolve_tenant;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    /// Snapshot of one tenant's cart out of the store.
    fn for_tenant(state: &AppState, tenant_id: &str) -> Self {
        state.cart.with_store(|s| match s.cart(tenant_id) {
            Some(cart) => CartResponse::from(cart),
            None => CartResponse {
                lines: Vec::new(),
                totals: CartTotals::empty(),
            },
        })
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
}

/// Body for setting a line's quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// Gets the current cart contents for a store.
///
/// The cart badge reads `totals.itemCount` from this same response.
pub async fn get_cart(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, "get_cart");

    Ok(Json(CartResponse::for_tenant(&state, &tenant.id)))
}

/// Adds one unit of a product to the store's cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases by exactly 1
/// - Product not in cart: added as a new line with quantity 1
/// - Price is frozen at time of adding (a catalog price change later
///   does not move lines already in the basket)
///
/// Callers wanting a specific quantity follow up with the PUT route.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, product_id = %body.product_id, "add_to_cart");

    // Snapshot current catalog data for the line
    let product = state
        .db
        .products()
        .get_by_id(&tenant.id, &body.product_id)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| ApiError::from(CoreError::ProductNotFound(body.product_id.clone())))?;

    let cart_product = CartProduct::from_product(&product);
    state
        .cart
        .with_store_mut(|s| s.add_item(&tenant.id, &cart_product));

    Ok(Json(CartResponse::for_tenant(&state, &tenant.id)))
}

/// Sets the quantity of a line in the store's cart.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Product not in cart: no-op (the response simply shows the cart as-is)
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path((slug, product_id)): Path<(String, String)>,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, product_id = %product_id, quantity = body.quantity, "update_cart_item");

    state
        .cart
        .with_store_mut(|s| s.update_quantity(&tenant.id, &product_id, body.quantity));

    Ok(Json(CartResponse::for_tenant(&state, &tenant.id)))
}

/// Removes a line from the store's cart. No-op when absent.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path((slug, product_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, product_id = %product_id, "remove_from_cart");

    state
        .cart
        .with_store_mut(|s| s.remove_item(&tenant.id, &product_id));

    Ok(Json(CartResponse::for_tenant(&state, &tenant.id)))
}

/// Clears the store's cart.
///
/// ## When Used
/// - Customer empties the basket
/// - After checkout (orders.rs clears internally as well)
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, "clear_cart");

    state.cart.with_store_mut(|s| s.clear(&tenant.id));

    Ok(Json(CartResponse::for_tenant(&state, &tenant.id)))
}
