//! # Order Routes
//!
//! Checkout (cart → order) and order lookup.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Flow                                     │
//! │                                                                         │
//! │  POST /api/tenants/{slug}/orders { customerName, customerPhone, ... }  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Validate customer fields                                           │
//! │  2. Snapshot the tenant's cart (EmptyCart error if nothing in it)      │
//! │  3. Build Order + OrderItems from the cart lines                       │
//! │     • effective unit prices frozen into the items                      │
//! │  4. Persist order + items in one transaction                           │
//! │  5. Clear the tenant's cart                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  201 { order, items }                                                  │
//! │                                                                         │
//! │  NOTE: the cart is only cleared AFTER the insert commits; a database   │
//! │  failure leaves the basket intact for a retry.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mandi_core::validation::{validate_customer_name, validate_phone};
use mandi_core::{Cart, CoreError, Order, OrderItem, OrderStatus};
use mandi_db::repository::order::{
    generate_order_id, generate_order_item_id, generate_order_number,
};

use crate::error::ApiError;
use crate::routes::resolve_tenant;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Body for placing an order from the current cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

/// Order with its items, as shown on the confirmation page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Places an order from the store's current cart.
pub async fn place_order(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, "place_order");

    validate_customer_name(&body.customer_name)?;
    validate_phone(&body.customer_phone)?;

    // Snapshot the cart; keep holding nothing across the await below
    let cart = state
        .cart
        .with_store(|s| s.cart(&tenant.id).cloned())
        .ok_or_else(|| {
            ApiError::from(CoreError::EmptyCart {
                tenant_id: tenant.id.clone(),
            })
        })?;

    let (order, items) = build_order(&tenant.id, &cart, &body);

    state.db.orders().create_with_items(&order, &items).await?;

    // The basket only empties once the order is durably stored
    state.cart.with_store_mut(|s| s.clear(&tenant.id));

    info!(
        tenant = %tenant.slug,
        order_number = %order.order_number,
        total_cents = order.total_cents,
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(OrderResponse { order, items })))
}

/// Gets an order with its items (confirmation page).
pub async fn get_order(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<Json<OrderResponse>, ApiError> {
    let tenant = resolve_tenant(&state, &slug).await?;
    debug!(tenant = %tenant.slug, id = %id, "get_order");

    let order = state
        .db
        .orders()
        .get_by_id(&tenant.id, &id)
        .await?
        .ok_or_else(|| ApiError::from(CoreError::OrderNotFound(id)))?;

    let items = state.db.orders().get_items(&order.id).await?;

    Ok(Json(OrderResponse { order, items }))
}

// =============================================================================
// Order Assembly
// =============================================================================

/// Builds an order and its items from a cart snapshot.
///
/// Effective unit prices (sale price when present) are frozen into the
/// item rows; the order total is the cart subtotal since delivery fees
/// and payment are out of scope.
fn build_order(tenant_id: &str, cart: &Cart, body: &CheckoutRequest) -> (Order, Vec<OrderItem>) {
    let now = Utc::now();
    let subtotal_cents = cart.subtotal().cents();

    let order = Order {
        id: generate_order_id(),
        tenant_id: tenant_id.to_string(),
        order_number: generate_order_number(),
        status: OrderStatus::Placed,
        customer_name: body.customer_name.trim().to_string(),
        customer_phone: body.customer_phone.trim().to_string(),
        delivery_address: body.delivery_address.clone(),
        subtotal_cents,
        total_cents: subtotal_cents,
        notes: body.notes.clone(),
        created_at: now,
        updated_at: now,
    };

    let items = cart
        .lines
        .iter()
        .map(|line| OrderItem {
            id: generate_order_item_id(),
            order_id: order.id.clone(),
            product_id: line.product_id.clone(),
            name_snapshot: line.name.clone(),
            name_localized_snapshot: line.name_localized.clone(),
            unit_price_cents: line.effective_unit_price().cents(),
            quantity: line.quantity,
            unit_snapshot: line.unit.clone(),
            line_total_cents: line.line_total().cents(),
            created_at: now,
        })
        .collect();

    (order, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandi_core::CartProduct;

    fn checkout_body() -> CheckoutRequest {
        CheckoutRequest {
            customer_name: "Amina".to_string(),
            customer_phone: "+966 50 123 4567".to_string(),
            delivery_address: None,
            notes: None,
        }
    }

    #[test]
    fn test_build_order_freezes_effective_prices() {
        let mut cart = Cart::new("t-1");
        let dates = CartProduct::new("p-1", "Dates", "تمر", 1000, Some(800), "kg").unwrap();
        cart.add(&dates);
        cart.add(&dates);

        let (order, items) = build_order("t-1", &cart, &checkout_body());

        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.subtotal_cents, 1600);
        assert_eq!(order.total_cents, 1600);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price_cents, 800);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].line_total_cents, 1600);
        assert_eq!(items[0].order_id, order.id);
    }
}
