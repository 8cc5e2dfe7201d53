//! # Cart Module
//!
//! The tenant-isolated shopping cart store.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Frontend Action          API Route                Store Change         │
//! │  ───────────────          ─────────                ────────────         │
//! │                                                                         │
//! │  Click "Add" ────────────► add_item() ───────────► qty += 1 / new line │
//! │                                                                         │
//! │  Change Quantity ────────► update_quantity() ────► qty = n (0 removes) │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ────────► line deleted        │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ──────────────► tenant cart emptied │
//! │                                                                         │
//! │  Cart Badge ─────────────► item_count() ─────────► (read only)         │
//! │                                                                         │
//! │  NOTE: Every mutation is a TOTAL function. Unknown product ids are     │
//! │        no-ops, non-positive quantities become removals, and nothing    │
//! │        here ever returns an error.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tenant Isolation
//! Carts are keyed by tenant id first, then by product id within the
//! tenant's cart. One customer browsing two stores keeps two fully
//! independent carts; the badge count for one store never sees the other.
//!
//! ## Ownership
//! The store is deliberately unsynchronized. The owning application wraps
//! it (`Arc<Mutex<CartStore>>`) and injects it where needed; consumers read
//! through the query methods and never mutate returned lines directly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Product (validated input record)
// =============================================================================

/// The product snapshot handed to `add_item`.
///
/// ## Why a Separate Type?
/// The store never reaches into the catalog. Callers describe the product
/// once, at the boundary, through a record that has already been validated:
/// no empty identifiers, no negative prices. From then on every cart
/// operation is total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartProduct {
    /// Product ID (UUID) this snapshot represents.
    pub product_id: String,

    /// Display name at time of adding.
    pub name: String,

    /// Localized display name at time of adding.
    pub name_localized: String,

    /// Base unit price in minor units. Non-negative.
    pub unit_price_cents: i64,

    /// Sale unit price in minor units, when the product is on sale.
    /// When present it is the effective price; the store does not check
    /// that it is actually lower than the base price.
    pub sale_price_cents: Option<i64>,

    /// Display unit of measure ("kg", "unit", ...).
    pub unit: String,
}

impl CartProduct {
    /// Builds a validated cart product from raw parts.
    ///
    /// ## Errors
    /// - Empty `product_id` or `name`
    /// - Negative base or sale price
    ///
    /// ## Example
    /// ```rust
    /// use mandi_core::cart::CartProduct;
    ///
    /// assert!(CartProduct::new("p-1", "Apples", "تفاح", 450, None, "kg").is_ok());
    /// assert!(CartProduct::new("p-1", "Apples", "تفاح", -450, None, "kg").is_err());
    /// assert!(CartProduct::new("", "Apples", "تفاح", 450, None, "kg").is_err());
    /// ```
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        name_localized: impl Into<String>,
        unit_price_cents: i64,
        sale_price_cents: Option<i64>,
        unit: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let product_id = product_id.into();
        let name = name.into();

        if product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }

        if name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            });
        }

        if unit_price_cents < 0 {
            return Err(ValidationError::MustBePositive {
                field: "price".to_string(),
            });
        }

        if matches!(sale_price_cents, Some(sale) if sale < 0) {
            return Err(ValidationError::MustBePositive {
                field: "sale_price".to_string(),
            });
        }

        Ok(CartProduct {
            product_id,
            name,
            name_localized: name_localized.into(),
            unit_price_cents,
            sale_price_cents,
            unit: unit.into(),
        })
    }

    /// Snapshots a catalog product.
    ///
    /// Catalog rows were validated when they entered the database, so
    /// this conversion is infallible.
    pub fn from_product(product: &Product) -> Self {
        CartProduct {
            product_id: product.id.clone(),
            name: product.name.clone(),
            name_localized: product.name_localized.clone(),
            unit_price_cents: product.price_cents,
            sale_price_cents: product.sale_price_cents,
            unit: product.unit.clone(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One row in a tenant's cart.
///
/// ## Design Notes
/// - `id`: synthetic line identifier, distinct from `product_id` so a
///   future variant model can hold several lines for one product
/// - Price fields are frozen at time of adding; a later catalog price
///   change does not move the line
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Synthetic line identifier (UUID).
    pub id: String,

    /// Product this line represents. Unique within a tenant's cart.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Localized product name at time of adding (frozen).
    pub name_localized: String,

    /// Base unit price in minor units at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Sale unit price at time of adding (frozen).
    pub sale_price_cents: Option<i64>,

    /// Quantity in cart. Always >= 1 while the line exists.
    pub quantity: i64,

    /// Display unit of measure (frozen).
    pub unit: String,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_cart_product(product: &CartProduct) -> Self {
        CartLine {
            id: Uuid::new_v4().to_string(),
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            name_localized: product.name_localized.clone(),
            unit_price_cents: product.unit_price_cents,
            sale_price_cents: product.sale_price_cents,
            quantity: 1,
            unit: product.unit.clone(),
            added_at: Utc::now(),
        }
    }

    /// The price per unit the customer actually pays.
    ///
    /// Sale price wins when present, otherwise the base price.
    #[inline]
    pub fn effective_unit_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents.unwrap_or(self.unit_price_cents))
    }

    /// Line total (effective unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.effective_unit_price().multiply_quantity(self.quantity)
    }

    /// What the customer saves on this line versus the base price.
    ///
    /// Zero when the line has no sale price.
    pub fn savings(&self) -> Money {
        match self.sale_price_cents {
            Some(sale) => {
                Money::from_cents(self.unit_price_cents - sale).multiply_quantity(self.quantity)
            }
            None => Money::zero(),
        }
    }
}

// =============================================================================
// Cart (one tenant)
// =============================================================================

/// The line collection for a single tenant.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - `quantity >= 1` for every line (an update to zero or below removes)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    /// Tenant this cart belongs to.
    pub tenant_id: String,

    /// Lines in the cart, in insertion order.
    pub lines: Vec<CartLine>,

    /// When the cart was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart for a tenant.
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Cart {
            tenant_id: tenant_id.into(),
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a product, merging into an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increments by exactly 1
    /// - Product not in cart: new line with quantity 1
    ///
    /// Always succeeds. Callers wanting a specific quantity use
    /// [`Cart::update_quantity`] afterwards.
    pub fn add(&mut self, product: &CartProduct) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.product_id)
        {
            line.quantity += 1;
            return;
        }

        self.lines.push(CartLine::from_cart_product(product));
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: behaves as [`Cart::remove`]
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Removes a line by product ID. No-op when absent.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    ///
    /// This is the number the cart badge shows, NOT the line count.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of effective line totals.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Money::zero(), |acc, t| acc + t)
    }

    /// Sum of per-line savings from sale prices.
    pub fn total_savings(&self) -> Money {
        self.lines
            .iter()
            .map(CartLine::savings)
            .fold(Money::zero(), |acc, s| acc + s)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart aggregate summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub savings_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal_cents: cart.subtotal().cents(),
            savings_cents: cart.total_savings().cents(),
        }
    }
}

impl CartTotals {
    /// The totals of an empty cart.
    pub fn empty() -> Self {
        CartTotals {
            line_count: 0,
            item_count: 0,
            subtotal_cents: 0,
            savings_cents: 0,
        }
    }
}

// =============================================================================
// Cart Store (all tenants)
// =============================================================================

/// The shopping-session cart store, keyed by tenant.
///
/// ## Lifecycle
/// A tenant's cart materializes on its first `add_item` and is dropped
/// again once the last line goes away, so the map only ever holds tenants
/// with something in the basket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartStore {
    carts: HashMap<String, Cart>,
}

impl CartStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        CartStore {
            carts: HashMap::new(),
        }
    }

    /// Adds one unit of a product to a tenant's cart.
    ///
    /// Creates the tenant's cart on first use; merges by product id.
    pub fn add_item(&mut self, tenant_id: &str, product: &CartProduct) {
        self.carts
            .entry(tenant_id.to_string())
            .or_insert_with(|| Cart::new(tenant_id))
            .add(product);
    }

    /// Sets the quantity of a product in a tenant's cart.
    ///
    /// Non-positive quantities remove the line; unknown tenants or
    /// products are no-ops.
    pub fn update_quantity(&mut self, tenant_id: &str, product_id: &str, quantity: i64) {
        if let Some(cart) = self.carts.get_mut(tenant_id) {
            cart.update_quantity(product_id, quantity);
        }
        self.drop_if_empty(tenant_id);
    }

    /// Removes a product from a tenant's cart. No-op when absent.
    pub fn remove_item(&mut self, tenant_id: &str, product_id: &str) {
        if let Some(cart) = self.carts.get_mut(tenant_id) {
            cart.remove(product_id);
        }
        self.drop_if_empty(tenant_id);
    }

    /// Empties a tenant's cart unconditionally.
    pub fn clear(&mut self, tenant_id: &str) {
        self.carts.remove(tenant_id);
    }

    /// Returns the line for a product in a tenant's cart, if present.
    pub fn item(&self, tenant_id: &str, product_id: &str) -> Option<&CartLine> {
        self.carts.get(tenant_id).and_then(|c| c.line(product_id))
    }

    /// Returns a tenant's cart, if it has any lines.
    pub fn cart(&self, tenant_id: &str) -> Option<&Cart> {
        self.carts.get(tenant_id)
    }

    /// Total quantity across a tenant's cart. Zero for unknown tenants.
    pub fn item_count(&self, tenant_id: &str) -> i64 {
        self.carts.get(tenant_id).map_or(0, Cart::item_count)
    }

    /// Subtotal of a tenant's cart. Zero for unknown tenants.
    pub fn subtotal(&self, tenant_id: &str) -> Money {
        self.carts.get(tenant_id).map_or(Money::zero(), Cart::subtotal)
    }

    /// Aggregate summary of a tenant's cart.
    pub fn totals(&self, tenant_id: &str) -> CartTotals {
        self.carts
            .get(tenant_id)
            .map_or_else(CartTotals::empty, CartTotals::from)
    }

    fn drop_if_empty(&mut self, tenant_id: &str) {
        if self.carts.get(tenant_id).is_some_and(Cart::is_empty) {
            self.carts.remove(tenant_id);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TENANT: &str = "green-basket";
    const OTHER_TENANT: &str = "city-mart";

    fn apples() -> CartProduct {
        CartProduct::new("prod-apples", "Apples", "تفاح", 100, None, "kg").unwrap()
    }

    fn dates_on_sale() -> CartProduct {
        CartProduct::new("prod-dates", "Dates", "تمر", 100, Some(80), "kg").unwrap()
    }

    fn labneh() -> CartProduct {
        CartProduct::new("prod-labneh", "Labneh", "لبنة", 550, None, "unit").unwrap()
    }

    #[test]
    fn test_add_creates_line_with_quantity_one() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());

        let line = store.item(TENANT, "prod-apples").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.name, "Apples");
        assert_ne!(line.id, line.product_id);
    }

    #[test]
    fn test_repeated_add_merges_by_product_id() {
        let mut store = CartStore::new();
        // Five adds of the same product: one line, quantity five
        for _ in 0..5 {
            store.add_item(TENANT, &apples());
        }

        assert_eq!(store.cart(TENANT).unwrap().line_count(), 1);
        assert_eq!(store.item_count(TENANT), 5);
    }

    #[test]
    fn test_add_scenario_counts_and_subtotal() {
        // Spec scenario: product A (price 100, no sale) added twice
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.add_item(TENANT, &apples());

        assert_eq!(store.item_count(TENANT), 2);
        assert_eq!(store.subtotal(TENANT).cents(), 200);
    }

    #[test]
    fn test_sale_price_is_effective_price() {
        // Spec scenario: price 100, sale 80 → subtotal 80
        let mut store = CartStore::new();
        store.add_item(TENANT, &dates_on_sale());

        assert_eq!(store.subtotal(TENANT).cents(), 80);
        assert_eq!(store.totals(TENANT).savings_cents, 20);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.update_quantity(TENANT, "prod-apples", 7);

        assert_eq!(store.item(TENANT, "prod-apples").unwrap().quantity, 7);
        assert_eq!(store.item_count(TENANT), 7);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        // Spec scenario: add, set 5, set 0 → gone, count 0
        let mut store = CartStore::new();
        store.add_item(TENANT, &labneh());
        store.update_quantity(TENANT, "prod-labneh", 5);
        store.update_quantity(TENANT, "prod-labneh", 0);

        assert!(store.item(TENANT, "prod-labneh").is_none());
        assert_eq!(store.item_count(TENANT), 0);

        store.add_item(TENANT, &labneh());
        store.update_quantity(TENANT, "prod-labneh", -3);
        assert!(store.item(TENANT, "prod-labneh").is_none());
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.update_quantity(TENANT, "prod-ghost", 4);

        assert_eq!(store.item_count(TENANT), 1);
        assert!(store.item(TENANT, "prod-ghost").is_none());
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        // Spec scenario: removeItem on a product never added
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.remove_item(TENANT, "prod-ghost");
        store.remove_item(OTHER_TENANT, "prod-apples");

        assert_eq!(store.item_count(TENANT), 1);
    }

    #[test]
    fn test_clear_resets_aggregates_to_zero() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.add_item(TENANT, &dates_on_sale());
        store.clear(TENANT);

        assert_eq!(store.item_count(TENANT), 0);
        assert_eq!(store.subtotal(TENANT).cents(), 0);
        assert!(store.cart(TENANT).is_none());

        let totals = store.totals(TENANT);
        assert_eq!(totals.line_count, 0);
        assert_eq!(totals.item_count, 0);
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.savings_cents, 0);
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        // Same multiset of adds in two different orders
        let mut forward = CartStore::new();
        forward.add_item(TENANT, &apples());
        forward.add_item(TENANT, &dates_on_sale());
        forward.add_item(TENANT, &labneh());
        forward.add_item(TENANT, &apples());

        let mut backward = CartStore::new();
        backward.add_item(TENANT, &labneh());
        backward.add_item(TENANT, &apples());
        backward.add_item(TENANT, &apples());
        backward.add_item(TENANT, &dates_on_sale());

        assert_eq!(
            forward.subtotal(TENANT).cents(),
            backward.subtotal(TENANT).cents()
        );
        assert_eq!(forward.item_count(TENANT), backward.item_count(TENANT));
    }

    #[test]
    fn test_tenant_isolation() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.add_item(TENANT, &apples());
        store.add_item(OTHER_TENANT, &dates_on_sale());

        assert_eq!(store.item_count(TENANT), 2);
        assert_eq!(store.item_count(OTHER_TENANT), 1);
        assert_eq!(store.subtotal(TENANT).cents(), 200);
        assert_eq!(store.subtotal(OTHER_TENANT).cents(), 80);

        // Clearing one tenant leaves the other untouched
        store.clear(TENANT);
        assert_eq!(store.item_count(TENANT), 0);
        assert_eq!(store.item_count(OTHER_TENANT), 1);
    }

    #[test]
    fn test_empty_cart_entry_is_dropped() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.remove_item(TENANT, "prod-apples");

        assert!(store.cart(TENANT).is_none());
    }

    #[test]
    fn test_quantity_invariant_always_positive() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples());
        store.add_item(TENANT, &dates_on_sale());
        store.update_quantity(TENANT, "prod-apples", 3);
        store.update_quantity(TENANT, "prod-dates", 0);

        let cart = store.cart(TENANT).unwrap();
        assert!(cart.lines.iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_cart_product_validation() {
        assert!(CartProduct::new("", "Apples", "تفاح", 100, None, "kg").is_err());
        assert!(CartProduct::new("p-1", "  ", "تفاح", 100, None, "kg").is_err());
        assert!(CartProduct::new("p-1", "Apples", "تفاح", -1, None, "kg").is_err());
        assert!(CartProduct::new("p-1", "Apples", "تفاح", 100, Some(-1), "kg").is_err());
        // Sale price above base price is allowed; display layers decide
        assert!(CartProduct::new("p-1", "Apples", "تفاح", 100, Some(120), "kg").is_ok());
    }

    #[test]
    fn test_mixed_basket_totals() {
        let mut store = CartStore::new();
        store.add_item(TENANT, &apples()); // 100
        store.add_item(TENANT, &apples()); // 100
        store.add_item(TENANT, &dates_on_sale()); // 80 (was 100)
        store.add_item(TENANT, &labneh()); // 550

        let totals = store.totals(TENANT);
        assert_eq!(totals.line_count, 3);
        assert_eq!(totals.item_count, 4);
        assert_eq!(totals.subtotal_cents, 100 + 100 + 80 + 550);
        assert_eq!(totals.savings_cents, 20);
    }
}
