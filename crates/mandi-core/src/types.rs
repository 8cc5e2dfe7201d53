//! # Domain Types
//!
//! Core domain types used throughout Mandi.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Tenant      │   │    Product      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  slug (business)│   │  sku (business) │   │  order_number   │       │
//! │  │  name           │   │  name/localized │   │  status         │       │
//! │  │  currency_code  │   │  price/sale     │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   OrderItem     │   │  OrderStatus    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  *_snapshot     │   │  Placed         │                             │
//! │  │  quantity       │   │  Confirmed      │                             │
//! │  │  line_total     │   │  Delivered      │                             │
//! │  └─────────────────┘   │  Cancelled      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (slug, sku, order_number) - human-readable, URL-safe

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tenant
// =============================================================================

/// An independent store within the multi-tenant platform.
///
/// Each tenant has its own product catalog, branding, and currency.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Tenant {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// URL-safe business identifier (e.g., "green-basket").
    pub slug: String,

    /// Display name shown in the store directory.
    pub name: String,

    /// Localized display name (e.g., Arabic).
    pub name_localized: String,

    /// Logo image URL, if the tenant uploaded one.
    pub logo_url: Option<String>,

    /// Brand accent color as a hex string (e.g., "#2e7d32").
    pub theme_color: Option<String>,

    /// Currency code (ISO 4217) all of this tenant's prices use.
    pub currency_code: String,

    /// Whether the store is live (soft delete).
    pub is_active: bool,

    /// When the tenant was provisioned.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the tenant was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in a tenant's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this product belongs to.
    pub tenant_id: String,

    /// Stock Keeping Unit - business identifier, unique per tenant.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Localized display name.
    pub name_localized: String,

    /// Optional description for the product detail page.
    pub description: Option<String>,

    /// Category key for browsing (e.g., "produce", "dairy").
    pub category: Option<String>,

    /// Base unit price in minor units. Non-negative.
    pub price_cents: i64,

    /// Discounted unit price in minor units, when the product is on sale.
    pub sale_price_cents: Option<i64>,

    /// Display unit of measure (e.g., "kg", "unit", "pack").
    pub unit: String,

    /// Product image URL.
    pub image_url: Option<String>,

    /// Whether product is visible in the storefront (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the sale price as a Money type, when present.
    #[inline]
    pub fn sale_price(&self) -> Option<Money> {
        self.sale_price_cents.map(Money::from_cents)
    }

    /// The price a customer actually pays per unit.
    ///
    /// The sale price wins whenever it is set; whether it is actually
    /// lower than the base price is a display-layer concern.
    #[inline]
    pub fn effective_price_cents(&self) -> i64 {
        self.sale_price_cents.unwrap_or(self.price_cents)
    }

    /// Checks whether the product currently carries a sale price.
    #[inline]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price_cents.is_some()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a placed order.
///
/// ```text
/// Placed ──► Confirmed ──► Delivered
///    │            │
///    └────────────┴──────► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order was placed by the customer and awaits the store.
    Placed,
    /// Store accepted the order and is preparing it.
    Confirmed,
    /// Order was handed to the customer.
    Delivered,
    /// Order was cancelled by the store or the customer.
    Cancelled,
}

impl OrderStatus {
    /// Checks whether a transition to `next` is allowed.
    ///
    /// Delivered and Cancelled are terminal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Placed, OrderStatus::Confirmed)
                | (OrderStatus::Placed, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Delivered)
                | (OrderStatus::Confirmed, OrderStatus::Cancelled)
        )
    }

    /// Lowercase wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Placed
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed customer order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub tenant_id: String,
    /// Human-readable order reference shown to the customer.
    pub order_number: String,
    pub status: OrderStatus,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: Option<String>,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of placement.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at time of placement (frozen).
    pub name_snapshot: String,
    /// Localized product name at time of placement (frozen).
    pub name_localized_snapshot: String,
    /// Effective unit price in minor units at time of placement (frozen).
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: i64,
    /// Display unit at time of placement (frozen).
    pub unit_snapshot: String,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, sale_price_cents: Option<i64>) -> Product {
        Product {
            id: "p-1".to_string(),
            tenant_id: "t-1".to_string(),
            sku: "PRD-001".to_string(),
            name: "Tomatoes".to_string(),
            name_localized: "طماطم".to_string(),
            description: None,
            category: Some("produce".to_string()),
            price_cents,
            sale_price_cents,
            unit: "kg".to_string(),
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_price_prefers_sale_price() {
        assert_eq!(product(500, None).effective_price_cents(), 500);
        assert_eq!(product(500, Some(450)).effective_price_cents(), 450);
        assert!(product(500, Some(450)).is_on_sale());
        assert!(!product(500, None).is_on_sale());
    }

    #[test]
    fn test_order_status_transitions() {
        use OrderStatus::*;

        assert!(Placed.can_transition_to(Confirmed));
        assert!(Placed.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Delivered));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Placed.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Placed));
    }

    #[test]
    fn test_order_status_default_and_str() {
        assert_eq!(OrderStatus::default(), OrderStatus::Placed);
        assert_eq!(OrderStatus::Delivered.as_str(), "delivered");
    }
}
