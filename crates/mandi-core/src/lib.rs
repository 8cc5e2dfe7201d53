//! # mandi-core: Pure Business Logic for Mandi
//!
//! This crate is the **heart** of the Mandi storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Mandi Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (Web Storefront)                    │   │
//! │  │    Store Directory ──► Catalog ──► Cart Panel ──► Checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront API (axum)                        │   │
//! │  │    list_products, add_to_cart, place_order, etc.               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mandi-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Tenant   │  │   Money   │  │ CartStore │  │   rules   │  │   │
//! │  │   │  Product  │  │  line math│  │ CartLine  │  │  checks   │  │   │
//! │  │   │  Order    │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mandi-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Tenant, Product, Order, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The tenant-isolated shopping cart store
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in minor units (i64) to avoid float errors
//! 4. **Total Cart Operations**: Cart mutations never fail - invalid quantities
//!    normalize to removals, missing ids are no-ops
//!
//! ## Example Usage
//!
//! ```rust
//! use mandi_core::cart::{CartProduct, CartStore};
//!
//! let mut store = CartStore::new();
//! let apples = CartProduct::new("p-1", "Apples", "تفاح", 450, Some(399), "kg").unwrap();
//!
//! // Each add increments the line quantity by exactly one
//! store.add_item("greengrocer", &apples);
//! store.add_item("greengrocer", &apples);
//!
//! assert_eq!(store.item_count("greengrocer"), 2);
//! // Sale price wins when present: 2 × 399
//! assert_eq!(store.subtotal("greengrocer").cents(), 798);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mandi_core::Money` instead of
// `use mandi_core::money::Money`

pub use cart::{Cart, CartLine, CartProduct, CartStore, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;
