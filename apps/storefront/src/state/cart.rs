//! # Cart State
//!
//! Ownership wrapper around the tenant-isolated cart store.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple handlers may access/modify carts
//! 2. Only one handler should modify the store at a time
//! 3. axum handlers run concurrently
//!
//! The store itself (in `mandi-core`) is single-writer by design; all
//! synchronization lives here, at the edge.
//!
//! ## Why Not RwLock?
//! Cart operations are quick, and most operations modify state.
//! A RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use mandi_core::CartStore;

/// Shared, mutex-protected cart store.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    store: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            store: Arc::new(Mutex::new(CartStore::new())),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_store(|s| s.totals(tenant_id));
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = self.store.lock().expect("Cart mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_store_mut(|s| s.add_item(tenant_id, &product));
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.store.lock().expect("Cart mutex poisoned");
        f(&mut store)
    }
}
