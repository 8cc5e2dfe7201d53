//! # Error Types
//!
//! Domain-specific error types for mandi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mandi-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mandi-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Storefront API errors (in app)                                        │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Frontend     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slug, ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Cart mutations are total functions and raise NO errors; the variants
//!    below only surface at boundaries (lookup, checkout, input parsing)

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tenant (store) cannot be found.
    ///
    /// ## When This Occurs
    /// - Slug in the URL doesn't match any store
    /// - Store was deactivated (soft delete)
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),

    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Product ID doesn't exist in the tenant's catalog
    /// - Product was deactivated (soft delete)
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Checkout was attempted with nothing in the tenant's cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Place order"
    ///      │
    ///      ▼
    /// Cart for tenant is empty
    ///      │
    ///      ▼
    /// EmptyCart { tenant_id }
    ///      │
    ///      ▼
    /// UI shows: "Your cart is empty"
    /// ```
    #[error("Cart for tenant {tenant_id} is empty")]
    EmptyCart { tenant_id: String },

    /// Order is not in a state that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Confirming a cancelled order
    /// - Delivering an order that was never confirmed
    #[error("Order {order_id} is {current_status}, cannot move to {requested_status}")]
    InvalidOrderStatus {
        order_id: String,
        current_status: String,
        requested_status: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid slug).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate slug).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::EmptyCart {
            tenant_id: "greengrocer".to_string(),
        };
        assert_eq!(err.to_string(), "Cart for tenant greengrocer is empty");

        let err = CoreError::InvalidOrderStatus {
            order_id: "o-1".to_string(),
            current_status: "cancelled".to_string(),
            requested_status: "confirmed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Order o-1 is cancelled, cannot move to confirmed"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "slug".to_string(),
        };
        assert_eq!(err.to_string(), "slug is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
