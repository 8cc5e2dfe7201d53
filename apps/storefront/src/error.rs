//! # API Error Type
//!
//! Unified error type for API handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mandi                                  │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  GET /api/tenants/x/products                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler Function                                                │  │
//! │  │  Result<Json<T>, ApiError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Database Error? ─── DbError::QueryFailed("...") ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Validation Error? ─── ValidationError ────────── ApiError ────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── HTTP status + {"code": "NOT_FOUND", "message": "..."} ────────  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use mandi_core::{CoreError, ValidationError};
use mandi_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the frontend receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 1b2c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in Frontend
/// ```typescript
/// const res = await fetch(`/api/tenants/${slug}/products/${id}`);
/// if (!res.ok) {
///   const err = await res.json();
///   switch (err.code) {
///     case 'NOT_FOUND': showNotification('Product not found'); break;
///     case 'VALIDATION_ERROR': showForm(err.message); break;
///     default: showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Database operation failed (500)
    DatabaseError,

    /// Business logic error (422)
    BusinessLogic,

    /// Internal server error (500)
    Internal,

    /// Checkout attempted on an empty cart (422)
    EmptyCart,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::BusinessLogic => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::EmptyCart => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TenantNotFound(slug) => ApiError::not_found("Store", &slug),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::EmptyCart { tenant_id } => ApiError::new(
                ErrorCode::EmptyCart,
                format!("Cart for store {} is empty", tenant_id),
            ),
            CoreError::InvalidOrderStatus {
                order_id,
                current_status,
                requested_status,
            } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!(
                    "Order {} is {}, cannot move to {}",
                    order_id, current_status, requested_status
                ),
            ),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts validation errors directly (skipping the CoreError wrapper).
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Makes ApiError usable as an axum handler return value.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::EmptyCart.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_db_not_found_maps_to_404() {
        let api: ApiError = DbError::not_found("Product", "p-1").into();
        assert!(matches!(api.code, ErrorCode::NotFound));
        assert_eq!(api.message, "Product not found: p-1");
    }

    #[test]
    fn test_core_empty_cart_maps_to_empty_cart() {
        let api: ApiError = CoreError::EmptyCart {
            tenant_id: "t-1".to_string(),
        }
        .into();
        assert!(matches!(api.code, ErrorCode::EmptyCart));
    }
}
