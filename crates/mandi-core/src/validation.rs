//! # Validation Module
//!
//! Input validation utilities for Mandi.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API Route (Rust)                                             │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use mandi_core::validation::{validate_slug, validate_price_cents};
//!
//! // Validate slug before provisioning a tenant
//! validate_slug("green-basket").unwrap();
//!
//! // Validate price before catalog insert
//! validate_price_cents(450).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a tenant slug.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Lowercase alphanumeric plus hyphens (URL-safe)
///
/// ## Example
/// ```rust
/// use mandi_core::validation::validate_slug;
///
/// assert!(validate_slug("green-basket").is_ok());
/// assert!(validate_slug("").is_err());
/// assert!(validate_slug("Green Basket").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: 50,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only lowercase letters, digits, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a product or tenant display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product's display unit ("kg", "unit", "pack", ...).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    let unit = unit.trim();

    if unit.is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    if unit.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "unit".to_string(),
            max: 20,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (returns the default product listing)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a checkout customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a checkout phone number.
///
/// ## Rules
/// - Must not be empty
/// - 5 to 20 characters of digits, spaces, `+`, `-`
///
/// Loose by design: this is a contact string, not an E.164 parser.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_phone".to_string(),
        });
    }

    if phone.len() < 5 || phone.len() > 20 {
        return Err(ValidationError::OutOfRange {
            field: "customer_phone".to_string(),
            min: 5,
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "customer_phone".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use mandi_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an optional sale price in minor units.
///
/// Only checks the sign; whether the sale price actually undercuts the
/// base price is a display-layer concern.
pub fn validate_sale_price_cents(cents: Option<i64>) -> ValidationResult<()> {
    if let Some(cents) = cents {
        if cents < 0 {
            return Err(ValidationError::OutOfRange {
                field: "sale_price".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use mandi_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("green-basket").is_ok());
        assert!(validate_slug("store7").is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug("   ").is_err());
        assert!(validate_slug("Green-Basket").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug(&"a".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Organic Tomatoes 1kg").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_unit() {
        assert!(validate_unit("kg").is_ok());
        assert!(validate_unit("unit").is_ok());
        assert!(validate_unit("").is_err());
        assert!(validate_unit(&"x".repeat(30)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  milk ").unwrap(), "milk");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(150)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_sale_price_cents() {
        assert!(validate_sale_price_cents(None).is_ok());
        assert!(validate_sale_price_cents(Some(0)).is_ok());
        assert!(validate_sale_price_cents(Some(-1)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+966 50 123 4567").is_ok());
        assert!(validate_phone("0501234567").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("call-me-maybe").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
