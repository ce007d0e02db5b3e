//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  OpsError (this file)                                               │
//! │  ├── Validation        - malformed input, rejected pre-mutation     │
//! │  ├── InsufficientStock - named shortfall list, caller may retry     │
//! │  ├── DuplicateContact  - phone/email collision on customer add/edit │
//! │  ├── UnknownReference  - meal/customer/item/order id not found      │
//! │  ├── NegativeAmount    - cost edit rejected                         │
//! │  └── InvalidTransition - terminal-state guard on the order machine  │
//! │                                                                     │
//! │  Every variant is recoverable and user-facing; none is fatal.       │
//! │  Mutating operations validate fully before touching owned state,   │
//! │  so a failure never leaves partial writes.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ingredient, id, shortfall)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::{OrderStatus, Shortfall};

// =============================================================================
// Ops Error
// =============================================================================

/// Business-operations errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught by the presentation layer and translated to
/// user-friendly messages.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Not enough stock to cover an order's ingredient requirements.
    ///
    /// ## When This Occurs
    /// - Completing an order whose recipe requires more of an ingredient
    ///   than is currently stocked
    /// - A concurrent completion consumed the stock first (the re-check
    ///   under the inventory lock catches the race)
    ///
    /// The shortfall list names every ingredient that fell short, with the
    /// required and available quantities, so the caller can retry with a
    /// smaller quantity or restock.
    #[error("Insufficient stock: {}", format_shortfalls(.shortfalls))]
    InsufficientStock { shortfalls: Vec<Shortfall> },

    /// Phone or email already belongs to another (non-dine-in) customer.
    #[error("Duplicate contact: {field} '{value}' already in use")]
    DuplicateContact { field: &'static str, value: String },

    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Restocking an inventory item by an unknown id
    /// - Editing or deleting a missing customer
    /// - Changing status of an order id that was never created
    #[error("{kind} not found: {id}")]
    UnknownReference { kind: &'static str, id: String },

    /// A fixed-cost edit supplied a negative amount.
    #[error("Negative amount not allowed: {cents} cents")]
    NegativeAmount { cents: i64 },

    /// Completed orders are immutable history.
    ///
    /// Deletion is permitted for any order that never reached `Completed`
    /// (including cancelled ones), never afterwards.
    #[error("Order {order_id} is completed and cannot be deleted")]
    OrderNotDeletable { order_id: u64 },

    /// The order state machine rejected a transition.
    ///
    /// ## When This Occurs
    /// - Cancelling an order that already reached `Completed`
    /// - Moving a `Cancelled` order anywhere
    /// - Deleting a `Completed` order
    #[error("Order {order_id} is {from:?}, cannot transition to {to:?}")]
    InvalidTransition {
        order_id: u64,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

fn format_shortfalls(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .iter()
        .map(|s| {
            format!(
                "{} (required {}, available {})",
                s.ingredient, s.required, s.available
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative (zero is allowed).
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., unparseable date, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value where uniqueness is required (e.g. ingredient name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with OpsError.
pub type OpsResult<T> = Result<T, OpsError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_stock_message_names_shortfalls() {
        let err = OpsError::InsufficientStock {
            shortfalls: vec![Shortfall {
                ingredient: "Tomato".to_string(),
                required: dec!(200),
                available: dec!(80),
            }],
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: Tomato (required 200, available 80)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "meal".to_string(),
        };
        assert_eq!(err.to_string(), "meal is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_ops_error() {
        let validation_err = ValidationError::Required {
            field: "meal".to_string(),
        };
        let ops_err: OpsError = validation_err.into();
        assert!(matches!(ops_err, OpsError::Validation(_)));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = OpsError::InvalidTransition {
            order_id: 7,
            from: OrderStatus::Completed,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(
            err.to_string(),
            "Order 7 is Completed, cannot transition to Cancelled"
        );
    }
}
