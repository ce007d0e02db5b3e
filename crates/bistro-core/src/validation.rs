//! # Validation Module
//!
//! Input validation for Bistro service operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Presentation layer (out of scope here)                    │
//! │  ├── Basic format checks (empty fields, lengths)                    │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - pure, side-effect-free rule checks          │
//! │  └── Runs fully BEFORE any store is touched, so a validation        │
//! │      failure never leaves partial writes                            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Store invariants (uniqueness scans, stock floors)         │
//! │  └── Enforced under the store locks                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_NAME_LEN, MAX_ORDER_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a meal name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_meal_name;
///
/// assert!(validate_meal_name("TomatoBeefNoodles").is_ok());
/// assert!(validate_meal_name("  ").is_err());
/// ```
pub fn validate_meal_name(meal: &str) -> ValidationResult<()> {
    validate_name("meal", meal)
}

/// Validates a customer display name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a fixed-cost component name (e.g. "rent", "salaries").
pub fn validate_cost_name(name: &str) -> ValidationResult<()> {
    validate_name("cost name", name)
}

/// Validates an ingredient name for inventory items.
pub fn validate_ingredient_name(name: &str) -> ValidationResult<()> {
    validate_name("ingredient", name)
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - 5 to 20 characters after trimming
/// - Digits, `+`, `-` and spaces only
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() < 5 || phone.len() > 20 {
        return Err(ValidationError::OutOfRange {
            field: "phone".to_string(),
            min: 5,
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, '+', '-' and spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// Deliberately light: one `@` with non-empty sides and no whitespace.
/// Real deliverability checks belong to an outer layer.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected local@domain".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive
/// - Must not exceed MAX_UNIT_PRICE_CENTS; combined with the quantity cap
///   this keeps `unit_price × quantity` far below `i64::MAX`
pub fn validate_unit_price(unit_price: Money) -> ValidationResult<()> {
    if !unit_price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    if unit_price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 1,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a dine-in table number. Must be positive.
pub fn validate_table_number(table_number: u32) -> ValidationResult<()> {
    if table_number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "table_number".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level or threshold. Zero is allowed, negative is not.
pub fn validate_stock_level(field: &str, level: rust_decimal::Decimal) -> ValidationResult<()> {
    if level.is_sign_negative() && !level.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses and validates an order date in `YYYY-MM-DD` form.
///
/// ## Returns
/// The parsed date, so callers validate and convert in one step.
pub fn validate_order_date(date: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: format!("expected YYYY-MM-DD: {e}"),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_name_rules() {
        assert!(validate_meal_name("TomatoBeefNoodles").is_ok());
        assert!(validate_meal_name("").is_err());
        assert!(validate_meal_name("   ").is_err());
        assert!(validate_meal_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_quantity_rules() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(9_999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(10_000).is_err());
    }

    #[test]
    fn test_unit_price_must_be_positive() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_unit_price_upper_bound_prevents_total_overflow() {
        assert!(validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS)).is_ok());
        assert!(validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS + 1)).is_err());
        // An extreme price that would overflow the total multiply never
        // passes validation
        assert!(validate_unit_price(Money::from_cents(i64::MAX / 2)).is_err());
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("13800138001").is_ok());
        assert!(validate_phone("+86 138-0013-8001").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("not-a-phone!").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing-local").is_err());
        assert!(validate_email("spaces in@example.com").is_err());
    }

    #[test]
    fn test_order_date_parsing() {
        assert_eq!(
            validate_order_date("2026-08-30").unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
        );
        assert!(validate_order_date("30/08/2026").is_err());
        assert!(validate_order_date("yesterday").is_err());
    }

    #[test]
    fn test_table_number_rules() {
        assert!(validate_table_number(5).is_ok());
        assert!(validate_table_number(0).is_err());
    }

    #[test]
    fn test_stock_level_rules() {
        use rust_decimal_macros::dec;

        assert!(validate_stock_level("current_stock", dec!(80)).is_ok());
        assert!(validate_stock_level("current_stock", dec!(0)).is_ok());
        assert!(validate_stock_level("current_stock", dec!(-0.5)).is_err());
    }
}
