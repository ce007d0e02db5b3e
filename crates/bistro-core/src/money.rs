//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! `CostRate` type used for the variable-cost heuristic.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  In many retail systems:                                            │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                   │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    1000 cents / 3 = 333 cents (×3 = 999 cents)                      │
//! │    We KNOW we lost 1 cent, and handle it explicitly                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1500); // $15.00
//!
//! // Arithmetic operations
//! let line_total = price * 2;                    // $30.00
//! let total = line_total + Money::from_cents(99); // $30.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(15.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::DEFAULT_VARIABLE_COST_BPS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and profit
///   figures (profit can legitimately go below zero)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde transparent**: Serializes as a plain number, so persisted
///   schema fields like `unit_cost` and `total` stay flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a cost rate and returns the resulting amount, rounded to the
    /// nearest cent.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5), and the intermediate
    /// value is widened to i128 so large totals cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::{CostRate, Money};
    ///
    /// let total = Money::from_cents(3_000);      // $30.00 order total
    /// let rate = CostRate::from_bps(4_000);      // 40% variable cost
    /// assert_eq!(total.apply_rate(rate).cents(), 1_200); // $12.00
    /// ```
    pub fn apply_rate(&self, rate: CostRate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// Order totals are safe from overflow because validation caps both
    /// factors (`MAX_UNIT_PRICE_CENTS`, `MAX_ORDER_QUANTITY`) before any
    /// total is computed.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1_500); // $15.00
    /// let total = unit_price.multiply_quantity(2);
    /// assert_eq!(total.cents(), 3_000); // $30.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Cost Rate
// =============================================================================

/// A cost rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// 4000 bps = 40%, the default variable-cost fraction applied to every
/// completed order's total. Keeping the rate integral sidesteps float
/// drift in the financial summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRate(u32);

impl CostRate {
    /// Creates a cost rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CostRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        CostRate(0)
    }
}

/// Default rate is the 40% variable-cost heuristic.
impl Default for CostRate {
    fn default() -> Self {
        CostRate(DEFAULT_VARIABLE_COST_BPS)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The presentation layer formats amounts
/// for actual display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing an iterator of Money values (financial record totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
