//! # bistro-core: Pure Business Logic for Bistro
//!
//! This crate is the **heart** of Bistro, a business-operations manager for
//! a food-service company. It contains all business rules as pure functions
//! and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Bistro Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │            Presentation Layer (forms, tables, dialogs)        │  │
//! │  │                     — NOT in this repository —                │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │ service calls                       │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │            bistro-engine (stores + Bistro facade)             │  │
//! │  │    OrderLedger, InventoryStore, CustomerDirectory, Finance    │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │              ★ bistro-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────────┐   │  │
//! │  │  │  types   │ │  money   │ │  recipe  │ │   validation   │   │  │
//! │  │  │  Order   │ │  Money   │ │ Catalog  │ │     rules      │   │  │
//! │  │  │ Customer │ │ CostRate │ │  rates   │ │     checks     │   │  │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └────────────────┘   │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO SHARED STATE • PURE FUNCTIONS                    │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Order, Customer, FinancialRecord)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`recipe`] - Recipe catalog and per-unit requirement math
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system and network access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Exact Quantities**: Stock levels and recipe rates use `Decimal`, never f64
//! 5. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::money::{CostRate, Money};
//!
//! // Create money from cents (never from floats!)
//! let total = Money::from_cents(3_000); // $30.00
//!
//! // Variable cost at the default 40% rate
//! let rate = CostRate::from_bps(4_000);
//! let variable_cost = total.apply_rate(rate);
//! assert_eq!(variable_cost.cents(), 1_200); // $12.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod recipe;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bistro_core::Money` instead of
// `use bistro_core::money::Money`

pub use error::{OpsError, OpsResult, ValidationError};
pub use money::{CostRate, Money};
pub use recipe::{Recipe, RecipeCatalog, RecipeLine, RequiredIngredient};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default variable-cost rate in basis points (4000 = 40%).
///
/// ## Why a constant?
/// The source of truth for variable cost is a flat fraction of each
/// completed order's total. Deriving it from actual ingredient unit costs
/// instead is an open question; until resolved the rate stays a
/// configurable heuristic with this default.
pub const DEFAULT_VARIABLE_COST_BPS: u32 = 4_000;

/// Maximum length for names (meals, ingredients, customers, cost components).
pub const MAX_NAME_LEN: usize = 200;

/// Maximum order quantity accepted by validation.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
/// from silently draining the whole inventory. Oversized but plausible
/// orders still reach the availability check and fail there with a named
/// shortfall list; this cap only stops obvious input mistakes.
pub const MAX_ORDER_QUANTITY: i64 = 9_999;

/// Maximum unit price accepted by validation, in cents ($1,000,000).
///
/// Together with [`MAX_ORDER_QUANTITY`] this bounds every order total to
/// well under `i64::MAX`, so total computation cannot overflow.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;
