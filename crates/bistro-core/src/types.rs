//! # Domain Types
//!
//! Core domain types used throughout Bistro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌──────────────────┐      │
//! │  │ InventoryItem │   │     Order     │   │     Customer     │      │
//! │  │ ───────────── │   │ ───────────── │   │ ──────────────── │      │
//! │  │ id (UUID)     │   │ id (u64, mono)│   │ id (UUID)        │      │
//! │  │ current_stock │   │ meal/quantity │   │ phone/email      │      │
//! │  │ threshold     │   │ status        │   │ type             │      │
//! │  │ unit_cost     │   │ channel       │   └──────────────────┘      │
//! │  └───────────────┘   └───────────────┘                             │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌──────────────────┐      │
//! │  │ OrderStatus   │   │ OrderChannel  │   │ FinancialRecord  │      │
//! │  │ ───────────── │   │ ───────────── │   │ ──────────────── │      │
//! │  │ Received      │   │ Delivery      │   │ kind/amount      │      │
//! │  │ InProgress    │   │ DineIn        │   │ order_id?        │      │
//! │  │ Completed     │   └───────────────┘   └──────────────────┘      │
//! │  │ Cancelled     │                                                 │
//! │  └───────────────┘                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! - Inventory items, customers and financial records: UUID v4 string ids
//! - Orders: monotonic `u64` ids issued by the OrderLedger (unique,
//!   strictly increasing, human-friendly on receipts)
//!
//! Serde field names on these structs are the persisted record schema and
//! must stay stable.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Inventory
// =============================================================================

/// An ingredient held in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Ingredient name; recipes reference ingredients by this name.
    pub name: String,

    /// Category for grouping (e.g. "produce", "meat", "dry goods").
    pub category: String,

    /// Unit of measure (e.g. "kg", "l", "pcs").
    pub unit: String,

    /// Current stock level. Never negative.
    pub current_stock: Decimal,

    /// Low-stock threshold. The `low_stock` flag is derived as
    /// `current_stock <= threshold` on every read, never stored.
    pub threshold: Decimal,

    /// Cost per unit, for purchasing decisions.
    pub unit_cost: Money,

    /// Expiry date, if the ingredient is perishable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
}

impl InventoryItem {
    /// Derived low-stock flag. Recomputed on every read.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.threshold
    }

    /// Checks whether current stock covers a required amount.
    #[inline]
    pub fn can_cover(&self, required: Decimal) -> bool {
        self.current_stock >= required
    }
}

/// An inventory item together with its derived low-stock flag, as returned
/// by list operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub low_stock: bool,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(item: InventoryItem) -> Self {
        let low_stock = item.is_low_stock();
        InventoryItemView { item, low_stock }
    }
}

// =============================================================================
// Availability
// =============================================================================

/// One ingredient that falls short of an order's requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub ingredient: String,
    pub required: Decimal,
    pub available: Decimal,
}

/// Result of an availability check for a meal + quantity.
///
/// `ok` is true exactly when `shortfalls` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub ok: bool,
    pub shortfalls: Vec<Shortfall>,
}

impl AvailabilityReport {
    /// A report with no shortfalls.
    pub fn ok() -> Self {
        AvailabilityReport {
            ok: true,
            shortfalls: Vec::new(),
        }
    }

    /// A report naming the ingredients that fell short.
    pub fn short(shortfalls: Vec<Shortfall>) -> Self {
        AvailabilityReport {
            ok: false,
            shortfalls,
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order in its lifecycle.
///
/// ```text
/// Received ──► InProgress ──► Completed (terminal)
///    │              │
///    └──────────────┴───────► Cancelled (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been taken, work not started.
    Received,
    /// Kitchen is working on the order.
    InProgress,
    /// Order was fulfilled; stock consumed and income recorded.
    Completed,
    /// Order was cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    /// (with the single idempotent exception below).
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether the state machine permits a transition to `next`.
    ///
    /// `Completed -> Completed` is permitted so that repeating a completion
    /// is an observable no-op rather than an error; every other move out of
    /// a terminal state is rejected. Same-state writes on non-terminal
    /// states are plain status updates with no side effects.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Completed, Completed) => true,
            (Completed, _) | (Cancelled, _) => false,
            (Received, _) => true,
            (InProgress, Received) => false,
            (InProgress, _) => true,
        }
    }
}

// =============================================================================
// Order Channel
// =============================================================================

/// How the order reached the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderChannel {
    /// Delivered to a customer address.
    Delivery,
    /// Eaten on premises at a numbered table.
    DineIn,
}

// =============================================================================
// Order
// =============================================================================

/// A customer order for a quantity of one meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Monotonic unique identifier issued by the OrderLedger.
    pub id: u64,

    /// Resolved customer reference. Always present for dine-in orders
    /// (the canonical table customer); optional for delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Meal name; resolved against the recipe catalog on completion.
    pub meal: String,

    /// Number of units ordered. Always > 0.
    pub quantity: i64,

    /// Price per unit at order time.
    pub unit_price: Money,

    /// Total = quantity × unit_price, fixed at creation.
    pub total: Money,

    /// Business date of the order.
    pub date: NaiveDate,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Sales channel.
    pub channel: OrderChannel,

    /// Table number (dine-in only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<u32>,
}

impl Order {
    /// Total for a quantity at a unit price.
    #[inline]
    pub fn compute_total(unit_price: Money, quantity: i64) -> Money {
        unit_price.multiply_quantity(quantity)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Kind of customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Individual,
    Business,
    Vip,
    /// Auto-created record representing a physical table rather than a
    /// named individual. Exempt from phone/email uniqueness.
    DineIn,
}

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name. For dine-in customers this is the canonical
    /// `DineIn-Table-{n}` name and doubles as the dedup key.
    pub name: String,

    /// Phone number; unique across non-dine-in customers.
    pub phone: String,

    /// Email address; unique across non-dine-in customers.
    pub email: String,

    /// Postal address (free-form).
    pub address: String,

    /// Customer kind.
    #[serde(rename = "type")]
    pub customer_type: CustomerType,
}

impl Customer {
    /// Canonical name for the auto-created customer of a dine-in table.
    ///
    /// Every order placed against table `n` resolves to the single customer
    /// carrying this name, however many orders reference it.
    pub fn dine_in_name(table_number: u32) -> String {
        format!("DineIn-Table-{table_number}")
    }

    /// Whether this is an auto-created dine-in table record.
    #[inline]
    pub fn is_dine_in(&self) -> bool {
        self.customer_type == CustomerType::DineIn
    }
}

// =============================================================================
// Financial Records
// =============================================================================

/// Kind of financial ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Revenue from a completed order.
    Income,
    /// Recurring cost independent of order volume (rent, salaries).
    FixedCost,
    /// Cost that scales with order volume; a configurable fraction of the
    /// order total.
    VariableCost,
}

/// An immutable ledger entry of income or cost.
///
/// Created exactly once per (order, kind) pair - recomputation never
/// duplicates records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Entry kind.
    pub kind: RecordKind,

    /// Amount in cents.
    pub amount: Money,

    /// Human-readable description (meal, quantity, cost component).
    pub description: String,

    /// When the record was created.
    pub timestamp: DateTime<Utc>,

    /// Source order, if the entry derives from one (null for fixed costs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<u64>,
}

// =============================================================================
// Financial Summary
// =============================================================================

/// Derived financial figures for the service boundary.
///
/// Pure function of the recorded financial entries and the fixed-cost
/// configuration: identical inputs always yield identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_fixed_cost: Money,
    pub total_variable_cost: Money,
    pub profit: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_low_stock_is_derived() {
        let mut item = InventoryItem {
            id: "i-1".to_string(),
            name: "Tomato".to_string(),
            category: "produce".to_string(),
            unit: "kg".to_string(),
            current_stock: dec!(10),
            threshold: dec!(5),
            unit_cost: Money::from_cents(300),
            expiry: None,
        };
        assert!(!item.is_low_stock());

        item.current_stock = dec!(5);
        assert!(item.is_low_stock());

        item.current_stock = dec!(4.9);
        assert!(item.is_low_stock());
    }

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;

        assert!(Received.can_transition_to(InProgress));
        assert!(Received.can_transition_to(Completed));
        assert!(Received.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));

        // Idempotent re-completion is allowed (handled as a no-op upstream)
        assert!(Completed.can_transition_to(Completed));

        // Terminal states reject everything else
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Received));
        assert!(!Cancelled.can_transition_to(Received));
        assert!(!Cancelled.can_transition_to(Cancelled));

        // No going backwards
        assert!(!InProgress.can_transition_to(Received));
    }

    #[test]
    fn test_dine_in_canonical_name() {
        assert_eq!(Customer::dine_in_name(5), "DineIn-Table-5");
        assert_eq!(Customer::dine_in_name(12), "DineIn-Table-12");
    }

    #[test]
    fn test_order_total() {
        let total = Order::compute_total(Money::from_cents(1500), 2);
        assert_eq!(total.cents(), 3000);
    }

    #[test]
    fn test_customer_type_serializes_under_type_key() {
        let customer = Customer {
            id: "c-1".to_string(),
            name: "Ada".to_string(),
            phone: "13800138001".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Main St".to_string(),
            customer_type: CustomerType::Individual,
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["type"], "individual");
    }

    #[test]
    fn test_order_omits_absent_table_number() {
        let order = Order {
            id: 1,
            customer_id: None,
            meal: "TomatoBeefNoodles".to_string(),
            quantity: 2,
            unit_price: Money::from_cents(1500),
            total: Money::from_cents(3000),
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            status: OrderStatus::Received,
            channel: OrderChannel::Delivery,
            table_number: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert!(json.get("table_number").is_none());
        assert_eq!(json["status"], "received");
        assert_eq!(json["channel"], "delivery");
    }
}
