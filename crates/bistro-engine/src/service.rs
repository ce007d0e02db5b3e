//! # Service Facade
//!
//! The `Bistro` facade is the single surface the (external) presentation
//! layer calls. Forms and dialogs gather input, call one of these
//! operations, and re-render from the returned value or error -
//! validation, mutation and refresh never live inside UI callbacks.
//!
//! ## Service Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Bistro facade                               │
//! │                                                                     │
//! │  Orders      create_order, set_order_status, delete_order,          │
//! │              get_order, list_orders                                 │
//! │  Inventory   check_stock, add_inventory_item, restock,              │
//! │              list_inventory, low_stock_items                        │
//! │  Customers   add_customer, edit_customer, delete_customer,          │
//! │              list_customers                                         │
//! │  Finance     set_fixed_cost, set_variable_cost_rate,                │
//! │              get_financial_summary                                  │
//! │  Snapshot    snapshot, from_snapshot (snapshot.rs)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request/response DTOs are camelCase on the wire; persisted entities
//! keep their stable snake_case schema names.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bistro_core::validation::{validate_meal_name, validate_order_date, validate_quantity};
use bistro_core::{
    AvailabilityReport, Customer, CustomerType, FinancialSummary, InventoryItem,
    InventoryItemView, Money, OpsResult, Order, OrderChannel, OrderStatus, RecipeCatalog,
    CostRate,
};

use crate::customers::{CustomerDirectory, CustomerInput};
use crate::finance::FinanceLedger;
use crate::inventory::{InventoryStore, NewItem};
use crate::orders::{NewOrder, OrderLedger};

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// Input for `create_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub meal: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Business date, `YYYY-MM-DD`.
    pub date: String,
    pub channel: OrderChannel,
    /// Explicit customer reference (delivery orders only).
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Table number (dine-in orders only).
    #[serde(default)]
    pub table_number: Option<u32>,
    pub initial_status: OrderStatus,
}

/// Result of `create_order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: u64,
    pub customer_id: Option<String>,
    pub total_cents: i64,
    pub status: OrderStatus,
}

/// Input for `add_inventory_item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub current_stock: Decimal,
    pub threshold: Decimal,
    pub unit_cost_cents: i64,
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
}

/// Input for `add_customer` / `edit_customer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub customer_type: CustomerType,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(req: CustomerRequest) -> Self {
        CustomerInput {
            name: req.name,
            phone: req.phone,
            email: req.email,
            address: req.address,
            customer_type: req.customer_type,
        }
    }
}

// =============================================================================
// Bistro Facade
// =============================================================================

/// Owns every store, constructed once and shared by reference - no ambient
/// singletons. Thread-safe: all state lives behind the stores' locks, so a
/// `Bistro` can be shared across threads in an `Arc`.
#[derive(Debug)]
pub struct Bistro {
    pub(crate) catalog: Arc<RecipeCatalog>,
    pub(crate) inventory: Arc<InventoryStore>,
    pub(crate) customers: Arc<CustomerDirectory>,
    pub(crate) finance: Arc<FinanceLedger>,
    pub(crate) orders: OrderLedger,
}

impl Bistro {
    /// Creates a fresh engine around a recipe catalog.
    pub fn new(catalog: RecipeCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let inventory = Arc::new(InventoryStore::new(Arc::clone(&catalog)));
        let customers = Arc::new(CustomerDirectory::new());
        let finance = Arc::new(FinanceLedger::new());
        let orders = OrderLedger::new(
            Arc::clone(&inventory),
            Arc::clone(&customers),
            Arc::clone(&finance),
        );

        Bistro {
            catalog,
            inventory,
            customers,
            finance,
            orders,
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Creates an order; see [`OrderLedger::create_order`] for semantics.
    pub fn create_order(&self, req: CreateOrderRequest) -> OpsResult<CreateOrderResponse> {
        debug!(meal = %req.meal, quantity = req.quantity, "create_order");

        let date = validate_order_date(&req.date)?;
        let order = self.orders.create_order(NewOrder {
            meal: req.meal,
            quantity: req.quantity,
            unit_price: Money::from_cents(req.unit_price_cents),
            date,
            channel: req.channel,
            customer_id: req.customer_id,
            table_number: req.table_number,
            initial_status: req.initial_status,
        })?;

        Ok(CreateOrderResponse {
            order_id: order.id,
            customer_id: order.customer_id,
            total_cents: order.total.cents(),
            status: order.status,
        })
    }

    /// Advances an order through the state machine.
    pub fn set_order_status(&self, order_id: u64, new_status: OrderStatus) -> OpsResult<Order> {
        self.orders.set_order_status(order_id, new_status)
    }

    /// Deletes a non-completed order.
    pub fn delete_order(&self, order_id: u64) -> OpsResult<()> {
        self.orders.delete_order(order_id)
    }

    /// Looks up an order.
    pub fn get_order(&self, order_id: u64) -> OpsResult<Order> {
        self.orders.get_order(order_id)
    }

    /// Lists all orders.
    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.list_orders()
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Pure read: availability of `quantity` units of `meal`.
    pub fn check_stock(&self, meal: &str, quantity: i64) -> OpsResult<AvailabilityReport> {
        validate_meal_name(meal)?;
        validate_quantity(quantity)?;
        Ok(self.inventory.check_availability(meal, quantity))
    }

    /// Adds a new inventory item.
    pub fn add_inventory_item(&self, req: AddItemRequest) -> OpsResult<InventoryItem> {
        self.inventory.add_item(NewItem {
            name: req.name,
            category: req.category,
            unit: req.unit,
            current_stock: req.current_stock,
            threshold: req.threshold,
            unit_cost: Money::from_cents(req.unit_cost_cents),
            expiry: req.expiry,
        })
    }

    /// Adjusts an item's stock level by `delta`.
    pub fn restock(&self, item_id: &str, delta: Decimal) -> OpsResult<InventoryItem> {
        self.inventory.restock(item_id, delta)
    }

    /// All items with derived low-stock flags.
    pub fn list_inventory(&self) -> Vec<InventoryItemView> {
        self.inventory.list_items()
    }

    /// Items at or below their threshold.
    pub fn low_stock_items(&self) -> Vec<InventoryItemView> {
        self.inventory.low_stock_items()
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Adds a customer (contact uniqueness enforced).
    pub fn add_customer(&self, req: CustomerRequest) -> OpsResult<Customer> {
        self.customers.add_customer(req.into())
    }

    /// Edits a customer (contact uniqueness re-validated).
    pub fn edit_customer(&self, customer_id: &str, req: CustomerRequest) -> OpsResult<Customer> {
        self.customers.update_customer(customer_id, req.into())
    }

    /// Deletes a customer.
    pub fn delete_customer(&self, customer_id: &str) -> OpsResult<()> {
        self.customers.delete_customer(customer_id)
    }

    /// Lists all customers.
    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.list_customers()
    }

    // =========================================================================
    // Finance
    // =========================================================================

    /// Sets a named fixed-cost component (amount in cents, must be >= 0).
    pub fn set_fixed_cost(&self, name: &str, amount_cents: i64) -> OpsResult<()> {
        self.finance.set_fixed_cost(name, Money::from_cents(amount_cents))
    }

    /// Replaces the variable-cost rate (basis points).
    pub fn set_variable_cost_rate(&self, bps: u32) {
        self.finance.set_variable_cost_rate(CostRate::from_bps(bps));
    }

    /// Derived income/cost/profit figures.
    pub fn get_financial_summary(&self) -> FinancialSummary {
        self.finance.summary()
    }

    // =========================================================================
    // Store Access
    // =========================================================================

    /// The recipe catalog (read-only).
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Direct inventory store access.
    pub fn inventory(&self) -> &InventoryStore {
        &self.inventory
    }

    /// Direct customer directory access.
    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    /// Direct finance ledger access.
    pub fn finance(&self) -> &FinanceLedger {
        &self.finance
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::RecipeLine;
    use rust_decimal_macros::dec;

    fn bistro() -> Bistro {
        let catalog = RecipeCatalog::new().with_recipe(
            "TomatoBeefNoodles",
            vec![
                RecipeLine::new("Tomato", dec!(0.2)),
                RecipeLine::new("Beef", dec!(0.15)),
            ],
        );
        let bistro = Bistro::new(catalog);
        bistro
            .add_inventory_item(AddItemRequest {
                name: "Tomato".to_string(),
                category: "produce".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(80),
                threshold: dec!(10),
                unit_cost_cents: 300,
                expiry: None,
            })
            .unwrap();
        bistro
            .add_inventory_item(AddItemRequest {
                name: "Beef".to_string(),
                category: "meat".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(25),
                threshold: dec!(5),
                unit_cost_cents: 4500,
                expiry: None,
            })
            .unwrap();
        bistro
    }

    #[test]
    fn test_create_order_parses_wire_date() {
        let bistro = bistro();
        let resp = bistro
            .create_order(CreateOrderRequest {
                meal: "TomatoBeefNoodles".to_string(),
                quantity: 2,
                unit_price_cents: 1500,
                date: "2026-08-30".to_string(),
                channel: OrderChannel::Delivery,
                customer_id: None,
                table_number: None,
                initial_status: OrderStatus::Received,
            })
            .unwrap();

        assert_eq!(resp.total_cents, 3000);
        assert_eq!(resp.status, OrderStatus::Received);

        let mut bad = CreateOrderRequest {
            meal: "TomatoBeefNoodles".to_string(),
            quantity: 2,
            unit_price_cents: 1500,
            date: "30/08/2026".to_string(),
            channel: OrderChannel::Delivery,
            customer_id: None,
            table_number: None,
            initial_status: OrderStatus::Received,
        };
        assert!(bistro.create_order(bad.clone()).is_err());
        bad.date = "2026-08-30".to_string();
        assert!(bistro.create_order(bad).is_ok());
    }

    #[test]
    fn test_check_stock_validates_input() {
        let bistro = bistro();
        assert!(bistro.check_stock("TomatoBeefNoodles", 0).is_err());
        assert!(bistro.check_stock("", 2).is_err());
        assert!(bistro.check_stock("TomatoBeefNoodles", 2).unwrap().ok);
    }

    #[test]
    fn test_request_dto_wire_format() {
        let json = r#"{
            "meal": "TomatoBeefNoodles",
            "quantity": 2,
            "unitPriceCents": 1500,
            "date": "2026-08-30",
            "channel": "dine_in",
            "tableNumber": 5,
            "initialStatus": "received"
        }"#;
        let req: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.table_number, Some(5));
        assert_eq!(req.channel, OrderChannel::DineIn);
    }
}
