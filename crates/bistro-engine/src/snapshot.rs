//! # Snapshot Persistence
//!
//! Serializes the entire engine state to a single JSON document and back.
//! Persistence is the caller's concern: `Bistro::snapshot` hands out a JSON
//! string, `Bistro::from_snapshot` rebuilds an engine from one. Where the
//! bytes live (file, blob store, test fixture) is out of scope here.
//!
//! ## Schema Stability
//! Entity field names are the stable snake_case names used everywhere else;
//! unknown top-level fields are rejected so a truncated or foreign document
//! fails loudly instead of loading half a business.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use bistro_core::{
    CostRate, Customer, FinancialRecord, InventoryItem, Money, Order, RecipeCatalog,
};

use crate::service::Bistro;

/// Complete engine state as one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub recipes: RecipeCatalog,
    pub inventory: Vec<InventoryItem>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub next_order_id: u64,
    pub financial_records: Vec<FinancialRecord>,
    pub fixed_costs: BTreeMap<String, Money>,
    pub variable_cost_rate_bps: u32,
}

impl Snapshot {
    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a snapshot document.
    pub fn from_json(json: &str) -> Result<Snapshot, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Bistro {
    /// Captures the current state of every store.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            recipes: (*self.catalog).clone(),
            inventory: self.inventory.export_items(),
            customers: self.customers.list_customers(),
            orders: self.orders.list_orders(),
            next_order_id: self.orders.next_order_id(),
            financial_records: self.finance.records(),
            fixed_costs: self.finance.fixed_costs(),
            variable_cost_rate_bps: self.finance.variable_cost_rate().bps(),
        }
    }

    /// Rebuilds an engine from a snapshot. Loaded entities are trusted as
    /// previously validated; no per-entity re-validation happens here.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let bistro = Bistro::new(snapshot.recipes);
        bistro.inventory.load_items(snapshot.inventory);
        bistro.customers.load_customers(snapshot.customers);
        bistro.orders.load_orders(snapshot.orders, snapshot.next_order_id);
        bistro.finance.load(
            snapshot.financial_records,
            snapshot.fixed_costs,
            CostRate::from_bps(snapshot.variable_cost_rate_bps),
        );
        info!(
            orders = bistro.orders.list_orders().len(),
            customers = bistro.customers.count(),
            "restored engine from snapshot"
        );
        bistro
    }

    /// Convenience: snapshot straight to JSON.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.snapshot().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{AddItemRequest, CreateOrderRequest};
    use bistro_core::{OrderChannel, OrderStatus, RecipeLine};
    use rust_decimal_macros::dec;

    fn seeded() -> Bistro {
        let catalog = RecipeCatalog::new()
            .with_recipe("BeefNoodles", vec![RecipeLine::new("Beef", dec!(0.2))]);
        let bistro = Bistro::new(catalog);
        bistro
            .add_inventory_item(AddItemRequest {
                name: "Beef".to_string(),
                category: "meat".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(10),
                threshold: dec!(2),
                unit_cost_cents: 4500,
                expiry: None,
            })
            .unwrap();
        bistro
            .create_order(CreateOrderRequest {
                meal: "BeefNoodles".to_string(),
                quantity: 2,
                unit_price_cents: 1800,
                date: "2026-08-30".to_string(),
                channel: OrderChannel::Delivery,
                customer_id: None,
                table_number: None,
                initial_status: OrderStatus::Completed,
            })
            .unwrap();
        bistro.set_fixed_cost("rent", 200_000).unwrap();
        bistro
    }

    #[test]
    fn test_snapshot_round_trip_preserves_state() {
        let bistro = seeded();
        let json = bistro.snapshot().to_json().unwrap();

        let restored = Bistro::from_snapshot(Snapshot::from_json(&json).unwrap());

        assert_eq!(restored.list_orders(), bistro.list_orders());
        assert_eq!(
            restored.inventory().stock_of("Beef"),
            Some(dec!(9.6))
        );
        assert_eq!(
            restored.get_financial_summary(),
            bistro.get_financial_summary()
        );
        // id sequence continues where it left off
        assert_eq!(restored.orders.next_order_id(), 2);
    }

    #[test]
    fn test_snapshot_rejects_unknown_fields() {
        // A document with a garbage top-level key must not silently load.
        let bistro = seeded();
        let json = bistro.snapshot().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["surprise"] = serde_json::json!(true);
        let doctored = serde_json::to_string(&value).unwrap();
        assert!(Snapshot::from_json(&doctored).is_err());
    }
}
