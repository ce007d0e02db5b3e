//! # Inventory Store
//!
//! Owns current stock levels; answers availability queries; performs atomic
//! consumption.
//!
//! ## Thread Safety
//! All items live behind a single `Mutex`. The check-then-consume sequence
//! runs inside ONE lock acquisition, so two concurrent completions that
//! would jointly overdraw an ingredient cannot both succeed: the second
//! re-validates against post-consumption stock and fails with
//! `InsufficientStock`.
//!
//! ## Consumption Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      consume(meal, quantity)                        │
//! │                                                                     │
//! │  requirements = catalog.requirements(meal, quantity)                │
//! │        │                                                            │
//! │        ▼  ── lock items ──────────────────────────────────────────  │
//! │  re-validate EVERY ingredient against current stock                 │
//! │        │                                                            │
//! │        ├── any short? ──► Err(InsufficientStock), NO stock changed  │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  decrement every ingredient (all-or-nothing)                        │
//! │           ── unlock ──────────────────────────────────────────────  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bistro_core::validation::{validate_ingredient_name, validate_stock_level};
use bistro_core::{
    AvailabilityReport, InventoryItem, InventoryItemView, Money, OpsError, OpsResult,
    RecipeCatalog, RequiredIngredient, Shortfall, ValidationError,
};

/// Input for adding a new inventory item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub current_stock: Decimal,
    pub threshold: Decimal,
    pub unit_cost: Money,
    pub expiry: Option<NaiveDate>,
}

/// Repository for inventory items and the consumption operation.
///
/// ## Invariants
/// - `current_stock >= 0` for every item, at all times
/// - Ingredient names are unique (recipes reference items by name)
/// - The `low_stock` flag is derived on read, never stored
#[derive(Debug)]
pub struct InventoryStore {
    catalog: Arc<RecipeCatalog>,
    items: Mutex<Vec<InventoryItem>>,
}

impl InventoryStore {
    /// Creates an empty store reading requirements from `catalog`.
    pub fn new(catalog: Arc<RecipeCatalog>) -> Self {
        InventoryStore {
            catalog,
            items: Mutex::new(Vec::new()),
        }
    }

    /// The catalog this store resolves meals against.
    pub fn catalog(&self) -> &Arc<RecipeCatalog> {
        &self.catalog
    }

    // =========================================================================
    // Item Management
    // =========================================================================

    /// Adds a new inventory item.
    ///
    /// Validates before touching state: non-empty unique name, non-negative
    /// stock and threshold.
    pub fn add_item(&self, new: NewItem) -> OpsResult<InventoryItem> {
        validate_ingredient_name(&new.name)?;
        validate_stock_level("current_stock", new.current_stock)?;
        validate_stock_level("threshold", new.threshold)?;

        let mut items = self.items.lock().expect("inventory mutex poisoned");

        if items.iter().any(|i| i.name == new.name) {
            return Err(ValidationError::Duplicate {
                field: "ingredient".to_string(),
                value: new.name,
            }
            .into());
        }

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            category: new.category,
            unit: new.unit,
            current_stock: new.current_stock,
            threshold: new.threshold,
            unit_cost: new.unit_cost,
            expiry: new.expiry,
        };
        info!(id = %item.id, name = %item.name, stock = %item.current_stock, "Inventory item added");

        items.push(item.clone());
        Ok(item)
    }

    /// Adjusts an item's stock by `delta` (positive to restock, negative
    /// for manual corrections). The resulting level must stay >= 0.
    pub fn restock(&self, id: &str, delta: Decimal) -> OpsResult<InventoryItem> {
        let mut items = self.items.lock().expect("inventory mutex poisoned");

        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| OpsError::UnknownReference {
                kind: "inventory item",
                id: id.to_string(),
            })?;

        let new_level = item.current_stock + delta;
        if new_level < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "current_stock".to_string(),
            }
            .into());
        }

        item.current_stock = new_level;
        info!(id = %item.id, name = %item.name, delta = %delta, stock = %item.current_stock, "Stock adjusted");

        Ok(item.clone())
    }

    /// Lists all items with their derived `low_stock` flag.
    pub fn list_items(&self) -> Vec<InventoryItemView> {
        let items = self.items.lock().expect("inventory mutex poisoned");
        items.iter().cloned().map(InventoryItemView::from).collect()
    }

    /// Lists only the items at or below their threshold.
    pub fn low_stock_items(&self) -> Vec<InventoryItemView> {
        self.list_items().into_iter().filter(|v| v.low_stock).collect()
    }

    /// Current stock level of an ingredient, by name.
    pub fn stock_of(&self, name: &str) -> Option<Decimal> {
        let items = self.items.lock().expect("inventory mutex poisoned");
        items.iter().find(|i| i.name == name).map(|i| i.current_stock)
    }

    // =========================================================================
    // Availability & Consumption
    // =========================================================================

    /// Pure read: can `quantity` units of `meal` be made from current stock?
    ///
    /// An ingredient with no inventory record reports `available = 0`
    /// rather than erroring, keeping the verdict consistent with
    /// [`consume`](Self::consume).
    pub fn check_availability(&self, meal: &str, quantity: i64) -> AvailabilityReport {
        let requirements = aggregate(self.catalog.requirements(meal, quantity));
        let items = self.items.lock().expect("inventory mutex poisoned");
        shortfalls_against(&items, &requirements)
    }

    /// Atomically consumes the ingredients `quantity` units of `meal`
    /// require.
    ///
    /// Re-validates availability under the same lock that applies the
    /// decrements. If ANY ingredient is short, NO stock is changed and the
    /// full shortfall list is returned in `InsufficientStock`.
    pub fn consume(&self, meal: &str, quantity: i64) -> OpsResult<()> {
        let requirements = aggregate(self.catalog.requirements(meal, quantity));

        let mut items = self.items.lock().expect("inventory mutex poisoned");

        let report = shortfalls_against(&items, &requirements);
        if !report.ok {
            warn!(meal, quantity, shortfalls = report.shortfalls.len(), "Consumption rejected");
            return Err(OpsError::InsufficientStock {
                shortfalls: report.shortfalls,
            });
        }

        // All requirements verified under this lock; apply every decrement.
        for req in &requirements {
            if let Some(item) = items.iter_mut().find(|i| i.name == req.ingredient) {
                item.current_stock -= req.amount;
                debug!(ingredient = %req.ingredient, consumed = %req.amount, remaining = %item.current_stock, "Stock consumed");
            }
        }

        info!(meal, quantity, ingredients = requirements.len(), "Consumption applied");
        Ok(())
    }

    // =========================================================================
    // Snapshot Support
    // =========================================================================

    /// Replaces all items (snapshot restore).
    pub fn load_items(&self, loaded: Vec<InventoryItem>) {
        let mut items = self.items.lock().expect("inventory mutex poisoned");
        *items = loaded;
    }

    /// Clones all items without the derived flag (snapshot export).
    pub fn export_items(&self) -> Vec<InventoryItem> {
        self.items.lock().expect("inventory mutex poisoned").clone()
    }
}

/// Merges repeated ingredients so a recipe naming the same ingredient on
/// two lines is checked (and consumed) as one combined requirement.
fn aggregate(requirements: Vec<RequiredIngredient>) -> Vec<RequiredIngredient> {
    let mut merged: Vec<RequiredIngredient> = Vec::with_capacity(requirements.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for req in requirements {
        match index.get(&req.ingredient) {
            Some(&i) => merged[i].amount += req.amount,
            None => {
                index.insert(req.ingredient.clone(), merged.len());
                merged.push(req);
            }
        }
    }

    merged
}

/// Compares requirements to stock. Missing items count as `available = 0`.
fn shortfalls_against(
    items: &[InventoryItem],
    requirements: &[RequiredIngredient],
) -> AvailabilityReport {
    let shortfalls: Vec<Shortfall> = requirements
        .iter()
        .filter_map(|req| {
            let available = items
                .iter()
                .find(|i| i.name == req.ingredient)
                .map(|i| i.current_stock)
                .unwrap_or(Decimal::ZERO);

            if available < req.amount {
                Some(Shortfall {
                    ingredient: req.ingredient.clone(),
                    required: req.amount,
                    available,
                })
            } else {
                None
            }
        })
        .collect();

    if shortfalls.is_empty() {
        AvailabilityReport::ok()
    } else {
        AvailabilityReport::short(shortfalls)
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

    fn noodle_store() -> InventoryStore {
        let catalog = RecipeCatalog::new().with_recipe(
            "TomatoBeefNoodles",
            vec![
                RecipeLine::new("Tomato", dec!(0.2)),
                RecipeLine::new("Beef", dec!(0.15)),
            ],
        );
        let store = InventoryStore::new(Arc::new(catalog));

        store
            .add_item(NewItem {
                name: "Tomato".to_string(),
                category: "produce".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(80),
                threshold: dec!(10),
                unit_cost: Money::from_cents(300),
                expiry: None,
            })
            .unwrap();
        store
            .add_item(NewItem {
                name: "Beef".to_string(),
                category: "meat".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(25),
                threshold: dec!(5),
                unit_cost: Money::from_cents(4500),
                expiry: None,
            })
            .unwrap();

        store
    }

    #[test]
    fn test_consume_decrements_every_ingredient() {
        let store = noodle_store();

        store.consume("TomatoBeefNoodles", 2).unwrap();

        assert_eq!(store.stock_of("Tomato").unwrap(), dec!(79.6));
        assert_eq!(store.stock_of("Beef").unwrap(), dec!(24.7));
    }

    #[test]
    fn test_check_availability_reports_shortfall() {
        let store = noodle_store();

        // 1000 units need 200kg Tomato and 150kg Beef; both fall short
        let report = store.check_availability("TomatoBeefNoodles", 1000);

        assert!(!report.ok);
        assert_eq!(report.shortfalls.len(), 2);

        let tomato = report
            .shortfalls
            .iter()
            .find(|s| s.ingredient == "Tomato")
            .unwrap();
        assert_eq!(tomato.required, dec!(200));
        assert_eq!(tomato.available, dec!(80));

        let beef = report
            .shortfalls
            .iter()
            .find(|s| s.ingredient == "Beef")
            .unwrap();
        assert_eq!(beef.required, dec!(150));
        assert_eq!(beef.available, dec!(25));
    }

    #[test]
    fn test_consume_is_all_or_nothing() {
        let store = noodle_store();

        // Beef runs out first (25 / 0.15 ≈ 166); Tomato could cover 170.
        let err = store.consume("TomatoBeefNoodles", 170).unwrap_err();
        assert!(matches!(err, OpsError::InsufficientStock { .. }));

        // Nothing changed, not even the ingredient that had enough
        assert_eq!(store.stock_of("Tomato").unwrap(), dec!(80));
        assert_eq!(store.stock_of("Beef").unwrap(), dec!(25));
    }

    #[test]
    fn test_missing_ingredient_counts_as_zero_available() {
        let catalog = RecipeCatalog::new()
            .with_recipe("GhostStew", vec![RecipeLine::new("Ectoplasm", dec!(1))]);
        let store = InventoryStore::new(Arc::new(catalog));

        let report = store.check_availability("GhostStew", 2);
        assert!(!report.ok);
        assert_eq!(report.shortfalls[0].available, dec!(0));
    }

    #[test]
    fn test_unknown_meal_is_available() {
        let store = noodle_store();
        // Permissive default: a meal without a recipe consumes nothing
        assert!(store.check_availability("Pizza", 10).ok);
        store.consume("Pizza", 10).unwrap();
        assert_eq!(store.stock_of("Tomato").unwrap(), dec!(80));
    }

    #[test]
    fn test_restock_and_floor() {
        let store = noodle_store();
        let tomato_id = store.export_items()[0].id.clone();

        let item = store.restock(&tomato_id, dec!(20)).unwrap();
        assert_eq!(item.current_stock, dec!(100));

        // Correction below zero is rejected
        assert!(store.restock(&tomato_id, dec!(-150)).is_err());
        assert_eq!(store.stock_of("Tomato").unwrap(), dec!(100));

        // Unknown id
        let err = store.restock("no-such-id", dec!(1)).unwrap_err();
        assert!(matches!(err, OpsError::UnknownReference { .. }));
    }

    #[test]
    fn test_duplicate_ingredient_name_rejected() {
        let store = noodle_store();
        let err = store
            .add_item(NewItem {
                name: "Tomato".to_string(),
                category: "produce".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(5),
                threshold: dec!(1),
                unit_cost: Money::from_cents(300),
                expiry: None,
            })
            .unwrap_err();
        assert!(matches!(err, OpsError::Validation(_)));
    }

    #[test]
    fn test_low_stock_flag_recomputed_on_read() {
        let store = noodle_store();
        assert!(store.low_stock_items().is_empty());

        // Drain Beef to its threshold: consume 134 units → 25 - 20.1 = 4.9
        store.consume("TomatoBeefNoodles", 134).unwrap();

        let low = store.low_stock_items();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].item.name, "Beef");
    }

    #[test]
    fn test_repeated_ingredient_lines_are_merged() {
        let catalog = RecipeCatalog::new().with_recipe(
            "DoubleTomatoSoup",
            vec![
                RecipeLine::new("Tomato", dec!(0.3)),
                RecipeLine::new("Tomato", dec!(0.3)),
            ],
        );
        let store = InventoryStore::new(Arc::new(catalog));
        store
            .add_item(NewItem {
                name: "Tomato".to_string(),
                category: "produce".to_string(),
                unit: "kg".to_string(),
                current_stock: dec!(1),
                threshold: dec!(0),
                unit_cost: Money::from_cents(300),
                expiry: None,
            })
            .unwrap();

        // Combined requirement is 0.6/unit: 2 units need 1.2, only 1 held
        let report = store.check_availability("DoubleTomatoSoup", 2);
        assert!(!report.ok);
        assert_eq!(report.shortfalls[0].required, dec!(1.2));
    }
}
