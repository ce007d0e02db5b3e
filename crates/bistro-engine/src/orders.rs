//! # Order Ledger
//!
//! Owns order records and the status state machine; orchestrates the
//! inventory store, customer directory and finance ledger on transitions.
//!
//! ## Completion Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │          set_order_status(id, Completed)   (old != Completed)       │
//! │                                                                     │
//! │  a. check_availability(meal, quantity)                              │
//! │        └── short? ──► Err(InsufficientStock), nothing changed       │
//! │  b. consume(meal, quantity)     ← atomic, re-validates under lock   │
//! │        └── lost a race? ──► Err(InsufficientStock), nothing changed │
//! │  c. record_income(order)        ← first-time-only in the ledger     │
//! │  d. ONLY NOW store status = Completed                               │
//! │                                                                     │
//! │  An order is never marked Completed without matching consumption    │
//! │  and income; consumption/income is never recorded for an order      │
//! │  that fails to reach Completed.                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every other transition (e.g. `Received -> InProgress`, `-> Cancelled`)
//! only updates status. Re-entering `Completed` from `Completed` is an
//! idempotent no-op. Cancellation is a transition, not an interrupt:
//! cancelling an order that already completed is rejected, not reversed.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use bistro_core::validation::{validate_meal_name, validate_quantity, validate_unit_price};
use bistro_core::{
    Money, OpsError, OpsResult, Order, OrderChannel, OrderStatus, ValidationError,
};

use crate::customers::CustomerDirectory;
use crate::finance::FinanceLedger;
use crate::inventory::InventoryStore;

/// Input for creating an order. The date is already parsed; the service
/// facade converts from the wire format.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub meal: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub date: NaiveDate,
    pub channel: OrderChannel,
    /// Explicit customer reference (delivery orders).
    pub customer_id: Option<String>,
    /// Table number (dine-in orders).
    pub table_number: Option<u32>,
    /// Orders may start in any non-terminal state, or directly Completed.
    pub initial_status: OrderStatus,
}

#[derive(Debug, Default)]
struct OrderState {
    orders: Vec<Order>,
    next_id: u64,
}

/// Repository for orders plus the lifecycle state machine.
#[derive(Debug)]
pub struct OrderLedger {
    inventory: Arc<InventoryStore>,
    customers: Arc<CustomerDirectory>,
    finance: Arc<FinanceLedger>,
    state: Mutex<OrderState>,
}

impl OrderLedger {
    /// Creates an empty ledger orchestrating the given stores.
    pub fn new(
        inventory: Arc<InventoryStore>,
        customers: Arc<CustomerDirectory>,
        finance: Arc<FinanceLedger>,
    ) -> Self {
        OrderLedger {
            inventory,
            customers,
            finance,
            state: Mutex::new(OrderState {
                orders: Vec::new(),
                next_id: 1,
            }),
        }
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates an order.
    ///
    /// Validation runs fully before any mutation: quantity and unit price
    /// positive, meal known to the catalog, customer/table resolvable.
    /// Dine-in orders resolve their customer through the canonical
    /// per-table record. An order created directly in `Completed` runs the
    /// full completion pipeline first; if consumption fails, the order is
    /// not stored at all.
    pub fn create_order(&self, new: NewOrder) -> OpsResult<Order> {
        validate_meal_name(&new.meal)?;
        validate_quantity(new.quantity)?;
        validate_unit_price(new.unit_price)?;

        if new.initial_status == OrderStatus::Cancelled {
            return Err(ValidationError::NotAllowed {
                field: "initial_status".to_string(),
                allowed: vec![
                    "received".to_string(),
                    "in_progress".to_string(),
                    "completed".to_string(),
                ],
            }
            .into());
        }

        if !self.inventory.catalog().contains_meal(&new.meal) {
            return Err(OpsError::UnknownReference {
                kind: "meal",
                id: new.meal,
            });
        }

        let customer_id = match new.channel {
            OrderChannel::DineIn => {
                let table = new.table_number.ok_or_else(|| ValidationError::Required {
                    field: "table_number".to_string(),
                })?;
                Some(self.customers.find_or_create_dine_in(table)?.id)
            }
            OrderChannel::Delivery => {
                if new.table_number.is_some() {
                    return Err(ValidationError::InvalidFormat {
                        field: "table_number".to_string(),
                        reason: "only valid for dine-in orders".to_string(),
                    }
                    .into());
                }
                match new.customer_id {
                    Some(id) => {
                        self.customers.get(&id).ok_or_else(|| OpsError::UnknownReference {
                            kind: "customer",
                            id: id.clone(),
                        })?;
                        Some(id)
                    }
                    None => None,
                }
            }
        };

        let mut state = self.state.lock().expect("order mutex poisoned");
        let order = Order {
            id: state.next_id,
            customer_id,
            meal: new.meal,
            quantity: new.quantity,
            unit_price: new.unit_price,
            total: Order::compute_total(new.unit_price, new.quantity),
            date: new.date,
            status: new.initial_status,
            channel: new.channel,
            table_number: new.table_number,
        };

        // Creating directly in Completed carries the same guarantees as a
        // transition into Completed: consume and record income first, store
        // only on success.
        if new.initial_status == OrderStatus::Completed {
            self.apply_completion(&order)?;
        }

        state.next_id += 1;
        state.orders.push(order.clone());
        info!(
            order_id = order.id,
            meal = %order.meal,
            quantity = order.quantity,
            total = %order.total,
            status = ?order.status,
            "Order created"
        );

        Ok(order)
    }

    // =========================================================================
    // Status Transitions
    // =========================================================================

    /// Advances an order through the state machine.
    pub fn set_order_status(&self, order_id: u64, new_status: OrderStatus) -> OpsResult<Order> {
        let mut state = self.state.lock().expect("order mutex poisoned");

        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| OpsError::UnknownReference {
                kind: "order",
                id: order_id.to_string(),
            })?;

        let current = order.status;

        // Idempotent re-completion: neither stock nor finance change.
        if current == OrderStatus::Completed && new_status == OrderStatus::Completed {
            debug!(order_id, "Order already completed; no-op");
            return Ok(order.clone());
        }

        if !current.can_transition_to(new_status) {
            warn!(order_id, from = ?current, to = ?new_status, "Transition rejected");
            return Err(OpsError::InvalidTransition {
                order_id,
                from: current,
                to: new_status,
            });
        }

        if new_status == OrderStatus::Completed {
            // Borrow ends here; completion works on a snapshot of the order.
            let snapshot = order.clone();
            self.apply_completion(&snapshot)?;

            let order = state
                .orders
                .iter_mut()
                .find(|o| o.id == order_id)
                .expect("order vanished under lock");
            order.status = OrderStatus::Completed;
            info!(order_id, "Order completed");
            return Ok(order.clone());
        }

        order.status = new_status;
        info!(order_id, from = ?current, to = ?new_status, "Order status updated");
        Ok(order.clone())
    }

    /// Consumption and income recording for a completion. The stored status
    /// is only flipped by the caller after this returns `Ok`.
    fn apply_completion(&self, order: &Order) -> OpsResult<()> {
        let report = self
            .inventory
            .check_availability(&order.meal, order.quantity);
        if !report.ok {
            return Err(OpsError::InsufficientStock {
                shortfalls: report.shortfalls,
            });
        }

        // A concurrent completion may still win between the check above and
        // this call; consume re-validates under the inventory lock.
        self.inventory.consume(&order.meal, order.quantity)?;
        self.finance.record_income(order);
        Ok(())
    }

    // =========================================================================
    // Deletion & Reads
    // =========================================================================

    /// Deletes an order. Completed orders are immutable history and cannot
    /// be deleted; anything earlier (including cancelled) can.
    pub fn delete_order(&self, order_id: u64) -> OpsResult<()> {
        let mut state = self.state.lock().expect("order mutex poisoned");

        let order = state
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .ok_or_else(|| OpsError::UnknownReference {
                kind: "order",
                id: order_id.to_string(),
            })?;

        if order.status == OrderStatus::Completed {
            return Err(OpsError::OrderNotDeletable { order_id });
        }

        state.orders.retain(|o| o.id != order_id);
        info!(order_id, "Order deleted");
        Ok(())
    }

    /// Looks up an order by id.
    pub fn get_order(&self, order_id: u64) -> OpsResult<Order> {
        let state = self.state.lock().expect("order mutex poisoned");
        state
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| OpsError::UnknownReference {
                kind: "order",
                id: order_id.to_string(),
            })
    }

    /// Lists all orders.
    pub fn list_orders(&self) -> Vec<Order> {
        self.state.lock().expect("order mutex poisoned").orders.clone()
    }

    /// Replaces all orders (snapshot restore).
    pub fn load_orders(&self, orders: Vec<Order>, next_id: u64) {
        let mut state = self.state.lock().expect("order mutex poisoned");
        state.orders = orders;
        state.next_id = next_id;
    }

    /// The id the next created order will receive (snapshot export).
    pub fn next_order_id(&self) -> u64 {
        self.state.lock().expect("order mutex poisoned").next_id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
