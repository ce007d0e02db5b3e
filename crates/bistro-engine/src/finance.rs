//! # Finance Ledger
//!
//! Derives income/cost/profit figures from completed orders and a
//! fixed-cost configuration.
//!
//! ## Determinism
//! `summary()` is a pure function of the recorded entries and the
//! fixed-cost configuration: identical inputs always yield identical
//! output. The fixed-cost total is recomputed from the configuration on
//! every call, never stored, so edits can never drift out of sync.
//!
//! ## Exactly-Once Recording
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   record_income(order)                              │
//! │                                                                     │
//! │  already an Income record for this order id?                        │
//! │        │                                                            │
//! │        ├── yes ──► no-op (idempotent; recomputation never           │
//! │        │           duplicates records)                              │
//! │        ▼                                                            │
//! │  append Income(total) + VariableCost(rate × total)                  │
//! │  in the same critical section                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use bistro_core::validation::validate_cost_name;
use bistro_core::{
    CostRate, FinancialRecord, FinancialSummary, Money, OpsError, OpsResult, Order, RecordKind,
};

#[derive(Debug, Default)]
struct FinanceState {
    /// Named fixed-cost components (rent, salaries, utilities, ...).
    /// BTreeMap keeps summaries and snapshots deterministically ordered.
    fixed_costs: BTreeMap<String, Money>,

    /// Append-only ledger entries.
    records: Vec<FinancialRecord>,
}

/// Ledger of financial records plus the cost configuration.
#[derive(Debug)]
pub struct FinanceLedger {
    state: Mutex<FinanceState>,

    /// Fraction of each completed order's total attributed to variable
    /// cost. A heuristic (default 40%), configurable rather than derived
    /// from ingredient unit costs.
    variable_cost_rate: Mutex<CostRate>,
}

impl FinanceLedger {
    /// Creates an empty ledger with the default 40% variable-cost rate.
    pub fn new() -> Self {
        FinanceLedger {
            state: Mutex::new(FinanceState::default()),
            variable_cost_rate: Mutex::new(CostRate::default()),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Sets (or replaces) a named fixed-cost component.
    ///
    /// Appends a FixedCost audit record; the summary's fixed-cost total is
    /// still recomputed from the configuration, not from these records.
    pub fn set_fixed_cost(&self, name: &str, amount: Money) -> OpsResult<()> {
        validate_cost_name(name)?;

        if amount.is_negative() {
            return Err(OpsError::NegativeAmount {
                cents: amount.cents(),
            });
        }

        let mut state = self.state.lock().expect("finance mutex poisoned");
        state.fixed_costs.insert(name.to_string(), amount);
        state.records.push(FinancialRecord {
            id: Uuid::new_v4().to_string(),
            kind: RecordKind::FixedCost,
            amount,
            description: format!("Fixed cost '{name}' set"),
            timestamp: Utc::now(),
            order_id: None,
        });
        info!(name, amount = %amount, "Fixed cost set");

        Ok(())
    }

    /// Replaces the variable-cost rate.
    pub fn set_variable_cost_rate(&self, rate: CostRate) {
        let mut current = self.variable_cost_rate.lock().expect("rate mutex poisoned");
        info!(bps = rate.bps(), "Variable-cost rate changed");
        *current = rate;
    }

    /// The current variable-cost rate.
    pub fn variable_cost_rate(&self) -> CostRate {
        *self.variable_cost_rate.lock().expect("rate mutex poisoned")
    }

    /// The current fixed-cost configuration.
    pub fn fixed_costs(&self) -> BTreeMap<String, Money> {
        self.state.lock().expect("finance mutex poisoned").fixed_costs.clone()
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Records income (and the matching variable cost) for an order the
    /// FIRST time it reaches `Completed`. Subsequent calls for the same
    /// order are no-ops.
    ///
    /// Returns whether records were newly created.
    pub fn record_income(&self, order: &Order) -> bool {
        let rate = self.variable_cost_rate();
        let mut state = self.state.lock().expect("finance mutex poisoned");

        let already_recorded = state
            .records
            .iter()
            .any(|r| r.kind == RecordKind::Income && r.order_id == Some(order.id));
        if already_recorded {
            debug!(order_id = order.id, "Income already recorded; skipping");
            return false;
        }

        let now = Utc::now();
        let variable_cost = order.total.apply_rate(rate);

        state.records.push(FinancialRecord {
            id: Uuid::new_v4().to_string(),
            kind: RecordKind::Income,
            amount: order.total,
            description: format!("Order #{}: {} × {}", order.id, order.quantity, order.meal),
            timestamp: now,
            order_id: Some(order.id),
        });
        state.records.push(FinancialRecord {
            id: Uuid::new_v4().to_string(),
            kind: RecordKind::VariableCost,
            amount: variable_cost,
            description: format!("Order #{}: variable cost at {}%", order.id, rate.percentage()),
            timestamp: now,
            order_id: Some(order.id),
        });
        info!(order_id = order.id, income = %order.total, variable_cost = %variable_cost, "Income recorded");

        true
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Derived financial figures.
    ///
    /// `profit = total_income − total_fixed_cost − total_variable_cost`,
    /// with the fixed-cost total recomputed from the configuration.
    pub fn summary(&self) -> FinancialSummary {
        let state = self.state.lock().expect("finance mutex poisoned");

        let total_income: Money = state
            .records
            .iter()
            .filter(|r| r.kind == RecordKind::Income)
            .map(|r| r.amount)
            .sum();
        let total_variable_cost: Money = state
            .records
            .iter()
            .filter(|r| r.kind == RecordKind::VariableCost)
            .map(|r| r.amount)
            .sum();
        let total_fixed_cost: Money = state.fixed_costs.values().copied().sum();

        FinancialSummary {
            total_income,
            total_fixed_cost,
            total_variable_cost,
            profit: total_income - total_fixed_cost - total_variable_cost,
        }
    }

    /// All ledger entries (snapshot export, reporting).
    pub fn records(&self) -> Vec<FinancialRecord> {
        self.state.lock().expect("finance mutex poisoned").records.clone()
    }

    /// Number of ledger entries (tests).
    pub fn record_count(&self) -> usize {
        self.state.lock().expect("finance mutex poisoned").records.len()
    }

    /// Replaces records and configuration (snapshot restore).
    pub fn load(
        &self,
        records: Vec<FinancialRecord>,
        fixed_costs: BTreeMap<String, Money>,
        rate: CostRate,
    ) {
        let mut state = self.state.lock().expect("finance mutex poisoned");
        state.records = records;
        state.fixed_costs = fixed_costs;
        drop(state);
        self.set_variable_cost_rate(rate);
    }
}

impl Default for FinanceLedger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{OrderChannel, OrderStatus};
    use chrono::NaiveDate;

    fn completed_order(id: u64, total_cents: i64) -> Order {
        Order {
            id,
            customer_id: None,
            meal: "TomatoBeefNoodles".to_string(),
            quantity: 2,
            unit_price: Money::from_cents(total_cents / 2),
            total: Money::from_cents(total_cents),
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            status: OrderStatus::Completed,
            channel: OrderChannel::Delivery,
            table_number: None,
        }
    }

    #[test]
    fn test_record_income_creates_income_and_variable_cost() {
        let ledger = FinanceLedger::new();
        let order = completed_order(1, 3000);

        assert!(ledger.record_income(&order));

        let summary = ledger.summary();
        assert_eq!(summary.total_income.cents(), 3000);
        assert_eq!(summary.total_variable_cost.cents(), 1200); // 40%
        assert_eq!(summary.profit.cents(), 1800);
        assert_eq!(ledger.record_count(), 2);
    }

    #[test]
    fn test_record_income_is_idempotent_per_order() {
        let ledger = FinanceLedger::new();
        let order = completed_order(1, 3000);

        assert!(ledger.record_income(&order));
        assert!(!ledger.record_income(&order));

        assert_eq!(ledger.record_count(), 2);
        assert_eq!(ledger.summary().total_income.cents(), 3000);
    }

    #[test]
    fn test_fixed_cost_recomputed_from_config() {
        let ledger = FinanceLedger::new();
        ledger.set_fixed_cost("rent", Money::from_cents(200_000)).unwrap();
        ledger.set_fixed_cost("salaries", Money::from_cents(500_000)).unwrap();
        // Replacing a component replaces, not accumulates
        ledger.set_fixed_cost("rent", Money::from_cents(250_000)).unwrap();

        assert_eq!(ledger.summary().total_fixed_cost.cents(), 750_000);
    }

    #[test]
    fn test_negative_fixed_cost_rejected() {
        let ledger = FinanceLedger::new();
        let err = ledger
            .set_fixed_cost("rent", Money::from_cents(-1))
            .unwrap_err();
        assert!(matches!(err, OpsError::NegativeAmount { cents: -1 }));
        assert!(ledger.fixed_costs().is_empty());
    }

    #[test]
    fn test_summary_is_deterministic() {
        let ledger = FinanceLedger::new();
        ledger.set_fixed_cost("rent", Money::from_cents(100_000)).unwrap();
        ledger.record_income(&completed_order(1, 3000));
        ledger.record_income(&completed_order(2, 5000));

        let first = ledger.summary();
        let second = ledger.summary();
        assert_eq!(first, second);
        assert_eq!(
            first.profit,
            first.total_income - first.total_fixed_cost - first.total_variable_cost
        );
    }

    #[test]
    fn test_configurable_rate_applies_to_new_records() {
        let ledger = FinanceLedger::new();
        ledger.set_variable_cost_rate(CostRate::from_bps(2500)); // 25%
        ledger.record_income(&completed_order(1, 4000));

        assert_eq!(ledger.summary().total_variable_cost.cents(), 1000);
    }
}
