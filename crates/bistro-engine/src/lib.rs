//! # Bistro Engine
//!
//! Stateful half of the system: in-memory stores guarded by mutexes, the
//! order lifecycle orchestrator, and the `Bistro` service facade that the
//! presentation layer talks to.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Bistro (service.rs)                          │
//! │                     one facade, no singletons                       │
//! └───────┬───────────────┬────────────────┬────────────────┬───────────┘
//!         │               │                │                │
//! ┌───────▼──────┐ ┌─────▼──────────┐ ┌───▼──────────┐ ┌───▼──────────┐
//! │ OrderLedger  │ │ InventoryStore │ │ CustomerDir  │ │ FinanceLedger│
//! │ (orders.rs)  │ │ (inventory.rs) │ │(customers.rs)│ │ (finance.rs) │
//! └───────┬──────┘ └────────────────┘ └──────────────┘ └──────────────┘
//!         │ completion pipeline:
//!         │ check availability -> consume -> record income -> flip status
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking
//! Each store owns one mutex. The only multi-lock path is order completion,
//! which always takes the orders lock first, then inventory, then finance.
//! No store ever calls back into the order ledger, so the ordering cannot
//! invert.
//!
//! Pure domain types and arithmetic live in `bistro-core`; nothing in this
//! crate redefines business rules, it only sequences and stores them.

pub mod customers;
pub mod finance;
pub mod inventory;
pub mod orders;
pub mod service;
pub mod snapshot;

pub use customers::{CustomerDirectory, CustomerInput};
pub use finance::FinanceLedger;
pub use inventory::{InventoryStore, NewItem};
pub use orders::{NewOrder, OrderLedger};
pub use service::{AddItemRequest, Bistro, CreateOrderRequest, CreateOrderResponse, CustomerRequest};
pub use snapshot::Snapshot;
