//! # Customer Directory
//!
//! Owns customer records; resolves or creates a canonical customer for
//! dine-in orders.
//!
//! ## Uniqueness Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Non-dine-in customers:  phone and email unique across ALL of them  │
//! │                                                                     │
//! │  Dine-in customers:      one record per table number, identified    │
//! │                          by the canonical name "DineIn-Table-{n}";  │
//! │                          exempt from phone/email uniqueness         │
//! │                          (they have no real contact details)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `find_or_create_dine_in` is idempotent: N orders against table 5
//! produce exactly one customer record, all referencing the same id.

use std::sync::Mutex;

use tracing::{debug, info};
use uuid::Uuid;

use bistro_core::validation::{
    validate_customer_name, validate_email, validate_phone, validate_table_number,
};
use bistro_core::{Customer, CustomerType, OpsError, OpsResult};

/// Input for adding or editing a customer.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub customer_type: CustomerType,
}

/// Repository for customer records.
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: Mutex<Vec<Customer>>,
}

impl CustomerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a customer, enforcing phone/email uniqueness across non-dine-in
    /// records. Validation runs fully before any mutation.
    pub fn add_customer(&self, input: CustomerInput) -> OpsResult<Customer> {
        validate_customer_name(&input.name)?;
        validate_phone(&input.phone)?;
        validate_email(&input.email)?;

        let mut customers = self.customers.lock().expect("customer mutex poisoned");
        check_contact_unique(&customers, &input, None)?;

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            customer_type: input.customer_type,
        };
        info!(id = %customer.id, name = %customer.name, "Customer added");

        customers.push(customer.clone());
        Ok(customer)
    }

    /// Updates a customer's details (type is immutable), re-validating
    /// contact uniqueness against every OTHER non-dine-in record.
    pub fn update_customer(&self, id: &str, input: CustomerInput) -> OpsResult<Customer> {
        validate_customer_name(&input.name)?;
        validate_phone(&input.phone)?;
        validate_email(&input.email)?;

        let mut customers = self.customers.lock().expect("customer mutex poisoned");
        check_contact_unique(&customers, &input, Some(id))?;

        let customer = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| OpsError::UnknownReference {
                kind: "customer",
                id: id.to_string(),
            })?;

        customer.name = input.name;
        customer.phone = input.phone;
        customer.email = input.email;
        customer.address = input.address;
        info!(id = %customer.id, "Customer updated");

        Ok(customer.clone())
    }

    /// Deletes a customer by id.
    pub fn delete_customer(&self, id: &str) -> OpsResult<()> {
        let mut customers = self.customers.lock().expect("customer mutex poisoned");
        let before = customers.len();
        customers.retain(|c| c.id != id);

        if customers.len() == before {
            return Err(OpsError::UnknownReference {
                kind: "customer",
                id: id.to_string(),
            });
        }

        info!(id, "Customer deleted");
        Ok(())
    }

    /// Resolves the canonical customer for a dine-in table, creating it on
    /// first use. Idempotent: repeated calls with the same table number
    /// return the same id.
    pub fn find_or_create_dine_in(&self, table_number: u32) -> OpsResult<Customer> {
        validate_table_number(table_number)?;

        let canonical_name = Customer::dine_in_name(table_number);
        let mut customers = self.customers.lock().expect("customer mutex poisoned");

        if let Some(existing) = customers
            .iter()
            .find(|c| c.is_dine_in() && c.name == canonical_name)
        {
            debug!(id = %existing.id, table_number, "Dine-in customer resolved");
            return Ok(existing.clone());
        }

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: canonical_name,
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            customer_type: CustomerType::DineIn,
        };
        info!(id = %customer.id, table_number, "Dine-in customer created");

        customers.push(customer.clone());
        Ok(customer)
    }

    /// Looks up a customer by id.
    pub fn get(&self, id: &str) -> Option<Customer> {
        let customers = self.customers.lock().expect("customer mutex poisoned");
        customers.iter().find(|c| c.id == id).cloned()
    }

    /// Lists all customers.
    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.lock().expect("customer mutex poisoned").clone()
    }

    /// Number of records (tests and dashboards).
    pub fn count(&self) -> usize {
        self.customers.lock().expect("customer mutex poisoned").len()
    }

    /// Replaces all customers (snapshot restore).
    pub fn load_customers(&self, loaded: Vec<Customer>) {
        let mut customers = self.customers.lock().expect("customer mutex poisoned");
        *customers = loaded;
    }
}

/// Phone/email must not collide with any other non-dine-in customer.
/// Dine-in records are exempt on both sides of the comparison.
fn check_contact_unique(
    customers: &[Customer],
    input: &CustomerInput,
    exclude_id: Option<&str>,
) -> OpsResult<()> {
    if input.customer_type == CustomerType::DineIn {
        return Ok(());
    }

    for existing in customers
        .iter()
        .filter(|c| !c.is_dine_in() && Some(c.id.as_str()) != exclude_id)
    {
        if existing.phone == input.phone {
            return Err(OpsError::DuplicateContact {
                field: "phone",
                value: input.phone.clone(),
            });
        }
        if existing.email == input.email {
            return Err(OpsError::DuplicateContact {
                field: "email",
                value: input.email.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
