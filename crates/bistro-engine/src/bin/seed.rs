//! # Demo Data Seeder
//!
//! Builds an engine, loads a realistic week of restaurant activity into it,
//! and writes the snapshot to a JSON file for demos and manual testing.
//!
//! ## Usage
//! ```bash
//! # Seed with defaults, write ./bistro_demo.json
//! cargo run -p bistro-engine --bin seed
//!
//! # Custom output path
//! cargo run -p bistro-engine --bin seed -- --out ./data/demo.json
//! ```
//!
//! ## Generated Data
//! - A small menu with per-ingredient recipes
//! - Ingredient stock with low-stock thresholds
//! - A handful of registered customers plus dine-in walk-ins
//! - Orders across every lifecycle state, several completed so the
//!   financial summary has real numbers in it

use std::env;
use std::fs;

use bistro_core::{CustomerType, OrderChannel, OrderStatus, RecipeCatalog, RecipeLine};
use bistro_engine::{AddItemRequest, Bistro, CreateOrderRequest, CustomerRequest};
use rust_decimal::Decimal;
use tracing::info;

/// Menu: meal name, unit price in cents, per-unit ingredient draw.
const MENU: &[(&str, i64, &[(&str, &str)])] = &[
    (
        "TomatoBeefNoodles",
        1850,
        &[("Tomato", "0.2"), ("Beef", "0.15"), ("Noodles", "0.12")],
    ),
    (
        "KungPaoChicken",
        1650,
        &[("Chicken", "0.25"), ("Peanuts", "0.05"), ("Chili", "0.02")],
    ),
    (
        "VegFriedRice",
        1200,
        &[("Rice", "0.2"), ("Egg", "0.1"), ("Scallion", "0.03")],
    ),
    (
        "WontonSoup",
        980,
        &[("Pork", "0.12"), ("WontonWrappers", "0.08"), ("Scallion", "0.02")],
    ),
];

/// Pantry: name, category, unit, opening stock, threshold, unit cost in cents.
const PANTRY: &[(&str, &str, &str, &str, &str, i64)] = &[
    ("Tomato", "produce", "kg", "80", "10", 320),
    ("Beef", "meat", "kg", "25", "5", 4500),
    ("Noodles", "dry goods", "kg", "40", "8", 600),
    ("Chicken", "meat", "kg", "30", "6", 2800),
    ("Peanuts", "dry goods", "kg", "12", "2", 900),
    ("Chili", "produce", "kg", "4", "1", 1500),
    ("Rice", "dry goods", "kg", "60", "15", 280),
    ("Egg", "dairy", "kg", "18", "4", 550),
    ("Scallion", "produce", "kg", "6", "1.5", 400),
    ("Pork", "meat", "kg", "20", "4", 3200),
    ("WontonWrappers", "dry goods", "kg", "10", "2", 750),
];

/// Registered customers: name, phone, email, address, type.
const CUSTOMERS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Wei Zhang",
        "+1 555 010 2233",
        "wei.zhang@example.com",
        "14 Garden Ave",
        "individual",
    ),
    (
        "Harbor Logistics",
        "+1 555 010 4410",
        "orders@harborlogistics.example.com",
        "200 Dock Rd, Suite 5",
        "business",
    ),
    (
        "Mina Okafor",
        "+1 555 010 7781",
        "mina.okafor@example.com",
        "7 Birch Lane",
        "vip",
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut out_path = String::from("./bistro_demo.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Snapshot output path (default: ./bistro_demo.json)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bistro Demo Data Seeder");
    println!("==========================");
    println!("Output: {}", out_path);
    println!();

    let bistro = Bistro::new(build_catalog());
    println!("✓ Recipe catalog: {} meals", MENU.len());

    for (name, category, unit, stock, threshold, cost) in PANTRY {
        bistro.add_inventory_item(AddItemRequest {
            name: (*name).to_string(),
            category: (*category).to_string(),
            unit: (*unit).to_string(),
            current_stock: parse_dec(stock),
            threshold: parse_dec(threshold),
            unit_cost_cents: *cost,
            expiry: None,
        })?;
    }
    println!("✓ Inventory: {} items", PANTRY.len());

    let mut customer_ids = Vec::new();
    for (name, phone, email, address, kind) in CUSTOMERS {
        let customer = bistro.add_customer(CustomerRequest {
            name: (*name).to_string(),
            phone: (*phone).to_string(),
            email: (*email).to_string(),
            address: (*address).to_string(),
            customer_type: match *kind {
                "business" => CustomerType::Business,
                "vip" => CustomerType::Vip,
                _ => CustomerType::Individual,
            },
        })?;
        customer_ids.push(customer.id);
    }
    println!("✓ Customers: {} registered", CUSTOMERS.len());

    bistro.set_fixed_cost("rent", 320_000)?;
    bistro.set_fixed_cost("salaries", 780_000)?;
    bistro.set_fixed_cost("utilities", 45_000)?;
    println!("✓ Fixed costs: rent, salaries, utilities");

    let orders = seed_orders(&bistro, &customer_ids)?;
    println!("✓ Orders: {} created", orders);

    let summary = bistro.get_financial_summary();
    println!();
    println!("Financial summary:");
    println!("  Income:        {}", summary.total_income);
    println!("  Fixed cost:    {}", summary.total_fixed_cost);
    println!("  Variable cost: {}", summary.total_variable_cost);
    println!("  Profit:        {}", summary.profit);

    let low = bistro.low_stock_items();
    if !low.is_empty() {
        println!();
        println!("⚠ Low stock after seeding:");
        for view in &low {
            println!(
                "  {} ({} {} on hand)",
                view.item.name, view.item.current_stock, view.item.unit
            );
        }
    }

    let json = bistro.export_json()?;
    fs::write(&out_path, &json)?;
    info!(path = %out_path, bytes = json.len(), "snapshot written");

    println!();
    println!("✓ Snapshot written to {}", out_path);
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the demo menu catalog from the const table.
fn build_catalog() -> RecipeCatalog {
    let mut catalog = RecipeCatalog::new();
    for (meal, _price, lines) in MENU {
        let lines = lines
            .iter()
            .map(|(ingredient, amount)| RecipeLine::new(*ingredient, parse_dec(amount)))
            .collect();
        catalog = catalog.with_recipe(*meal, lines);
    }
    catalog
}

/// A week of orders across channels and lifecycle states.
fn seed_orders(
    bistro: &Bistro,
    customer_ids: &[String],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut count = 0;

    // Completed delivery orders for the registered customers.
    for (idx, customer_id) in customer_ids.iter().enumerate() {
        let (meal, price, _) = MENU[idx % MENU.len()];
        bistro.create_order(CreateOrderRequest {
            meal: meal.to_string(),
            quantity: 2 + idx as i64,
            unit_price_cents: price,
            date: format!("2026-08-{:02}", 24 + idx),
            channel: OrderChannel::Delivery,
            customer_id: Some(customer_id.clone()),
            table_number: None,
            initial_status: OrderStatus::Completed,
        })?;
        count += 1;
    }

    // Dine-in orders at a few tables, one still cooking.
    for (table, status) in [
        (3, OrderStatus::Completed),
        (5, OrderStatus::InProgress),
        (3, OrderStatus::Received),
    ] {
        let (meal, price, _) = MENU[(table as usize) % MENU.len()];
        bistro.create_order(CreateOrderRequest {
            meal: meal.to_string(),
            quantity: 1,
            unit_price_cents: price,
            date: "2026-08-29".to_string(),
            channel: OrderChannel::DineIn,
            customer_id: None,
            table_number: Some(table),
            initial_status: status,
        })?;
        count += 1;
    }

    // One anonymous delivery order that got cancelled.
    let resp = bistro.create_order(CreateOrderRequest {
        meal: "WontonSoup".to_string(),
        quantity: 4,
        unit_price_cents: 980,
        date: "2026-08-30".to_string(),
        channel: OrderChannel::Delivery,
        customer_id: None,
        table_number: None,
        initial_status: OrderStatus::Received,
    })?;
    bistro.set_order_status(resp.order_id, OrderStatus::Cancelled)?;
    count += 1;

    Ok(count)
}

/// Decimal literals in const tables are strings; parse them here.
fn parse_dec(s: &str) -> Decimal {
    s.parse().unwrap_or(Decimal::ZERO)
}
