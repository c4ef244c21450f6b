//! # Seed Data Generator
//!
//! Populates the database with a small demo ledger for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./divvy_dev.db
//! cargo run -p divvy-db --bin seed
//!
//! # Specify database path
//! cargo run -p divvy-db --bin seed -- --db ./data/divvy.db
//! ```
//!
//! ## Generated Ledger
//! A weekend trip among four friends that uses every split policy, including
//! an equal split that drifts by a cent. After seeding, the resulting
//! balances and settlement plan are printed.

use std::env;

use divvy_core::{balances_to_vec, compute_balances, compute_settlements, compute_splits, Money, SplitPolicy};
use divvy_db::{Database, DbConfig, NewExpense};
use rust_decimal::Decimal;

/// (description, amount in cents, payer, participants, policy, share values)
type DemoExpense = (
    &'static str,
    i64,
    &'static str,
    &'static [&'static str],
    SplitPolicy,
    &'static [i64],
);

const DEMO_LEDGER: &[DemoExpense] = &[
    ("Cabin rental", 48000, "Alice", &["Alice", "Bob", "Carol", "Dan"], SplitPolicy::Equal, &[]),
    ("Groceries", 10000, "Bob", &["Alice", "Bob", "Carol"], SplitPolicy::Equal, &[]),
    ("Fuel", 6000, "Carol", &["Carol", "Dan"], SplitPolicy::Exact, &[2500, 3500]),
    ("Dinner out", 15999, "Dan", &["Alice", "Bob", "Dan"], SplitPolicy::Percentage, &[50, 25, 25]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./divvy_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Divvy Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./divvy_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Divvy Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.expenses().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} expenses", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Recording expenses...");

    for (description, cents, payer, participants, policy, shares) in DEMO_LEDGER {
        let names: Vec<String> = participants.iter().map(|n| n.to_string()).collect();
        let people = db.people().find_or_create_all(&names).await?;
        let payer = db.people().find_or_create(payer).await?;

        let amount = Money::new(Decimal::new(*cents, 2));
        let share_values: Vec<Decimal> = shares.iter().map(|s| Decimal::from(*s)).collect();
        let share_values = policy.requires_share_values().then_some(share_values.as_slice());

        let new = NewExpense {
            description: description.to_string(),
            amount,
            payer,
            split_policy: *policy,
            shares: compute_splits(amount, *policy, &people, share_values)?,
        };

        let expense = db.expenses().create(new).await?;
        println!(
            "  {:<14} {:>8} paid by {:<6} ({}, owed {})",
            expense.description,
            expense.amount,
            expense.payer.name,
            expense.split_policy,
            expense.total_owed()
        );
    }

    let ledger = db.expenses().list_all().await?;
    let balances = compute_balances(&ledger);

    println!();
    println!("Balances:");
    for balance in balances_to_vec(&balances) {
        println!("  {:<6} {:>8}", balance.person, balance.net_balance);
    }

    println!();
    println!("Settlements:");
    for settlement in compute_settlements(&balances) {
        println!("  {} → {}: {}", settlement.from, settlement.to, settlement.amount);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
