//! # Seed Data Generator
//!
//! Populates the saved-product catalog with a starter set for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p till-db --bin seed
//!
//! # Specify database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! The catalog is tiny on purpose: it mirrors the quick-pick buttons of a
//! small café register, not a supermarket inventory. Seeding is skipped if
//! the catalog already has entries, so it is safe to run repeatedly.

use std::env;

use till_core::SavedProduct;
use till_db::{Database, DbConfig};

/// Starter catalog: name and price in cents.
const STARTER_CATALOG: &[(&str, i64)] = &[
    ("Café", 180),
    ("Café Allongé", 220),
    ("Cappuccino", 350),
    ("Chocolat Chaud", 380),
    ("Thé", 280),
    ("Croissant", 120),
    ("Pain au Chocolat", 130),
    ("Muffin", 300),
    ("Jus d'orange", 350),
    ("Eau Minérale", 200),
    ("Sandwich Jambon", 450),
    ("Salade du Jour", 680),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./till_dev.db");

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
                println!("Till Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./till_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Till Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Skip if the catalog already has entries
    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Catalog already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalog...");

    let mut seeded = 0;
    for (name, price_cents) in STARTER_CATALOG {
        let product = SavedProduct {
            name: (*name).to_string(),
            price_cents: *price_cents,
        };

        if let Err(e) = db.catalog().save(&product).await {
            eprintln!("Failed to seed {}: {}", product.name, e);
            continue;
        }

        seeded += 1;
    }

    println!("✓ Seeded {} products", seeded);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
