use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use shopping_tracker::{
    category::Categories,
    initialize_db,
    purchase::{NewPurchase, PurchaseStore, SQLitePurchaseStore},
};

/// A utility for creating a test database for the shopping tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Name, amount, category and how many days ago each demo purchase was made.
const DEMO_PURCHASES: [(&str, f64, &str, i64); 14] = [
    ("Leche", 3.5, "Alimentos", 0),
    ("Billete de autobús", 2.0, "Transporte", 0),
    ("Pan", 1.8, "Alimentos", 1),
    ("Cine", 9.5, "Entretenimiento", 2),
    ("Farmacia", 12.3, "Salud", 4),
    ("Bombillas", 7.9, "Hogar", 6),
    ("Café", 2.4, "Alimentos", 9),
    ("Gasolina", 45.0, "Transporte", 13),
    ("Regalo", 25.0, "Otros", 20),
    ("Supermercado", 63.2, "Alimentos", 32),
    ("Taxi", 14.0, "Transporte", 35),
    ("Concierto", 40.0, "Entretenimiento", 38),
    ("Dentista", 80.0, "Salud", 41),
    ("Sartén", 22.5, "Hogar", 44),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating demo purchases...");

    let store = SQLitePurchaseStore::new(Arc::new(Mutex::new(conn)));
    let categories = Categories::default();
    let today = OffsetDateTime::now_utc().date();

    // Oldest first so the most recent purchases are listed first.
    for (name, amount, category, days_ago) in DEMO_PURCHASES.iter().rev() {
        let date = today - Duration::days(*days_ago);
        store.create(NewPurchase::new(name, *amount, category, date, &categories)?)?;
    }

    println!("Created {} purchases.", store.count()?);
    println!("Success!");

    Ok(())
}
