use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use budget_tracker::{Transaction, TransactionType, create_transaction, initialize_db};

/// A utility for creating a test database for the budget tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Sample transactions as (days ago, description, category, type, amount).
const SAMPLE_TRANSACTIONS: [(i64, &str, &str, TransactionType, f64); 10] = [
    (0, "Coffee", "Food", TransactionType::Expense, 4.5),
    (2, "Groceries", "Food", TransactionType::Expense, 86.23),
    (5, "Salary", "Income", TransactionType::Income, 3200.0),
    (7, "Rent", "Housing", TransactionType::Expense, 1450.0),
    (12, "Movie tickets", "Entertainment", TransactionType::Expense, 32.0),
    (20, "Freelance work", "Income", TransactionType::Income, 640.0),
    (35, "Electricity", "Utilities", TransactionType::Expense, 121.87),
    (36, "Salary", "Income", TransactionType::Income, 3200.0),
    (40, "Rent", "Housing", TransactionType::Expense, 1450.0),
    (400, "Birthday present", "Gifts", TransactionType::Expense, 75.0),
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

    println!("Creating sample transactions...");

    let today = OffsetDateTime::now_utc().date();

    for (days_ago, description, category, transaction_type, amount) in SAMPLE_TRANSACTIONS {
        let date: Date = today - Duration::days(days_ago);
        create_transaction(
            Transaction::build(amount, date, description, transaction_type).category(category),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
