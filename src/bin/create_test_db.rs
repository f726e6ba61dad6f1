use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use sales_insights::{NewTransaction, count_transactions, create_transaction, initialize_db};

/// A utility for creating a database of product transactions for sales_insights.
///
/// The input is a JSON array of records with the fields `title`,
/// `description`, `price`, `category`, `sold` and `dateOfSale` (RFC 3339).
/// Any other fields, such as `id` or `image`, are ignored.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON file with the transactions to import.
    #[arg(long, short)]
    input_path: String,

    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

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

    println!("Reading transactions from {:#?}", args.input_path);
    let reader = BufReader::new(File::open(&args.input_path)?);
    let transactions: Vec<NewTransaction> = serde_json::from_reader(reader)?;

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Importing {} transactions...", transactions.len());

    let sql_transaction = SqlTransaction::new_unchecked(&conn, TransactionBehavior::Exclusive)?;
    for transaction in transactions {
        create_transaction(transaction, &sql_transaction)?;
    }
    sql_transaction.commit()?;

    println!(
        "Success! The database holds {} transactions.",
        count_transactions(&conn)?
    );

    Ok(())
}
