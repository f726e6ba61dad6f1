//! Defines the core data model and database functions for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// A product listed for sale, and whether it has been sold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: i64,
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    pub description: String,
    /// The sale price, never negative.
    pub price: f64,
    /// When the product was sold (or listed), in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A short label grouping similar products, e.g. "electronics".
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
}

/// The fields needed to create a [Transaction].
///
/// This is also the format of the JSON records read by the `create_test_db`
/// tool. Unknown fields in those records are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The name of the product.
    pub title: String,
    /// A longer text description of the product.
    #[serde(default)]
    pub description: String,
    /// The sale price, must not be negative.
    pub price: f64,
    /// When the product was sold. Any offset is accepted and converted to UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A short label grouping similar products.
    pub category: String,
    /// Whether the product has been sold.
    #[serde(default)]
    pub sold: bool,
}

impl NewTransaction {
    /// Create a new, unsold transaction with an empty description.
    ///
    /// Chain [NewTransaction::description] and [NewTransaction::sold] to set
    /// the remaining fields.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime, category: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: String::new(),
            price,
            date_of_sale,
            category: category.to_owned(),
            sold: false,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set whether the product has been sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a new transaction into the database.
///
/// The sale date is converted to UTC before it is stored so that month
/// filtering does not depend on the offset the record was created with.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidParameter] if the price is negative or not a number,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if new_transaction.price.is_nan() || new_transaction.price < 0.0 {
        return Err(Error::InvalidParameter {
            name: "price",
            reason: format!(
                "{} is not a valid price, prices must not be negative",
                new_transaction.price
            ),
        });
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (title, description, price, date_of_sale, category, sold)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, title, description, price, date_of_sale, category, sold",
        )?
        .query_row(
            (
                new_transaction.title,
                new_transaction.description,
                new_transaction.price,
                new_transaction.date_of_sale.to_offset(UtcOffset::UTC),
                new_transaction.category,
                new_transaction.sold,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get::<_, u32>(0)
        })
        .map(u64::from)
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                date_of_sale TEXT NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in table order: id, title, description, price,
/// date_of_sale, category, sold.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        date_of_sale: row.get(4)?,
        category: row.get(5)?,
        sold: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
