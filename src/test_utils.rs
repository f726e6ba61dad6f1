//! Helpers shared by the unit tests.

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    db::initialize,
    transaction::{NewTransaction, Transaction, create_transaction},
};

/// Open an in-memory database with all tables created.
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

/// Insert a transaction with an empty description.
#[track_caller]
pub(crate) fn insert(
    connection: &Connection,
    title: &str,
    price: f64,
    date_of_sale: OffsetDateTime,
    category: &str,
    sold: bool,
) -> Transaction {
    create_transaction(
        NewTransaction::build(title, price, date_of_sale, category).sold(sold),
        connection,
    )
    .expect("Could not create transaction")
}
