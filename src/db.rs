//! Database setup for the application.

use rusqlite::{Connection, Transaction as SqlTransaction, functions::FunctionFlags};

use crate::{Error, transaction::create_transaction_table};

/// Prepare `connection` for the application: register the custom SQL
/// functions and create the tables if they do not already exist.
///
/// Existing data is left untouched, so this is safe to call every time the
/// server starts.
///
/// # Errors
/// Returns an [Error::SqlError] if a function cannot be registered or a table
/// cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Register `fold_case(text)`, which lowercases text with Unicode rules.
///
/// Functions live on the connection, not in the database file, so this must
/// run for every new connection.
pub(crate) fn register_functions(connection: &Connection) -> Result<(), Error> {
    connection.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )?;

    Ok(())
}
