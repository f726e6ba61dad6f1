//! Transactions and the queries that list them.
//!
//! This module contains:
//! - The `Transaction` model and `NewTransaction` for creating transactions
//! - The month and search filter shared by every query
//! - The paginated listing query

mod core;
pub(crate) mod filter;
mod query;

pub use core::{
    NewTransaction, Transaction, count_transactions, create_transaction,
    create_transaction_table, map_transaction_row,
};
pub use query::{ListTransactionsQuery, list_transactions};
