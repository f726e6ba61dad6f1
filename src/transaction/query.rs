//! Query for listing a page of transactions.

use rusqlite::{Connection, types::Value};

use crate::{Error, month::SaleMonth, pagination::PageRequest, sql::SqlQuery};

use super::{Transaction, filter::TransactionFilter, map_transaction_row};

/// The validated inputs for listing transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTransactionsQuery {
    /// Only transactions sold in this month (of any year) are listed.
    pub month: SaleMonth,
    /// Optional text that the title or description must contain, ignoring case.
    pub search: Option<String>,
    /// The page of results to return.
    pub page: PageRequest,
}

/// Build the SQL for one page of transactions matching `query`.
///
/// Results are sorted by ID so that consecutive pages never overlap.
pub(crate) fn build_list_transactions_query(query: &ListTransactionsQuery) -> SqlQuery {
    let filter = TransactionFilter::month(query.month).search(query.search.as_deref());

    let sql = format!(
        "SELECT id, title, description, price, date_of_sale, category, sold \
        FROM \"transaction\" \
        WHERE {} \
        ORDER BY id ASC \
        LIMIT :limit OFFSET :offset",
        filter.where_clause()
    );

    let mut params = filter.params();
    params.push((":limit", Value::Integer(to_sql_integer(query.page.limit()))));
    params.push((":offset", Value::Integer(to_sql_integer(query.page.offset()))));

    SqlQuery { sql, params }
}

/// Get one page of the transactions matching `query`.
///
/// An empty page is not an error, e.g. when `page` is past the last page.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be read.
pub fn list_transactions(
    query: &ListTransactionsQuery,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    build_list_transactions_query(query).query_map(connection, map_transaction_row)
}

/// SQLite integers are signed, so clamp huge page offsets instead of wrapping.
fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
