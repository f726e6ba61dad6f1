//! The number of transactions per category for the pie chart.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, month::SaleMonth, sql::SqlQuery, transaction::filter::TransactionFilter};

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of transactions in the category.
    pub count: u64,
}

/// Build the SQL that counts the transactions per category for `month`.
pub(crate) fn build_category_breakdown_query(month: SaleMonth) -> SqlQuery {
    let filter = TransactionFilter::month(month);

    let sql = format!(
        "SELECT category, COUNT(*) \
        FROM \"transaction\" \
        WHERE {} \
        GROUP BY category \
        ORDER BY category ASC",
        filter.where_clause()
    );

    SqlQuery {
        sql,
        params: filter.params(),
    }
}

/// Count the transactions sold in `month` of any year by category.
///
/// Only categories with at least one transaction are returned, sorted by name.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_category_breakdown(
    month: SaleMonth,
    connection: &Connection,
) -> Result<Vec<CategoryCount>, Error> {
    build_category_breakdown_query(month).query_map(connection, |row| {
        Ok(CategoryCount {
            category: row.get(0)?,
            count: row.get::<_, u32>(1)?.into(),
        })
    })
}
