//! A single response combining every monthly query.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    bar_chart::{PriceRangeCount, get_price_histogram},
    pie_chart::{CategoryCount, get_category_breakdown},
    statistics::{SaleStatistics, get_sale_statistics},
    transaction::{ListTransactionsQuery, Transaction, list_transactions},
};

/// The results of the listing, statistics, bar chart and pie chart queries for
/// one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// One page of the month's transactions.
    pub transactions: Vec<Transaction>,
    /// The month's sale statistics.
    pub statistics: SaleStatistics,
    /// The month's price histogram.
    pub bar_chart: Vec<PriceRangeCount>,
    /// The month's transaction count per category.
    pub pie_chart: Vec<CategoryCount>,
}

/// Run every monthly query for `query.month` against the same connection.
///
/// The statistics and charts cover the whole month, the search and page in
/// `query` only apply to the transaction listing.
///
/// # Errors
/// Returns the error of the first query that fails. No partial view is
/// returned.
pub fn get_combined_view(
    query: &ListTransactionsQuery,
    connection: &Connection,
) -> Result<CombinedView, Error> {
    Ok(CombinedView {
        transactions: list_transactions(query, connection)?,
        statistics: get_sale_statistics(query.month, connection)?,
        bar_chart: get_price_histogram(query.month, connection)?,
        pie_chart: get_category_breakdown(query.month, connection)?,
    })
}
