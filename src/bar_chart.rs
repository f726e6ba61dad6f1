//! A histogram of sale prices for the bar chart.
//!
//! Prices are grouped into fixed, half-open buckets: `[0, 101)`, `[101, 201)`,
//! ..., `[801, 901)` and `[901, ∞)`.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, month::SaleMonth, sql::SqlQuery, transaction::filter::TransactionFilter};

/// The inclusive lower bound of each price bucket, in ascending order.
///
/// Each bucket ends just before the next bound. The last bucket has no upper
/// bound.
const BUCKET_LOWER_BOUNDS: [u32; 10] = [0, 101, 201, 301, 401, 501, 601, 701, 801, 901];

/// The number of transactions whose price falls in a price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// A label for the price range, e.g. "101-200" or "901-above".
    pub range: String,
    /// The number of transactions in the range.
    pub count: u64,
}

/// The label for the bucket at `index` in [BUCKET_LOWER_BOUNDS].
fn bucket_label(index: usize) -> String {
    let lower = BUCKET_LOWER_BOUNDS[index];

    match BUCKET_LOWER_BOUNDS.get(index + 1) {
        Some(next_lower) => format!("{lower}-{}", next_lower - 1),
        None => format!("{lower}-above"),
    }
}

/// Build the SQL that counts the transactions in each price bucket for `month`.
///
/// Rows are `(bucket index, count)` and only non-empty buckets are returned.
pub(crate) fn build_price_histogram_query(month: SaleMonth) -> SqlQuery {
    let filter = TransactionFilter::month(month);

    // Test the highest bound first so each price lands in exactly one bucket.
    let cases: String = BUCKET_LOWER_BOUNDS
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .map(|(index, lower)| format!("WHEN price >= {lower} THEN {index} "))
        .collect();

    let sql = format!(
        "SELECT CASE {cases}ELSE 0 END AS bucket, COUNT(*) \
        FROM \"transaction\" \
        WHERE {} \
        GROUP BY bucket \
        ORDER BY bucket ASC",
        filter.where_clause()
    );

    SqlQuery {
        sql,
        params: filter.params(),
    }
}

/// Count the transactions sold in `month` of any year by price range.
///
/// Every bucket is included, in ascending price order, even when its count is
/// zero.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_price_histogram(
    month: SaleMonth,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let bucket_counts = build_price_histogram_query(month).query_map(connection, |row| {
        Ok((row.get::<_, u32>(0)?, u64::from(row.get::<_, u32>(1)?)))
    })?;

    let mut histogram: Vec<PriceRangeCount> = (0..BUCKET_LOWER_BOUNDS.len())
        .map(|index| PriceRangeCount {
            range: bucket_label(index),
            count: 0,
        })
        .collect();

    for (index, count) in bucket_counts {
        match histogram.get_mut(index as usize) {
            Some(bucket) => bucket.count = count,
            None => tracing::warn!("ignoring count for unknown price bucket {index}"),
        }
    }

    Ok(histogram)
}
