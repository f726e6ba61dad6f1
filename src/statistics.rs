//! Monthly sale statistics.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, month::SaleMonth, sql::SqlQuery, transaction::filter::TransactionFilter};

/// Totals for the transactions in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// The sum of the prices of sold items.
    pub total_sale_amount: f64,
    /// The number of sold items.
    pub total_sold_items: u64,
    /// The number of items that have not been sold.
    pub total_not_sold_items: u64,
}

/// Build the SQL that computes [SaleStatistics] for `month`.
///
/// The aggregate has no `GROUP BY`, so it yields exactly one row, with zeros
/// when no transactions match.
pub(crate) fn build_statistics_query(month: SaleMonth) -> SqlQuery {
    let filter = TransactionFilter::month(month);

    let sql = format!(
        "SELECT \
            TOTAL(CASE WHEN sold THEN price ELSE 0 END), \
            COUNT(CASE WHEN sold THEN 1 END), \
            COUNT(CASE WHEN NOT sold THEN 1 END) \
        FROM \"transaction\" \
        WHERE {}",
        filter.where_clause()
    );

    SqlQuery {
        sql,
        params: filter.params(),
    }
}

/// Compute the sale statistics for the transactions sold in `month` of any year.
///
/// A month without transactions is not an error, all totals are zero.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_sale_statistics(
    month: SaleMonth,
    connection: &Connection,
) -> Result<SaleStatistics, Error> {
    build_statistics_query(month).query_one(connection, |row| {
        Ok(SaleStatistics {
            total_sale_amount: row.get(0)?,
            total_sold_items: row.get::<_, u32>(1)?.into(),
            total_not_sold_items: row.get::<_, u32>(2)?.into(),
        })
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;
    use time::macros::datetime;

    use crate::{
        month::SaleMonth,
        statistics::{SaleStatistics, build_statistics_query, get_sale_statistics},
        test_utils::{get_test_connection, insert},
    };

    fn month(number: u8) -> SaleMonth {
        SaleMonth::new(number).unwrap()
    }

    #[test]
    fn builds_query_for_month() {
        let query = build_statistics_query(month(7));

        assert!(!query.sql.contains("GROUP BY"));
        assert_eq!(query.params, vec![(":month", Value::Integer(7))]);
    }

    #[test]
    fn sums_sold_prices_and_counts_items() {
        let conn = get_test_connection();
        insert(&conn, "Cup", 50.0, datetime!(2022-03-04 9:00 UTC), "kitchen", true);
        insert(&conn, "Pan", 150.0, datetime!(2022-03-05 9:00 UTC), "kitchen", false);
        insert(&conn, "Oven", 950.0, datetime!(2022-03-06 9:00 UTC), "kitchen", true);
        insert(&conn, "Fridge", 1500.0, datetime!(2022-04-06 9:00 UTC), "kitchen", true);

        let got = get_sale_statistics(month(3), &conn).unwrap();

        assert_eq!(
            got,
            SaleStatistics {
                total_sale_amount: 1000.0,
                total_sold_items: 2,
                total_not_sold_items: 1,
            }
        );
    }

    #[test]
    fn ignores_the_year() {
        let conn = get_test_connection();
        insert(&conn, "Cup", 10.0, datetime!(2019-06-04 9:00 UTC), "kitchen", true);
        insert(&conn, "Pan", 20.0, datetime!(2023-06-05 9:00 UTC), "kitchen", true);

        let got = get_sale_statistics(month(6), &conn).unwrap();

        assert_eq!(got.total_sale_amount, 30.0);
        assert_eq!(got.total_sold_items, 2);
    }

    #[test]
    fn empty_month_is_all_zeros() {
        let conn = get_test_connection();
        insert(&conn, "Cup", 10.0, datetime!(2019-06-04 9:00 UTC), "kitchen", true);

        let got = get_sale_statistics(month(1), &conn).unwrap();

        assert_eq!(got, SaleStatistics::default());
    }

    #[test]
    fn sold_and_unsold_add_up_to_month_total() {
        let conn = get_test_connection();
        for i in 0..17 {
            insert(
                &conn,
                "item",
                i as f64,
                datetime!(2021-09-10 9:00 UTC),
                "misc",
                i % 3 == 0,
            );
        }

        let got = get_sale_statistics(month(9), &conn).unwrap();

        assert_eq!(got.total_sold_items + got.total_not_sold_items, 17);
        assert_eq!(got.total_sold_items, 6);
    }
}
