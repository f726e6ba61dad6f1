//! The filter shared by every transaction query.
//!
//! All queries select transactions by the month of their sale date, ignoring
//! the year. The transaction listing can additionally narrow the results with
//! a free text search.

use rusqlite::types::Value;

use crate::month::SaleMonth;

/// The SQL predicate matching transactions sold in the month bound to `:month`.
///
/// Dates are stored in UTC, so this is the UTC month of the sale.
pub(crate) const MONTH_PREDICATE: &str =
    "CAST(strftime('%m', date_of_sale) AS INTEGER) = :month";

/// The SQL predicate matching a title or description that contains the
/// lowercase text bound to `:search`.
///
/// SQLite's own `LIKE` and `lower` only fold ASCII letters, so both columns go
/// through `fold_case`, see [register_functions](crate::db::register_functions).
const SEARCH_PREDICATE: &str = "(instr(fold_case(title), :search) > 0 \
    OR instr(fold_case(description), :search) > 0)";

/// Selects transactions sold in a given month of any year, optionally
/// restricted to those whose title or description contains a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TransactionFilter {
    month: SaleMonth,
    search: Option<String>,
}

impl TransactionFilter {
    /// Match every transaction sold in `month`.
    pub(crate) fn month(month: SaleMonth) -> Self {
        Self {
            month,
            search: None,
        }
    }

    /// Also require the title or description to contain `search`.
    ///
    /// Empty or whitespace-only search terms are ignored.
    pub(crate) fn search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_owned);
        self
    }

    /// The SQL for a `WHERE` clause, without the `WHERE` keyword.
    pub(crate) fn where_clause(&self) -> String {
        match self.search {
            Some(_) => format!("{MONTH_PREDICATE} AND {SEARCH_PREDICATE}"),
            None => MONTH_PREDICATE.to_owned(),
        }
    }

    /// The named parameters used by [TransactionFilter::where_clause].
    pub(crate) fn params(&self) -> Vec<(&'static str, Value)> {
        let mut params = vec![(":month", Value::Integer(self.month.number().into()))];

        if let Some(search) = &self.search {
            params.push((":search", Value::Text(search.to_lowercase())));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use crate::{
        month::SaleMonth,
        transaction::filter::{MONTH_PREDICATE, TransactionFilter},
    };

    #[test]
    fn month_only_filter() {
        let filter = TransactionFilter::month(SaleMonth::new(3).unwrap());

        assert_eq!(filter.where_clause(), MONTH_PREDICATE);
        assert_eq!(filter.params(), vec![(":month", Value::Integer(3))]);
    }

    #[test]
    fn search_adds_pattern() {
        let filter = TransactionFilter::month(SaleMonth::new(11).unwrap()).search(Some(" Laptop "));

        let clause = filter.where_clause();
        assert!(clause.starts_with(MONTH_PREDICATE));
        assert!(clause.contains("fold_case(title)"));
        assert!(clause.contains("fold_case(description)"));
        assert_eq!(
            filter.params(),
            vec![
                (":month", Value::Integer(11)),
                (":search", Value::Text("laptop".to_owned()))
            ]
        );
    }

    #[test]
    fn blank_search_is_ignored() {
        let month = SaleMonth::new(1).unwrap();

        assert_eq!(
            TransactionFilter::month(month).search(Some("   ")),
            TransactionFilter::month(month)
        );
    }

    #[test]
    fn search_term_is_lowercased_with_unicode_rules() {
        let filter = TransactionFilter::month(SaleMonth::new(3).unwrap()).search(Some("ÉCLAIR"));

        assert_eq!(
            filter.params()[1],
            (":search", Value::Text("éclair".to_owned()))
        );
    }
}
