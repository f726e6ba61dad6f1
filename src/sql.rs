//! A SQL statement paired with its named parameters.
//!
//! Each query operation has a builder function that returns a [SqlQuery]. The
//! builders are pure so they can be tested without a database.

use rusqlite::{Connection, Row, ToSql, types::Value};

use crate::Error;

/// A SQL statement together with the values of its named parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SqlQuery {
    /// The SQL text, using `:name` style parameters.
    pub(crate) sql: String,
    /// The parameter names (including the leading colon) and their values.
    pub(crate) params: Vec<(&'static str, Value)>,
}

impl SqlQuery {
    /// Look up the value bound to the parameter `name`.
    #[cfg(test)]
    pub(crate) fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(param_name, _)| *param_name == name)
            .map(|(_, value)| value)
    }

    /// Run the query and map every returned row with `map_row`.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if the statement cannot be prepared or run,
    /// or if a row cannot be mapped.
    pub(crate) fn query_map<T, F>(
        &self,
        connection: &Connection,
        map_row: F,
    ) -> Result<Vec<T>, Error>
    where
        F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        let params = self.named_params();

        connection
            .prepare(&self.sql)?
            .query_map(params.as_slice(), map_row)?
            .map(|row_result| row_result.map_err(Error::from))
            .collect()
    }

    /// Run a query that always returns exactly one row, e.g. an aggregate
    /// without a `GROUP BY` clause.
    ///
    /// # Errors
    /// Returns [Error::SqlError] if the statement cannot be prepared or run,
    /// or if the row cannot be mapped.
    pub(crate) fn query_one<T, F>(&self, connection: &Connection, map_row: F) -> Result<T, Error>
    where
        F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
    {
        let params = self.named_params();

        let value = connection
            .prepare(&self.sql)?
            .query_one(params.as_slice(), map_row)?;

        Ok(value)
    }

    fn named_params(&self) -> Vec<(&str, &dyn ToSql)> {
        self.params
            .iter()
            .map(|(name, value)| (*name, value as &dyn ToSql))
            .collect()
    }
}
