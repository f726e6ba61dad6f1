//! Route handlers for the JSON API.
//!
//! Handlers validate the query string, lock the database connection and then
//! hand off to one of the query functions.

use std::sync::MutexGuard;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    bar_chart::{PriceRangeCount, get_price_histogram},
    combined::{CombinedView, get_combined_view},
    month::SaleMonth,
    pagination::{PageRequest, PaginationConfig},
    pie_chart::{CategoryCount, get_category_breakdown},
    statistics::{SaleStatistics, get_sale_statistics},
    transaction::{ListTransactionsQuery, Transaction, list_transactions},
};

/// Query parameters for endpoints that only need a month.
///
/// Values are kept as strings so that invalid input is reported with the
/// same JSON error body as every other error.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    month: Option<String>,
}

/// Query parameters for the transaction listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsParams {
    month: Option<String>,
    search: Option<String>,
    page: Option<String>,
    per_page: Option<String>,
}

impl TransactionsParams {
    fn into_list_query(self, config: &PaginationConfig) -> Result<ListTransactionsQuery, Error> {
        Ok(ListTransactionsQuery {
            month: SaleMonth::parse(self.month.as_deref())?,
            search: self.search,
            page: PageRequest::parse(self.page.as_deref(), self.per_page.as_deref(), config)?,
        })
    }
}

fn lock_connection(state: &AppState) -> Result<MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// Report that the server is up.
pub async fn get_health() -> Json<&'static str> {
    Json("OK")
}

/// List one page of the transactions sold in a month.
pub async fn get_transactions(
    State(state): State<AppState>,
    params: Result<Query<TransactionsParams>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let Query(params) = params?;
    let query = params.into_list_query(&state.pagination_config)?;
    let connection = lock_connection(&state)?;

    let transactions = list_transactions(&query, &connection)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    tracing::debug!(
        "listed {} transactions for month {} (page {})",
        transactions.len(),
        query.month,
        query.page.page
    );

    Ok(Json(transactions))
}

/// Get the sale statistics for a month.
pub async fn get_statistics(
    State(state): State<AppState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<SaleStatistics>, Error> {
    let Query(params) = params?;
    let month = SaleMonth::parse(params.month.as_deref())?;
    let connection = lock_connection(&state)?;

    let statistics = get_sale_statistics(month, &connection)
        .inspect_err(|error| tracing::error!("could not get statistics: {error}"))?;

    Ok(Json(statistics))
}

/// Get the price histogram for a month.
pub async fn get_bar_chart(
    State(state): State<AppState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let Query(params) = params?;
    let month = SaleMonth::parse(params.month.as_deref())?;
    let connection = lock_connection(&state)?;

    let histogram = get_price_histogram(month, &connection)
        .inspect_err(|error| tracing::error!("could not get bar chart data: {error}"))?;

    Ok(Json(histogram))
}

/// Get the number of transactions per category for a month.
pub async fn get_pie_chart(
    State(state): State<AppState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let Query(params) = params?;
    let month = SaleMonth::parse(params.month.as_deref())?;
    let connection = lock_connection(&state)?;

    let categories = get_category_breakdown(month, &connection)
        .inspect_err(|error| tracing::error!("could not get pie chart data: {error}"))?;

    Ok(Json(categories))
}

/// Get the transactions, statistics, bar chart and pie chart for a month in
/// one response.
///
/// Accepts the same parameters as [get_transactions]. All four queries run
/// under one database lock, so they see the same data.
pub async fn get_combined(
    State(state): State<AppState>,
    params: Result<Query<TransactionsParams>, QueryRejection>,
) -> Result<Json<CombinedView>, Error> {
    let Query(params) = params?;
    let query = params.into_list_query(&state.pagination_config)?;
    let connection = lock_connection(&state)?;

    let view = get_combined_view(&query, &connection)
        .inspect_err(|error| tracing::error!("could not get combined data: {error}"))?;

    Ok(Json(view))
}

/// The fallback for routes that do not exist.
pub async fn get_404_not_found() -> Error {
    Error::NotFound
}
