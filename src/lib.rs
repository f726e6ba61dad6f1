//! Sales Insights is a small web service for analysing product sales.
//!
//! This library provides a JSON REST API with read-only queries over a store
//! of sale transactions: a paginated listing, monthly statistics, a price
//! histogram, a category breakdown and a combined view of all four.
//!
//! Every query is scoped to a month of the year. The year is ignored, so
//! `month=3` selects sales made in any March.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod bar_chart;
mod combined;
mod db;
mod endpoints;
mod handlers;
mod logging;
mod month;
mod pagination;
mod pie_chart;
mod routing;
mod sql;
mod statistics;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use bar_chart::{PriceRangeCount, get_price_histogram};
pub use combined::{CombinedView, get_combined_view};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::SaleMonth;
pub use pagination::{PageRequest, PaginationConfig};
pub use pie_chart::{CategoryCount, get_category_breakdown};
pub use routing::build_router;
pub use statistics::{SaleStatistics, get_sale_statistics};
pub use transaction::{
    ListTransactionsQuery, NewTransaction, Transaction, count_transactions, create_transaction,
    list_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A query parameter was missing or could not be understood.
    ///
    /// `name` is the query parameter as it appears in the URL, e.g. "perPage".
    #[error("invalid query parameter \"{name}\": {reason}")]
    InvalidParameter {
        /// The name of the offending query parameter.
        name: &'static str,
        /// A description of what was wrong with the value.
        reason: String,
    },

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    ///
    /// The inner error should only be logged on the server. Clients are told
    /// that the store is unavailable without any further detail.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<QueryRejection> for Error {
    fn from(value: QueryRejection) -> Self {
        Error::InvalidParameter {
            name: "query",
            reason: value.body_text(),
        }
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// A stable, machine readable error code.
    code: &'static str,
    /// A human readable description of the error.
    message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Error::InvalidParameter { .. } => "INVALID_PARAMETER",
            Error::NotFound => "NOT_FOUND",
            Error::SqlError(_) => "STORE_UNAVAILABLE",
            Error::DatabaseLockError => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = match &self {
            Error::InvalidParameter { .. } | Error::NotFound => self.to_string(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        };

        let body = ErrorBody {
            code: self.code(),
            message,
        };

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod error_response_tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    use crate::Error;

    async fn into_json(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        (
            status,
            serde_json::from_slice(&body).expect("Could not parse body as JSON"),
        )
    }

    #[tokio::test]
    async fn invalid_parameter_is_bad_request() {
        let (status, body) = into_json(Error::InvalidParameter {
            name: "month",
            reason: "must be between 1 and 12".to_owned(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PARAMETER");
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("month"), "'{message}' should name the parameter");
    }

    #[tokio::test]
    async fn sql_error_does_not_leak_details() {
        let (status, body) =
            into_json(Error::SqlError(rusqlite::Error::InvalidColumnName(
                "secret_column".to_owned(),
            )))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORE_UNAVAILABLE");
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("secret_column"));
    }
}
