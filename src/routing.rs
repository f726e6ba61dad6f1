//! Application router configuration.

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    handlers::{
        get_404_not_found, get_bar_chart, get_combined, get_health, get_pie_chart, get_statistics,
        get_transactions,
    },
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
///
/// Every route accepts cross-origin requests so that a separately hosted
/// dashboard can call the API.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .route(endpoints::COMBINED, get(get_combined))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod cors_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, build_router, endpoints, pagination::PaginationConfig};

    #[tokio::test]
    async fn allows_cross_origin_requests() {
        let state = AppState::new(
            Connection::open_in_memory().expect("Could not open in-memory SQLite database"),
            PaginationConfig::default(),
        )
        .expect("Could not create app state");
        let server = TestServer::new(build_router(state)).expect("Could not create test server.");

        let response = server
            .get(endpoints::HEALTH)
            .add_header("origin", "http://localhost:3000")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("access-control-allow-origin"), "*");
    }
}
