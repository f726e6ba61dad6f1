//! The API endpoints URIs.

/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
/// The route for listing a page of a month's transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a month's sale statistics.
pub const STATISTICS: &str = "/api/statistics";
/// The route for a month's price histogram.
pub const BAR_CHART: &str = "/api/bar-chart";
/// The route for a month's transaction count per category.
pub const PIE_CHART: &str = "/api/pie-chart";
/// The route for the transactions, statistics and charts in one response.
pub const COMBINED: &str = "/api/combined";
