pub mod stock_queries;
pub mod price_queries;
pub mod user_queries;
pub mod holding_queries;
pub mod watchlist_queries;
