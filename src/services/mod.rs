pub mod auth_service;
pub mod trade_service;
pub mod price_service;
pub mod watchlist_service;
pub mod portfolio_service;
pub mod leaderboard_service;
pub mod rate_limiter;
pub mod job_scheduler_service;
