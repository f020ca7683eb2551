use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{auth, health, jobs, leaderboard, portfolio, prices, stocks, users, watchlist};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/users", users::router())
        .nest("/api/stocks", stocks::router())
        .nest("/api/prices", prices::router())
        .nest("/api/portfolio", portfolio::router())
        .nest("/api/watchlist", watchlist::router())
        .nest("/api/leaderboard", leaderboard::router())
        .nest("/api/jobs", jobs::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
